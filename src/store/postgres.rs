//! PostgreSQL-backed placement store.
//!
//! Rows are keyed by `(placement_id, observed_at)`. Absent optional attributes are
//! written as NULL. Expiry is enforced by [`PlacementStateStore::reclaim_expired`],
//! normally driven by the [`super::ExpiryReclaimer`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use super::errors::{StoreError, StoreResult};
use super::timeline::PlacementTimeline;
use super::PlacementStateStore;
use crate::config::StoreConfig;
use crate::events::{Fulfillment, PlacementEvent, PlacementEventType};

const ACQUIRE_TIMEOUT_SECONDS: u64 = 5;

pub struct PgPlacementStore {
    pool: PgPool,
    table: String,
}

// Manual Debug implementation because the pool is not worth printing
impl std::fmt::Debug for PgPlacementStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgPlacementStore")
            .field("pool", &"PgPool")
            .field("table", &self.table)
            .finish()
    }
}

/// Row shape of the placement state table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlacementEventRow {
    pub placement_id: String,
    pub observed_at: DateTime<Utc>,
    pub event_type: String,
    pub source_type: Option<String>,
    pub source_region: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub port: Option<String>,
    pub ip_address: Option<String>,
    pub dns_name: Option<String>,
    pub game_session_region: Option<String>,
    pub game_session_arn: Option<String>,
    pub placed_player_sessions: Option<String>,
    pub raw_payload: String,
    pub expires_at: DateTime<Utc>,
}

impl From<&PlacementEvent> for PlacementEventRow {
    fn from(event: &PlacementEvent) -> Self {
        let fulfillment = event.fulfillment.clone().unwrap_or_default();
        Self {
            placement_id: event.placement_id.clone(),
            observed_at: event.observed_at,
            event_type: event.event_type.to_string(),
            source_type: event.source_type.clone(),
            source_region: event.source_region.clone(),
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
            port: fulfillment.port,
            ip_address: fulfillment.ip_address,
            dns_name: fulfillment.dns_name,
            game_session_region: fulfillment.game_session_region,
            game_session_arn: fulfillment.game_session_arn,
            placed_player_sessions: fulfillment.placed_player_sessions,
            raw_payload: event.raw_payload.clone(),
            expires_at: event.expires_at,
        }
    }
}

impl TryFrom<PlacementEventRow> for PlacementEvent {
    type Error = StoreError;

    fn try_from(row: PlacementEventRow) -> Result<Self, Self::Error> {
        let event_type: PlacementEventType =
            row.event_type
                .parse()
                .map_err(|reason: String| StoreError::CorruptRecord {
                    placement_id: row.placement_id.clone(),
                    reason,
                })?;

        // Fulfillment columns only carry meaning on fulfilled rows
        let fulfillment = (event_type == PlacementEventType::Fulfilled).then(|| Fulfillment {
            port: row.port,
            ip_address: row.ip_address,
            dns_name: row.dns_name,
            game_session_region: row.game_session_region,
            game_session_arn: row.game_session_arn,
            placed_player_sessions: row.placed_player_sessions,
        });

        Ok(PlacementEvent {
            placement_id: row.placement_id,
            event_type,
            source_type: row.source_type,
            observed_at: row.observed_at,
            source_region: row.source_region,
            start_time: row.start_time,
            end_time: row.end_time,
            fulfillment,
            raw_payload: row.raw_payload,
            expires_at: row.expires_at,
        })
    }
}

impl PgPlacementStore {
    /// Wrap an existing pool. `table` must already be a validated identifier.
    pub fn from_pool(pool: PgPool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }

    /// Connect using the store section of the configuration
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let database_url = config
            .database_url
            .as_deref()
            .ok_or_else(|| StoreError::unavailable("store.database_url is not configured"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECONDS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        crate::log_store!(
            info,
            "Connected placement store",
            table: config.table_name,
            max_connections: config.max_connections
        );

        Ok(Self::from_pool(pool, config.table_name.clone()))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Create the table and expiry index if missing.
    ///
    /// Production deployments apply `migrations/` out of band instead.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        let create_table = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                placement_id TEXT NOT NULL,
                observed_at TIMESTAMPTZ NOT NULL,
                event_type TEXT NOT NULL,
                source_type TEXT,
                source_region TEXT NOT NULL,
                start_time TEXT,
                end_time TEXT,
                port TEXT,
                ip_address TEXT,
                dns_name TEXT,
                game_session_region TEXT,
                game_session_arn TEXT,
                placed_player_sessions TEXT,
                raw_payload TEXT NOT NULL,
                expires_at TIMESTAMPTZ NOT NULL,
                PRIMARY KEY (placement_id, observed_at)
            )
            "#,
            table = self.table
        );
        let create_index = format!(
            "CREATE INDEX IF NOT EXISTS {table}_expires_at_idx ON {table} (expires_at)",
            table = self.table
        );

        sqlx::query(&create_table).execute(&self.pool).await?;
        sqlx::query(&create_index).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl PlacementStateStore for PgPlacementStore {
    async fn upsert(&self, event: &PlacementEvent) -> StoreResult<()> {
        let row = PlacementEventRow::from(event);
        let sql = format!(
            r#"
            INSERT INTO {table}
            (placement_id, observed_at, event_type, source_type, source_region,
             start_time, end_time, port, ip_address, dns_name, game_session_region,
             game_session_arn, placed_player_sessions, raw_payload, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ON CONFLICT (placement_id, observed_at) DO UPDATE SET
                event_type = EXCLUDED.event_type,
                source_type = EXCLUDED.source_type,
                source_region = EXCLUDED.source_region,
                start_time = EXCLUDED.start_time,
                end_time = EXCLUDED.end_time,
                port = EXCLUDED.port,
                ip_address = EXCLUDED.ip_address,
                dns_name = EXCLUDED.dns_name,
                game_session_region = EXCLUDED.game_session_region,
                game_session_arn = EXCLUDED.game_session_arn,
                placed_player_sessions = EXCLUDED.placed_player_sessions,
                raw_payload = EXCLUDED.raw_payload,
                expires_at = EXCLUDED.expires_at
            "#,
            table = self.table
        );

        sqlx::query(&sql)
            .bind(row.placement_id)
            .bind(row.observed_at)
            .bind(row.event_type)
            .bind(row.source_type)
            .bind(row.source_region)
            .bind(row.start_time)
            .bind(row.end_time)
            .bind(row.port)
            .bind(row.ip_address)
            .bind(row.dns_name)
            .bind(row.game_session_region)
            .bind(row.game_session_arn)
            .bind(row.placed_player_sessions)
            .bind(row.raw_payload)
            .bind(row.expires_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get(&self, placement_id: &str) -> StoreResult<PlacementTimeline> {
        let sql = format!(
            r#"
            SELECT placement_id, observed_at, event_type, source_type, source_region,
                   start_time, end_time, port, ip_address, dns_name, game_session_region,
                   game_session_arn, placed_player_sessions, raw_payload, expires_at
            FROM {table}
            WHERE placement_id = $1
            ORDER BY observed_at ASC
            "#,
            table = self.table
        );

        let rows = sqlx::query_as::<_, PlacementEventRow>(&sql)
            .bind(placement_id)
            .fetch_all(&self.pool)
            .await?;

        let events = rows
            .into_iter()
            .map(PlacementEvent::try_from)
            .collect::<StoreResult<Vec<_>>>()?;

        Ok(PlacementTimeline {
            placement_id: placement_id.to_string(),
            events,
        })
    }

    async fn reclaim_expired(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        let sql = format!(
            "DELETE FROM {table} WHERE expires_at <= $1",
            table = self.table
        );
        let result = sqlx::query(&sql).bind(now).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
