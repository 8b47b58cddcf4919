//! # Placement System
//!
//! Wires the configured store, clock, normalizer and pipeline together so a
//! host (a notification handler, a game backend) gets one handle to hold.

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigManager, PlacementConfig, StoreBackend};
use crate::engine::{PlacementClient, PlacementEngineAdapter};
use crate::error::PlacementResult;
use crate::events::EventNormalizer;
use crate::reconciliation::ReconciliationPipeline;
use crate::store::{ExpiryReclaimer, InMemoryPlacementStore, PlacementStateStore};
use crate::transport::{handle_notification_batch, HandlerResponse, NotificationBatch};

/// Shared placement dependencies built from configuration
#[derive(Clone)]
pub struct PlacementSystem {
    /// System instance ID
    pub system_id: Uuid,
    config: PlacementConfig,
    clock: Arc<dyn Clock>,
    store: Arc<dyn PlacementStateStore>,
    pipeline: ReconciliationPipeline,
}

impl std::fmt::Debug for PlacementSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacementSystem")
            .field("system_id", &self.system_id)
            .field("queue_name", &self.config.queue.name)
            .field("store_backend", &self.store.backend_name())
            .field("clock", &self.clock)
            .finish()
    }
}

impl PlacementSystem {
    /// Load configuration from the environment and bootstrap
    pub async fn new() -> PlacementResult<Self> {
        let manager = ConfigManager::load()?;
        Self::bootstrap(manager.config()).await
    }

    /// Build the store named by `config.store.backend` and wire the pipeline to it
    pub async fn bootstrap(config: &PlacementConfig) -> PlacementResult<Self> {
        config.validate()?;

        let store: Arc<dyn PlacementStateStore> = match config.store.backend {
            StoreBackend::Memory => Arc::new(InMemoryPlacementStore::new()),
            #[cfg(feature = "postgres")]
            StoreBackend::Postgres => {
                let store = crate::store::PgPlacementStore::connect(&config.store).await?;
                if config.store.auto_create_schema {
                    store.ensure_schema().await?;
                }
                Arc::new(store)
            }
            #[cfg(not(feature = "postgres"))]
            StoreBackend::Postgres => {
                return Err(crate::config::ConfigError::invalid_value(
                    "store.backend",
                    "postgres",
                    "crate was built without the `postgres` feature",
                )
                .into())
            }
        };

        Ok(Self::with_store(config.clone(), store, Arc::new(SystemClock)))
    }

    /// Assemble around an existing store and clock
    pub fn with_store(
        config: PlacementConfig,
        store: Arc<dyn PlacementStateStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let normalizer =
            EventNormalizer::new(clock.clone()).with_retention(config.store.retention());
        let pipeline = ReconciliationPipeline::new(normalizer, store.clone());
        let system_id = Uuid::new_v4();

        info!(
            system_id = %system_id,
            queue_name = %config.queue.name,
            store_backend = store.backend_name(),
            retention_days = config.store.retention_days,
            "Placement system initialized"
        );

        Self {
            system_id,
            config,
            clock,
            store,
            pipeline,
        }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<dyn PlacementStateStore> {
        self.store.clone()
    }

    pub fn pipeline(&self) -> &ReconciliationPipeline {
        &self.pipeline
    }

    pub async fn handle_notifications(&self, batch: &NotificationBatch) -> HandlerResponse {
        handle_notification_batch(&self.pipeline, batch).await
    }

    /// Client for the configured queue, submitting through `engine`
    pub fn placement_client(
        &self,
        engine: Arc<dyn PlacementEngineAdapter>,
    ) -> PlacementResult<PlacementClient> {
        PlacementClient::from_config(&self.config.queue, engine)
    }

    pub fn reclaimer(&self) -> ExpiryReclaimer {
        ExpiryReclaimer::new(
            self.store.clone(),
            self.clock.clone(),
            self.config.store.reclaim_interval(),
        )
    }

    /// Start the expiry loop; it stops when `shutdown` flips to `true`
    pub fn spawn_reclaimer(&self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        self.reclaimer().spawn(shutdown)
    }
}
