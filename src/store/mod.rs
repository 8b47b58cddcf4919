//! # Placement State Store
//!
//! Durable keyed storage of per-placement timelines.
//!
//! Writes are idempotent on `(placement_id, observed_at)`: replaying an identical
//! event leaves the stored state unchanged, while the same logical event at a new
//! ingestion time becomes a new timeline entry. Backends must tolerate concurrent
//! writers without external locking.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

pub mod errors;
pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod reclaimer;
pub mod timeline;

pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryPlacementStore;
#[cfg(feature = "postgres")]
pub use postgres::{PgPlacementStore, PlacementEventRow};
pub use reclaimer::ExpiryReclaimer;
pub use timeline::PlacementTimeline;

use crate::events::PlacementEvent;

/// Storage boundary used by the reconciliation pipeline
#[async_trait]
pub trait PlacementStateStore: Send + Sync + Debug {
    /// Insert or overwrite the event at its `(placement_id, observed_at)` key
    async fn upsert(&self, event: &PlacementEvent) -> StoreResult<()>;

    /// All events for a placement, oldest first. Unknown ids yield an empty timeline.
    async fn get(&self, placement_id: &str) -> StoreResult<PlacementTimeline>;

    /// Delete events whose `expires_at` is at or before `now`; returns the count removed
    async fn reclaim_expired(&self, now: DateTime<Utc>) -> StoreResult<u64>;

    fn backend_name(&self) -> &'static str;
}
