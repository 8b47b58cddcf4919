//! In-process placement store backed by `DashMap`.
//!
//! Each placement id owns an ordered map keyed by `observed_at`, so writes to
//! different placements never contend and `get` needs no sorting.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::collections::BTreeMap;

use super::errors::StoreResult;
use super::timeline::PlacementTimeline;
use super::PlacementStateStore;
use crate::events::PlacementEvent;

#[derive(Debug, Default)]
pub struct InMemoryPlacementStore {
    placements: DashMap<String, BTreeMap<DateTime<Utc>, PlacementEvent>>,
}

impl InMemoryPlacementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of placements with at least one stored event
    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Total stored events across all placements
    pub fn event_count(&self) -> usize {
        self.placements.iter().map(|entry| entry.value().len()).sum()
    }
}

#[async_trait]
impl PlacementStateStore for InMemoryPlacementStore {
    async fn upsert(&self, event: &PlacementEvent) -> StoreResult<()> {
        let (placement_id, observed_at) = event.key();
        let mut events = self
            .placements
            .entry(placement_id.to_string())
            .or_default();

        if let Some(previous) = events.insert(observed_at, event.clone()) {
            if &previous != event {
                crate::log_store!(
                    warn,
                    "Replaced differing event at identical key",
                    placement_id: placement_id,
                    observed_at: observed_at,
                    backend: self.backend_name()
                );
            }
        }

        Ok(())
    }

    async fn get(&self, placement_id: &str) -> StoreResult<PlacementTimeline> {
        let events = self
            .placements
            .get(placement_id)
            .map(|entry| entry.value().values().cloned().collect())
            .unwrap_or_default();

        Ok(PlacementTimeline {
            placement_id: placement_id.to_string(),
            events,
        })
    }

    async fn reclaim_expired(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        let mut reclaimed = 0u64;

        for mut entry in self.placements.iter_mut() {
            let before = entry.value().len();
            entry.value_mut().retain(|_, event| !event.is_expired_at(now));
            reclaimed += (before - entry.value().len()) as u64;
        }
        self.placements.retain(|_, events| !events.is_empty());

        Ok(reclaimed)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
