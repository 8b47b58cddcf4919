//! Test doubles for the engine adapter and the state store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashSet;

use session_placement::engine::{
    EngineError, EngineResult, PlacementEngineAdapter, PlacementSubmission,
};
use session_placement::events::PlacementEvent;
use session_placement::store::{
    InMemoryPlacementStore, PlacementStateStore, PlacementTimeline, StoreError, StoreResult,
};

/// Engine that records every submission and acknowledges it
#[derive(Debug, Default)]
pub struct RecordingEngine {
    submissions: Mutex<Vec<PlacementSubmission>>,
    unavailable: bool,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine that refuses every submission as unavailable
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    pub fn submissions(&self) -> Vec<PlacementSubmission> {
        self.submissions.lock().clone()
    }
}

#[async_trait]
impl PlacementEngineAdapter for RecordingEngine {
    async fn start_placement(&self, submission: &PlacementSubmission) -> EngineResult<String> {
        if self.unavailable {
            return Err(EngineError::unavailable("engine offline"));
        }
        self.submissions.lock().push(submission.clone());
        Ok(submission.placement_id.clone())
    }
}

/// In-memory store that fails writes for chosen placement ids
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: InMemoryPlacementStore,
    failing: Mutex<HashSet<String>>,
}

impl FlakyStore {
    pub fn failing_for<I, S>(placement_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: InMemoryPlacementStore::new(),
            failing: Mutex::new(placement_ids.into_iter().map(Into::into).collect()),
        }
    }

    pub fn recover(&self, placement_id: &str) {
        self.failing.lock().remove(placement_id);
    }
}

#[async_trait]
impl PlacementStateStore for FlakyStore {
    async fn upsert(&self, event: &PlacementEvent) -> StoreResult<()> {
        if self.failing.lock().contains(&event.placement_id) {
            return Err(StoreError::unavailable("simulated write failure"));
        }
        self.inner.upsert(event).await
    }

    async fn get(&self, placement_id: &str) -> StoreResult<PlacementTimeline> {
        self.inner.get(placement_id).await
    }

    async fn reclaim_expired(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        self.inner.reclaim_expired(now).await
    }

    fn backend_name(&self) -> &'static str {
        "flaky"
    }
}
