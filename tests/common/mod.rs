//! Shared helpers for integration tests

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod builders;
pub mod mocks;
pub mod strategies;

pub use builders::*;
pub use mocks::*;

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use session_placement::clock::ManualClock;
use session_placement::events::EventNormalizer;
use session_placement::reconciliation::ReconciliationPipeline;
use session_placement::store::{InMemoryPlacementStore, PlacementStateStore};

/// Fixed ingestion instant used across tests
pub fn ingestion_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

/// Pipeline over a fresh in-memory store and a manual clock
pub struct PipelineFixture {
    pub pipeline: ReconciliationPipeline,
    pub store: Arc<InMemoryPlacementStore>,
    pub clock: Arc<ManualClock>,
}

impl PipelineFixture {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new(ingestion_start()));
        let store = Arc::new(InMemoryPlacementStore::new());
        let pipeline = ReconciliationPipeline::new(
            EventNormalizer::new(clock.clone()),
            store.clone() as Arc<dyn PlacementStateStore>,
        );
        Self {
            pipeline,
            store,
            clock,
        }
    }

    /// Pipeline over an arbitrary store, sharing this fixture's clock
    pub fn with_store(store: Arc<dyn PlacementStateStore>) -> (ReconciliationPipeline, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(ingestion_start()));
        let pipeline = ReconciliationPipeline::new(EventNormalizer::new(clock.clone()), store);
        (pipeline, clock)
    }
}
