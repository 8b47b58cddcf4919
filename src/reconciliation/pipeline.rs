//! # Reconciliation Pipeline
//!
//! Normalizes each record of a notification batch and merges it into the
//! placement store with a single idempotent upsert.
//!
//! ## Partial failure
//!
//! Records are independent. A record that fails to normalize or to persist is
//! logged with its content and abandoned; the rest of the batch still runs and the
//! batch as a whole always completes. Failing the batch would make the transport
//! redeliver records that already succeeded. There is no retry here: recovery
//! relies on transport redelivery plus the idempotent store key.
//!
//! Separate batches may run concurrently on clones of the same pipeline.

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use super::result::{BatchResult, RecordError, RecordErrorKind};
use crate::events::{EventNormalizer, Fulfillment, PlacementEvent};
use crate::store::{PlacementStateStore, PlacementTimeline, StoreResult};

#[derive(Debug, Clone)]
pub struct ReconciliationPipeline {
    normalizer: EventNormalizer,
    store: Arc<dyn PlacementStateStore>,
}

impl ReconciliationPipeline {
    pub fn new(normalizer: EventNormalizer, store: Arc<dyn PlacementStateStore>) -> Self {
        Self { normalizer, store }
    }

    pub fn store(&self) -> &Arc<dyn PlacementStateStore> {
        &self.store
    }

    /// Process every record of a batch in order, isolating failures per record
    #[instrument(skip(self, records), fields(batch_size = records.len()))]
    pub async fn process_batch<R: AsRef<str>>(&self, records: &[R]) -> BatchResult {
        let mut result = BatchResult::new(Uuid::new_v4());

        for (index, record) in records.iter().enumerate() {
            let raw = record.as_ref();
            result.attempted += 1;

            match self.process_record(raw).await {
                Ok(event) => {
                    result.succeeded += 1;
                    if event.fulfillment.as_ref().is_some_and(Fulfillment::is_empty) {
                        crate::log_pipeline!(
                            warn,
                            "Fulfilled placement event carries no connection details",
                            batch_id: result.batch_id,
                            index: index,
                            placement_id: event.placement_id
                        );
                    }
                    crate::log_pipeline!(
                        debug,
                        "Processed placement event",
                        batch_id: result.batch_id,
                        index: index,
                        placement_id: event.placement_id,
                        event_type: event.event_type
                    );
                }
                Err((placement_id, error)) => {
                    crate::log_pipeline!(
                        error,
                        "Failed to process placement record",
                        batch_id: result.batch_id,
                        index: index,
                        placement_id: placement_id,
                        error: error.to_string(),
                        record: raw
                    );
                    result.errors.push(RecordError {
                        index,
                        placement_id,
                        error,
                        record: raw.to_string(),
                    });
                }
            }
        }

        crate::log_pipeline!(
            info,
            "Placement batch reconciled",
            batch_id: result.batch_id,
            attempted: result.attempted,
            succeeded: result.succeeded,
            failed: result.failed()
        );

        result
    }

    /// Normalize and persist one record
    async fn process_record(
        &self,
        raw: &str,
    ) -> Result<PlacementEvent, (Option<String>, RecordErrorKind)> {
        let event = self
            .normalizer
            .normalize(raw)
            .map_err(|e| (None, RecordErrorKind::from(e)))?;

        self.store
            .upsert(&event)
            .await
            .map_err(|e| (Some(event.placement_id.clone()), RecordErrorKind::from(e)))?;

        Ok(event)
    }

    /// Read back the reconciled timeline for a placement
    pub async fn timeline(&self, placement_id: &str) -> StoreResult<PlacementTimeline> {
        self.store.get(placement_id).await
    }
}
