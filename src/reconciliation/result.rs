use thiserror::Error;
use uuid::Uuid;

use crate::events::NormalizationError;
use crate::store::StoreError;

/// Why a single record was abandoned
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordErrorKind {
    #[error(transparent)]
    Normalization(#[from] NormalizationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One abandoned record, kept for observability only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordError {
    /// Position of the record within its batch
    pub index: usize,
    /// Known only when normalization got far enough to read it
    pub placement_id: Option<String>,
    pub error: RecordErrorKind,
    /// Offending record content
    pub record: String,
}

/// Outcome of one batch invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub batch_id: Uuid,
    pub attempted: usize,
    pub succeeded: usize,
    pub errors: Vec<RecordError>,
}

impl BatchResult {
    pub fn new(batch_id: Uuid) -> Self {
        Self {
            batch_id,
            attempted: 0,
            succeeded: 0,
            errors: Vec::new(),
        }
    }

    pub fn failed(&self) -> usize {
        self.errors.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.errors.is_empty()
    }

    /// Indexes of records that were abandoned
    pub fn failed_indexes(&self) -> Vec<usize> {
        self.errors.iter().map(|e| e.index).collect()
    }
}
