//! # Store Error Types

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Placement store unavailable: {reason}")]
    Unavailable { reason: String },

    /// Identical keys are last-write-wins, so no backend is expected to report this
    #[error("Conflicting write for placement {placement_id} at {observed_at}")]
    ConflictingWrite {
        placement_id: String,
        observed_at: DateTime<Utc>,
    },

    #[error("Stored record for placement {placement_id} is unreadable: {reason}")]
    CorruptRecord {
        placement_id: String,
        reason: String,
    },
}

impl StoreError {
    /// Create an unavailable error
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => StoreError::unavailable("connection pool timed out"),
            sqlx::Error::PoolClosed => StoreError::unavailable("connection pool is closed"),
            _ => StoreError::unavailable(err.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
