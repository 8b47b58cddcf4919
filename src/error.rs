//! Error types for the placement core.
//!

use thiserror::Error;

use crate::config::ConfigError;
use crate::engine::EngineError;
use crate::events::NormalizationError;
use crate::policy::ConfigurationError;
use crate::store::StoreError;

/// Top-level error for operations that span components (submission, bootstrap).
///
/// Per-record failures inside the reconciliation pipeline never surface as this
/// type; they are collected into the batch result instead.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error(transparent)]
    Normalization(#[from] NormalizationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Policy(#[from] ConfigurationError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PlacementError {
    /// Whether the failure is tied to one record and can be skipped.
    pub fn is_per_record(&self) -> bool {
        matches!(self, Self::Normalization(_) | Self::Store(_))
    }
}

pub type PlacementResult<T> = Result<T, PlacementError>;
