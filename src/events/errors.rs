//! # Normalization Error Types
//!
//! Failures that make a single notification record unusable. They are never
//! fatal to the batch the record arrived in.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    #[error("Missing detail: {reason}")]
    MissingDetail { reason: String },

    #[error("Malformed payload: {reason}")]
    MalformedPayload { reason: String },
}

impl NormalizationError {
    /// Create a missing detail error
    pub fn missing_detail(reason: impl Into<String>) -> Self {
        Self::MissingDetail {
            reason: reason.into(),
        }
    }

    /// Create a malformed payload error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for NormalizationError {
    fn from(err: serde_json::Error) -> Self {
        NormalizationError::malformed(err.to_string())
    }
}

pub type NormalizationResult<T> = Result<T, NormalizationError>;
