use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use super::types::PlacementSubmission;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Placement engine unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Placement engine rejected placement {placement_id}: {reason}")]
    Rejected {
        placement_id: String,
        reason: String,
    },

    #[error("Invalid placement request: {reason}")]
    InvalidRequest { reason: String },
}

impl EngineError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn rejected(placement_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            placement_id: placement_id.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Boundary to the external placement engine.
///
/// `start_placement` returns as soon as the engine accepts the request. Outcomes
/// arrive later as notifications handled by the reconciliation pipeline; there is
/// no polling through this trait.
#[async_trait]
pub trait PlacementEngineAdapter: Send + Sync + Debug {
    /// Submit a placement and return the placement id the engine acknowledged
    async fn start_placement(&self, submission: &PlacementSubmission) -> EngineResult<String>;
}
