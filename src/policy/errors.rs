use thiserror::Error;

use super::types::PriorityDimension;

/// Policy configuration rejected before it can reach the placement engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("LOCATION priority requires at least one entry in the location order")]
    LocationPriorityWithoutLocations,

    #[error("Location order override requires a policy that prioritizes LOCATION")]
    LocationOverrideWithoutPriority,

    #[error("Placement policy must contain at least one latency phase")]
    NoLatencyPhases,

    #[error("Latency phase {index} has a zero duration")]
    ZeroPhaseDuration { index: usize },

    #[error("Placement timeout must be positive")]
    ZeroTimeout,

    #[error("Priority dimension {dimension} appears more than once")]
    DuplicatePriority { dimension: PriorityDimension },
}

pub type PolicyResult<T> = Result<T, ConfigurationError>;
