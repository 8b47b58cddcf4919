//! Construction of the queue's default placement policy.

use serde::{Deserialize, Serialize};

use super::types::{LatencyPhase, PlacementRequestPolicy, PriorityDimension};

/// Fixed latency schedule: tight for the first five seconds, relaxed for the next
/// five, then effectively unbounded while player latency samples still exist.
pub const DEFAULT_LATENCY_PHASES: [LatencyPhase; 3] = [
    LatencyPhase::new(5, 150),
    LatencyPhase::new(5, 250),
    LatencyPhase::new(5, 10_000),
];

/// Overall placement timeout before the engine reports `PlacementTimedOut`
pub const DEFAULT_PLACEMENT_TIMEOUT_SECONDS: u32 = 60;

/// Tie-break order used when location is prioritized
pub const LOCATION_FIRST_PRIORITY: [PriorityDimension; 4] = [
    PriorityDimension::Location,
    PriorityDimension::Latency,
    PriorityDimension::Cost,
    PriorityDimension::Destination,
];

/// Inputs to [`build_policy`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub prioritize_location: bool,
    /// Home region of the placement queue
    pub home_region: String,
}

impl PolicyConfig {
    pub fn new(prioritize_location: bool, home_region: impl Into<String>) -> Self {
        Self {
            prioritize_location,
            home_region: home_region.into(),
        }
    }
}

/// Build the default policy attached to every placement request.
///
/// With location priority enabled the location order defaults to the home region
/// alone. Callers that need another region override it per request through
/// [`PlacementRequestPolicy::with_location_order`].
pub fn build_policy(config: &PolicyConfig) -> PlacementRequestPolicy {
    let (priority_order, location_order) = if config.prioritize_location {
        (
            Some(LOCATION_FIRST_PRIORITY.to_vec()),
            Some(vec![config.home_region.clone()]),
        )
    } else {
        (None, None)
    };

    crate::log_policy!(
        debug,
        "Built placement policy",
        prioritize_location: config.prioritize_location,
        home_region: config.home_region
    );

    PlacementRequestPolicy {
        latency_phases: DEFAULT_LATENCY_PHASES.to_vec(),
        priority_order,
        location_order,
        timeout_seconds: DEFAULT_PLACEMENT_TIMEOUT_SECONDS,
    }
}
