//! # Placement Policy Model
//!
//! Builds the time-phased latency schedule and the destination tie-break ordering
//! submitted with every placement request. The placement engine evaluates the
//! policy; this module only produces and validates it.

pub mod builder;
pub mod errors;
pub mod types;

pub use builder::{
    build_policy, PolicyConfig, DEFAULT_LATENCY_PHASES, DEFAULT_PLACEMENT_TIMEOUT_SECONDS,
    LOCATION_FIRST_PRIORITY,
};
pub use errors::{ConfigurationError, PolicyResult};
pub use types::{LatencyPhase, PlacementRequestPolicy, PriorityDimension};
