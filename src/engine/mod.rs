//! # Placement Engine Adapter
//!
//! Narrow boundary to the external placement engine: submit a request carrying the
//! queue's policy, get a placement id back. Lifecycle outcomes come back
//! asynchronously through the notification transport.

pub mod adapter;
pub mod client;
pub mod types;

pub use adapter::{EngineError, EngineResult, PlacementEngineAdapter};
pub use client::PlacementClient;
pub use types::{DesiredPlayer, PlacementRequest, PlacementSubmission, PlayerLatency};
