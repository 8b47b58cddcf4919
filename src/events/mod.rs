//! Placement notification parsing and normalization.

pub mod envelope;
pub mod errors;
pub mod normalizer;
pub mod types;

pub use envelope::NotificationEnvelope;
pub use errors::{NormalizationError, NormalizationResult};
pub use normalizer::{normalize, EventNormalizer, DEFAULT_RETENTION_DAYS, UNKNOWN_REGION};
pub use types::{Fulfillment, PlacementEvent, PlacementEventType};
