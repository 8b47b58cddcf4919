#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Session Placement
//!
//! Core of a matchmaking placement service: a queue-level placement policy
//! submitted with every request, and a reconciler that turns asynchronous
//! placement lifecycle notifications into a queryable per-placement timeline.
//!
//! ## Overview
//!
//! A game backend asks an external placement engine to find a hosting location
//! for a new game session. The engine answers immediately with a placement id
//! and later publishes lifecycle events (submitted, fulfilled, timed out,
//! cancelled, failed) to a notification topic. This crate:
//!
//! - builds the time-phased latency schedule and priority ordering for the queue
//! - submits placement requests through a narrow engine adapter
//! - normalizes each notification into a flat [`events::PlacementEvent`]
//! - persists events keyed by `(placement_id, observed_at)` with a retention horizon
//! - reads a placement's history back as a [`store::PlacementTimeline`]
//!
//! ## Module Organization
//!
//! - [`policy`] - Latency phases and destination priority ordering
//! - [`engine`] - Placement engine adapter and request client
//! - [`events`] - Notification envelope parsing and normalization
//! - [`store`] - State store trait, in-memory and PostgreSQL backends, expiry
//! - [`reconciliation`] - Batch pipeline with per-record error isolation
//! - [`transport`] - Notification batch wire format and handler
//! - [`config`] - Layered configuration
//! - [`system`] - Bootstrap from configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use session_placement::config::PlacementConfig;
//! use session_placement::system::PlacementSystem;
//! use session_placement::transport::NotificationBatch;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! session_placement::logging::init_tracing();
//!
//! let system = PlacementSystem::bootstrap(&PlacementConfig::default()).await?;
//! let batch = NotificationBatch::parse(r#"{"Records":[]}"#)?;
//! let response = system.handle_notifications(&batch).await;
//! assert_eq!(response.status_code, 200);
//!
//! let timeline = system.pipeline().timeline("p-1").await?;
//! println!("p-1 is {:?}", timeline.current_status());
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod logging;
pub mod policy;
pub mod reconciliation;
pub mod store;
pub mod system;
pub mod transport;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, ConfigManager, PlacementConfig};
pub use engine::{PlacementClient, PlacementEngineAdapter, PlacementRequest};
pub use error::{PlacementError, PlacementResult};
pub use events::{EventNormalizer, NormalizationError, PlacementEvent, PlacementEventType};
pub use policy::{build_policy, ConfigurationError, PlacementRequestPolicy, PolicyConfig};
pub use reconciliation::{BatchResult, ReconciliationPipeline};
pub use store::{InMemoryPlacementStore, PlacementStateStore, PlacementTimeline, StoreError};
pub use system::PlacementSystem;
pub use transport::{handle_notification_batch, HandlerResponse, NotificationBatch};
