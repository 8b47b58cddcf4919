//! Submission of placement requests against one queue.

use std::sync::Arc;
use uuid::Uuid;

use super::adapter::{EngineError, PlacementEngineAdapter};
use super::types::{PlacementRequest, PlacementSubmission};
use crate::config::QueueConfig;
use crate::error::PlacementResult;
use crate::policy::{build_policy, PlacementRequestPolicy, PolicyConfig};

/// Owns the queue's default policy and the injected engine handle.
///
/// The policy is validated at construction, and again after per-request overrides,
/// so an invalid configuration never reaches the engine.
#[derive(Debug, Clone)]
pub struct PlacementClient {
    queue_name: String,
    policy: PlacementRequestPolicy,
    engine: Arc<dyn PlacementEngineAdapter>,
}

impl PlacementClient {
    pub fn new(
        queue_name: impl Into<String>,
        policy: PlacementRequestPolicy,
        engine: Arc<dyn PlacementEngineAdapter>,
    ) -> PlacementResult<Self> {
        policy.validate()?;
        Ok(Self {
            queue_name: queue_name.into(),
            policy,
            engine,
        })
    }

    /// Build the default policy from queue configuration
    pub fn from_config(
        queue: &QueueConfig,
        engine: Arc<dyn PlacementEngineAdapter>,
    ) -> PlacementResult<Self> {
        let policy = build_policy(&PolicyConfig::from(queue));
        Self::new(queue.name.clone(), policy, engine)
    }

    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    pub fn policy(&self) -> &PlacementRequestPolicy {
        &self.policy
    }

    /// Submit a placement and return its id.
    ///
    /// Lifecycle outcomes are not returned here; they arrive as notifications.
    pub async fn submit(&self, request: PlacementRequest) -> PlacementResult<String> {
        let submission = self.prepare(request)?;

        crate::log_policy!(
            info,
            "Submitting placement",
            placement_id: submission.placement_id,
            queue_name: submission.queue_name,
            players: submission.players.len(),
            destinations: submission.destinations.len()
        );

        let placement_id = self.engine.start_placement(&submission).await?;
        Ok(placement_id)
    }

    /// Resolve the effective policy and placement id for a request
    pub fn prepare(&self, request: PlacementRequest) -> PlacementResult<PlacementSubmission> {
        if request.maximum_player_count == 0 {
            return Err(EngineError::invalid_request("maximum_player_count must be positive").into());
        }
        if request.players.len() > request.maximum_player_count as usize {
            return Err(EngineError::invalid_request(format!(
                "{} players requested but maximum_player_count is {}",
                request.players.len(),
                request.maximum_player_count
            ))
            .into());
        }

        let policy = match request.location_order {
            Some(locations) => self.policy.clone().with_location_order(locations)?,
            None => self.policy.clone(),
        };

        Ok(PlacementSubmission {
            placement_id: request
                .placement_id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            queue_name: self.queue_name.clone(),
            policy,
            game_session_name: request.game_session_name,
            maximum_player_count: request.maximum_player_count,
            players: request.players,
            player_latencies: request.player_latencies,
            destinations: request.destinations,
        })
    }
}
