use serde::{Deserialize, Serialize};

use crate::policy::PlacementRequestPolicy;

/// Latency one player observed to one region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLatency {
    pub player_id: String,
    pub region: String,
    pub latency_ms: u32,
}

/// Player that should receive a session once the placement is fulfilled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesiredPlayer {
    pub player_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_data: Option<String>,
}

/// Caller-supplied part of a placement request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRequest {
    /// Generated when not supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_session_name: Option<String>,
    pub maximum_player_count: u32,
    #[serde(default)]
    pub players: Vec<DesiredPlayer>,
    #[serde(default)]
    pub player_latencies: Vec<PlayerLatency>,
    /// Candidate destinations; empty means every destination on the queue
    #[serde(default)]
    pub destinations: Vec<String>,
    /// Per-request location order, only valid on queues that prioritize LOCATION
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_order: Option<Vec<String>>,
}

impl PlacementRequest {
    pub fn new(maximum_player_count: u32) -> Self {
        Self {
            maximum_player_count,
            ..Default::default()
        }
    }

    pub fn with_placement_id(mut self, placement_id: impl Into<String>) -> Self {
        self.placement_id = Some(placement_id.into());
        self
    }

    pub fn with_game_session_name(mut self, name: impl Into<String>) -> Self {
        self.game_session_name = Some(name.into());
        self
    }

    pub fn with_player(mut self, player_id: impl Into<String>) -> Self {
        self.players.push(DesiredPlayer {
            player_id: player_id.into(),
            player_data: None,
        });
        self
    }

    pub fn with_latency(
        mut self,
        player_id: impl Into<String>,
        region: impl Into<String>,
        latency_ms: u32,
    ) -> Self {
        self.player_latencies.push(PlayerLatency {
            player_id: player_id.into(),
            region: region.into(),
            latency_ms,
        });
        self
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destinations.push(destination.into());
        self
    }

    pub fn with_location_order(mut self, locations: Vec<String>) -> Self {
        self.location_order = Some(locations);
        self
    }
}

/// Everything the engine receives for one placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementSubmission {
    pub placement_id: String,
    pub queue_name: String,
    pub policy: PlacementRequestPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_session_name: Option<String>,
    pub maximum_player_count: u32,
    pub players: Vec<DesiredPlayer>,
    pub player_latencies: Vec<PlayerLatency>,
    pub destinations: Vec<String>,
}
