use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle stage reported by a placement notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlacementEventType {
    /// Placement request accepted by the engine
    Submitted,
    /// A destination was bound and player sessions were created
    Fulfilled,
    /// No destination satisfied the policy before the timeout
    TimedOut,
    /// Placement was cancelled before fulfillment
    Cancelled,
    /// Placement failed inside the engine
    Failed,
    /// Type missing or not recognized; the event is still recorded
    Unknown,
}

impl PlacementEventType {
    /// Map the engine's `detail.type` value to a lifecycle stage.
    ///
    /// Both the notification names (`PlacementFulfilled`) and the status names
    /// (`FULFILLED`) are accepted. Anything else is `Unknown`.
    pub fn from_source_type(source_type: Option<&str>) -> Self {
        match source_type {
            Some("PlacementSubmitted" | "PENDING") => Self::Submitted,
            Some("PlacementFulfilled" | "FULFILLED") => Self::Fulfilled,
            Some("PlacementTimedOut" | "TIMED_OUT") => Self::TimedOut,
            Some("PlacementCancelled" | "CANCELLED") => Self::Cancelled,
            Some("PlacementFailed" | "FAILED") => Self::Failed,
            _ => Self::Unknown,
        }
    }

    /// Check if this is a terminal stage (no further lifecycle events expected)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Fulfilled | Self::TimedOut | Self::Cancelled | Self::Failed
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::Fulfilled => "FULFILLED",
            Self::TimedOut => "TIMED_OUT",
            Self::Cancelled => "CANCELLED",
            Self::Failed => "FAILED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for PlacementEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlacementEventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUBMITTED" => Ok(Self::Submitted),
            "FULFILLED" => Ok(Self::Fulfilled),
            "TIMED_OUT" => Ok(Self::TimedOut),
            "CANCELLED" => Ok(Self::Cancelled),
            "FAILED" => Ok(Self::Failed),
            "UNKNOWN" => Ok(Self::Unknown),
            _ => Err(format!("Invalid placement event type: {s}")),
        }
    }
}

/// Connection details of a fulfilled placement. Every field is optional because
/// the engine may omit any of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_session_region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_session_arn: Option<String>,
    /// Player session list serialized as an opaque JSON string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placed_player_sessions: Option<String>,
}

impl Fulfillment {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Canonical, immutable fact about one placement at one ingestion instant.
///
/// Identity within the store is `(placement_id, observed_at)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementEvent {
    pub placement_id: String,
    pub event_type: PlacementEventType,
    /// `detail.type` exactly as the engine sent it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    /// Ingestion time, not the engine's own event time
    pub observed_at: DateTime<Utc>,
    /// Home region of the originating queue, `"unknown"` when absent
    pub source_region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Present only for `Fulfilled` events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfillment: Option<Fulfillment>,
    /// Notification payload as received
    pub raw_payload: String,
    pub expires_at: DateTime<Utc>,
}

impl PlacementEvent {
    /// Store key
    pub fn key(&self) -> (&str, DateTime<Utc>) {
        (&self.placement_id, self.observed_at)
    }

    /// Whether the retention horizon has passed at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
