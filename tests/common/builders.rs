//! Builders for placement notification payloads

use serde_json::{json, Map, Value};

/// Builds the `{region, detail}` envelope the placement engine publishes
#[derive(Debug, Clone, Default)]
pub struct NotificationBuilder {
    region: Option<String>,
    detail: Map<String, Value>,
    omit_detail: bool,
}

impl NotificationBuilder {
    pub fn new(placement_id: &str) -> Self {
        let mut detail = Map::new();
        detail.insert("placementId".to_string(), json!(placement_id));
        Self {
            region: Some("us-east-1".to_string()),
            detail,
            omit_detail: false,
        }
    }

    /// Envelope whose detail has no placementId
    pub fn anonymous() -> Self {
        Self {
            region: Some("us-east-1".to_string()),
            ..Default::default()
        }
    }

    pub fn without_detail(mut self) -> Self {
        self.omit_detail = true;
        self
    }

    pub fn without_region(mut self) -> Self {
        self.region = None;
        self
    }

    pub fn region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
        self
    }

    pub fn event_type(self, source_type: &str) -> Self {
        self.field("type", json!(source_type))
    }

    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.detail.insert(key.to_string(), value);
        self
    }

    pub fn submitted(self) -> Self {
        self.event_type("PlacementSubmitted")
            .field("startTime", json!("2026-03-01T11:59:58Z"))
    }

    pub fn fulfilled(self) -> Self {
        self.event_type("PlacementFulfilled")
            .field("startTime", json!("2026-03-01T11:59:58Z"))
            .field("endTime", json!("2026-03-01T12:00:03Z"))
            .field("port", json!("7777"))
            .field("ipAddress", json!("10.0.0.1"))
            .field("dnsName", json!("ec2-10-0-0-1.compute.amazonaws.com"))
            .field("gameSessionRegion", json!("us-west-2"))
            .field(
                "gameSessionArn",
                json!("arn:aws:gamelift:us-west-2::gamesession/fleet-1/gsess-1"),
            )
            .field(
                "placedPlayerSessions",
                json!([{"playerId": "player-1", "playerSessionId": "psess-1"}]),
            )
    }

    pub fn to_value(&self) -> Value {
        let mut envelope = Map::new();
        if let Some(region) = &self.region {
            envelope.insert("region".to_string(), json!(region));
        }
        if !self.omit_detail {
            envelope.insert("detail".to_string(), Value::Object(self.detail.clone()));
        }
        Value::Object(envelope)
    }

    pub fn build(&self) -> String {
        self.to_value().to_string()
    }
}
