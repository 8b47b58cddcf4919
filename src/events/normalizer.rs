//! # Event Normalizer
//!
//! Turns one raw notification payload into a canonical [`PlacementEvent`].
//!
//! The only side input is the ingestion clock: `observed_at` is the time the
//! record was normalized, and `expires_at` is that time plus the retention window.
//! Missing optional fields are left unset rather than defaulted.

use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::envelope::{scalar_field, string_field, NotificationEnvelope};
use super::errors::{NormalizationError, NormalizationResult};
use super::types::{Fulfillment, PlacementEvent, PlacementEventType};
use crate::clock::{Clock, SystemClock};

/// Default retention window for ingested events
pub const DEFAULT_RETENTION_DAYS: i64 = 14;

/// Region recorded when the envelope carries none
pub const UNKNOWN_REGION: &str = "unknown";

/// Normalizer bound to an ingestion clock and retention window
#[derive(Debug, Clone)]
pub struct EventNormalizer {
    clock: Arc<dyn Clock>,
    retention: Duration,
}

impl EventNormalizer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            retention: Duration::days(DEFAULT_RETENTION_DAYS),
        }
    }

    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Normalize a record, stamping it with the current clock reading
    pub fn normalize(&self, raw: &str) -> NormalizationResult<PlacementEvent> {
        self.normalize_at(raw, self.clock.now())
    }

    /// Normalize a record as if ingested at `ingested_at`
    pub fn normalize_at(
        &self,
        raw: &str,
        ingested_at: DateTime<Utc>,
    ) -> NormalizationResult<PlacementEvent> {
        let envelope = NotificationEnvelope::parse(raw)?;

        let detail = envelope
            .detail
            .ok_or_else(|| NormalizationError::missing_detail("detail is absent"))?;
        let placement_id = string_field(&detail, "placementId")?
            .ok_or_else(|| NormalizationError::missing_detail("detail.placementId is absent"))?;

        let source_type = string_field(&detail, "type")?;
        let event_type = PlacementEventType::from_source_type(source_type.as_deref());

        let fulfillment = if event_type == PlacementEventType::Fulfilled {
            Some(extract_fulfillment(&detail)?)
        } else {
            None
        };

        Ok(PlacementEvent {
            placement_id,
            event_type,
            source_type,
            observed_at: ingested_at,
            source_region: envelope
                .region
                .unwrap_or_else(|| UNKNOWN_REGION.to_string()),
            start_time: string_field(&detail, "startTime")?,
            end_time: string_field(&detail, "endTime")?,
            fulfillment,
            raw_payload: raw.to_string(),
            expires_at: ingested_at + self.retention,
        })
    }
}

impl Default for EventNormalizer {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

/// Normalize with the system clock and default retention
pub fn normalize(raw: &str) -> NormalizationResult<PlacementEvent> {
    EventNormalizer::default().normalize(raw)
}

fn extract_fulfillment(detail: &Map<String, Value>) -> NormalizationResult<Fulfillment> {
    let placed_player_sessions = match detail.get("placedPlayerSessions") {
        None | Some(Value::Null) => None,
        Some(sessions) => Some(serde_json::to_string(sessions)?),
    };

    Ok(Fulfillment {
        port: scalar_field(detail, "port")?,
        ip_address: scalar_field(detail, "ipAddress")?,
        dns_name: scalar_field(detail, "dnsName")?,
        game_session_region: scalar_field(detail, "gameSessionRegion")?,
        game_session_arn: scalar_field(detail, "gameSessionArn")?,
        placed_player_sessions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::TimeZone;
    use serde_json::json;

    fn ingested_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn normalizer() -> EventNormalizer {
        EventNormalizer::new(Arc::new(ManualClock::new(ingested_at())))
    }

    #[test]
    fn test_fulfilled_event_keeps_only_present_fields() {
        let raw = json!({
            "region": "us-east-1",
            "detail": {
                "placementId": "p-1",
                "type": "PlacementFulfilled",
                "port": "7777",
                "ipAddress": "1.2.3.4"
            }
        })
        .to_string();

        let event = normalizer().normalize(&raw).unwrap();
        assert_eq!(event.placement_id, "p-1");
        assert_eq!(event.event_type, PlacementEventType::Fulfilled);
        assert_eq!(event.source_type.as_deref(), Some("PlacementFulfilled"));
        assert_eq!(event.source_region, "us-east-1");
        assert_eq!(event.raw_payload, raw);

        let fulfillment = event.fulfillment.unwrap();
        assert_eq!(fulfillment.port.as_deref(), Some("7777"));
        assert_eq!(fulfillment.ip_address.as_deref(), Some("1.2.3.4"));
        assert!(fulfillment.dns_name.is_none());
        assert!(fulfillment.game_session_arn.is_none());
        assert!(fulfillment.placed_player_sessions.is_none());
    }

    #[test]
    fn test_timestamps_come_from_clock() {
        let raw = r#"{"detail":{"placementId":"p-2","type":"PlacementTimedOut"}}"#;
        let event = normalizer().normalize(raw).unwrap();

        assert_eq!(event.observed_at, ingested_at());
        assert_eq!(event.expires_at, ingested_at() + Duration::days(14));
        assert_eq!(event.source_region, UNKNOWN_REGION);
        assert!(event.fulfillment.is_none());
    }

    #[test]
    fn test_custom_retention() {
        let raw = r#"{"detail":{"placementId":"p-2"}}"#;
        let event = normalizer()
            .with_retention(Duration::days(1))
            .normalize(raw)
            .unwrap();
        assert_eq!(event.expires_at, ingested_at() + Duration::days(1));
    }

    #[test]
    fn test_missing_type_is_unknown() {
        let raw = r#"{"region":"eu-west-1","detail":{"placementId":"p-3","startTime":"2026-03-01T11:59:00Z"}}"#;
        let event = normalizer().normalize(raw).unwrap();

        assert_eq!(event.event_type, PlacementEventType::Unknown);
        assert!(event.source_type.is_none());
        assert_eq!(event.start_time.as_deref(), Some("2026-03-01T11:59:00Z"));
        assert!(event.end_time.is_none());
    }

    #[test]
    fn test_missing_detail_and_placement_id() {
        let err = normalizer().normalize(r#"{"region":"us-east-1"}"#).unwrap_err();
        assert_eq!(err, NormalizationError::missing_detail("detail is absent"));

        let err = normalizer()
            .normalize(r#"{"detail":{"type":"PlacementFulfilled"}}"#)
            .unwrap_err();
        assert_eq!(
            err,
            NormalizationError::missing_detail("detail.placementId is absent")
        );

        let err = normalizer()
            .normalize(r#"{"detail":{"placementId":""}}"#)
            .unwrap_err();
        assert!(matches!(err, NormalizationError::MissingDetail { .. }));
    }

    #[test]
    fn test_malformed_payload() {
        let err = normalizer().normalize("{not json").unwrap_err();
        assert!(matches!(err, NormalizationError::MalformedPayload { .. }));

        let err = normalizer()
            .normalize(r#"{"detail":{"placementId":42}}"#)
            .unwrap_err();
        assert!(matches!(err, NormalizationError::MalformedPayload { .. }));
    }

    #[test]
    fn test_player_sessions_are_opaque_blob() {
        let sessions = json!([
            {"playerId": "player-1", "playerSessionId": "psess-1"},
            {"playerId": "player-2", "playerSessionId": "psess-2"}
        ]);
        let raw = json!({
            "detail": {
                "placementId": "p-4",
                "type": "PlacementFulfilled",
                "port": 7777,
                "dnsName": "ec2-1-2-3-4.compute.amazonaws.com",
                "gameSessionRegion": "us-west-2",
                "gameSessionArn": "arn:aws:gamelift:us-west-2::gamesession/fleet-1/gsess-1",
                "placedPlayerSessions": sessions
            }
        })
        .to_string();

        let fulfillment = normalizer().normalize(&raw).unwrap().fulfillment.unwrap();
        assert_eq!(fulfillment.port.as_deref(), Some("7777"));
        assert_eq!(fulfillment.game_session_region.as_deref(), Some("us-west-2"));

        let blob = fulfillment.placed_player_sessions.unwrap();
        let decoded: Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(decoded, sessions);
    }

    #[test]
    fn test_fulfillment_fields_ignored_for_other_types() {
        let raw = r#"{"detail":{"placementId":"p-5","type":"PlacementCancelled","port":"7777"}}"#;
        let event = normalizer().normalize(raw).unwrap();
        assert_eq!(event.event_type, PlacementEventType::Cancelled);
        assert!(event.fulfillment.is_none());
    }
}
