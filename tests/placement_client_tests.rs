//! Placement submission through the engine adapter

mod common;

use common::RecordingEngine;
use std::sync::Arc;
use std::time::Duration;

use session_placement::config::QueueConfig;
use session_placement::engine::{EngineError, PlacementClient, PlacementRequest};
use session_placement::policy::{ConfigurationError, PriorityDimension};
use session_placement::PlacementError;

fn queue(prioritize_location: bool) -> QueueConfig {
    QueueConfig {
        name: "arena-queue".to_string(),
        home_region: "us-east-1".to_string(),
        prioritize_location,
        notification_target: None,
    }
}

#[tokio::test]
async fn test_submission_carries_queue_policy() {
    let engine = Arc::new(RecordingEngine::new());
    let client = PlacementClient::from_config(&queue(false), engine.clone()).unwrap();

    let request = PlacementRequest::new(4)
        .with_placement_id("p-100")
        .with_game_session_name("ranked-match")
        .with_player("player-1")
        .with_latency("player-1", "us-east-1", 42)
        .with_latency("player-1", "us-west-2", 88);

    let placement_id = client.submit(request).await.unwrap();
    assert_eq!(placement_id, "p-100");

    let submissions = engine.submissions();
    assert_eq!(submissions.len(), 1);
    let submission = &submissions[0];
    assert_eq!(submission.queue_name, "arena-queue");
    assert_eq!(submission.player_latencies.len(), 2);
    assert!(submission.policy.priority_order.is_none());
    assert!(submission.policy.location_order.is_none());
    assert_eq!(submission.policy.timeout_seconds, 60);
    assert_eq!(
        submission.policy.max_latency_at(Duration::from_secs(7)),
        Some(250)
    );

    let wire = serde_json::to_value(submission).unwrap();
    assert!(wire["policy"].get("priorityOrder").is_none());
    assert_eq!(wire["policy"]["latencyPhases"][0]["maxIndividualLatencyMs"], 150);
}

#[tokio::test]
async fn test_generated_placement_ids_are_unique() {
    let engine = Arc::new(RecordingEngine::new());
    let client = PlacementClient::from_config(&queue(false), engine.clone()).unwrap();

    let first = client.submit(PlacementRequest::new(2)).await.unwrap();
    let second = client.submit(PlacementRequest::new(2)).await.unwrap();

    assert_ne!(first, second);
    assert!(uuid::Uuid::parse_str(&first).is_ok());
}

#[tokio::test]
async fn test_location_override_on_location_queue() {
    let engine = Arc::new(RecordingEngine::new());
    let client = PlacementClient::from_config(&queue(true), engine.clone()).unwrap();
    assert_eq!(
        client.policy().location_order.as_deref(),
        Some(&["us-east-1".to_string()][..])
    );

    let request = PlacementRequest::new(8)
        .with_location_order(vec!["eu-west-1".to_string(), "us-east-1".to_string()]);
    client.submit(request).await.unwrap();

    let policy = &engine.submissions()[0].policy;
    assert_eq!(
        policy.priority_order.as_deref(),
        Some(
            &[
                PriorityDimension::Location,
                PriorityDimension::Latency,
                PriorityDimension::Cost,
                PriorityDimension::Destination,
            ][..]
        )
    );
    assert_eq!(
        policy.location_order,
        Some(vec!["eu-west-1".to_string(), "us-east-1".to_string()])
    );
    // Queue default is untouched by a per-request override
    assert_eq!(
        client.policy().location_order,
        Some(vec!["us-east-1".to_string()])
    );
}

#[tokio::test]
async fn test_location_override_rejected_without_location_priority() {
    let engine = Arc::new(RecordingEngine::new());
    let client = PlacementClient::from_config(&queue(false), engine.clone()).unwrap();

    let request = PlacementRequest::new(8).with_location_order(vec!["eu-west-1".to_string()]);
    let err = client.submit(request).await.unwrap_err();

    assert!(matches!(
        err,
        PlacementError::Policy(ConfigurationError::LocationOverrideWithoutPriority)
    ));
    assert!(engine.submissions().is_empty());
}

#[tokio::test]
async fn test_engine_unavailable_surfaces_to_caller() {
    let client =
        PlacementClient::from_config(&queue(false), Arc::new(RecordingEngine::unavailable()))
            .unwrap();

    let err = client.submit(PlacementRequest::new(2)).await.unwrap_err();
    assert!(matches!(
        err,
        PlacementError::Engine(EngineError::Unavailable { .. })
    ));
}

#[tokio::test]
async fn test_oversized_player_list_rejected() {
    let engine = Arc::new(RecordingEngine::new());
    let client = PlacementClient::from_config(&queue(false), engine.clone()).unwrap();

    let request = PlacementRequest::new(1)
        .with_player("player-1")
        .with_player("player-2");
    let err = client.submit(request).await.unwrap_err();

    assert!(matches!(
        err,
        PlacementError::Engine(EngineError::InvalidRequest { .. })
    ));
    assert!(engine.submissions().is_empty());
}
