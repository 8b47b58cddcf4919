//! Bootstrapping from layered configuration files

mod common;

use common::{NotificationBuilder, RecordingEngine};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::watch;

use session_placement::config::{ConfigManager, StoreBackend};
use session_placement::engine::PlacementRequest;
use session_placement::events::PlacementEventType;
use session_placement::system::PlacementSystem;
use session_placement::transport::NotificationBatch;

fn write_config(dir: &TempDir) {
    fs::write(
        dir.path().join("placement.toml"),
        r#"
        [queue]
        name = "arena-queue"
        home_region = "eu-west-1"
        prioritize_location = true

        [store]
        backend = "memory"
        retention_days = 3
        reclaim_interval_seconds = 1
        "#,
    )
    .unwrap();
}

#[tokio::test]
async fn test_bootstrap_from_config_directory() {
    let dir = TempDir::new().unwrap();
    write_config(&dir);

    let manager =
        ConfigManager::load_from_directory_with_env(Some(dir.path().to_path_buf()), "test")
            .unwrap();
    assert_eq!(manager.config().store.backend, StoreBackend::Memory);

    let system = PlacementSystem::bootstrap(manager.config()).await.unwrap();
    assert_eq!(system.config().queue.name, "arena-queue");

    let engine = Arc::new(RecordingEngine::new());
    let client = system.placement_client(engine.clone()).unwrap();
    let placement_id = client
        .submit(PlacementRequest::new(2).with_player("player-1"))
        .await
        .unwrap();
    assert_eq!(
        engine.submissions()[0].policy.location_order,
        Some(vec!["eu-west-1".to_string()])
    );

    let raw = NotificationBuilder::new(&placement_id)
        .region("eu-west-1")
        .fulfilled()
        .build();
    let response = system
        .handle_notifications(&NotificationBatch::from_messages([raw]))
        .await;
    assert!(response.batch.all_succeeded());

    let timeline = system.pipeline().timeline(&placement_id).await.unwrap();
    let event = timeline.latest().unwrap();
    assert_eq!(event.event_type, PlacementEventType::Fulfilled);
    assert_eq!(event.expires_at - event.observed_at, chrono::Duration::days(3));
}

#[tokio::test]
async fn test_reclaimer_stops_on_shutdown() {
    let dir = TempDir::new().unwrap();
    write_config(&dir);
    let manager =
        ConfigManager::load_from_directory_with_env(Some(dir.path().to_path_buf()), "test")
            .unwrap();
    let system = PlacementSystem::bootstrap(manager.config()).await.unwrap();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = system.spawn_reclaimer(shutdown_rx);

    shutdown_tx.send(true).unwrap();
    tokio::time::timeout(std::time::Duration::from_secs(5), handle)
        .await
        .expect("reclaimer should stop after shutdown")
        .unwrap();
}
