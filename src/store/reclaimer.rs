//! # Expiry Reclaimer Background Service
//!
//! Periodically deletes events whose retention horizon has passed.
//!
//! Expiry is eventual: between ticks, `get` may still return expired events.
//! A failed cycle is logged and the loop keeps going.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, error, info};

use super::errors::StoreResult;
use super::PlacementStateStore;
use crate::clock::Clock;

#[derive(Debug, Clone)]
pub struct ExpiryReclaimer {
    store: Arc<dyn PlacementStateStore>,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl ExpiryReclaimer {
    pub fn new(store: Arc<dyn PlacementStateStore>, clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self {
            store,
            clock,
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run a single reclamation pass
    pub async fn run_once(&self) -> StoreResult<u64> {
        self.store.reclaim_expired(self.clock.now()).await
    }

    /// Run until `shutdown` flips to `true` or its sender is dropped.
    ///
    /// The first pass runs immediately.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval_timer = interval(self.interval);

        info!(
            interval_seconds = self.interval.as_secs(),
            backend = self.store.backend_name(),
            "Starting expiry reclaimer"
        );

        loop {
            tokio::select! {
                _ = interval_timer.tick() => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Expiry reclaimer stopping");
                        return;
                    }
                    continue;
                }
            }

            match self.run_once().await {
                Ok(0) => debug!("No expired placement events this cycle"),
                Ok(reclaimed) => info!(reclaimed = reclaimed, "Reclaimed expired placement events"),
                Err(e) => {
                    // Keep looping; the next tick retries
                    error!(error = %e, "Expiry reclamation cycle failed");
                }
            }
        }
    }

    /// Spawn the loop on the current runtime
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown).await })
    }
}
