//! Wall-clock source used to stamp ingested events.

use chrono::{DateTime, SubsecRound, Utc};
use parking_lot::Mutex;
use std::fmt::Debug;

/// Source of ingestion time.
///
/// Injected into the normalizer and the reclaimer so tests can pin time.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// System wall clock, truncated to microseconds so stored keys survive a
/// round trip through `timestamptz`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }
}

/// Manually driven clock for tests and replay.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.current.lock() = at;
    }

    /// Move the clock forward and return the new time
    pub fn advance(&self, by: chrono::Duration) -> DateTime<Utc> {
        let mut current = self.current.lock();
        *current += by;
        *current
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock()
    }
}
