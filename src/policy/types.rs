use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::errors::{ConfigurationError, PolicyResult};

/// One window of the phased latency schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatencyPhase {
    /// Length of the window; must be positive
    pub duration_seconds: u32,
    /// Highest latency any single player may report for a destination in this window
    pub max_individual_latency_ms: u32,
}

impl LatencyPhase {
    pub const fn new(duration_seconds: u32, max_individual_latency_ms: u32) -> Self {
        Self {
            duration_seconds,
            max_individual_latency_ms,
        }
    }
}

/// Tie-break dimension used by the placement engine when ranking destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityDimension {
    Location,
    Latency,
    Cost,
    Destination,
}

impl fmt::Display for PriorityDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Location => write!(f, "LOCATION"),
            Self::Latency => write!(f, "LATENCY"),
            Self::Cost => write!(f, "COST"),
            Self::Destination => write!(f, "DESTINATION"),
        }
    }
}

impl std::str::FromStr for PriorityDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOCATION" => Ok(Self::Location),
            "LATENCY" => Ok(Self::Latency),
            "COST" => Ok(Self::Cost),
            "DESTINATION" => Ok(Self::Destination),
            _ => Err(format!("Invalid priority dimension: {s}")),
        }
    }
}

/// Configuration submitted with every placement request.
///
/// The engine walks `latency_phases` in order. Each phase's threshold holds for
/// its duration, and once the cumulative duration is exhausted the last phase's
/// threshold stays in force until `timeout_seconds` elapses.
///
/// `priority_order` and `location_order` are omitted from the serialized form when
/// unset so the engine falls back to its default latency-then-cost ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRequestPolicy {
    pub latency_phases: Vec<LatencyPhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_order: Option<Vec<PriorityDimension>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_order: Option<Vec<String>>,
    pub timeout_seconds: u32,
}

impl PlacementRequestPolicy {
    /// Whether LOCATION participates in tie-breaking
    pub fn prioritizes_location(&self) -> bool {
        self.priority_order
            .as_ref()
            .is_some_and(|order| order.contains(&PriorityDimension::Location))
    }

    /// Cumulative length of all latency phases
    pub fn total_phase_duration(&self) -> Duration {
        let seconds: u64 = self
            .latency_phases
            .iter()
            .map(|phase| u64::from(phase.duration_seconds))
            .sum();
        Duration::from_secs(seconds)
    }

    /// Latency threshold in force after `elapsed` time since submission.
    ///
    /// Returns `None` when there is no schedule or the placement has already timed out.
    pub fn max_latency_at(&self, elapsed: Duration) -> Option<u32> {
        if elapsed >= Duration::from_secs(u64::from(self.timeout_seconds)) {
            return None;
        }

        let mut boundary = Duration::ZERO;
        for phase in &self.latency_phases {
            boundary += Duration::from_secs(u64::from(phase.duration_seconds));
            if elapsed < boundary {
                return Some(phase.max_individual_latency_ms);
            }
        }

        self.latency_phases
            .last()
            .map(|phase| phase.max_individual_latency_ms)
    }

    /// Replace the location order for a single request.
    ///
    /// Only allowed when the policy already ranks by LOCATION.
    pub fn with_location_order(
        mut self,
        locations: Vec<String>,
    ) -> PolicyResult<Self> {
        if !self.prioritizes_location() {
            return Err(ConfigurationError::LocationOverrideWithoutPriority);
        }
        self.location_order = Some(locations);
        self.validate()?;
        Ok(self)
    }

    /// Reject configurations the placement engine would refuse or misinterpret
    pub fn validate(&self) -> PolicyResult<()> {
        if self.latency_phases.is_empty() {
            return Err(ConfigurationError::NoLatencyPhases);
        }

        if let Some(index) = self
            .latency_phases
            .iter()
            .position(|phase| phase.duration_seconds == 0)
        {
            return Err(ConfigurationError::ZeroPhaseDuration { index });
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigurationError::ZeroTimeout);
        }

        if let Some(order) = &self.priority_order {
            for (i, dimension) in order.iter().enumerate() {
                if order[..i].contains(dimension) {
                    return Err(ConfigurationError::DuplicatePriority {
                        dimension: *dimension,
                    });
                }
            }
        }

        let has_locations = self
            .location_order
            .as_ref()
            .is_some_and(|locations| !locations.is_empty());
        if self.prioritizes_location() && !has_locations {
            return Err(ConfigurationError::LocationPriorityWithoutLocations);
        }

        Ok(())
    }
}
