use serde::{Deserialize, Serialize};

use crate::events::{Fulfillment, PlacementEvent, PlacementEventType};

/// Every event observed for one placement, ordered by `observed_at` ascending.
///
/// An empty timeline means nothing has been ingested yet, not that nothing will be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementTimeline {
    pub placement_id: String,
    pub events: Vec<PlacementEvent>,
}

impl PlacementTimeline {
    pub fn empty(placement_id: impl Into<String>) -> Self {
        Self {
            placement_id: placement_id.into(),
            events: Vec::new(),
        }
    }

    /// Build a timeline, sorting the events by ingestion time
    pub fn from_events(placement_id: impl Into<String>, mut events: Vec<PlacementEvent>) -> Self {
        events.sort_by_key(|event| event.observed_at);
        Self {
            placement_id: placement_id.into(),
            events,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn latest(&self) -> Option<&PlacementEvent> {
        self.events.last()
    }

    /// Lifecycle stage of the most recently ingested event
    pub fn current_status(&self) -> Option<PlacementEventType> {
        self.latest().map(|event| event.event_type)
    }

    /// First terminal event, if the placement has finished
    pub fn terminal_event(&self) -> Option<&PlacementEvent> {
        self.events
            .iter()
            .find(|event| event.event_type.is_terminal())
    }

    /// Connection details from the latest fulfilled event
    pub fn fulfillment(&self) -> Option<&Fulfillment> {
        self.events
            .iter()
            .rev()
            .find_map(|event| event.fulfillment.as_ref())
    }
}
