//! Change notifications for the navigation context.

use serde::{Deserialize, Serialize};
use wayfarer_core::event::{DomainEvent, EventMetadata};
use wayfarer_core::model::{PoiId, TourId};

/// Emitted when a tour replaces the navigation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourLoaded {
    /// The loaded tour.
    pub tour_id: TourId,
    /// Route overlay reference, if the tour has one.
    pub route_url: Option<String>,
    /// Number of stops.
    pub poi_count: usize,
    /// The stop navigation starts at.
    pub current_poi_id: Option<PoiId>,
}

/// Emitted when the current stop moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentPoiChanged {
    /// Index before the move.
    pub from_index: usize,
    /// Index after the move.
    pub to_index: usize,
    /// The new current stop.
    pub poi_id: PoiId,
}

/// Emitted when a stop joins the visited set for the first time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoiVisited {
    /// The stop.
    pub poi_id: PoiId,
}

/// Event type identifier for [`TourLoaded`].
pub const TOUR_LOADED_EVENT_TYPE: &str = "navigation.tour_loaded";

/// Event type identifier for [`CurrentPoiChanged`].
pub const CURRENT_POI_CHANGED_EVENT_TYPE: &str = "navigation.current_poi_changed";

/// Event type identifier for [`PoiVisited`].
pub const POI_VISITED_EVENT_TYPE: &str = "navigation.poi_visited";

/// Event payload variants for the navigation context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationEventKind {
    /// A tour has been loaded.
    TourLoaded(TourLoaded),
    /// The current stop moved.
    CurrentPoiChanged(CurrentPoiChanged),
    /// A stop was visited for the first time.
    PoiVisited(PoiVisited),
}

impl NavigationEventKind {
    /// Type name of this payload.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::TourLoaded(_) => TOUR_LOADED_EVENT_TYPE,
            Self::CurrentPoiChanged(_) => CURRENT_POI_CHANGED_EVENT_TYPE,
            Self::PoiVisited(_) => POI_VISITED_EVENT_TYPE,
        }
    }
}

/// Notification envelope for the navigation context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: NavigationEventKind,
}

impl DomainEvent for NavigationEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
