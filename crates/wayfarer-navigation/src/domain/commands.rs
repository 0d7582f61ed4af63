//! Commands for the navigation context.

use uuid::Uuid;
use wayfarer_core::model::{PoiId, TourId};

/// Trait that all navigation commands implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;
}

/// Command to enter a tour.
#[derive(Debug, Clone)]
pub struct LoadTour {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The tour to load.
    pub tour_id: TourId,
}

impl Command for LoadTour {
    fn command_type(&self) -> &'static str {
        "navigation.load_tour"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to advance to the next stop.
#[derive(Debug, Clone)]
pub struct AdvanceToNextPoi {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for AdvanceToNextPoi {
    fn command_type(&self) -> &'static str {
        "navigation.next"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to step back to the previous stop.
#[derive(Debug, Clone)]
pub struct ReturnToPreviousPoi {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ReturnToPreviousPoi {
    fn command_type(&self) -> &'static str {
        "navigation.previous"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to jump to a specific stop.
#[derive(Debug, Clone)]
pub struct SelectPoi {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The stop to jump to.
    pub poi_id: PoiId,
}

impl Command for SelectPoi {
    fn command_type(&self) -> &'static str {
        "navigation.select_by_id"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
