//! Device location port backing the "locate me" capability.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::LngLat;

/// Location lookup failures. Never propagated past the map layer; they
/// only clear the "has user location" flag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user or platform refused access.
    #[error("location permission denied")]
    Denied,

    /// The platform has no location capability or no fix.
    #[error("location unavailable")]
    Unavailable,

    /// The platform gave up waiting for a fix.
    #[error("location request timed out")]
    Timeout,
}

/// Platform location API. Timeouts and cancellation are the provider's
/// concern.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Returns the device's current position.
    async fn current_position(&self) -> Result<LngLat, LocationError>;
}
