//! Test location provider.

use async_trait::async_trait;
use wayfarer_core::location::{LocationError, LocationProvider};
use wayfarer_core::model::LngLat;

/// A provider that always answers with the configured result.
#[derive(Debug, Clone)]
pub struct StubLocationProvider(pub Result<LngLat, LocationError>);

#[async_trait]
impl LocationProvider for StubLocationProvider {
    async fn current_position(&self) -> Result<LngLat, LocationError> {
        self.0.clone()
    }
}
