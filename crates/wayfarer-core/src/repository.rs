//! Data-access port.

use async_trait::async_trait;

use crate::error::TourError;
use crate::model::{Poi, Tour, TourId};

/// Read access to tours and their POIs.
///
/// Implementations may sit on a remote database, a local fixture or a
/// cache; the core only relies on POIs carrying a stable `order_index`
/// and a coordinate.
#[async_trait]
pub trait TourRepository: Send + Sync {
    /// Looks up a tour. `Ok(None)` means the source has no such tour.
    async fn get_tour_by_id(&self, id: &TourId) -> Result<Option<Tour>, TourError>;

    /// Returns the POIs of a tour ordered by `order_index`.
    async fn get_pois_for_tour(&self, tour_id: &TourId) -> Result<Vec<Poi>, TourError>;

    /// Lists every tour the source knows about.
    async fn list_tours(&self) -> Result<Vec<Tour>, TourError>;
}
