//! Test repositories — fake `TourRepository` implementations.

use std::collections::BTreeMap;

use async_trait::async_trait;
use wayfarer_core::error::TourError;
use wayfarer_core::model::{Poi, Tour, TourId};
use wayfarer_core::repository::TourRepository;

/// A repository backed by a map built in the test.
#[derive(Debug, Default)]
pub struct InMemoryTourRepository {
    tours: BTreeMap<TourId, (Tour, Vec<Poi>)>,
}

impl InMemoryTourRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tour with its stops. Stops are returned in the given order.
    #[must_use]
    pub fn with_tour(mut self, tour: Tour, pois: Vec<Poi>) -> Self {
        self.tours.insert(tour.id.clone(), (tour, pois));
        self
    }
}

#[async_trait]
impl TourRepository for InMemoryTourRepository {
    async fn get_tour_by_id(&self, id: &TourId) -> Result<Option<Tour>, TourError> {
        Ok(self.tours.get(id).map(|(tour, _)| tour.clone()))
    }

    async fn get_pois_for_tour(&self, tour_id: &TourId) -> Result<Vec<Poi>, TourError> {
        Ok(self
            .tours
            .get(tour_id)
            .map(|(_, pois)| pois.clone())
            .unwrap_or_default())
    }

    async fn list_tours(&self) -> Result<Vec<Tour>, TourError> {
        Ok(self.tours.values().map(|(tour, _)| tour.clone()).collect())
    }
}

/// A repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingTourRepository;

#[async_trait]
impl TourRepository for FailingTourRepository {
    async fn get_tour_by_id(&self, _id: &TourId) -> Result<Option<Tour>, TourError> {
        Err(TourError::Infrastructure("connection refused".into()))
    }

    async fn get_pois_for_tour(&self, _tour_id: &TourId) -> Result<Vec<Poi>, TourError> {
        Err(TourError::Infrastructure("connection refused".into()))
    }

    async fn list_tours(&self) -> Result<Vec<Tour>, TourError> {
        Err(TourError::Infrastructure("connection refused".into()))
    }
}
