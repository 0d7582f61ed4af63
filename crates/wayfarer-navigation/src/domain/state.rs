//! Navigation state and its pure transitions.
//!
//! Every transition takes the previous state by reference and returns the
//! next one, so an observer only ever sees whole states: `current_index`
//! never points outside the `pois` it was computed against.

use std::collections::BTreeSet;
use std::sync::Arc;

use wayfarer_core::model::{Poi, PoiId, Tour};

/// Which tour is loaded, its stops in traversal order, where the user is
/// and where they have been.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationState {
    tour: Option<Arc<Tour>>,
    pois: Arc<[Poi]>,
    current_index: usize,
    visited: BTreeSet<PoiId>,
}

impl NavigationState {
    /// State for a freshly entered tour.
    ///
    /// POIs are stably sorted by `order_index`; entering the tour visits its
    /// first stop. An empty POI list yields an inert state.
    #[must_use]
    pub fn loaded(tour: Tour, mut pois: Vec<Poi>) -> Self {
        pois.sort_by_key(|poi| poi.order_index);
        let visited = pois.first().map(|poi| poi.id.clone()).into_iter().collect();
        Self {
            tour: Some(Arc::new(tour)),
            pois: pois.into(),
            current_index: 0,
            visited,
        }
    }

    /// Advances to the following stop. No-op on the last stop or an empty
    /// tour.
    #[must_use]
    pub fn next(&self) -> Self {
        if self.is_last() {
            return self.clone();
        }
        self.moved_to(self.current_index + 1)
    }

    /// Steps back to the preceding stop. No-op on the first stop.
    #[must_use]
    pub fn previous(&self) -> Self {
        if self.is_first() {
            return self.clone();
        }
        self.moved_to(self.current_index - 1)
    }

    /// Jumps to the stop with `id`. No-op if the loaded tour has no such stop.
    #[must_use]
    pub fn select_by_id(&self, id: &PoiId) -> Self {
        match self.index_of(id) {
            Some(index) => self.moved_to(index),
            None => self.clone(),
        }
    }

    // Visited membership is only ever added, never revoked.
    fn moved_to(&self, index: usize) -> Self {
        let Some(poi) = self.pois.get(index) else {
            return self.clone();
        };
        let mut visited = self.visited.clone();
        visited.insert(poi.id.clone());
        Self {
            tour: self.tour.clone(),
            pois: Arc::clone(&self.pois),
            current_index: index,
            visited,
        }
    }

    /// The loaded tour, if any.
    #[must_use]
    pub fn tour(&self) -> Option<&Tour> {
        self.tour.as_deref()
    }

    /// Stops in traversal order.
    #[must_use]
    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }

    /// Position of the current stop in [`Self::pois`].
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The current stop, or `None` for an empty tour.
    #[must_use]
    pub fn current_poi(&self) -> Option<&Poi> {
        self.pois.get(self.current_index)
    }

    /// Identifiers of every stop navigated to since the tour was loaded.
    #[must_use]
    pub fn visited_ids(&self) -> &BTreeSet<PoiId> {
        &self.visited
    }

    /// Whether there is no stop before the current one.
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    /// Whether there is no stop after the current one.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.pois.is_empty() || self.current_index >= self.pois.len() - 1
    }

    /// Position of the stop with `id`.
    #[must_use]
    pub fn index_of(&self, id: &PoiId) -> Option<usize> {
        self.pois.iter().position(|poi| &poi.id == id)
    }

    /// The stop with `id`.
    #[must_use]
    pub fn poi(&self, id: &PoiId) -> Option<&Poi> {
        self.pois.iter().find(|poi| &poi.id == id)
    }
}
