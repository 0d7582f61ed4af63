//! POI marker reconciliation.
//!
//! Render order and labels are two separate derived values: the current
//! marker is inserted last so it stacks on top, while every label stays the
//! POI's 1-based position in traversal order.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;
use wayfarer_core::map::{MapSurface, MarkerCategory, MarkerKey, MarkerSpec, MarkerStyle};
use wayfarer_core::model::{Poi, PoiId};

/// Indices into the POI list in insertion order: everything else in
/// traversal order, then the current POI.
#[must_use]
pub fn render_order(pois: &[Poi], current_id: Option<&PoiId>) -> Vec<usize> {
    let (current, mut rest): (Vec<usize>, Vec<usize>) =
        (0..pois.len()).partition(|&index| Some(&pois[index].id) == current_id);
    rest.extend(current);
    rest
}

/// Builds the marker for the POI at `index` of the traversal order.
#[must_use]
pub fn marker_for(
    pois: &[Poi],
    index: usize,
    current_id: Option<&PoiId>,
    visited: &BTreeSet<PoiId>,
) -> MarkerSpec {
    let poi = &pois[index];
    let category = MarkerCategory::classify(&poi.id, current_id, visited);
    MarkerSpec {
        key: MarkerKey::Poi(poi.id.clone()),
        position: poi.position(),
        label: Some((index + 1).to_string()),
        style: MarkerStyle::Poi {
            category,
            z_index: category.stacking_priority(),
        },
    }
}

/// Owns the POI markers of the current tour context.
#[derive(Debug, Default)]
pub struct MarkerManager {
    placed: Vec<MarkerKey>,
    targets: HashMap<PoiId, Poi>,
}

impl MarkerManager {
    /// Creates a manager with no markers placed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every marker this manager placed, then places exactly one
    /// per POI. Returns the number of markers placed.
    pub fn sync_markers(
        &mut self,
        map: &mut dyn MapSurface,
        pois: &[Poi],
        current_id: Option<&PoiId>,
        visited: &BTreeSet<PoiId>,
    ) -> usize {
        self.clear(map);

        for index in render_order(pois, current_id) {
            let marker = marker_for(pois, index, current_id, visited);
            self.placed.push(marker.key.clone());
            map.add_marker(marker);
        }
        self.targets = pois
            .iter()
            .map(|poi| (poi.id.clone(), poi.clone()))
            .collect();

        debug!(
            markers = self.placed.len(),
            current = current_id.map(PoiId::as_str),
            "poi markers synced"
        );
        self.placed.len()
    }

    /// Removes every marker this manager placed.
    pub fn clear(&mut self, map: &mut dyn MapSurface) {
        for key in self.placed.drain(..) {
            map.remove_marker(&key);
        }
        self.targets.clear();
    }

    /// Resolves a marker click to its POI. Clicks on markers this manager
    /// did not place resolve to nothing. Navigation state is not touched.
    #[must_use]
    pub fn dispatch_click(&self, key: &MarkerKey) -> Option<&Poi> {
        match key {
            MarkerKey::Poi(id) => self.targets.get(id),
            MarkerKey::UserLocation => None,
        }
    }

    /// Keys of the markers currently placed, in insertion order.
    #[must_use]
    pub fn placed(&self) -> &[MarkerKey] {
        &self.placed
    }
}
