//! Query handlers for the navigation context.
//!
//! Builds read-only view DTOs from the store for hosts.

use serde::Serialize;
use wayfarer_core::map::MarkerCategory;
use wayfarer_core::model::{LngLat, PoiId, Tour};

use crate::domain::state::NavigationState;

/// One stop as a host displays it.
#[derive(Debug, Clone, Serialize)]
pub struct PoiView {
    /// Stop identifier.
    pub id: PoiId,
    /// 1-based position in traversal order.
    pub label: usize,
    /// Display title.
    pub title: String,
    /// Street address.
    pub address: String,
    /// Position on the map.
    pub position: LngLat,
    /// Marker category derived from the navigation state.
    pub category: MarkerCategory,
    /// Narrative text in the requested language, if present.
    pub description: Option<String>,
    /// Narration audio in the requested language, if present.
    pub audio_url: Option<String>,
}

/// Read-only view of a navigation session.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationView {
    /// The loaded tour, if any.
    pub tour: Option<Tour>,
    /// Stops in traversal order.
    pub pois: Vec<PoiView>,
    /// Position of the current stop.
    pub current_index: usize,
    /// Current stop identifier.
    pub current_poi_id: Option<PoiId>,
    /// Visited stop identifiers.
    pub visited_ids: Vec<PoiId>,
    /// Whether the current stop is the first.
    pub is_first: bool,
    /// Whether the current stop is the last.
    pub is_last: bool,
}

/// Builds the view of `state`, resolving narration for `language`.
#[must_use]
pub fn navigation_view(state: &NavigationState, language: &str) -> NavigationView {
    let current_id = state.current_poi().map(|poi| &poi.id);
    let pois = state
        .pois()
        .iter()
        .enumerate()
        .map(|(index, poi)| PoiView {
            id: poi.id.clone(),
            label: index + 1,
            title: poi.title.clone(),
            address: poi.address.clone(),
            position: poi.position(),
            category: MarkerCategory::classify(&poi.id, current_id, state.visited_ids()),
            description: poi.description_for(language).map(str::to_owned),
            audio_url: poi.audio_for(language).map(str::to_owned),
        })
        .collect();

    NavigationView {
        tour: state.tour().cloned(),
        pois,
        current_index: state.current_index(),
        current_poi_id: current_id.cloned(),
        visited_ids: state.visited_ids().iter().cloned().collect(),
        is_first: state.is_first(),
        is_last: state.is_last(),
    }
}

#[cfg(test)]
mod tests {
    use wayfarer_core::map::MarkerCategory;
    use wayfarer_core::model::PoiId;
    use wayfarer_test_support::fixtures::{poi, tour};

    use super::navigation_view;
    use crate::domain::state::NavigationState;

    #[test]
    fn test_navigation_view_labels_and_categorizes_stops() {
        // Arrange
        let state = NavigationState::loaded(
            tour("T"),
            vec![poi("T", "c", 3), poi("T", "a", 1), poi("T", "b", 2)],
        )
        .next()
        .next()
        .previous();

        // Act
        let view = navigation_view(&state, "en");

        // Assert
        let labels: Vec<(&str, usize, MarkerCategory)> = view
            .pois
            .iter()
            .map(|p| (p.id.as_str(), p.label, p.category))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("a", 1, MarkerCategory::Visited),
                ("b", 2, MarkerCategory::Current),
                ("c", 3, MarkerCategory::Visited),
            ]
        );
        assert_eq!(view.current_poi_id, Some(PoiId::from("b")));
        assert!(!view.is_first);
        assert!(!view.is_last);
        assert_eq!(view.visited_ids.len(), 3);
        assert_eq!(view.pois[0].description.as_deref(), Some("About a"));
    }

    #[test]
    fn test_navigation_view_of_empty_state() {
        let view = navigation_view(&NavigationState::default(), "en");

        assert!(view.tour.is_none());
        assert!(view.pois.is_empty());
        assert!(view.current_poi_id.is_none());
        assert!(view.is_first);
        assert!(view.is_last);
    }

    #[test]
    fn test_navigation_view_serializes_categories_in_lowercase() {
        let state = NavigationState::loaded(tour("T"), vec![poi("T", "a", 1)]);

        let json = serde_json::to_value(navigation_view(&state, "en")).unwrap();

        assert_eq!(json["pois"][0]["category"], "current");
        assert_eq!(json["current_poi_id"], "a");
    }
}
