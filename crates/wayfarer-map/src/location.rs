//! "Locate me": the user-location puck.

use tracing::{info, warn};
use wayfarer_core::location::{LocationError, LocationProvider};
use wayfarer_core::map::{CameraTarget, MapSurface, MarkerKey, MarkerSpec, MarkerStyle};
use wayfarer_core::model::LngLat;

/// Places the user-location puck and centres the camera on it.
#[derive(Debug, Clone)]
pub struct UserLocator {
    min_zoom: f64,
    duration_ms: u64,
    has_user_location: bool,
}

impl UserLocator {
    /// Creates a locator that never zooms out below `min_zoom` when centring.
    #[must_use]
    pub fn new(min_zoom: f64, duration_ms: u64) -> Self {
        Self {
            min_zoom,
            duration_ms,
            has_user_location: false,
        }
    }

    /// Whether the puck is currently on the map.
    #[must_use]
    pub fn has_user_location(&self) -> bool {
        self.has_user_location
    }

    /// Applies a location lookup. A fix places or moves the puck and eases
    /// the camera to it; a failure removes the puck. Returns whether the
    /// puck is shown afterwards.
    pub fn apply(
        &mut self,
        map: &mut dyn MapSurface,
        result: Result<LngLat, LocationError>,
    ) -> bool {
        match result {
            Ok(position) => {
                if self.has_user_location {
                    map.move_marker(&MarkerKey::UserLocation, position);
                } else {
                    map.add_marker(MarkerSpec {
                        key: MarkerKey::UserLocation,
                        position,
                        label: None,
                        style: MarkerStyle::UserPuck,
                    });
                }
                let zoom = map.zoom().max(self.min_zoom);
                map.ease_to(CameraTarget {
                    center: position,
                    zoom,
                    duration_ms: self.duration_ms,
                });
                self.has_user_location = true;
                info!(lng = position.lng, lat = position.lat, "user located");
            }
            Err(error) => {
                if self.has_user_location {
                    map.remove_marker(&MarkerKey::UserLocation);
                }
                self.has_user_location = false;
                warn!(%error, "user location unavailable");
            }
        }
        self.has_user_location
    }

    /// Asks `provider` for a fix and applies it.
    pub async fn locate(
        &mut self,
        map: &mut dyn MapSurface,
        provider: &dyn LocationProvider,
    ) -> bool {
        let result = provider.current_position().await;
        self.apply(map, result)
    }
}

#[cfg(test)]
mod tests {
    use wayfarer_core::map::MapInit;
    use wayfarer_test_support::StubLocationProvider;

    use super::*;
    use crate::surface::{HeadlessMap, MapCall};

    fn map(zoom: f64) -> HeadlessMap {
        let mut map = HeadlessMap::new(MapInit {
            center: LngLat::new(-0.1246, 51.5007),
            zoom,
            pitch: 0.0,
            bearing: 0.0,
            style_url: "style.json".to_owned(),
        });
        map.finish_loading();
        map
    }

    #[tokio::test]
    async fn test_locate_places_puck_and_zooms_in_to_street_level() {
        // Arrange
        let mut map = map(11.0);
        let mut locator = UserLocator::new(15.0, 1000);
        let here = LngLat::new(-0.1145, 51.4613);

        // Act
        let shown = locator
            .locate(&mut map, &StubLocationProvider(Ok(here)))
            .await;

        // Assert
        assert!(shown);
        assert!(locator.has_user_location());
        assert_eq!(map.marker(&MarkerKey::UserLocation).unwrap().position, here);
        assert_eq!(map.camera().center, here);
        assert!((map.camera().zoom - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_keeps_closer_zoom() {
        let mut map = map(17.5);
        let mut locator = UserLocator::new(15.0, 1000);

        locator.apply(&mut map, Ok(LngLat::new(0.0, 0.0)));

        assert!((map.camera().zoom - 17.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_second_fix_moves_existing_puck() {
        let mut map = map(14.0);
        let mut locator = UserLocator::new(15.0, 1000);
        locator.apply(&mut map, Ok(LngLat::new(0.0, 0.0)));

        locator.apply(&mut map, Ok(LngLat::new(1.0, 1.0)));

        assert_eq!(map.markers().len(), 1);
        assert!(
            map.journal()
                .iter()
                .any(|call| matches!(call, MapCall::MoveMarker { .. }))
        );
    }

    #[tokio::test]
    async fn test_failed_lookup_clears_flag_and_removes_puck() {
        // Arrange
        let mut map = map(14.0);
        let mut locator = UserLocator::new(15.0, 1000);
        locator.apply(&mut map, Ok(LngLat::new(0.0, 0.0)));

        // Act
        let shown = locator
            .locate(&mut map, &StubLocationProvider(Err(LocationError::Denied)))
            .await;

        // Assert
        assert!(!shown);
        assert!(!locator.has_user_location());
        assert!(map.marker(&MarkerKey::UserLocation).is_none());
    }

    #[test]
    fn test_failure_without_puck_does_not_touch_camera() {
        let mut map = map(14.0);
        let mut locator = UserLocator::new(15.0, 1000);

        locator.apply(&mut map, Err(LocationError::Timeout));

        assert!(map.journal().is_empty());
    }
}
