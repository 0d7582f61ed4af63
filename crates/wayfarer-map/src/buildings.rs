//! Optional 3D building extrusions.

use tracing::{debug, warn};
use wayfarer_core::map::{LayerSpec, MapSurface};

/// Layer id of the extrusion layer.
pub const BUILDINGS_LAYER_ID: &str = "vh-3d-buildings";

/// Vector source the extrusions are drawn from; provided by the style.
pub const BUILDINGS_SOURCE_ID: &str = "openmaptiles";

const BUILDINGS_SOURCE_LAYER: &str = "building";
const BUILDINGS_COLOR: &str = "#999";
const BUILDINGS_HEIGHT_PROPERTY: &str = "render_height";
const BUILDINGS_OPACITY: f64 = 0.6;

/// The extrusion layer.
#[must_use]
pub fn buildings_layer() -> LayerSpec {
    LayerSpec::FillExtrusion {
        id: BUILDINGS_LAYER_ID.to_owned(),
        source: BUILDINGS_SOURCE_ID.to_owned(),
        source_layer: BUILDINGS_SOURCE_LAYER.to_owned(),
        color: BUILDINGS_COLOR.to_owned(),
        height_property: BUILDINGS_HEIGHT_PROPERTY.to_owned(),
        opacity: BUILDINGS_OPACITY,
    }
}

/// Shows or hides the extrusion layer. Repeating a request is a no-op.
/// Returns whether the layer is present afterwards; enabling fails softly
/// when the style has no building source.
pub fn set_buildings_enabled(map: &mut dyn MapSurface, enabled: bool) -> bool {
    let present = map.has_layer(BUILDINGS_LAYER_ID);
    match (enabled, present) {
        (true, false) => {
            if !map.has_source(BUILDINGS_SOURCE_ID) {
                warn!(
                    source = BUILDINGS_SOURCE_ID,
                    "style has no building source; 3D buildings unavailable"
                );
                return false;
            }
            map.add_layer(buildings_layer());
            debug!("3D buildings enabled");
            true
        }
        (false, true) => {
            map.remove_layer(BUILDINGS_LAYER_ID);
            debug!("3D buildings disabled");
            false
        }
        _ => present,
    }
}

#[cfg(test)]
mod tests {
    use wayfarer_core::map::MapInit;
    use wayfarer_core::model::LngLat;

    use super::*;
    use crate::surface::HeadlessMap;

    fn map() -> HeadlessMap {
        let mut map = HeadlessMap::new(MapInit {
            center: LngLat::new(-0.1246, 51.5007),
            zoom: 14.0,
            pitch: 0.0,
            bearing: 0.0,
            style_url: "style.json".to_owned(),
        })
        .with_style_source(BUILDINGS_SOURCE_ID);
        map.finish_loading();
        map
    }

    #[test]
    fn test_enable_adds_extrusion_layer_once() {
        let mut map = map();

        assert!(set_buildings_enabled(&mut map, true));
        assert!(set_buildings_enabled(&mut map, true));

        assert_eq!(map.layers(), &[buildings_layer()]);
    }

    #[test]
    fn test_disable_removes_layer_and_is_idempotent() {
        let mut map = map();
        set_buildings_enabled(&mut map, true);

        assert!(!set_buildings_enabled(&mut map, false));
        assert!(!set_buildings_enabled(&mut map, false));

        assert!(map.layers().is_empty());
    }

    #[test]
    fn test_enable_without_building_source_fails_softly() {
        let mut map = HeadlessMap::new(MapInit {
            center: LngLat::new(0.0, 0.0),
            zoom: 14.0,
            pitch: 0.0,
            bearing: 0.0,
            style_url: "style.json".to_owned(),
        });

        assert!(!set_buildings_enabled(&mut map, true));
        assert!(map.layers().is_empty());
    }
}
