//! Camera framing.

use serde::Serialize;
use tracing::debug;
use wayfarer_core::map::{CameraTarget, FitBoundsOptions, LngLatBounds, MapSurface};
use wayfarer_core::model::Poi;

use crate::config::{FitOptions, MapConfig};

/// A camera command issued to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraMove {
    /// Flight to a point.
    FlyTo(CameraTarget),
    /// Framing of a region.
    FitBounds {
        /// Region to frame.
        bounds: LngLatBounds,
        /// Padding, zoom cap and duration.
        options: FitBoundsOptions,
    },
}

/// Whether the current tour load has had its automatic framing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitState {
    /// Waiting for a ready map and a non-empty POI list.
    #[default]
    NotFitted,
    /// Framed; only explicit recenters move the camera now.
    Fitted,
}

/// Computes and applies camera framing from a POI set.
#[derive(Debug, Clone)]
pub struct CameraController {
    config: MapConfig,
    fit_state: FitState,
}

impl CameraController {
    /// Creates a controller for a fresh tour load.
    #[must_use]
    pub fn new(config: MapConfig) -> Self {
        Self {
            config,
            fit_state: FitState::NotFitted,
        }
    }

    /// The automatic-framing state of the current tour load.
    #[must_use]
    pub fn fit_state(&self) -> FitState {
        self.fit_state
    }

    /// Re-arms automatic framing for a new tour load.
    pub fn reset(&mut self) {
        self.fit_state = FitState::NotFitted;
    }

    /// The camera command that frames `pois`.
    ///
    /// No POIs frame the default location at overview zoom, one POI is
    /// centred at inspection zoom, and more are fitted as a bounding region
    /// with padding and a zoom cap.
    #[must_use]
    pub fn framing(&self, pois: &[Poi], options: &FitOptions) -> CameraMove {
        let resolved = options.resolve(&self.config);
        if let [only] = pois {
            return CameraMove::FlyTo(CameraTarget {
                center: only.position(),
                zoom: self.config.single_poi_zoom,
                duration_ms: resolved.duration_ms,
            });
        }
        match LngLatBounds::from_points(pois.iter().map(Poi::position)) {
            Some(bounds) => CameraMove::FitBounds {
                bounds,
                options: resolved,
            },
            None => CameraMove::FlyTo(CameraTarget {
                center: self.config.default_center,
                zoom: self.config.overview_zoom,
                duration_ms: resolved.duration_ms,
            }),
        }
    }

    /// Frames `pois` on the surface.
    pub fn fit_to_pois(
        &self,
        map: &mut dyn MapSurface,
        pois: &[Poi],
        options: &FitOptions,
    ) -> CameraMove {
        let camera_move = self.framing(pois, options);
        debug!(?camera_move, pois = pois.len(), "framing camera");
        match camera_move {
            CameraMove::FlyTo(target) => map.fly_to(target),
            CameraMove::FitBounds { bounds, options } => map.fit_bounds(bounds, options),
        }
        camera_move
    }

    /// On-demand reframing; ignores the once-per-load guard.
    pub fn recenter(
        &self,
        map: &mut dyn MapSurface,
        pois: &[Poi],
        options: &FitOptions,
    ) -> CameraMove {
        self.fit_to_pois(map, pois, options)
    }

    /// Frames `pois` if this tour load has not been framed yet and there is
    /// something to frame. The caller is responsible for map readiness.
    pub fn fit_initial(
        &mut self,
        map: &mut dyn MapSurface,
        pois: &[Poi],
        options: &FitOptions,
    ) -> Option<CameraMove> {
        if self.fit_state == FitState::Fitted || pois.is_empty() {
            return None;
        }
        self.fit_state = FitState::Fitted;
        Some(self.fit_to_pois(map, pois, options))
    }

    /// Flies to a single POI. Unset zoom and duration fall back to the
    /// configured focus zoom and animation duration.
    pub fn fly_to_poi(
        &self,
        map: &mut dyn MapSurface,
        poi: &Poi,
        zoom: Option<f64>,
        duration_ms: Option<u64>,
    ) -> CameraTarget {
        let target = CameraTarget {
            center: poi.position(),
            zoom: zoom.unwrap_or(self.config.poi_focus_zoom),
            duration_ms: duration_ms.unwrap_or(self.config.animation_duration_ms),
        };
        map.fly_to(target);
        target
    }
}
