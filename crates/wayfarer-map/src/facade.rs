//! Composition of the navigation store with the map surface.
//!
//! The facade owns the surface. Store notifications are handed to it
//! explicitly; it decides which reconciliations they require and runs them
//! once the surface is ready. Marker clicks come back through
//! [`MapSyncFacade::marker_clicked`], which reports [`PoiSelected`] and then
//! selects the stop in the store.

use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use wayfarer_core::location::{LocationError, LocationProvider};
use wayfarer_core::map::{CameraTarget, MapSurface, MarkerKey};
use wayfarer_core::model::{LngLat, Poi, PoiId};
use wayfarer_core::route::{RouteFetchError, RouteFetcher};
use wayfarer_navigation::domain::events::{NavigationEvent, NavigationEventKind};
use wayfarer_navigation::domain::state::NavigationState;
use wayfarer_navigation::domain::store::PoiNavigationStore;

use crate::buildings::set_buildings_enabled;
use crate::camera::{CameraController, CameraMove, FitState};
use crate::config::{FitOptions, MapConfig};
use crate::location::UserLocator;
use crate::markers::MarkerManager;
use crate::route::{RouteLoader, RouteOutcome, RouteRequest};

/// Reported to the host exactly once per marker click.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoiSelected {
    /// The clicked stop.
    pub poi: Poi,
}

/// Reconciliations owed to the surface.
#[derive(Debug, Clone, Copy, Default)]
struct PendingSync {
    route: bool,
    markers: bool,
}

/// Keeps one map surface in lockstep with one navigation session.
#[derive(Debug)]
pub struct MapSyncFacade<M: MapSurface> {
    map: M,
    config: MapConfig,
    routes: RouteLoader,
    markers: MarkerManager,
    camera: CameraController,
    locator: UserLocator,
    route_url: Option<String>,
    pending: PendingSync,
    is_3d: bool,
}

impl<M: MapSurface> MapSyncFacade<M> {
    /// Takes ownership of `map`, which may still be loading.
    pub fn new(map: M, config: MapConfig) -> Self {
        Self {
            routes: RouteLoader::new(config.route_color.clone(), config.route_width),
            markers: MarkerManager::new(),
            camera: CameraController::new(config.clone()),
            locator: UserLocator::new(config.user_location_min_zoom, config.animation_duration_ms),
            map,
            config,
            route_url: None,
            pending: PendingSync::default(),
            is_3d: false,
        }
    }

    /// The surface.
    pub fn map(&self) -> &M {
        &self.map
    }

    /// The surface, mutably. Hosts use this to report readiness.
    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    /// Configuration the facade was built with.
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Automatic-framing state of the current tour load.
    pub fn fit_state(&self) -> FitState {
        self.camera.fit_state()
    }

    /// Whether the user-location puck is shown.
    pub fn has_user_location(&self) -> bool {
        self.locator.has_user_location()
    }

    /// Whether 3D buildings are requested and, on a ready surface, shown.
    pub fn is_3d(&self) -> bool {
        self.is_3d
    }

    /// Flushes everything deferred while the surface was loading. Returns
    /// the route request the host must fetch, if any.
    #[instrument(skip_all)]
    pub fn on_map_loaded(&mut self, state: &NavigationState) -> Option<RouteRequest> {
        info!("map surface ready");
        if self.is_3d {
            self.is_3d = set_buildings_enabled(&mut self.map, true);
        }
        self.flush(state)
    }

    /// Surface errors are diagnostic only.
    pub fn on_map_error(&self, message: &str) {
        warn!(error = message, "map surface error");
    }

    /// Drains the store's notifications and reconciles the surface.
    pub fn sync(&mut self, store: &mut PoiNavigationStore) -> Option<RouteRequest> {
        let events = store.take_events();
        self.apply_events(store.state(), &events)
    }

    /// Reconciles the surface with `state` after `events`.
    ///
    /// A tour load re-arms the initial fit and replaces the route overlay;
    /// every notification refreshes the markers. Nothing touches the
    /// surface before it is ready.
    pub fn apply_events(
        &mut self,
        state: &NavigationState,
        events: &[NavigationEvent],
    ) -> Option<RouteRequest> {
        for event in events {
            match &event.kind {
                NavigationEventKind::TourLoaded(loaded) => {
                    debug!(tour_id = %loaded.tour_id, "tour context replaced");
                    self.camera.reset();
                    self.route_url.clone_from(&loaded.route_url);
                    self.pending.route = true;
                    self.pending.markers = true;
                }
                NavigationEventKind::CurrentPoiChanged(_) | NavigationEventKind::PoiVisited(_) => {
                    self.pending.markers = true;
                }
            }
        }
        self.flush(state)
    }

    fn flush(&mut self, state: &NavigationState) -> Option<RouteRequest> {
        if !self.map.is_loaded() {
            debug!("map not ready; deferring sync");
            return None;
        }

        let mut request = None;
        if std::mem::take(&mut self.pending.route) {
            let overlay_id = self.config.overlay_id.clone();
            match &self.route_url {
                Some(url) => request = Some(self.routes.begin(&mut self.map, &overlay_id, url)),
                None => self.routes.clear(&mut self.map, &overlay_id),
            }
        }
        if std::mem::take(&mut self.pending.markers) {
            self.markers.sync_markers(
                &mut self.map,
                state.pois(),
                state.current_poi().map(|poi| &poi.id),
                state.visited_ids(),
            );
        }
        self.camera
            .fit_initial(&mut self.map, state.pois(), &FitOptions::default());
        request
    }

    /// Applies the fetch result of `request`.
    pub fn complete_route(
        &mut self,
        request: &RouteRequest,
        result: Result<serde_json::Value, RouteFetchError>,
    ) -> RouteOutcome {
        self.routes.complete(&mut self.map, request, result)
    }

    /// Fetches and applies `request` in one step.
    pub async fn load_route(
        &mut self,
        fetcher: &dyn RouteFetcher,
        request: &RouteRequest,
    ) -> RouteOutcome {
        let result = fetcher.fetch(&request.url).await;
        self.complete_route(request, result)
    }

    /// Handles a click on the marker `key`. A POI marker reports
    /// [`PoiSelected`] and selects the stop; call [`Self::sync`] afterwards
    /// to redraw.
    #[instrument(skip(self, store))]
    pub fn marker_clicked(
        &mut self,
        store: &mut PoiNavigationStore,
        key: &MarkerKey,
    ) -> Option<PoiSelected> {
        let poi = self.markers.dispatch_click(key)?.clone();
        info!(poi_id = %poi.id, "poi selected on map");
        store.select_by_id(&poi.id);
        Some(PoiSelected { poi })
    }

    /// Reframes the camera on the current stops, regardless of the initial
    /// fit guard. Does nothing before the surface is ready.
    pub fn recenter(&mut self, state: &NavigationState, options: &FitOptions) -> Option<CameraMove> {
        if !self.map.is_loaded() {
            return None;
        }
        Some(self.camera.recenter(&mut self.map, state.pois(), options))
    }

    /// Flies to the stop with `id`.
    pub fn fly_to_poi(
        &mut self,
        state: &NavigationState,
        id: &PoiId,
        zoom: Option<f64>,
        duration_ms: Option<u64>,
    ) -> Option<CameraTarget> {
        let poi = state.poi(id)?;
        if !self.map.is_loaded() {
            return None;
        }
        Some(self.camera.fly_to_poi(&mut self.map, poi, zoom, duration_ms))
    }

    /// Applies a location lookup. Returns whether the puck is shown.
    pub fn apply_user_location(&mut self, result: Result<LngLat, LocationError>) -> bool {
        if !self.map.is_loaded() {
            debug!("map not ready; ignoring location");
            return self.locator.has_user_location();
        }
        self.locator.apply(&mut self.map, result)
    }

    /// Asks `provider` for the device position and shows it.
    pub async fn locate(&mut self, provider: &dyn LocationProvider) -> bool {
        let result = provider.current_position().await;
        self.apply_user_location(result)
    }

    /// Requests 3D buildings on or off. Before the surface is ready the
    /// request is remembered. Returns the resulting state.
    pub fn set_3d(&mut self, enabled: bool) -> bool {
        self.is_3d = if self.map.is_loaded() {
            set_buildings_enabled(&mut self.map, enabled)
        } else {
            enabled
        };
        self.is_3d
    }
}
