//! Shared application state.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;
use wayfarer_core::event::Clock;
use wayfarer_core::repository::TourRepository;
use wayfarer_core::route::RouteFetcher;
use wayfarer_map::buildings::BUILDINGS_SOURCE_ID;
use wayfarer_map::config::MapConfig;
use wayfarer_map::facade::MapSyncFacade;
use wayfarer_map::route::{RouteOutcome, RouteRequest};
use wayfarer_map::surface::HeadlessMap;
use wayfarer_navigation::domain::store::PoiNavigationStore;

/// The single navigation session this host serves, and its map.
#[derive(Debug)]
pub struct TourSession {
    /// Authoritative navigation state.
    pub store: PoiNavigationStore,
    /// Map kept in lockstep with the store.
    pub map: MapSyncFacade<HeadlessMap>,
}

impl TourSession {
    /// Creates a session with an empty store and a ready map.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, config: MapConfig) -> Self {
        let store = PoiNavigationStore::new(clock);
        // The headless host assumes an OpenMapTiles-schema style.
        let mut surface =
            HeadlessMap::new(config.map_init(store.pois())).with_style_source(BUILDINGS_SOURCE_ID);
        surface.finish_loading();
        let mut map = MapSyncFacade::new(surface, config);
        map.on_map_loaded(store.state());
        Self { store, map }
    }

    /// Hands pending store notifications to the map.
    pub fn sync(&mut self) -> Option<RouteRequest> {
        self.map.sync(&mut self.store)
    }
}

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of notification timestamps.
    pub clock: Arc<dyn Clock>,
    /// Data-access port.
    pub tour_repository: Arc<dyn TourRepository>,
    /// Route document fetcher.
    pub route_fetcher: Arc<dyn RouteFetcher>,
    /// The navigation session.
    pub session: Arc<Mutex<TourSession>>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        tour_repository: Arc<dyn TourRepository>,
        route_fetcher: Arc<dyn RouteFetcher>,
        map_config: MapConfig,
    ) -> Self {
        let session = TourSession::new(Arc::clone(&clock), map_config);
        Self {
            clock,
            tour_repository,
            route_fetcher,
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Fetches `request` without holding the session lock, then applies the
    /// result. A response superseded meanwhile is dropped as stale.
    pub async fn load_route(&self, request: RouteRequest) -> RouteOutcome {
        debug!(url = %request.url, generation = request.generation, "fetching route");
        let result = self.route_fetcher.fetch(&request.url).await;
        self.session.lock().await.map.complete_route(&request, result)
    }
}
