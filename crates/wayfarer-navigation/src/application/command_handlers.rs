//! Command handlers for the navigation context.
//!
//! Handlers apply a command to the host-owned store. Notifications stay
//! pending on the store so the composition layer can drain them; the
//! result only reports which ones this command produced.

use tracing::{info, instrument};
use uuid::Uuid;
use wayfarer_core::error::TourError;
use wayfarer_core::model::PoiId;
use wayfarer_core::repository::TourRepository;

use crate::domain::commands::{
    AdvanceToNextPoi, Command, LoadTour, ReturnToPreviousPoi, SelectPoi,
};
use crate::domain::store::PoiNavigationStore;

/// Result of a handled command.
#[derive(Debug, Clone)]
pub struct NavigationCommandResult {
    /// Current index after the command.
    pub current_index: usize,
    /// Current stop after the command.
    pub current_poi_id: Option<PoiId>,
    /// IDs of the notifications the command recorded; empty for a no-op.
    pub event_ids: Vec<Uuid>,
}

/// Applies `apply` to the store and reports the notifications it recorded,
/// for mutations that arrive outside a command (e.g. a map click).
pub fn run_tracked<T>(
    store: &mut PoiNavigationStore,
    apply: impl FnOnce(&mut PoiNavigationStore) -> T,
) -> (T, NavigationCommandResult) {
    let already_pending = store.pending_events().len();
    let output = apply(store);
    let result = NavigationCommandResult {
        current_index: store.current_index(),
        current_poi_id: store.current_poi().map(|poi| poi.id.clone()),
        event_ids: store.pending_events()[already_pending..]
            .iter()
            .map(|event| event.metadata.event_id)
            .collect(),
    };
    (output, result)
}

fn run(
    store: &mut PoiNavigationStore,
    apply: impl FnOnce(&mut PoiNavigationStore),
) -> NavigationCommandResult {
    run_tracked(store, apply).1
}

/// Handles `LoadTour`: fetches the tour and its stops through the
/// data-access port and loads them into the store.
///
/// # Errors
///
/// Returns `TourError::TourNotFound` if the source has no such tour,
/// `TourError::Validation` if the tour has no stops, and propagates data
/// source failures. The store is left untouched on error.
#[instrument(skip(store, repo), fields(tour_id = %command.tour_id, correlation_id = %command.correlation_id))]
pub async fn handle_load_tour(
    command: &LoadTour,
    store: &mut PoiNavigationStore,
    repo: &dyn TourRepository,
) -> Result<NavigationCommandResult, TourError> {
    let tour = repo
        .get_tour_by_id(&command.tour_id)
        .await?
        .ok_or_else(|| TourError::TourNotFound(command.tour_id.clone()))?;
    let pois = repo.get_pois_for_tour(&command.tour_id).await?;
    if pois.is_empty() {
        return Err(TourError::Validation(format!(
            "tour {} has no points of interest",
            command.tour_id
        )));
    }

    info!(
        command_type = command.command_type(),
        poi_count = pois.len(),
        "loading tour"
    );
    Ok(run(store, |store| store.load_tour(tour, pois)))
}

/// Handles `AdvanceToNextPoi`.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
pub fn handle_next(
    command: &AdvanceToNextPoi,
    store: &mut PoiNavigationStore,
) -> NavigationCommandResult {
    run(store, PoiNavigationStore::next)
}

/// Handles `ReturnToPreviousPoi`.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
pub fn handle_previous(
    command: &ReturnToPreviousPoi,
    store: &mut PoiNavigationStore,
) -> NavigationCommandResult {
    run(store, PoiNavigationStore::previous)
}

/// Handles `SelectPoi`. Unknown ids are a no-op, not an error: they are
/// routine when the UI holds a stale reference.
#[instrument(skip_all, fields(poi_id = %command.poi_id, correlation_id = %command.correlation_id))]
pub fn handle_select_poi(command: &SelectPoi, store: &mut PoiNavigationStore) -> NavigationCommandResult {
    run(store, |store| store.select_by_id(&command.poi_id))
}
