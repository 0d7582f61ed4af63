//! The authoritative navigation store.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;
use wayfarer_core::event::{Clock, EventMetadata};
use wayfarer_core::model::{Poi, PoiId, Tour};

use super::events::{
    CurrentPoiChanged, NavigationEvent, NavigationEventKind, PoiVisited, TourLoaded,
};
use super::state::NavigationState;

/// Owns the single [`NavigationState`] of a navigation session.
///
/// Mutations are total: invalid requests are no-ops. Each effective change
/// is recorded as a [`NavigationEvent`] until the owner drains it with
/// [`PoiNavigationStore::take_events`].
pub struct PoiNavigationStore {
    state: NavigationState,
    clock: Arc<dyn Clock>,
    sequence: u64,
    pending_events: Vec<NavigationEvent>,
}

impl std::fmt::Debug for PoiNavigationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoiNavigationStore")
            .field("state", &self.state)
            .field("sequence", &self.sequence)
            .field("pending_events", &self.pending_events.len())
            .finish_non_exhaustive()
    }
}

impl PoiNavigationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: NavigationState::default(),
            clock,
            sequence: 0,
            pending_events: Vec::new(),
        }
    }

    /// Replaces the whole navigation state with `tour` and its stops.
    pub fn load_tour(&mut self, tour: Tour, pois: Vec<Poi>) {
        let next = NavigationState::loaded(tour, pois);
        let Some(tour) = next.tour() else {
            return;
        };
        let loaded = TourLoaded {
            tour_id: tour.id.clone(),
            route_url: tour.route_url.clone(),
            poi_count: next.pois().len(),
            current_poi_id: next.current_poi().map(|poi| poi.id.clone()),
        };
        self.state = next;
        self.record(NavigationEventKind::TourLoaded(loaded));
    }

    /// Moves to the next stop, if there is one.
    pub fn next(&mut self) {
        let next = self.state.next();
        self.transition(next);
    }

    /// Moves to the previous stop, if there is one.
    pub fn previous(&mut self) {
        let next = self.state.previous();
        self.transition(next);
    }

    /// Jumps to the stop with `id`, if the loaded tour has it.
    pub fn select_by_id(&mut self, id: &PoiId) {
        let next = self.state.select_by_id(id);
        self.transition(next);
    }

    fn transition(&mut self, next: NavigationState) {
        let from_index = self.state.current_index();
        let to_index = next.current_index();
        let newly_visited: Vec<PoiId> = next
            .visited_ids()
            .difference(self.state.visited_ids())
            .cloned()
            .collect();
        let moved_to = (from_index != to_index)
            .then(|| next.current_poi().map(|poi| poi.id.clone()))
            .flatten();

        self.state = next;

        if let Some(poi_id) = moved_to {
            self.record(NavigationEventKind::CurrentPoiChanged(CurrentPoiChanged {
                from_index,
                to_index,
                poi_id,
            }));
        }
        for poi_id in newly_visited {
            self.record(NavigationEventKind::PoiVisited(PoiVisited { poi_id }));
        }
    }

    fn record(&mut self, kind: NavigationEventKind) {
        self.sequence += 1;
        debug!(
            event_type = kind.event_type(),
            sequence_number = self.sequence,
            "navigation state changed"
        );
        // TODO: event_id uses Uuid::new_v4(); inject an id source if
        // notifications ever need to be replayed byte-for-byte.
        self.pending_events.push(NavigationEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                sequence_number: self.sequence,
                occurred_at: self.clock.now(),
            },
            kind,
        });
    }

    /// Notifications recorded since the last drain.
    #[must_use]
    pub fn pending_events(&self) -> &[NavigationEvent] {
        &self.pending_events
    }

    /// Drains recorded notifications.
    pub fn take_events(&mut self) -> Vec<NavigationEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// The current state snapshot.
    #[must_use]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// The loaded tour, if any.
    #[must_use]
    pub fn tour(&self) -> Option<&Tour> {
        self.state.tour()
    }

    /// Stops in traversal order.
    #[must_use]
    pub fn pois(&self) -> &[Poi] {
        self.state.pois()
    }

    /// Position of the current stop.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    /// The current stop, if any.
    #[must_use]
    pub fn current_poi(&self) -> Option<&Poi> {
        self.state.current_poi()
    }

    /// Stops visited since the tour was loaded.
    #[must_use]
    pub fn visited_ids(&self) -> &BTreeSet<PoiId> {
        self.state.visited_ids()
    }

    /// Whether the current stop is the first.
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.state.is_first()
    }

    /// Whether the current stop is the last (or there are none).
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.state.is_last()
    }
}
