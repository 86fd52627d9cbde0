//! The planner: single owner of all rider-facing state.
//!
//! `TripPlanner` holds the selection controller and the itinerary session
//! and is mutated only through the operations below. Searches are split in
//! two so the caller can await the remote call without holding the state:
//! `begin_search` issues a numbered ticket and enters `Searching`;
//! `complete_search` applies the outcome only if that ticket is still the
//! latest one issued. A slow earlier search therefore can never overwrite
//! the result of a later one.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{Endpoint, Itinerary, SearchQuery, SelectionMode};

use super::error::PlannerError;
use super::projection::MapSegment;
use super::selection::SelectionController;
use super::session::{ItinerarySession, SessionStatus};

/// Proof that a search was issued, carrying its sequence number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: SearchQuery,
}

/// What `complete_search` did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome was the latest and is now the session state
    Applied,
    /// A newer search was issued after this one; the outcome was dropped
    Stale,
}

/// Application state for one rider.
#[derive(Debug, Clone, Default)]
pub struct TripPlanner {
    selection: SelectionController,
    session: ItinerarySession,
    /// Sequence number of the most recently issued search
    latest_seq: u64,
    /// Bumped on every state change
    revision: u64,
}

impl TripPlanner {
    /// Start with no endpoints, `PickingSource`, and an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn session(&self) -> &ItinerarySession {
        &self.session
    }

    /// Counter incremented by every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns true if a search may be triggered right now.
    pub fn can_search(&self) -> bool {
        self.selection.request().is_complete()
            && self.session.status() != SessionStatus::Searching
    }

    /// Write a clicked point into the endpoint being picked.
    pub fn on_map_click(&mut self, lat: f64, lng: f64) -> Result<Endpoint, PlannerError> {
        let endpoint = self.selection.on_map_click(lat, lng)?;
        self.touch();
        Ok(endpoint)
    }

    /// Choose which endpoint the next click edits.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.selection.set_mode(mode);
        self.touch();
    }

    /// Pin or clear the departure time used by future searches.
    pub fn set_departure_time(&mut self, departure: Option<DateTime<Utc>>) {
        self.selection.set_departure_time(departure);
        self.touch();
    }

    /// Issue a search at `now`.
    ///
    /// Fails with `IncompleteRequest`, changing nothing, unless both
    /// endpoints are set. Otherwise the session enters `Searching` (also
    /// when a search is already in flight, which this one supersedes).
    pub fn begin_search(&mut self, now: DateTime<Utc>) -> Result<SearchTicket, PlannerError> {
        let request = self.selection.request();
        let (source, destination) = request
            .endpoints()
            .ok_or(PlannerError::IncompleteRequest)?;

        let query = SearchQuery {
            source,
            destination,
            departure_time: request.departure_at(now),
        };

        self.latest_seq += 1;
        self.session.start_search();
        self.touch();

        debug!(seq = self.latest_seq, "search issued");
        Ok(SearchTicket {
            seq: self.latest_seq,
            query,
        })
    }

    /// Apply the outcome of the search identified by `ticket`.
    ///
    /// `Err` carries a human-readable failure reason.
    pub fn complete_search(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<Vec<Itinerary>, String>,
    ) -> Completion {
        if ticket.seq != self.latest_seq {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding stale search response"
            );
            return Completion::Stale;
        }

        match outcome {
            Ok(itineraries) => self.session.resolve(itineraries),
            Err(reason) => self.session.fail(reason),
        }
        self.touch();
        Completion::Applied
    }

    /// Make the itinerary at `index` the one drawn on the map.
    pub fn select_itinerary(&mut self, index: usize) -> Result<(), PlannerError> {
        self.session.select_itinerary(index)?;
        self.touch();
        Ok(())
    }

    /// Map segments for the active itinerary.
    pub fn project_legs_for_map(&self) -> Vec<MapSegment> {
        self.session.project_legs_for_map()
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
