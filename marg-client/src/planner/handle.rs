//! Shared, async access to a `TripPlanner`.
//!
//! The planner sits behind a tokio `RwLock`. A search takes the lock only
//! to issue its ticket and again to apply its outcome, never across the
//! remote call, so clicks and selections stay responsive while a search is
//! in flight. Every state change publishes the new revision on a `watch`
//! channel for views that long-poll.
//!
//! A search whose future is dropped before it finishes (the HTTP client
//! went away, the task was aborted) still completes its ticket, as a
//! failure, so the session never stays `Searching`.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, RwLockReadGuard, watch};
use tracing::warn;

use crate::domain::{Endpoint, Itinerary, SelectionMode};

use super::controller::{Completion, SearchTicket, TripPlanner};
use super::error::PlannerError;
use super::search::RouteSearch;

/// Failure reason applied to a search that was dropped mid-flight.
pub const SEARCH_CANCELLED: &str = "route search was cancelled";

/// How a triggered search ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The session is now resolved with this many itineraries
    Resolved { count: usize },
    /// A later search was issued first; this result was discarded
    Superseded,
}

/// Cloneable handle to one planner.
#[derive(Debug, Clone)]
pub struct PlannerHandle {
    inner: Arc<RwLock<TripPlanner>>,
    changes: Arc<watch::Sender<u64>>,
    search_timeout: Option<Duration>,
}

impl Default for PlannerHandle {
    fn default() -> Self {
        Self::new(TripPlanner::new())
    }
}

impl PlannerHandle {
    pub fn new(planner: TripPlanner) -> Self {
        let (changes, _) = watch::channel(planner.revision());
        Self {
            inner: Arc::new(RwLock::new(planner)),
            changes: Arc::new(changes),
            search_timeout: None,
        }
    }

    /// Fail searches that take longer than `limit`.
    pub fn with_search_timeout(mut self, limit: Duration) -> Self {
        self.search_timeout = Some(limit);
        self
    }

    /// Read access to the planner. Do not hold across an await.
    pub async fn read(&self) -> RwLockReadGuard<'_, TripPlanner> {
        self.inner.read().await
    }

    /// Latest published revision.
    pub fn revision(&self) -> u64 {
        *self.changes.borrow()
    }

    /// Receiver that sees every published revision.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Wait until the revision exceeds `after`, or `timeout` elapses.
    ///
    /// Returns the revision current when the wait ended.
    pub async fn wait_for_change(&self, after: u64, timeout: Duration) -> u64 {
        let mut rx = self.changes.subscribe();
        match tokio::time::timeout(timeout, rx.wait_for(|rev| *rev > after)).await {
            Ok(Ok(rev)) => *rev,
            _ => self.revision(),
        }
    }

    pub async fn on_map_click(&self, lat: f64, lng: f64) -> Result<Endpoint, PlannerError> {
        let mut planner = self.inner.write().await;
        let endpoint = planner.on_map_click(lat, lng)?;
        self.publish(&planner);
        Ok(endpoint)
    }

    pub async fn set_mode(&self, mode: SelectionMode) {
        let mut planner = self.inner.write().await;
        planner.set_mode(mode);
        self.publish(&planner);
    }

    pub async fn set_departure_time(&self, departure: Option<DateTime<Utc>>) {
        let mut planner = self.inner.write().await;
        planner.set_departure_time(departure);
        self.publish(&planner);
    }

    pub async fn select_itinerary(&self, index: usize) -> Result<(), PlannerError> {
        let mut planner = self.inner.write().await;
        planner.select_itinerary(index)?;
        self.publish(&planner);
        Ok(())
    }

    /// Run a search against `search` for the current request.
    ///
    /// Returns `IncompleteRequest` without touching the session if an
    /// endpoint is missing, and `SearchFailed` if this search was the
    /// latest and failed (the session is then `Failed`).
    pub async fn trigger_search<S: RouteSearch>(
        &self,
        search: &S,
    ) -> Result<SearchOutcome, PlannerError> {
        let ticket = {
            let mut planner = self.inner.write().await;
            let ticket = planner.begin_search(Utc::now())?;
            self.publish(&planner);
            ticket
        };
        let pending = PendingSearch::new(self.clone(), ticket);

        let outcome = match self.search_timeout {
            Some(limit) => match tokio::time::timeout(limit, search.search(&ticket.query)).await {
                Ok(result) => result.map_err(|e| e.to_string()),
                Err(_) => Err(format!(
                    "route search timed out after {} ms",
                    limit.as_millis()
                )),
            },
            None => search.search(&ticket.query).await.map_err(|e| e.to_string()),
        };

        let summary = match &outcome {
            Ok(itineraries) => Ok(itineraries.len()),
            Err(reason) => Err(reason.clone()),
        };

        let mut planner = self.inner.write().await;
        let ticket = pending.disarm();
        match self.complete(&mut planner, &ticket, outcome) {
            Completion::Stale => Ok(SearchOutcome::Superseded),
            Completion::Applied => summary
                .map(|count| SearchOutcome::Resolved { count })
                .map_err(PlannerError::SearchFailed),
        }
    }

    fn complete(
        &self,
        planner: &mut TripPlanner,
        ticket: &SearchTicket,
        outcome: Result<Vec<Itinerary>, String>,
    ) -> Completion {
        let completion = planner.complete_search(ticket, outcome);
        if completion == Completion::Applied {
            self.publish(planner);
        }
        completion
    }

    fn publish(&self, planner: &TripPlanner) {
        self.changes.send_replace(planner.revision());
    }
}

/// An issued ticket whose outcome has not been applied yet.
///
/// Dropping it armed fails the ticket with [`SEARCH_CANCELLED`].
struct PendingSearch {
    handle: PlannerHandle,
    ticket: SearchTicket,
    armed: bool,
}

impl PendingSearch {
    fn new(handle: PlannerHandle, ticket: SearchTicket) -> Self {
        Self {
            handle,
            ticket,
            armed: true,
        }
    }

    fn disarm(mut self) -> SearchTicket {
        self.armed = false;
        self.ticket
    }
}

impl Drop for PendingSearch {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!(seq = self.ticket.seq, "route search dropped before completing");

        if let Ok(mut planner) = self.handle.inner.try_write() {
            self.handle
                .complete(&mut planner, &self.ticket, Err(SEARCH_CANCELLED.to_string()));
            return;
        }

        // Lock is busy; finish on the runtime instead
        let handle = self.handle.clone();
        let ticket = self.ticket;
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    let mut planner = handle.inner.write().await;
                    handle.complete(&mut planner, &ticket, Err(SEARCH_CANCELLED.to_string()));
                });
            }
            Err(_) => warn!(seq = ticket.seq, "no runtime to fail dropped search on"),
        }
    }
}
