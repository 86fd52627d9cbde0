//! Itinerary session: the request lifecycle and the active selection.
//!
//! ```text
//! Idle ──start──▶ Searching ──resolve──▶ Resolved ──start──▶ Searching ...
//!                     │
//!                     └────fail────▶ Failed ──start──▶ Searching ...
//! ```
//!
//! Itineraries exist only in `Resolved`. Starting a search discards the
//! previous result wholesale, and a failure never keeps stale itineraries.

use std::fmt;

use tracing::{info, warn};

use crate::domain::Itinerary;

use super::error::PlannerError;
use super::projection::{MapSegment, project_legs};

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Searching,
    Resolved,
    Failed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Searching => "searching",
            SessionStatus::Resolved => "resolved",
            SessionStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session state. Data lives only in the states that own it.
#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    Idle,
    Searching,
    Resolved {
        itineraries: Vec<Itinerary>,
        /// Meaningful only when `itineraries` is non-empty
        active: usize,
    },
    Failed {
        reason: String,
    },
}

/// The result of the latest search and which itinerary is shown.
#[derive(Debug, Clone, Default)]
pub struct ItinerarySession {
    state: State,
}

impl ItinerarySession {
    /// A fresh, idle session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SessionStatus {
        match self.state {
            State::Idle => SessionStatus::Idle,
            State::Searching => SessionStatus::Searching,
            State::Resolved { .. } => SessionStatus::Resolved,
            State::Failed { .. } => SessionStatus::Failed,
        }
    }

    /// Itineraries in upstream order; empty unless resolved.
    pub fn itineraries(&self) -> &[Itinerary] {
        match &self.state {
            State::Resolved { itineraries, .. } => itineraries,
            _ => &[],
        }
    }

    /// Index of the active itinerary, if there is one.
    pub fn active_index(&self) -> Option<usize> {
        match &self.state {
            State::Resolved {
                itineraries,
                active,
            } if !itineraries.is_empty() => Some(*active),
            _ => None,
        }
    }

    /// The itinerary currently drawn on the map.
    pub fn active_itinerary(&self) -> Option<&Itinerary> {
        match &self.state {
            State::Resolved {
                itineraries,
                active,
            } => itineraries.get(*active),
            _ => None,
        }
    }

    /// Why the last search failed, if it did.
    pub fn failure_reason(&self) -> Option<&str> {
        match &self.state {
            State::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    /// Returns true if resolved with no itineraries (the empty state).
    pub fn is_empty_result(&self) -> bool {
        matches!(&self.state, State::Resolved { itineraries, .. } if itineraries.is_empty())
    }

    /// Enter `Searching` from any state, discarding any previous result.
    pub(crate) fn start_search(&mut self) {
        self.state = State::Searching;
    }

    /// Enter `Resolved` with the given itineraries, activating the first.
    pub(crate) fn resolve(&mut self, itineraries: Vec<Itinerary>) {
        info!(count = itineraries.len(), "search resolved");
        self.state = State::Resolved {
            itineraries,
            active: 0,
        };
    }

    /// Enter `Failed`, dropping any itineraries.
    pub(crate) fn fail(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(%reason, "search failed");
        self.state = State::Failed { reason };
    }

    /// Make the itinerary at `index` active.
    ///
    /// Only valid when resolved and `index` is in range; otherwise the
    /// session is unchanged.
    pub fn select_itinerary(&mut self, index: usize) -> Result<(), PlannerError> {
        let len = self.itineraries().len();

        match &mut self.state {
            State::Resolved {
                itineraries,
                active,
            } if index < itineraries.len() => {
                *active = index;
                Ok(())
            }
            _ => {
                warn!(index, len, "itinerary selection out of range");
                Err(PlannerError::IndexOutOfRange { index, len })
            }
        }
    }

    /// Map segments for the active itinerary; empty when there is none.
    pub fn project_legs_for_map(&self) -> Vec<MapSegment> {
        self.active_itinerary()
            .map(project_legs)
            .unwrap_or_default()
    }
}
