//! Trip request and endpoint selection types.

use std::fmt;

use chrono::{DateTime, Utc};

use super::GeoPoint;

/// One end of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Source,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Destination => f.write_str("destination"),
        }
    }
}

/// Which endpoint the next map click writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionMode {
    #[default]
    PickingSource,
    PickingDestination,
}

impl SelectionMode {
    /// The endpoint this mode edits.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            SelectionMode::PickingSource => Endpoint::Source,
            SelectionMode::PickingDestination => Endpoint::Destination,
        }
    }

    /// The mode that edits the given endpoint.
    pub fn editing(endpoint: Endpoint) -> Self {
        match endpoint {
            Endpoint::Source => SelectionMode::PickingSource,
            Endpoint::Destination => SelectionMode::PickingDestination,
        }
    }
}

/// The trip being assembled on the map.
///
/// Endpoints start unset. `departure_time` is `None` unless the rider
/// pinned one, in which case searches use it instead of the clock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripRequest {
    pub source: Option<GeoPoint>,
    pub destination: Option<GeoPoint>,
    pub departure_time: Option<DateTime<Utc>>,
}

impl TripRequest {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the point stored for an endpoint.
    pub fn endpoint(&self, endpoint: Endpoint) -> Option<GeoPoint> {
        match endpoint {
            Endpoint::Source => self.source,
            Endpoint::Destination => self.destination,
        }
    }

    /// Replace the point stored for an endpoint.
    pub fn set_endpoint(&mut self, endpoint: Endpoint, point: GeoPoint) {
        match endpoint {
            Endpoint::Source => self.source = Some(point),
            Endpoint::Destination => self.destination = Some(point),
        }
    }

    /// Returns true once both endpoints are set.
    pub fn is_complete(&self) -> bool {
        self.source.is_some() && self.destination.is_some()
    }

    /// Both endpoints, if set.
    pub fn endpoints(&self) -> Option<(GeoPoint, GeoPoint)> {
        Some((self.source?, self.destination?))
    }

    /// Departure to send with a search issued at `now`.
    pub fn departure_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.departure_time.unwrap_or(now)
    }
}

/// A fully specified search: both endpoints and a resolved departure time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchQuery {
    pub source: GeoPoint,
    pub destination: GeoPoint,
    pub departure_time: DateTime<Utc>,
}
