//! Data transfer objects for web requests and responses.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Endpoint, Itinerary, Leg, SelectionMode, Stop};
use crate::planner::{LegStyle, MapSegment, SessionStatus, TripPlanner};

/// Shown next to the field the next click will fill.
pub const PICK_HINT: &str = "(Click on Map)";

/// Shown when a search resolved with no routes.
pub const EMPTY_MESSAGE: &str = "No routes generated. Pick start and end nodes.";

/// Shown when the last search failed.
pub const FAILURE_MESSAGE: &str = "Error finding routes. Check backend connection.";

pub const SEARCH_LABEL: &str = "Find Routes";
pub const SEARCHING_LABEL: &str = "Crunching Routes...";

// ============================================================================
// Requests
// ============================================================================

/// A click on the map.
#[derive(Debug, Deserialize)]
pub struct MapClickRequest {
    pub lat: f64,
    pub lng: f64,
}

/// Endpoint name as sent by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointName {
    Source,
    Destination,
}

impl From<EndpointName> for SelectionMode {
    fn from(name: EndpointName) -> Self {
        match name {
            EndpointName::Source => SelectionMode::editing(Endpoint::Source),
            EndpointName::Destination => SelectionMode::editing(Endpoint::Destination),
        }
    }
}

/// Choose which endpoint the next click edits.
#[derive(Debug, Deserialize)]
pub struct ModeRequest {
    pub mode: EndpointName,
}

/// Pin a departure time (RFC 3339), or clear it with `null`.
#[derive(Debug, Deserialize)]
pub struct DepartureRequest {
    pub departure_time: Option<String>,
}

impl DepartureRequest {
    /// Parse the requested time, converting any offset to UTC.
    pub fn parse(&self) -> Result<Option<DateTime<Utc>>, chrono::ParseError> {
        self.departure_time
            .as_deref()
            .map(|s| DateTime::parse_from_rfc3339(s).map(|t| t.with_timezone(&Utc)))
            .transpose()
    }
}

/// Make one itinerary active.
#[derive(Debug, Deserialize)]
pub struct SelectItineraryRequest {
    pub index: usize,
}

/// Query for `GET /api/view`.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    /// Block until the revision is newer than this
    pub after: Option<u64>,
}

// ============================================================================
// Responses
// ============================================================================

/// Everything the front end needs to draw the current state.
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub revision: u64,

    /// "source" or "destination"
    pub mode: String,

    pub source: EndpointView,
    pub destination: EndpointView,

    /// Departure pinned by the rider; absent means "now"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,

    /// "idle", "searching", "resolved" or "failed"
    pub status: &'static str,

    /// Empty-state or failure text, when one applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,

    /// Why the last search failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,

    pub itineraries: Vec<ItineraryCard>,
    pub active_index: Option<usize>,

    /// Polylines for the active itinerary
    pub segments: Vec<SegmentView>,

    pub search: SearchAction,
}

impl ViewResponse {
    pub fn from_planner(planner: &TripPlanner) -> Self {
        let selection = planner.selection();
        let session = planner.session();
        let status = session.status();

        let endpoint_view = |endpoint: Endpoint| {
            let editing = selection.is_editing(endpoint);
            EndpointView {
                position: selection
                    .request()
                    .endpoint(endpoint)
                    .map(|p| p.to_lat_lng()),
                text: selection.field_text(endpoint),
                editing,
                hint: editing.then_some(PICK_HINT),
            }
        };

        let message = match status {
            SessionStatus::Resolved if session.is_empty_result() => Some(EMPTY_MESSAGE),
            SessionStatus::Failed => Some(FAILURE_MESSAGE),
            _ => None,
        };

        let active_index = session.active_index();
        let itineraries = session
            .itineraries()
            .iter()
            .enumerate()
            .map(|(i, it)| ItineraryCard::new(i, it, active_index == Some(i)))
            .collect();

        let searching = status == SessionStatus::Searching;

        Self {
            revision: planner.revision(),
            mode: selection.mode().endpoint().to_string(),
            source: endpoint_view(Endpoint::Source),
            destination: endpoint_view(Endpoint::Destination),
            departure_time: selection
                .request()
                .departure_time
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true)),
            status: status.as_str(),
            message,
            failure_reason: session.failure_reason().map(str::to_string),
            itineraries,
            active_index,
            segments: planner
                .project_legs_for_map()
                .iter()
                .map(SegmentView::from_segment)
                .collect(),
            search: SearchAction {
                enabled: planner.can_search(),
                label: if searching {
                    SEARCHING_LABEL
                } else {
                    SEARCH_LABEL
                },
            },
        }
    }
}

/// One endpoint field and its map marker.
#[derive(Debug, Serialize)]
pub struct EndpointView {
    /// `[lat, lng]` when set
    pub position: Option<[f64; 2]>,

    /// "lat, lng" to four places, empty when unset
    pub text: String,

    /// Whether the next click fills this endpoint
    pub editing: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

/// The search button.
#[derive(Debug, Serialize)]
pub struct SearchAction {
    pub enabled: bool,
    pub label: &'static str,
}

/// An itinerary in the sidebar list.
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryCard {
    pub index: usize,

    /// e.g. "22 min"
    pub time_label: String,

    /// e.g. "1 transfer"
    pub transfers_label: String,

    pub active: bool,
    pub legs: Vec<LegLine>,
}

impl ItineraryCard {
    pub fn new(index: usize, itinerary: &Itinerary, active: bool) -> Self {
        Self {
            index,
            time_label: itinerary.time_label(),
            transfers_label: itinerary.transfers_label(),
            active,
            legs: itinerary.legs().iter().map(LegLine::from_leg).collect(),
        }
    }
}

/// One leg line inside an itinerary card.
#[derive(Debug, Clone, Serialize)]
pub struct LegLine {
    pub mode: &'static str,

    /// e.g. "BUS for 15 min (4.0 km)"
    pub summary: String,

    pub color: &'static str,
}

impl LegLine {
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            mode: leg.mode().as_str(),
            summary: leg.summary(),
            color: LegStyle::for_mode(leg.mode()).color,
        }
    }
}

/// A map polyline in Leaflet terms.
#[derive(Debug, Serialize)]
pub struct SegmentView {
    /// `[[lat, lng], [lat, lng]]`
    pub coordinates: [[f64; 2]; 2],
    pub mode: &'static str,
    pub color: &'static str,
    pub weight: u8,

    #[serde(rename = "dashArray", skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<&'static str>,
}

impl SegmentView {
    pub fn from_segment(segment: &MapSegment) -> Self {
        let [from, to] = segment.geometry;
        Self {
            coordinates: [from.to_lat_lng(), to.to_lat_lng()],
            mode: segment.mode.as_str(),
            color: segment.style.color,
            weight: segment.style.stroke_width,
            dash_array: segment.style.dash_pattern,
        }
    }
}

/// Response of `GET /api/stops`.
#[derive(Debug, Serialize)]
pub struct StopListResponse {
    pub stops: Vec<StopView>,
}

/// A stop for the map's context layer.
#[derive(Debug, Serialize)]
pub struct StopView {
    pub id: String,
    pub name: Option<String>,
    pub code: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub kind: Option<String>,
}

impl StopView {
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            id: stop.id.clone(),
            name: stop.name.clone(),
            code: stop.code.clone(),
            lat: stop.position.lat(),
            lng: stop.position.lng(),
            kind: stop.kind.clone(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
