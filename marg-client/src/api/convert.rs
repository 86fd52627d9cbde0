//! Conversion from wire types to domain types.
//!
//! Route order is preserved exactly as the service ranked it. Any malformed
//! route fails the whole response, so a session never shows a partial or
//! silently filtered result set.

use chrono::SecondsFormat;
use tracing::{debug, warn};

use crate::domain::{DomainError, GeoPoint, Itinerary, Leg, SearchQuery, Stop, TravelMode};

use super::types::{
    LatLng, LegDto, NodeDto, RouteDto, SearchRequestBody, SearchResponse, StopsResponse,
};

/// Error converting a search response into itineraries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("route {route}{}: {source}", .leg.map(|l| format!(", leg {l}")).unwrap_or_default())]
pub struct ConversionError {
    /// Index of the offending route
    pub route: usize,
    /// Index of the offending leg, if the error is leg-specific
    pub leg: Option<usize>,
    pub source: DomainError,
}

/// Build the request body for a query.
pub fn search_request_body(query: &SearchQuery) -> SearchRequestBody {
    SearchRequestBody {
        source: LatLng {
            lat: query.source.lat(),
            lng: query.source.lng(),
        },
        destination: LatLng {
            lat: query.destination.lat(),
            lng: query.destination.lng(),
        },
        departure_time: query
            .departure_time
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// Convert a search response into itineraries, preserving order.
pub fn convert_search_response(
    response: &SearchResponse,
) -> Result<Vec<Itinerary>, ConversionError> {
    response
        .routes
        .iter()
        .enumerate()
        .map(|(idx, route)| convert_route(idx, route))
        .collect()
}

fn convert_route(idx: usize, route: &RouteDto) -> Result<Itinerary, ConversionError> {
    let legs = route
        .legs
        .iter()
        .enumerate()
        .map(|(leg_idx, leg)| {
            convert_leg(leg).map_err(|source| ConversionError {
                route: idx,
                leg: Some(leg_idx),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let itinerary = Itinerary::new(legs, route.total_time_mins, route.transfers).map_err(
        |source| ConversionError {
            route: idx,
            leg: None,
            source,
        },
    )?;

    if !itinerary.transfers_consistent() {
        debug!(
            route = idx,
            reported = itinerary.transfer_count(),
            derived = itinerary.derived_transfer_count(),
            "reported transfer count differs from legs; keeping reported value"
        );
    }

    Ok(itinerary)
}

fn convert_leg(leg: &LegDto) -> Result<Leg, DomainError> {
    let mode = TravelMode::parse(&leg.mode)?;
    let from = convert_node(&leg.from_node)?;
    let to = convert_node(&leg.to_node)?;
    Leg::new(mode, from, to, leg.duration_mins, leg.length_m)
}

fn convert_node(node: &NodeDto) -> Result<GeoPoint, DomainError> {
    Ok(GeoPoint::new(node.lat, node.lon)?)
}

/// Convert the stops listing. Stops with invalid coordinates are skipped.
pub fn convert_stops(response: &StopsResponse) -> Vec<Stop> {
    response
        .stops
        .iter()
        .filter_map(|dto| match GeoPoint::new(dto.lat, dto.lon) {
            Ok(position) => Some(Stop {
                id: dto.id.clone(),
                name: dto.name.clone(),
                code: dto.code.clone(),
                position,
                kind: dto.kind.clone(),
            }),
            Err(e) => {
                warn!(stop = %dto.id, error = %e, "skipping stop with invalid position");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::StopDto;
    use chrono::{TimeZone, Utc};

    fn node(lat: f64, lon: f64) -> NodeDto {
        NodeDto {
            lat,
            lon,
            id: None,
            name: None,
        }
    }

    fn leg(mode: &str, mins: f64, len: f64, from: (f64, f64), to: (f64, f64)) -> LegDto {
        LegDto {
            mode: mode.to_string(),
            duration_mins: mins,
            length_m: len,
            from_node: node(from.0, from.1),
            to_node: node(to.0, to.1),
        }
    }

    fn route(total: f64, transfers: u32, legs: Vec<LegDto>) -> RouteDto {
        RouteDto {
            total_time_mins: total,
            transfers,
            legs,
            score: None,
            rank: None,
        }
    }

    #[test]
    fn request_body_formats_departure() {
        let query = SearchQuery {
            source: GeoPoint::new(18.52, 73.85).unwrap(),
            destination: GeoPoint::new(18.53, 73.86).unwrap(),
            departure_time: Utc.with_ymd_and_hms(2026, 2, 23, 18, 30, 0).unwrap(),
        };

        let body = search_request_body(&query);
        assert_eq!(body.source.lng, 73.85);
        assert_eq!(body.destination.lat, 18.53);
        assert_eq!(body.departure_time, "2026-02-23T18:30:00.000Z");
    }

    #[test]
    fn converts_in_order() {
        let response = SearchResponse {
            routes: vec![
                route(
                    30.0,
                    0,
                    vec![leg("metro", 30.0, 9000.0, (18.5, 73.8), (18.6, 73.9))],
                ),
                route(
                    22.0,
                    1,
                    vec![
                        leg("bus", 15.0, 4000.0, (18.52, 73.85), (18.525, 73.855)),
                        leg("walk", 7.0, 500.0, (18.525, 73.855), (18.53, 73.86)),
                    ],
                ),
            ],
        };

        let itineraries = convert_search_response(&response).unwrap();
        assert_eq!(itineraries.len(), 2);
        // Upstream order is kept even though the second is faster
        assert_eq!(itineraries[0].total_time_minutes(), 30.0);
        assert_eq!(itineraries[1].total_time_minutes(), 22.0);

        let second = &itineraries[1];
        assert_eq!(second.transfer_count(), 1);
        assert_eq!(second.legs()[0].mode(), TravelMode::Bus);
        assert_eq!(second.legs()[1].from().lng(), 73.855);
    }

    #[test]
    fn empty_response_is_empty_set() {
        let itineraries = convert_search_response(&SearchResponse::default()).unwrap();
        assert!(itineraries.is_empty());
    }

    #[test]
    fn unknown_mode_names_route_and_leg() {
        let response = SearchResponse {
            routes: vec![route(
                10.0,
                0,
                vec![
                    leg("walk", 2.0, 100.0, (18.5, 73.8), (18.5, 73.81)),
                    leg("tram", 8.0, 3000.0, (18.5, 73.81), (18.6, 73.9)),
                ],
            )],
        };

        let err = convert_search_response(&response).unwrap_err();
        assert_eq!(err.route, 0);
        assert_eq!(err.leg, Some(1));
        assert_eq!(err.to_string(), "route 0, leg 1: unknown travel mode: tram");
    }

    #[test]
    fn route_without_legs_rejected() {
        let response = SearchResponse {
            routes: vec![route(10.0, 0, vec![])],
        };

        let err = convert_search_response(&response).unwrap_err();
        assert_eq!(err.leg, None);
        assert_eq!(err.source, DomainError::EmptyItinerary);
    }

    #[test]
    fn invalid_node_rejected() {
        let response = SearchResponse {
            routes: vec![route(
                10.0,
                0,
                vec![leg("bus", 10.0, 1.0, (18.5, 273.8), (18.6, 73.9))],
            )],
        };

        let err = convert_search_response(&response).unwrap_err();
        assert!(matches!(err.source, DomainError::InvalidCoordinate(_)));
    }

    #[test]
    fn stops_with_bad_positions_skipped() {
        let response = StopsResponse {
            stops: vec![
                StopDto {
                    id: "bus_1".into(),
                    name: Some("Deccan".into()),
                    code: None,
                    lat: 18.51,
                    lon: 73.84,
                    kind: Some("bus_stop".into()),
                },
                StopDto {
                    id: "bus_2".into(),
                    name: None,
                    code: None,
                    lat: 118.0,
                    lon: 73.84,
                    kind: None,
                },
            ],
        };

        let stops = convert_stops(&response);
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].id, "bus_1");
        assert_eq!(stops[0].position.lat(), 18.51);
    }
}
