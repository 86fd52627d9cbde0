//! Wire types for the trip-search service.
//!
//! These mirror the JSON documents exactly. Note the asymmetry: request
//! points use `lng`, while the nodes inside a route's legs use `lon`.

use serde::{Deserialize, Serialize};

/// A point as sent in a search request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Body of `POST /routes/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequestBody {
    pub source: LatLng,
    pub destination: LatLng,
    /// ISO-8601 UTC timestamp, e.g. "2026-02-23T18:30:00.000Z"
    pub departure_time: String,
}

/// Response of `POST /routes/search`, best route first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub routes: Vec<RouteDto>,
}

/// One ranked route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDto {
    pub total_time_mins: f64,
    pub transfers: u32,
    pub legs: Vec<LegDto>,

    /// Ranking score (lower is better); informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// 1-based rank; informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

/// One leg of a route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegDto {
    /// "walk", "bus" or "metro"
    pub mode: String,
    pub duration_mins: f64,
    pub length_m: f64,
    pub from_node: NodeDto,
    pub to_node: NodeDto,
}

/// A network node. Uses `lon`, not `lng`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDto {
    pub lat: f64,
    pub lon: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Response of `GET /network/stops`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StopsResponse {
    #[serde(default)]
    pub stops: Vec<StopDto>,
}

/// A stop as listed by the network endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopDto {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub code: Option<String>,

    pub lat: f64,
    pub lon: f64,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,

    #[serde(default)]
    pub graph_nodes: u64,

    #[serde(default)]
    pub ml_loaded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_route_with_lon_nodes() {
        let json = r#"{
            "routes": [{
                "score": 41.5,
                "total_time_mins": 22,
                "transfers": 1,
                "rank": 1,
                "legs": [{
                    "mode": "bus",
                    "duration_mins": 15,
                    "duration_sec": 880.2,
                    "length_m": 4000,
                    "from_node": {"id": "bus_12", "name": "Swargate", "lat": 18.52, "lon": 73.85, "type": "bus_stop"},
                    "to_node": {"lat": 18.525, "lon": 73.855}
                }]
            }]
        }"#;

        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.routes.len(), 1);

        let route = &resp.routes[0];
        assert_eq!(route.total_time_mins, 22.0);
        assert_eq!(route.transfers, 1);
        assert_eq!(route.rank, Some(1));

        let leg = &route.legs[0];
        assert_eq!(leg.mode, "bus");
        assert_eq!(leg.from_node.lon, 73.85);
        assert_eq!(leg.from_node.name.as_deref(), Some("Swargate"));
        assert_eq!(leg.to_node.id, None);
    }

    #[test]
    fn node_with_lng_is_rejected() {
        let json = r#"{"lat": 18.52, "lng": 73.85}"#;
        assert!(serde_json::from_str::<NodeDto>(json).is_err());
    }

    #[test]
    fn missing_routes_is_empty() {
        let resp: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.routes.is_empty());
    }

    #[test]
    fn request_body_uses_lng() {
        let body = SearchRequestBody {
            source: LatLng {
                lat: 18.52,
                lng: 73.85,
            },
            destination: LatLng {
                lat: 18.53,
                lng: 73.86,
            },
            departure_time: "2026-02-23T18:30:00.000Z".into(),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["source"]["lng"], 73.85);
        assert_eq!(value["destination"]["lat"], 18.53);
        assert_eq!(value["departure_time"], "2026-02-23T18:30:00.000Z");
    }

    #[test]
    fn parse_stops_and_health() {
        let json = r#"{"stops": [
            {"id": "bus_1", "name": "Deccan", "code": "D1", "lat": 18.51, "lon": 73.84, "type": "bus_stop"},
            {"id": "metro_3", "lat": 18.53, "lon": 73.87}
        ]}"#;
        let resp: StopsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.stops.len(), 2);
        assert_eq!(resp.stops[0].kind.as_deref(), Some("bus_stop"));
        assert_eq!(resp.stops[1].name, None);

        let health: HealthResponse =
            serde_json::from_str(r#"{"status": "ok", "graph_nodes": 5400, "ml_loaded": true}"#)
                .unwrap();
        assert_eq!(health.graph_nodes, 5400);
        assert!(health.ml_loaded);
    }
}
