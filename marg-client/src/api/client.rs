//! Trip-search HTTP client.
//!
//! Provides async methods for the route search, stops and health
//! endpoints, and conversion of search results to domain types.

use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::domain::{Itinerary, SearchQuery, Stop};
use crate::planner::RouteSearch;

use super::convert::{convert_search_response, convert_stops, search_request_body};
use super::error::ApiError;
use super::types::{HealthResponse, SearchResponse, StopsResponse};

/// Default base URL for the trip-search API.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL including the `/api/v1` prefix
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Create a config pointing at the default local service.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Trip-search API client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search for itineraries between two points.
    ///
    /// Routes are returned in the service's ranking order. An empty list is
    /// a valid answer (no route found), not an error.
    pub async fn search_routes(&self, query: &SearchQuery) -> Result<Vec<Itinerary>, ApiError> {
        let url = format!("{}/routes/search", self.base_url);
        let body = search_request_body(query);

        debug!(
            source = %query.source,
            destination = %query.destination,
            departure = %body.departure_time,
            "searching routes"
        );

        let response = self.http.post(&url).json(&body).send().await?;
        let parsed: SearchResponse = parse_json(response).await?;
        let itineraries = convert_search_response(&parsed)?;

        info!(count = itineraries.len(), "route search returned");
        Ok(itineraries)
    }

    /// Fetch the stops shown as map context.
    pub async fn fetch_stops(&self) -> Result<Vec<Stop>, ApiError> {
        let url = format!("{}/network/stops", self.base_url);

        let response = self.http.get(&url).send().await?;
        let parsed: StopsResponse = parse_json(response).await?;

        Ok(convert_stops(&parsed))
    }

    /// Query the service health document.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = format!("{}/health", self.base_url);

        let response = self.http.get(&url).send().await?;
        parse_json(response).await
    }
}

impl RouteSearch for ApiClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Itinerary>, ApiError> {
        self.search_routes(query).await
    }
}

/// Check the status and deserialize the body.
async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| ApiError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router, extract::State};
    use chrono::{TimeZone, Utc};
    use tokio::net::TcpListener;

    use crate::api::types::SearchRequestBody;
    use crate::domain::{GeoPoint, TravelMode};

    #[test]
    fn config_builder() {
        let config = ApiConfig::new()
            .with_base_url("http://localhost:9000/api/v1/")
            .with_timeout(5);

        assert_eq!(config.base_url, "http://localhost:9000/api/v1");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn config_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        let client = ApiClient::new(ApiConfig::new());
        assert!(client.is_ok());
    }

    type Captured = Arc<Mutex<Option<SearchRequestBody>>>;

    async fn search_ok(
        State(captured): State<Captured>,
        Json(body): Json<SearchRequestBody>,
    ) -> Json<serde_json::Value> {
        *captured.lock().unwrap() = Some(body);
        Json(serde_json::json!({
            "routes": [{
                "total_time_mins": 22,
                "transfers": 1,
                "legs": [
                    {"mode": "bus", "duration_mins": 15, "length_m": 4000,
                     "from_node": {"lat": 18.52, "lon": 73.85},
                     "to_node": {"lat": 18.525, "lon": 73.855}},
                    {"mode": "walk", "duration_mins": 7, "length_m": 500,
                     "from_node": {"lat": 18.525, "lon": 73.855},
                     "to_node": {"lat": 18.53, "lon": 73.86}}
                ]
            }]
        }))
    }

    async fn spawn_server(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}/api/v1")
    }

    fn query() -> SearchQuery {
        SearchQuery {
            source: GeoPoint::new(18.52, 73.85).unwrap(),
            destination: GeoPoint::new(18.53, 73.86).unwrap(),
            departure_time: Utc.with_ymd_and_hms(2026, 2, 23, 18, 30, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn search_posts_body_and_converts_routes() {
        let captured: Captured = Arc::new(Mutex::new(None));
        let app = Router::new()
            .route("/api/v1/routes/search", post(search_ok))
            .with_state(captured.clone());
        let base = spawn_server(app).await;

        let client = ApiClient::new(ApiConfig::new().with_base_url(base)).unwrap();
        let itineraries = client.search_routes(&query()).await.unwrap();

        assert_eq!(itineraries.len(), 1);
        assert_eq!(itineraries[0].legs().len(), 2);
        assert_eq!(itineraries[0].legs()[1].mode(), TravelMode::Walk);

        let body = captured.lock().unwrap().clone().unwrap();
        assert_eq!(body.source.lat, 18.52);
        assert_eq!(body.destination.lng, 73.86);
        assert_eq!(body.departure_time, "2026-02-23T18:30:00.000Z");
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let app = Router::new().route(
            "/api/v1/routes/search",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Engine not loaded") }),
        );
        let base = spawn_server(app).await;

        let client = ApiClient::new(ApiConfig::new().with_base_url(base)).unwrap();
        let err = client.search_routes(&query()).await.unwrap_err();

        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Engine not loaded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_json_error() {
        let app = Router::new().route(
            "/api/v1/routes/search",
            post(|| async { "<html>proxy error</html>" }),
        );
        let base = spawn_server(app).await;

        let client = ApiClient::new(ApiConfig::new().with_base_url(base)).unwrap();
        let err = client.search_routes(&query()).await.unwrap_err();
        assert!(matches!(err, ApiError::Json { .. }));
    }

    #[tokio::test]
    async fn unreachable_service_is_transport_error() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            ApiClient::new(ApiConfig::new().with_base_url(format!("http://{addr}/api/v1")))
                .unwrap();
        let err = client.search_routes(&query()).await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn stops_and_health() {
        let app = Router::new()
            .route(
                "/api/v1/network/stops",
                get(|| async {
                    Json(serde_json::json!({"stops": [
                        {"id": "metro_1", "name": "PCMC", "lat": 18.63, "lon": 73.80, "type": "metro_station"}
                    ]}))
                }),
            )
            .route(
                "/api/v1/health",
                get(|| async {
                    Json(serde_json::json!({"status": "ok", "graph_nodes": 12, "ml_loaded": false}))
                }),
            );
        let base = spawn_server(app).await;

        let client = ApiClient::new(ApiConfig::new().with_base_url(base)).unwrap();

        let stops = client.fetch_stops().await.unwrap();
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].name.as_deref(), Some("PCMC"));

        let health = client.health().await.unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.graph_nodes, 12);
    }
}
