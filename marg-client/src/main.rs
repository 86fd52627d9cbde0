use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use marg_client::api::{ApiClient, MockRouteService};
use marg_client::cache::CachedStops;
use marg_client::config::ClientConfig;
use marg_client::web::{AppState, SearchBackend, create_router};

/// How often to check that the trip-search service is up.
const HEALTH_CHECK_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("marg_client=info")),
        )
        .init();

    let config = ClientConfig::from_env().expect("Invalid configuration");

    // Create API client
    let client = ApiClient::new(config.api()).expect("Failed to create API client");

    // Searches go to the mock when a fixture is configured
    let backend = match &config.mock_routes {
        Some(path) => {
            let mock = MockRouteService::from_file(path).expect("Failed to load mock routes");
            info!(path = %path.display(), "serving mock routes");
            SearchBackend::Mock(mock)
        }
        None => SearchBackend::Remote(client.clone()),
    };

    let stops = CachedStops::new(client.clone(), &config.cache());

    // Report on the search service, but start either way
    if config.mock_routes.is_none() {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(HEALTH_CHECK_INTERVAL);
            loop {
                interval.tick().await;
                match client.health().await {
                    Ok(health) => info!(
                        status = %health.status,
                        graph_nodes = health.graph_nodes,
                        ml_loaded = health.ml_loaded,
                        "trip-search service health"
                    ),
                    Err(e) => warn!(error = %e, base_url = client.base_url(), "trip-search service unreachable"),
                }
            }
        });
    }

    let addr = config.bind_addr;
    let api_base_url = config.api_base_url.clone();
    let state = AppState::new(config, backend, stops);
    let app = create_router(state);

    info!(%addr, api = %api_base_url, "Marg trip planner listening on http://{addr}");
    info!("API Endpoints:");
    info!("  GET  /api/view               - Current map and sidebar state");
    info!("  POST /api/map/click          - Pick an endpoint");
    info!("  POST /api/mode               - Choose which endpoint to pick");
    info!("  POST /api/search             - Find routes");
    info!("  POST /api/itineraries/select - Show another itinerary");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Server error");
}
