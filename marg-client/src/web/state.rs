//! Application state for the web layer.

use std::sync::Arc;

use crate::api::{ApiClient, ApiError, MockRouteService};
use crate::cache::CachedStops;
use crate::config::ClientConfig;
use crate::domain::{Itinerary, SearchQuery};
use crate::planner::{PlannerHandle, RouteSearch};

/// Where route searches go.
#[derive(Debug, Clone)]
pub enum SearchBackend {
    /// The live trip-search service
    Remote(ApiClient),
    /// A canned response, for running without the service
    Mock(MockRouteService),
}

impl RouteSearch for SearchBackend {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Itinerary>, ApiError> {
        match self {
            SearchBackend::Remote(client) => client.search(query).await,
            SearchBackend::Mock(mock) => mock.search(query).await,
        }
    }
}

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// The rider's planner
    pub planner: PlannerHandle,

    /// Route search backend
    pub search: Arc<SearchBackend>,

    /// Stop list for the map context layer
    pub stops: Arc<CachedStops>,

    /// Server configuration
    pub config: Arc<ClientConfig>,
}

impl AppState {
    /// Create a new app state with an empty planner.
    pub fn new(config: ClientConfig, search: SearchBackend, stops: CachedStops) -> Self {
        let planner = PlannerHandle::default().with_search_timeout(config.search_timeout());

        Self {
            planner,
            search: Arc::new(search),
            stops: Arc::new(stops),
            config: Arc::new(config),
        }
    }
}
