//! HTTP route handlers.

use std::time::Duration;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{debug, error, warn};

use crate::api::{ApiError, HealthResponse};
use crate::planner::{PlannerError, SessionStatus};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Longest a `GET /api/view?after=N` request waits for a change.
const LONG_POLL_TIMEOUT: Duration = Duration::from_secs(25);

/// Create the application router.
///
/// Static assets are served from the configured directory.
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/view", get(get_view))
        .route("/api/map/click", post(map_click))
        .route("/api/mode", post(set_mode))
        .route("/api/departure", post(set_departure))
        .route("/api/search", post(search))
        .route("/api/itineraries", get(itinerary_list))
        .route("/api/itineraries/select", post(select_itinerary))
        .route("/api/stops", get(stops))
        .route("/api/upstream/health", get(upstream_health))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page: sidebar and map.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    let (center_lat, center_lng) = state.config.map_center;
    Html(
        IndexTemplate {
            center_lat,
            center_lng,
            zoom: state.config.map_zoom,
        }
        .render()
        .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Snapshot of the current state.
async fn current_view(state: &AppState) -> Json<ViewResponse> {
    let planner = state.planner.read().await;
    Json(ViewResponse::from_planner(&planner))
}

/// Current view; with `after`, waits for a newer revision first.
async fn get_view(State(state): State<AppState>, Query(query): Query<ViewQuery>) -> Json<ViewResponse> {
    if let Some(after) = query.after {
        let revision = state.planner.wait_for_change(after, LONG_POLL_TIMEOUT).await;
        debug!(after, revision, "long poll returned");
    }
    current_view(&state).await
}

async fn map_click(
    State(state): State<AppState>,
    Json(req): Json<MapClickRequest>,
) -> Result<Json<ViewResponse>, AppError> {
    state.planner.on_map_click(req.lat, req.lng).await?;
    Ok(current_view(&state).await)
}

async fn set_mode(State(state): State<AppState>, Json(req): Json<ModeRequest>) -> Json<ViewResponse> {
    state.planner.set_mode(req.mode.into()).await;
    current_view(&state).await
}

async fn set_departure(
    State(state): State<AppState>,
    Json(req): Json<DepartureRequest>,
) -> Result<Json<ViewResponse>, AppError> {
    let departure = req.parse().map_err(|e| AppError::BadRequest {
        message: format!("Invalid departure time: {}", e),
    })?;
    state.planner.set_departure_time(departure).await;
    Ok(current_view(&state).await)
}

/// Run a search and return the resulting view.
///
/// A failed search is reported through the view's status, not as an HTTP
/// error: the request itself was handled.
async fn search(State(state): State<AppState>) -> Result<Json<ViewResponse>, AppError> {
    match state.planner.trigger_search(state.search.as_ref()).await {
        Ok(_) | Err(PlannerError::SearchFailed(_)) => Ok(current_view(&state).await),
        Err(e) => Err(e.into()),
    }
}

async fn select_itinerary(
    State(state): State<AppState>,
    Json(req): Json<SelectItineraryRequest>,
) -> Result<Json<ViewResponse>, AppError> {
    state.planner.select_itinerary(req.index).await?;
    Ok(current_view(&state).await)
}

/// Itinerary cards as an HTML fragment.
async fn itinerary_list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let template = {
        let planner = state.planner.read().await;
        let view = ViewResponse::from_planner(&planner);
        ItineraryListTemplate {
            cards: view.itineraries,
            message: view.message.map(str::to_string),
            searching: planner.session().status() == SessionStatus::Searching,
        }
    };

    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;

    Ok(Html(html))
}

/// Stops for the map context layer.
async fn stops(State(state): State<AppState>) -> Result<Json<StopListResponse>, AppError> {
    let stops = state.stops.stops().await?;

    Ok(Json(StopListResponse {
        stops: stops.iter().map(StopView::from_stop).collect(),
    }))
}

/// Health of the trip-search service.
async fn upstream_health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let health = state.stops.client().health().await?;
    Ok(Json(health))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Conflict { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<PlannerError> for AppError {
    fn from(e: PlannerError) -> Self {
        let message = e.to_string();
        match e {
            PlannerError::InvalidCoordinate(_) | PlannerError::IndexOutOfRange { .. } => {
                AppError::BadRequest { message }
            }
            PlannerError::IncompleteRequest => AppError::Conflict { message },
            PlannerError::SearchFailed(_) => AppError::BadGateway { message },
        }
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        AppError::BadGateway {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
