//! Trip-search service client.
//!
//! This module provides an HTTP client for the remote route-search service
//! and its auxiliary endpoints.
//!
//! Key characteristics of the service:
//! - Routes come back already ranked, best first; the client never re-sorts
//! - Request points use `lng`, but leg nodes in responses use `lon`
//! - Any non-2xx status is a failure; the client does not retry

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{ApiClient, ApiConfig, DEFAULT_BASE_URL};
pub use convert::{ConversionError, convert_search_response, search_request_body};
pub use error::ApiError;
pub use mock::MockRouteService;
pub use types::{
    HealthResponse, LatLng, LegDto, NodeDto, RouteDto, SearchRequestBody, SearchResponse,
    StopDto, StopsResponse,
};
