//! The search collaborator seam.

use std::future::Future;

use crate::api::ApiError;
use crate::domain::{Itinerary, SearchQuery};

/// Trait for the external route search.
///
/// The search algorithm itself lives in a remote service; this abstraction
/// lets the planner be driven by the HTTP client, a file-backed mock, or a
/// test double.
pub trait RouteSearch: Send + Sync {
    /// Find itineraries for a query, best first.
    ///
    /// An empty list means no route was found and is not an error.
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<Itinerary>, ApiError>> + Send;
}
