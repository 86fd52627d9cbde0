//! Mock route search for development without a running search service.
//!
//! Loads a search response document from a JSON file and serves it for
//! every query, as if it were a live API response.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;

use crate::domain::{Itinerary, SearchQuery};
use crate::planner::RouteSearch;

use super::convert::convert_search_response;
use super::error::ApiError;
use super::types::SearchResponse;

/// What the mock answers with.
#[derive(Debug, Clone)]
enum MockReply {
    Routes(SearchResponse),
    Fail(String),
}

/// Mock search service that serves a canned response.
#[derive(Debug, Clone)]
pub struct MockRouteService {
    reply: Arc<RwLock<MockReply>>,
    calls: Arc<AtomicUsize>,
}

impl MockRouteService {
    /// Serve the given response for every query.
    pub fn from_response(response: SearchResponse) -> Self {
        Self::with_reply(MockReply::Routes(response))
    }

    /// Fail every query with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Fail(message.into()))
    }

    /// Load a search response document (the body of `POST /routes/search`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        Ok(Self::from_response(load_response(path.as_ref())?))
    }

    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply: Arc::new(RwLock::new(reply)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of searches served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Reload the canned response from disk (useful for development).
    pub async fn reload(&self, path: impl AsRef<Path>) -> Result<(), ApiError> {
        let response = load_response(path.as_ref())?;
        *self.reply.write().await = MockReply::Routes(response);
        Ok(())
    }
}

fn load_response(path: &Path) -> Result<SearchResponse, ApiError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| ApiError::Mock(format!("failed to read {:?}: {}", path, e)))?;

    let response: SearchResponse = serde_json::from_str(&json)
        .map_err(|e| ApiError::Mock(format!("failed to parse {:?}: {}", path, e)))?;

    // Surface bad fixtures at load time rather than on the first search
    convert_search_response(&response)?;

    Ok(response)
}

impl RouteSearch for MockRouteService {
    async fn search(&self, _query: &SearchQuery) -> Result<Vec<Itinerary>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &*self.reply.read().await {
            MockReply::Routes(response) => Ok(convert_search_response(response)?),
            MockReply::Fail(message) => Err(ApiError::Api {
                status: 503,
                message: message.clone(),
            }),
        }
    }
}
