//! Trip-search API error types.

use super::convert::ConversionError;

/// Errors from the trip-search HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned a non-2xx status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Response parsed but contained invalid itinerary data
    #[error("malformed response: {0}")]
    Malformed(#[from] ConversionError),

    /// Mock data could not be loaded
    #[error("mock data error: {0}")]
    Mock(String),
}

impl ApiError {
    /// Returns true if the failure happened before any response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Http(_))
    }
}
