//! Planner error types.

use crate::domain::InvalidCoordinate;

/// Errors from planner operations.
///
/// Every error leaves the planner in a well-defined state: rejected
/// operations change nothing, and a failed search leaves the session in
/// `Failed`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlannerError {
    /// Map click outside the valid coordinate range; the click is ignored
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),

    /// Search attempted before both endpoints were picked
    #[error("both source and destination must be set before searching")]
    IncompleteRequest,

    /// Itinerary selection outside the current result set
    #[error("itinerary index {index} out of range ({len} available)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The search service failed; the session is now `Failed`
    #[error("route search failed: {0}")]
    SearchFailed(String),
}
