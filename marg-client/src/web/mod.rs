//! Web layer for the trip planner.
//!
//! Wraps each planner operation in a JSON endpoint and serves the map page,
//! the itinerary list fragment and the static front end.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, SearchBackend};
pub use templates::*;
