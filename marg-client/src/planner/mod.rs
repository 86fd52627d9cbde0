//! Rider-facing trip planning.
//!
//! The planner answers: "given the two points I clicked, which ways can I
//! get there, and what does the one I picked look like on the map?"
//!
//! Routing itself is delegated to a `RouteSearch` implementation. This
//! module owns the endpoint selection, the search lifecycle with its
//! sequencing of overlapping searches, and the projection of the active
//! itinerary into drawable segments.

mod controller;
mod error;
mod handle;
mod projection;
mod search;
mod selection;
mod session;


pub use controller::{Completion, SearchTicket, TripPlanner};
pub use error::PlannerError;
pub use handle::{PlannerHandle, SEARCH_CANCELLED, SearchOutcome};
pub use projection::{
    BUS_COLOR, LegStyle, METRO_COLOR, MapSegment, WALK_COLOR, WALK_DASH, project_legs,
};
pub use search::RouteSearch;
pub use selection::SelectionController;
pub use session::{ItinerarySession, SessionStatus};
