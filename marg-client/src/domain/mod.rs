//! Domain types for the trip planner client.
//!
//! This module contains the core domain model types that represent
//! validated itinerary data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod error;
mod geo;
mod itinerary;
mod leg;
mod stop;
mod trip;

pub use error::DomainError;
pub use geo::{GeoPoint, InvalidCoordinate};
pub use itinerary::Itinerary;
pub use leg::{Leg, TravelMode};
pub use stop::Stop;
pub use trip::{Endpoint, SearchQuery, SelectionMode, TripRequest};
