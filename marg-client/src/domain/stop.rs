//! Network stop type (auxiliary map data).

use super::GeoPoint;

/// A bus stop or metro station that can be drawn on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: String,
    pub name: Option<String>,
    pub code: Option<String>,
    pub position: GeoPoint,
    /// Upstream kind tag, e.g. "bus_stop" or "metro_station"
    pub kind: Option<String>,
}
