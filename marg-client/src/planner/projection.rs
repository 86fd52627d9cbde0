//! Projection of itinerary legs onto map geometry.
//!
//! The style table is fixed: transit legs are solid and 6 px wide, walks
//! are dashed and 4 px wide. Colours are cosmetic; the dash and width
//! split is what lets riders tell walking from riding at a glance.

use crate::domain::{GeoPoint, Itinerary, TravelMode};

/// Metro line colour.
pub const METRO_COLOR: &str = "#0ea5e9";
/// Bus line colour.
pub const BUS_COLOR: &str = "#ef4444";
/// Walk line colour.
pub const WALK_COLOR: &str = "#8b5cf6";

/// Leaflet `dashArray` for walking legs.
pub const WALK_DASH: &str = "5, 10";

const TRANSIT_WIDTH: u8 = 6;
const WALK_WIDTH: u8 = 4;

/// How a leg of a given mode is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegStyle {
    pub color: &'static str,
    pub stroke_width: u8,
    /// `None` for a solid line
    pub dash_pattern: Option<&'static str>,
}

impl LegStyle {
    /// The fixed style for a mode.
    pub const fn for_mode(mode: TravelMode) -> Self {
        match mode {
            TravelMode::Metro => LegStyle {
                color: METRO_COLOR,
                stroke_width: TRANSIT_WIDTH,
                dash_pattern: None,
            },
            TravelMode::Bus => LegStyle {
                color: BUS_COLOR,
                stroke_width: TRANSIT_WIDTH,
                dash_pattern: None,
            },
            TravelMode::Walk => LegStyle {
                color: WALK_COLOR,
                stroke_width: WALK_WIDTH,
                dash_pattern: Some(WALK_DASH),
            },
        }
    }

    pub fn is_dashed(&self) -> bool {
        self.dash_pattern.is_some()
    }
}

/// A drawable straight segment for one leg.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSegment {
    /// `[from_node, to_node]`
    pub geometry: [GeoPoint; 2],
    pub mode: TravelMode,
    pub style: LegStyle,
}

/// Project an itinerary's legs into map segments, in leg order.
pub fn project_legs(itinerary: &Itinerary) -> Vec<MapSegment> {
    itinerary
        .legs()
        .iter()
        .map(|leg| MapSegment {
            geometry: [leg.from(), leg.to()],
            mode: leg.mode(),
            style: LegStyle::for_mode(leg.mode()),
        })
        .collect()
}
