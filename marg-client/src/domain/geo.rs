//! Geographic coordinate type.

use std::fmt;

/// Error returned when a latitude or longitude is outside its valid range.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({lat}, {lng}): {reason}")]
pub struct InvalidCoordinate {
    pub lat: f64,
    pub lng: f64,
    reason: &'static str,
}

/// A valid WGS84 point picked on, or drawn onto, the map.
///
/// Latitude is always within `[-90, 90]` and longitude within
/// `[-180, 180]`. NaN is rejected. A `GeoPoint` is immutable; re-picking an
/// endpoint replaces the whole value.
///
/// # Examples
///
/// ```
/// use marg_client::domain::GeoPoint;
///
/// let pune = GeoPoint::new(18.5204, 73.8567).unwrap();
/// assert_eq!(pune.lat(), 18.5204);
///
/// // Out of range is rejected
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// assert!(GeoPoint::new(0.0, -180.5).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    /// Create a point, validating both axes.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                lat,
                lng,
                reason: "latitude must be within [-90, 90]",
            });
        }

        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinate {
                lat,
                lng,
                reason: "longitude must be within [-180, 180]",
            });
        }

        Ok(Self { lat, lng })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// `[lat, lng]` pair, the order Leaflet expects for polylines and markers.
    pub fn to_lat_lng(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

impl fmt::Debug for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeoPoint({}, {})", self.lat, self.lng)
    }
}

/// Four decimal places, as shown in the endpoint fields.
impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}
