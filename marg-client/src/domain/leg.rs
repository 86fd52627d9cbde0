//! Itinerary leg type.
//!
//! A `Leg` is one single-mode hop of an itinerary: a walk, a bus ride or a
//! metro ride between two map nodes.

use std::fmt;

use super::{DomainError, GeoPoint};

/// Mode of travel for a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelMode {
    Walk,
    Bus,
    Metro,
}

impl TravelMode {
    /// Parse the lowercase mode name used on the wire.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "walk" => Ok(TravelMode::Walk),
            "bus" => Ok(TravelMode::Bus),
            "metro" => Ok(TravelMode::Metro),
            other => Err(DomainError::UnknownMode(other.to_string())),
        }
    }

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Walk => "walk",
            TravelMode::Bus => "bus",
            TravelMode::Metro => "metro",
        }
    }

    /// Returns true for bus and metro.
    pub fn is_transit(&self) -> bool {
        !matches!(self, TravelMode::Walk)
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A leg of an itinerary.
///
/// # Invariants
///
/// - `duration_minutes` and `length_meters` are finite and non-negative
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    mode: TravelMode,
    from: GeoPoint,
    to: GeoPoint,
    duration_minutes: f64,
    length_meters: f64,
}

impl Leg {
    /// Construct a leg, validating duration and length.
    ///
    /// # Examples
    ///
    /// ```
    /// use marg_client::domain::{GeoPoint, Leg, TravelMode};
    ///
    /// let from = GeoPoint::new(18.52, 73.85).unwrap();
    /// let to = GeoPoint::new(18.525, 73.855).unwrap();
    /// let leg = Leg::new(TravelMode::Bus, from, to, 15.0, 4000.0).unwrap();
    ///
    /// assert_eq!(leg.summary(), "BUS for 15 min (4.0 km)");
    /// assert!(Leg::new(TravelMode::Walk, from, to, -1.0, 10.0).is_err());
    /// ```
    pub fn new(
        mode: TravelMode,
        from: GeoPoint,
        to: GeoPoint,
        duration_minutes: f64,
        length_meters: f64,
    ) -> Result<Self, DomainError> {
        if !duration_minutes.is_finite() || duration_minutes < 0.0 {
            return Err(DomainError::InvalidLeg(
                "duration must be a non-negative number",
            ));
        }
        if !length_meters.is_finite() || length_meters < 0.0 {
            return Err(DomainError::InvalidLeg(
                "length must be a non-negative number",
            ));
        }

        Ok(Self {
            mode,
            from,
            to,
            duration_minutes,
            length_meters,
        })
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    /// Node the leg starts at.
    pub fn from(&self) -> GeoPoint {
        self.from
    }

    /// Node the leg ends at.
    pub fn to(&self) -> GeoPoint {
        self.to
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_minutes
    }

    pub fn length_meters(&self) -> f64 {
        self.length_meters
    }

    /// Returns true if this is a walking leg.
    pub fn is_walk(&self) -> bool {
        self.mode == TravelMode::Walk
    }

    /// One-line description, e.g. "METRO for 12 min (6.3 km)".
    pub fn summary(&self) -> String {
        format!(
            "{} for {} min ({:.1} km)",
            self.mode.as_str().to_uppercase(),
            format_minutes(self.duration_minutes),
            self.length_meters / 1000.0
        )
    }
}

/// Formats minutes without a trailing ".0" for whole values.
pub(crate) fn format_minutes(mins: f64) -> String {
    if mins.fract() == 0.0 {
        format!("{mins:.0}")
    } else {
        format!("{mins:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    #[test]
    fn parse_modes() {
        assert_eq!(TravelMode::parse("walk").unwrap(), TravelMode::Walk);
        assert_eq!(TravelMode::parse("bus").unwrap(), TravelMode::Bus);
        assert_eq!(TravelMode::parse("metro").unwrap(), TravelMode::Metro);
    }

    #[test]
    fn reject_unknown_mode() {
        let err = TravelMode::parse("ferry").unwrap_err();
        assert_eq!(err.to_string(), "unknown travel mode: ferry");
        assert!(TravelMode::parse("Bus").is_err());
    }

    #[test]
    fn transit_modes() {
        assert!(!TravelMode::Walk.is_transit());
        assert!(TravelMode::Bus.is_transit());
        assert!(TravelMode::Metro.is_transit());
    }

    #[test]
    fn reject_negative_values() {
        let a = pt(18.52, 73.85);
        let b = pt(18.53, 73.86);
        assert!(Leg::new(TravelMode::Bus, a, b, -0.5, 100.0).is_err());
        assert!(Leg::new(TravelMode::Bus, a, b, 5.0, -1.0).is_err());
        assert!(Leg::new(TravelMode::Bus, a, b, f64::NAN, 1.0).is_err());
        assert!(Leg::new(TravelMode::Bus, a, b, 1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn zero_length_walk_is_valid() {
        let a = pt(18.52, 73.85);
        let leg = Leg::new(TravelMode::Walk, a, a, 0.0, 0.0).unwrap();
        assert!(leg.is_walk());
        assert_eq!(leg.summary(), "WALK for 0 min (0.0 km)");
    }

    #[test]
    fn summary_formats_fractional_minutes() {
        let leg = Leg::new(
            TravelMode::Metro,
            pt(18.5, 73.8),
            pt(18.6, 73.9),
            7.3,
            6349.0,
        )
        .unwrap();
        assert_eq!(leg.summary(), "METRO for 7.3 min (6.3 km)");
    }
}
