//! Domain error types.
//!
//! These errors represent validation failures in itinerary data. They are
//! distinct from API/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A coordinate was outside its valid range
    #[error(transparent)]
    InvalidCoordinate(#[from] super::InvalidCoordinate),

    /// Mode name not recognised
    #[error("unknown travel mode: {0}")]
    UnknownMode(String),

    /// Invalid leg construction (e.g., negative duration)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// Itinerary has no legs
    #[error("itinerary must have at least one leg")]
    EmptyItinerary,

    /// Itinerary total time is negative or not a number
    #[error("invalid total time: {0}")]
    InvalidTotalTime(f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeoPoint;

    #[test]
    fn error_display() {
        let err = DomainError::UnknownMode("tram".into());
        assert_eq!(err.to_string(), "unknown travel mode: tram");

        let err = DomainError::InvalidLeg("duration must be a non-negative number");
        assert_eq!(
            err.to_string(),
            "invalid leg: duration must be a non-negative number"
        );

        let err = DomainError::EmptyItinerary;
        assert_eq!(err.to_string(), "itinerary must have at least one leg");

        let err = DomainError::InvalidTotalTime(-3.0);
        assert_eq!(err.to_string(), "invalid total time: -3");
    }

    #[test]
    fn coordinate_error_is_transparent() {
        let inner = GeoPoint::new(100.0, 0.0).unwrap_err();
        let err = DomainError::from(inner);
        assert_eq!(err.to_string(), inner.to_string());
    }
}
