//! Itinerary type.
//!
//! An `Itinerary` is one candidate trip returned by the search service:
//! an ordered, non-empty list of legs plus the service's own totals.

use super::leg::format_minutes;
use super::{DomainError, Leg, TravelMode};

/// A complete candidate trip from source to destination.
///
/// `total_time_minutes` and `transfer_count` are the values reported by the
/// search service. They are kept as-is; [`Itinerary::derived_transfer_count`]
/// recomputes the transfer count from the legs for consistency checks.
///
/// # Invariants
///
/// - At least one leg
/// - Legs are in travel order
/// - `total_time_minutes` is finite and non-negative
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    legs: Vec<Leg>,
    total_time_minutes: f64,
    transfer_count: u32,
}

impl Itinerary {
    /// Constructs an itinerary from legs in travel order.
    ///
    /// # Examples
    ///
    /// ```
    /// use marg_client::domain::{GeoPoint, Itinerary, Leg, TravelMode};
    ///
    /// let a = GeoPoint::new(18.52, 73.85).unwrap();
    /// let b = GeoPoint::new(18.53, 73.86).unwrap();
    /// let walk = Leg::new(TravelMode::Walk, a, b, 7.0, 500.0).unwrap();
    ///
    /// let itinerary = Itinerary::new(vec![walk], 7.0, 0).unwrap();
    /// assert_eq!(itinerary.time_label(), "7 min");
    /// assert_eq!(itinerary.transfers_label(), "0 transfers");
    ///
    /// assert!(Itinerary::new(vec![], 0.0, 0).is_err());
    /// ```
    pub fn new(
        legs: Vec<Leg>,
        total_time_minutes: f64,
        transfer_count: u32,
    ) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }
        if !total_time_minutes.is_finite() || total_time_minutes < 0.0 {
            return Err(DomainError::InvalidTotalTime(total_time_minutes));
        }

        Ok(Self {
            legs,
            total_time_minutes,
            transfer_count,
        })
    }

    /// Legs in travel order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn total_time_minutes(&self) -> f64 {
        self.total_time_minutes
    }

    /// Transfer count as reported by the search service.
    pub fn transfer_count(&self) -> u32 {
        self.transfer_count
    }

    /// Transfer count recomputed from the legs.
    ///
    /// A transfer is boarding a bus or metro straight off a different
    /// transit mode. Every leg, walks included, becomes the current mode,
    /// so walking from a bus to the metro counts as none. This matches how
    /// the search service counts `transfers`.
    pub fn derived_transfer_count(&self) -> u32 {
        let mut transfers = 0;
        let mut current = self.legs[0].mode();

        for leg in &self.legs[1..] {
            let mode = leg.mode();
            if current.is_transit() && mode.is_transit() && mode != current {
                transfers += 1;
            }
            current = mode;
        }

        transfers
    }

    /// Returns true if the reported transfer count matches the legs.
    pub fn transfers_consistent(&self) -> bool {
        self.transfer_count == self.derived_transfer_count()
    }

    /// Sum of leg lengths in metres.
    pub fn total_length_meters(&self) -> f64 {
        self.legs.iter().map(Leg::length_meters).sum()
    }

    /// Returns true if any leg uses the given mode.
    pub fn uses_mode(&self, mode: TravelMode) -> bool {
        self.legs.iter().any(|l| l.mode() == mode)
    }

    /// Header label, e.g. "22 min".
    pub fn time_label(&self) -> String {
        format!("{} min", format_minutes(self.total_time_minutes))
    }

    /// Header label, e.g. "1 transfer" or "3 transfers".
    pub fn transfers_label(&self) -> String {
        if self.transfer_count == 1 {
            "1 transfer".to_string()
        } else {
            format!("{} transfers", self.transfer_count)
        }
    }
}
