//! Selection controller: which endpoint the map is editing.
//!
//! A map click writes the endpoint chosen by the current `SelectionMode`.
//! The mode never flips on its own after a pick, so a rider can click
//! repeatedly to correct the same endpoint; only `set_mode` changes it.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{Endpoint, GeoPoint, SelectionMode, TripRequest};

use super::error::PlannerError;

/// Owns the trip request and the active selection mode.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    request: TripRequest,
    mode: SelectionMode,
}

impl SelectionController {
    /// Start with no endpoints and `PickingSource`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a raw map click.
    ///
    /// Validates the coordinate, then writes it into the endpoint selected
    /// by the current mode. Out-of-range input is rejected and leaves the
    /// state unchanged.
    pub fn on_map_click(&mut self, lat: f64, lng: f64) -> Result<Endpoint, PlannerError> {
        let point = GeoPoint::new(lat, lng)?;
        Ok(self.pick(point))
    }

    /// Write an already-validated point into the active endpoint.
    pub fn pick(&mut self, point: GeoPoint) -> Endpoint {
        let endpoint = self.mode.endpoint();
        self.request.set_endpoint(endpoint, point);
        debug!(%endpoint, %point, "endpoint picked");
        endpoint
    }

    /// Explicitly choose which endpoint the next click edits.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    /// Pin a departure time, or `None` to depart when the search is issued.
    pub fn set_departure_time(&mut self, departure: Option<DateTime<Utc>>) {
        self.request.departure_time = departure;
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn request(&self) -> &TripRequest {
        &self.request
    }

    /// Text for an endpoint field: "lat, lng" to four places, or empty.
    pub fn field_text(&self, endpoint: Endpoint) -> String {
        self.request
            .endpoint(endpoint)
            .map(|p| p.to_string())
            .unwrap_or_default()
    }

    /// Returns true if the given endpoint is the one being picked.
    pub fn is_editing(&self, endpoint: Endpoint) -> bool {
        self.mode.endpoint() == endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_picking_source() {
        let sel = SelectionController::new();
        assert_eq!(sel.mode(), SelectionMode::PickingSource);
        assert!(sel.request().source.is_none());
        assert!(sel.request().destination.is_none());
    }

    #[test]
    fn click_writes_source_then_destination_after_mode_change() {
        let mut sel = SelectionController::new();

        assert_eq!(sel.on_map_click(18.52, 73.85).unwrap(), Endpoint::Source);
        sel.set_mode(SelectionMode::PickingDestination);
        assert_eq!(
            sel.on_map_click(18.53, 73.86).unwrap(),
            Endpoint::Destination
        );

        assert_eq!(sel.field_text(Endpoint::Source), "18.5200, 73.8500");
        assert_eq!(sel.field_text(Endpoint::Destination), "18.5300, 73.8600");
        assert!(sel.request().is_complete());
    }

    #[test]
    fn repeated_clicks_overwrite_same_endpoint() {
        let mut sel = SelectionController::new();
        sel.on_map_click(18.0, 73.0).unwrap();
        sel.on_map_click(18.5, 73.5).unwrap();

        assert_eq!(sel.mode(), SelectionMode::PickingSource);
        assert_eq!(sel.request().source, Some(GeoPoint::new(18.5, 73.5).unwrap()));
        assert!(sel.request().destination.is_none());
    }

    #[test]
    fn invalid_click_is_ignored() {
        let mut sel = SelectionController::new();
        sel.on_map_click(18.52, 73.85).unwrap();

        let err = sel.on_map_click(-91.0, 73.85).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidCoordinate(_)));
        assert_eq!(
            sel.request().source,
            Some(GeoPoint::new(18.52, 73.85).unwrap())
        );
    }

    #[test]
    fn empty_field_text_when_unset() {
        let sel = SelectionController::new();
        assert_eq!(sel.field_text(Endpoint::Source), "");
        assert!(sel.is_editing(Endpoint::Source));
        assert!(!sel.is_editing(Endpoint::Destination));
    }
}
