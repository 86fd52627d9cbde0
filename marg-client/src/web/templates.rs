//! Askama templates for the web frontend.

use askama::Template;

use super::dto::ItineraryCard;

// ============================================================================
// Page Templates
// ============================================================================

/// Sidebar plus full-screen map.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
}

// ============================================================================
// Fragment Templates (AJAX responses)
// ============================================================================

/// Itinerary cards for the sidebar.
#[derive(Template)]
#[template(path = "itinerary_list.html")]
pub struct ItineraryListTemplate {
    pub cards: Vec<ItineraryCard>,

    /// Empty-state or failure text
    pub message: Option<String>,

    pub searching: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::dto::LegLine;

    #[test]
    fn index_embeds_map_view() {
        let html = IndexTemplate {
            center_lat: 18.5204,
            center_lng: 73.8567,
            zoom: 13,
        }
        .render()
        .unwrap();

        assert!(html.contains("data-lat=\"18.5204\""));
        assert!(html.contains("data-zoom=\"13\""));
        assert!(html.contains("/static/app.js"));
    }

    #[test]
    fn list_marks_active_card() {
        let card = |index, active| ItineraryCard {
            index,
            time_label: "22 min".into(),
            transfers_label: "1 transfer".into(),
            active,
            legs: vec![LegLine {
                mode: "bus",
                summary: "BUS for 15 min (4.0 km)".into(),
                color: "#ef4444",
            }],
        };

        let html = ItineraryListTemplate {
            cards: vec![card(0, false), card(1, true)],
            message: None,
            searching: false,
        }
        .render()
        .unwrap();

        assert_eq!(html.matches("itinerary-card").count(), 2);
        assert_eq!(html.matches("itinerary-card active").count(), 1);
        assert!(html.contains("data-index=\"1\""));
        assert!(html.contains("BUS for 15 min (4.0 km)"));
    }

    #[test]
    fn list_shows_message() {
        let html = ItineraryListTemplate {
            cards: vec![],
            message: Some("No routes generated. Pick start and end nodes.".into()),
            searching: false,
        }
        .render()
        .unwrap();

        assert!(html.contains("No routes generated."));
    }
}
