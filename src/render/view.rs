//! Drives a [`MapSurface`] from the state container's event stream.
//!
//! The renderer is a pure reaction to [`AppEvent`]s: it keeps just enough
//! bookkeeping (which markers exist, whose popup is open) to translate each
//! event into surface calls. Clicks travel the other way through
//! [`MapRenderer::cafe_for_marker`]; the renderer never mutates app state.

use crate::{
    app::events::AppEvent,
    core::{
        geo::{LatLng, LatLngBounds},
        models::{Cafe, CafeDetails},
    },
    render::surface::{MapSurface, MarkerKind, MarkerSpec},
};
use std::time::Duration;

/// Zoom applied when centering on a freshly resolved user location
const CLOSE_ZOOM: f64 = 16.0;

/// How long a selected cafe's marker bounces before resetting
const HIGHLIGHT_DURATION: Duration = Duration::from_millis(1000);

const USER_MARKER_ID: &str = "user-location";

#[derive(Default)]
pub struct MapRenderer {
    /// `(marker id, cafe id)` pairs in render order
    cafe_markers: Vec<(String, String)>,
    user_marker_placed: bool,
    /// Cafe id whose detail popup is currently open
    open_popup_cafe: Option<String>,
}

impl MapRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a surface marker id back to the cafe it stands for, so a click
    /// can be fed into [`crate::app::state::AppState::select_cafe`]
    pub fn cafe_for_marker(&self, marker_id: &str) -> Option<&str> {
        self.cafe_markers
            .iter()
            .find(|(id, _)| id == marker_id)
            .map(|(_, cafe_id)| cafe_id.as_str())
    }

    /// Applies a batch of drained events in order
    pub fn apply_events(&mut self, events: &[AppEvent], surface: &mut dyn MapSurface) {
        for event in events {
            self.apply(event, surface);
        }
    }

    pub fn apply(&mut self, event: &AppEvent, surface: &mut dyn MapSurface) {
        match event {
            AppEvent::LocationChanged { location } => self.render_location(*location, surface),
            AppEvent::CafesChanged { cafes } => self.render_cafes(cafes, surface),
            AppEvent::SelectionChanged { cafe } => self.render_selection(cafe, surface),
            AppEvent::DetailsArrived { cafe, details } => {
                self.render_details(cafe, details, surface)
            }
            AppEvent::MenuToggled { open } => surface.set_menu_open(*open),
            AppEvent::LoadingChanged { loading } => surface.set_loading_indicator(*loading),
            AppEvent::Notice { message, .. } => surface.show_alert(message),
        }
    }

    fn render_location(&mut self, location: LatLng, surface: &mut dyn MapSurface) {
        if self.user_marker_placed {
            surface.remove_marker(USER_MARKER_ID);
        }
        surface.place_marker(MarkerSpec {
            id: USER_MARKER_ID.to_string(),
            position: location,
            title: None,
            kind: MarkerKind::UserLocation,
        });
        self.user_marker_placed = true;
        surface.set_view(location, CLOSE_ZOOM);
    }

    fn render_cafes(&mut self, cafes: &[Cafe], surface: &mut dyn MapSurface) {
        for (marker_id, _) in self.cafe_markers.drain(..) {
            surface.remove_marker(&marker_id);
        }

        // Empty list clears the markers but leaves the viewport alone
        if cafes.is_empty() {
            return;
        }

        for cafe in cafes {
            let marker_id = Self::marker_id(&cafe.id);
            surface.place_marker(MarkerSpec {
                id: marker_id.clone(),
                position: cafe.location,
                title: Some(cafe.name.clone()),
                kind: MarkerKind::Cafe,
            });
            self.cafe_markers.push((marker_id, cafe.id.clone()));
        }

        if let Some(bounds) = LatLngBounds::from_points(cafes.iter().map(|cafe| cafe.location)) {
            surface.fit_bounds(&bounds);
        }
    }

    fn render_selection(&mut self, cafe: &Cafe, surface: &mut dyn MapSurface) {
        if self.open_popup_cafe.take().is_some() {
            surface.close_popup();
        }

        let marker_id = Self::marker_id(&cafe.id);
        if !self.cafe_markers.iter().any(|(id, _)| *id == marker_id) {
            // The selected cafe was filtered out of the marker set; there is
            // nothing to anchor a popup to
            log::debug!("no marker for selected cafe {:?}", cafe.name);
            return;
        }

        surface.open_popup(&marker_id, popup_html(cafe, None));
        surface.animate_marker(&marker_id, HIGHLIGHT_DURATION);
        self.open_popup_cafe = Some(cafe.id.clone());
    }

    fn render_details(&mut self, cafe: &Cafe, details: &CafeDetails, surface: &mut dyn MapSurface) {
        // The popup may have been closed or replaced since the fetch started
        if self.open_popup_cafe.as_deref() != Some(cafe.id.as_str()) {
            return;
        }
        surface.set_popup_content(popup_html(cafe, Some(details)));
    }

    fn marker_id(cafe_id: &str) -> String {
        format!("cafe-{cafe_id}")
    }
}

/// Builds the detail-popup markup for a cafe, with enrichment details once
/// they have arrived
pub fn popup_html(cafe: &Cafe, details: Option<&CafeDetails>) -> String {
    let mut html = String::from("<div class=\"info_window_box\">");
    html.push_str(&format!("<h2>{}</h2>", cafe.name));
    html.push_str(&format!(
        "<p>{} (<a target=\"_blank\" href=\"https://www.google.com/maps/search/?api=1&query={}&query_place_id={}\">On Google Maps</a>)</p>",
        cafe.vicinity, cafe.vicinity, cafe.place_id
    ));
    if let Some(photo_url) = &cafe.photo_url {
        html.push_str(&format!(
            "<img alt=\"{}\" class=\"image\" src=\"{}\" />",
            cafe.name, photo_url
        ));
    }
    if let Some(details) = details {
        if let Some(hours) = &details.hours_text {
            html.push_str(&format!("<p>{hours}</p>"));
        }
        let mut links = Vec::new();
        if let Some(url) = &details.official_url {
            links.push(format!("<a target=\"_blank\" href=\"{url}\">Official Site</a>"));
        }
        if let Some(url) = &details.external_url {
            links.push(format!("<a target=\"_blank\" href=\"{url}\">Foursquare</a>"));
        }
        if !links.is_empty() {
            html.push_str(&format!("<p>{}</p>", links.join(" | ")));
        }
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cafe(id: &str, name: &str) -> Cafe {
        Cafe {
            id: id.to_string(),
            place_id: format!("place-{id}"),
            name: name.to_string(),
            vicinity: "Market St".to_string(),
            photo_url: Some("https://example.com/photo.jpg".to_string()),
            location: LatLng::new(37.79, -122.39),
        }
    }

    #[test]
    fn test_popup_html_pending_details() {
        let html = popup_html(&cafe("a", "Blue Bottle Coffee"), None);
        assert!(html.contains("<h2>Blue Bottle Coffee</h2>"));
        assert!(html.contains("query_place_id=place-a"));
        assert!(html.contains("photo.jpg"));
        assert!(!html.contains("Official Site"));
    }

    #[test]
    fn test_popup_html_with_details() {
        let details = CafeDetails {
            hours_text: Some("Open until 6:00 PM".to_string()),
            external_url: Some("https://foursquare.com/v/abc".to_string()),
            official_url: Some("https://bluebottle.example".to_string()),
        };
        let html = popup_html(&cafe("a", "Blue Bottle Coffee"), Some(&details));
        assert!(html.contains("Open until 6:00 PM"));
        assert!(html.contains("Official Site"));
        assert!(html.contains("Foursquare"));
        assert!(html.contains(" | "));
    }

    #[test]
    fn test_popup_html_omits_missing_links() {
        let details = CafeDetails::default();
        let html = popup_html(&cafe("a", "Blue Bottle Coffee"), Some(&details));
        assert!(!html.contains("Official Site"));
        assert!(!html.contains("Foursquare"));
    }
}
