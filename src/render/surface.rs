use crate::core::geo::{LatLng, LatLngBounds};
use std::time::Duration;

/// What a marker stands for; surfaces pick icons accordingly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    UserLocation,
    Cafe,
}

/// Everything a surface needs to draw one marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub id: String,
    pub position: LatLng,
    pub title: Option<String>,
    pub kind: MarkerKind,
}

/// The rendering primitives the app core depends on.
///
/// A real implementation binds the platform's map SDK and page chrome; tests
/// record the calls. All methods are fire-and-forget from the caller's point
/// of view.
pub trait MapSurface {
    fn place_marker(&mut self, marker: MarkerSpec);

    fn remove_marker(&mut self, marker_id: &str);

    /// Recenters the map on a point at the given zoom
    fn set_view(&mut self, center: LatLng, zoom: f64);

    /// Adjusts the viewport so the whole bounds is visible
    fn fit_bounds(&mut self, bounds: &LatLngBounds);

    /// Opens the single detail popup anchored to a marker
    fn open_popup(&mut self, marker_id: &str, html: String);

    /// Replaces the content of the currently open popup
    fn set_popup_content(&mut self, html: String);

    fn close_popup(&mut self);

    /// Plays an attention animation on a marker, auto-resetting after
    /// `duration`
    fn animate_marker(&mut self, marker_id: &str, duration: Duration);

    /// Blocking alert-style notification
    fn show_alert(&mut self, message: &str);

    fn set_loading_indicator(&mut self, loading: bool);

    fn set_menu_open(&mut self, open: bool);
}
