use crate::core::{
    geo::LatLng,
    models::{Cafe, CafeDetails},
};

/// How a user-facing notice should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A "no match" or capability problem; the app keeps working
    Warning,
    /// A provider or network failure
    Error,
}

/// State-change notifications emitted by [`crate::app::state::AppState`].
///
/// Each event carries the data a renderer needs, so reacting to the stream is
/// a pure function of the events; nothing reaches back into the state
/// container's internals.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The search location was resolved (typed address or device position)
    LocationChanged { location: LatLng },
    /// The visible (filtered) cafe list was replaced
    CafesChanged { cafes: Vec<Cafe> },
    /// A cafe was selected; its details are pending
    SelectionChanged { cafe: Cafe },
    /// Enrichment details arrived for the still-selected cafe
    DetailsArrived { cafe: Cafe, details: CafeDetails },
    /// The results side panel was opened or closed
    MenuToggled { open: bool },
    /// A location or places request started or finished
    LoadingChanged { loading: bool },
    /// Something the user should see as an alert
    Notice { severity: Severity, message: String },
}
