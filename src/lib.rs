//! # cafescout
//!
//! Application core for a "find nearby cafes" app.
//!
//! The user supplies a location (a typed address or the device position), the
//! app asks a mapping provider for cafes within a radius, renders them as
//! markers, and shows enrichment details (opening hours, canonical links) for
//! the selected cafe from a secondary places API.
//!
//! The crate is split the way the app is wired at runtime:
//! - [`app::state::AppState`] owns all mutable state and exposes intents
//! - [`gateways`] wrap each third-party API behind a typed async contract
//! - [`render::view::MapRenderer`] turns state-change events into calls on an
//!   abstract [`render::surface::MapSurface`]
//!
//! The actual map SDK and UI chrome live behind the `MappingProvider` and
//! `MapSurface` traits; nothing in here touches a real screen or a real
//! network endpoint except the details gateway.

pub mod app;
pub mod core;
pub mod gateways;
pub mod render;

// Re-export public API
pub use crate::core::{
    geo::{LatLng, LatLngBounds},
    models::{Cafe, CafeDetails, SearchCriteria},
};

pub use crate::app::{
    events::{AppEvent, Severity},
    state::{AppState, DetailsTicket, Gateways},
};

pub use crate::gateways::{DetailsGateway, GeocodeGateway, LocationSource, PlacesGateway};

pub use crate::render::{
    surface::{MapSurface, MarkerKind, MarkerSpec},
    view::MapRenderer,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A provider answered with a status the caller cannot recover from
    #[error("provider error: {0}")]
    Provider(String),

    /// A lookup produced no match; surfaced to the user as a warning
    #[error("no match: {0}")]
    NotFound(String),

    /// The platform exposes no location capability
    #[error("location capability unavailable")]
    Unsupported,

    /// The user denied the location request
    #[error("location permission denied: {0}")]
    Permission(String),

    /// The platform could not produce a position (timeout, no fix)
    #[error("location unavailable: {0}")]
    Position(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
