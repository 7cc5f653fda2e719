use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Default search distance in meters
pub const DEFAULT_SEARCH_RADIUS_METERS: u32 = 2000;

/// Default address searched on startup
pub const DEFAULT_ADDRESS: &str = "1 Market Street, San Francisco, CA, USA";

/// A cafe as returned by the places gateway.
///
/// Immutable once constructed; `id` is the provider-assigned identifier and
/// is unique within one search's result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cafe {
    pub id: String,
    pub place_id: String,
    pub name: String,
    pub vicinity: String,
    pub photo_url: Option<String>,
    pub location: LatLng,
}

/// Enrichment details for the selected cafe, fetched from the secondary
/// places API. Every field may be missing on the provider side.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CafeDetails {
    /// Human-readable opening-hours line, e.g. "Open until 6:00 PM"
    pub hours_text: Option<String>,
    /// Canonical page for the venue on the details provider
    pub external_url: Option<String>,
    /// The venue's own website
    pub official_url: Option<String>,
}

/// User-editable search inputs; not persisted anywhere
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub address_text: String,
    pub radius_meters: u32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            address_text: DEFAULT_ADDRESS.to_string(),
            radius_meters: DEFAULT_SEARCH_RADIUS_METERS,
        }
    }
}
