//! Details gateway over the Foursquare venues API.
//!
//! Two-step lookup: a venue search by name near a coordinate (taking the
//! single best match), then a fetch of that venue's full record. Both calls
//! authenticate with key parameters on the query string.

use crate::{
    core::{geo::LatLng, models::CafeDetails},
    gateways::DetailsGateway,
    Error, Result,
};
use async_trait::async_trait;
use serde::Deserialize;

/// Production endpoint; tests point `base_url` at a local mock server
pub const DEFAULT_BASE_URL: &str = "https://api.foursquare.com";

/// Versioning parameter the v2 API requires on every call
const API_VERSION: &str = "20180323";

#[derive(Debug, Clone)]
pub struct FoursquareConfig {
    pub client_id: String,
    pub client_secret: String,
    pub base_url: String,
}

impl FoursquareConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Venue details fetcher backed by the Foursquare v2 REST API
pub struct FoursquareDetails {
    client: reqwest::Client,
    config: FoursquareConfig,
}

impl FoursquareDetails {
    pub fn new(config: FoursquareConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.config.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("v", API_VERSION),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Provider(format!(
                "details provider returned {} for {path}",
                response.status()
            )));
        }
        Ok(response)
    }
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchResponse,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    venues: Vec<VenueRef>,
}

#[derive(Debug, Deserialize)]
struct VenueRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct VenueEnvelope {
    response: VenueResponse,
}

#[derive(Debug, Deserialize)]
struct VenueResponse {
    venue: Option<Venue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Venue {
    hours: Option<VenueHours>,
    canonical_url: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VenueHours {
    status: Option<String>,
}

#[async_trait]
impl DetailsGateway for FoursquareDetails {
    async fn fetch(&self, near: LatLng, name: &str) -> Result<CafeDetails> {
        let ll = format!("{},{}", near.lat, near.lng);
        let search: SearchEnvelope = self
            .get(
                "/v2/venues/search",
                &[
                    ("limit", "1".to_string()),
                    ("query", name.to_string()),
                    ("ll", ll),
                ],
            )
            .await?
            .json()
            .await?;

        let venue_id = search
            .response
            .venues
            .into_iter()
            .next()
            .map(|venue| venue.id)
            .ok_or_else(|| Error::NotFound(format!("no venue matching {name:?} nearby")))?;

        log::debug!("resolved {name:?} to venue {venue_id}");

        let record: VenueEnvelope = self
            .get(&format!("/v2/venues/{venue_id}"), &[])
            .await?
            .json()
            .await?;

        let venue = record
            .response
            .venue
            .ok_or_else(|| Error::NotFound(format!("venue {venue_id} has no record")))?;

        Ok(CafeDetails {
            hours_text: venue.hours.and_then(|hours| hours.status),
            external_url: venue.canonical_url,
            official_url: venue.url,
        })
    }
}
