//! Gateways over the mapping provider's places and geocoding services.
//!
//! The provider SDK is modeled at page granularity by [`MappingProvider`];
//! [`MappingPlaces`] and [`MappingGeocoder`] turn that into the whole-result
//! contracts the rest of the app consumes.

use crate::{
    core::{geo::LatLng, models::Cafe},
    gateways::{GeocodeGateway, PlacesGateway},
    Error, Result,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Provider status codes collapsed to the three cases the app cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Ok,
    /// Explicit empty outcome; not an error
    ZeroResults,
    /// Any other status, carried verbatim for the error message
    Other(String),
}

/// One page of a nearby search
#[derive(Debug, Clone)]
pub struct PlacePage {
    pub status: ProviderStatus,
    pub places: Vec<Cafe>,
    /// Opaque token for the next page; `None` when this page is the last
    pub next_page: Option<String>,
}

/// A geocoding answer
#[derive(Debug, Clone)]
pub struct GeocodeReply {
    pub status: ProviderStatus,
    /// Best-match location; `None` when the provider matched nothing
    pub location: Option<LatLng>,
}

/// The mapping SDK boundary.
///
/// Real implementations bind whatever callback-style SDK the platform offers
/// and resolve each call exactly once; tests script pages directly.
#[async_trait]
pub trait MappingProvider: Send + Sync {
    async fn nearby_search(
        &self,
        center: LatLng,
        radius_meters: u32,
        category: &str,
        page_token: Option<&str>,
    ) -> Result<PlacePage>;

    async fn geocode(&self, address: &str) -> Result<GeocodeReply>;
}

/// Place search that accumulates every result page before returning
pub struct MappingPlaces {
    provider: Arc<dyn MappingProvider>,
}

impl MappingPlaces {
    pub fn new(provider: Arc<dyn MappingProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl PlacesGateway for MappingPlaces {
    async fn find_nearby(
        &self,
        center: LatLng,
        radius_meters: u32,
        category: &str,
    ) -> Result<Vec<Cafe>> {
        let mut places = Vec::new();
        let mut page_token: Option<String> = None;

        // Keep paging until the provider reports no next page. Any page
        // failing fails the whole call; a partial list is never returned.
        loop {
            let page = self
                .provider
                .nearby_search(center, radius_meters, category, page_token.as_deref())
                .await?;

            match page.status {
                ProviderStatus::Ok => {}
                ProviderStatus::ZeroResults => break,
                ProviderStatus::Other(code) => {
                    return Err(Error::Provider(format!(
                        "nearby search failed with status {code}"
                    )));
                }
            }

            places.extend(page.places);
            match page.next_page {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        log::debug!(
            "nearby search for {category:?} within {radius_meters}m returned {} places",
            places.len()
        );
        Ok(places)
    }
}

/// Address resolution over the provider's geocoding service
pub struct MappingGeocoder {
    provider: Arc<dyn MappingProvider>,
}

impl MappingGeocoder {
    pub fn new(provider: Arc<dyn MappingProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl GeocodeGateway for MappingGeocoder {
    async fn resolve(&self, address: &str) -> Result<Option<LatLng>> {
        let reply = self.provider.geocode(address).await?;
        match reply.status {
            ProviderStatus::Ok => Ok(reply.location),
            ProviderStatus::ZeroResults => Ok(None),
            ProviderStatus::Other(code) => Err(Error::Provider(format!(
                "geocoding failed with status {code}"
            ))),
        }
    }
}
