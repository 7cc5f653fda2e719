//! Typed async contracts over the third-party APIs the app talks to.
//!
//! Each gateway wraps exactly one provider behind a small trait so the state
//! container never sees callback-style SDKs, raw status codes, or response
//! envelopes.

pub mod foursquare;
pub mod location;
pub mod mapping;

use crate::{
    core::{
        geo::LatLng,
        models::{Cafe, CafeDetails},
    },
    Result,
};
use async_trait::async_trait;

/// Place search by coordinate, radius and category.
///
/// Implementations follow provider pagination transparently: the returned
/// list is always the full result set, never a single page.
#[async_trait]
pub trait PlacesGateway: Send + Sync {
    async fn find_nearby(
        &self,
        center: LatLng,
        radius_meters: u32,
        category: &str,
    ) -> Result<Vec<Cafe>>;
}

/// Resolves a free-text address to a coordinate.
///
/// A provider "zero results" outcome is `Ok(None)`, not an error.
#[async_trait]
pub trait GeocodeGateway: Send + Sync {
    async fn resolve(&self, address: &str) -> Result<Option<LatLng>>;
}

/// Single-shot device position query.
///
/// Resolves exactly once; never reports a second position. Fails with
/// [`crate::Error::Unsupported`] when the platform has no location
/// capability at all.
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn current(&self) -> Result<LatLng>;
}

/// Fetches enrichment details for a named place near a coordinate
#[async_trait]
pub trait DetailsGateway: Send + Sync {
    async fn fetch(&self, near: LatLng, name: &str) -> Result<CafeDetails>;
}
