//! Device location sources.
//!
//! The app core only needs a single-shot position query; what backs it is
//! platform-specific. The two implementations here cover the "no capability"
//! platform and fixed-position setups (demos, tests).

use crate::{core::geo::LatLng, gateways::LocationSource, Error, Result};
use async_trait::async_trait;

/// A platform with no location capability at all
pub struct UnsupportedLocation;

#[async_trait]
impl LocationSource for UnsupportedLocation {
    async fn current(&self) -> Result<LatLng> {
        Err(Error::Unsupported)
    }
}

/// Always reports the same position
pub struct FixedLocation {
    position: LatLng,
}

impl FixedLocation {
    pub fn new(position: LatLng) -> Self {
        Self { position }
    }
}

#[async_trait]
impl LocationSource for FixedLocation {
    async fn current(&self) -> Result<LatLng> {
        Ok(self.position)
    }
}
