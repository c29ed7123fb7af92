//! Site address geocoding.
//!
//! [`Geocoder`] wraps an [`AddressLookup`] service and turns every failure
//! into an ungeocoded [`SiteLocation`], so a lookup problem never aborts
//! work-order processing.

mod nominatim;

pub use nominatim::NominatimLookup;

use std::future::Future;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::GeocodeError;
use crate::models::config::GeocoderConfig;
use crate::models::work_order::SiteLocation;
use crate::workorder::rules::ADDRESS_NOT_FOUND;

/// Minimum address length worth sending to the lookup service.
pub const MIN_GEOCODE_ADDRESS_LEN: usize = 6;

/// Result type for lookup operations.
pub type Result<T> = std::result::Result<T, GeocodeError>;

/// One result row from a lookup service. Coordinates arrive as strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoCandidate {
    pub lat: String,
    pub lon: String,
}

impl GeoCandidate {
    pub fn new(lat: impl Into<String>, lon: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lon: lon.into(),
        }
    }
}

/// Address lookup service.
pub trait AddressLookup {
    /// Look up a free-text address, returning at most a few candidate rows.
    fn lookup(&self, address: &str) -> impl Future<Output = Result<Vec<GeoCandidate>>> + Send;
}

/// Geocoding adapter: guards, single attempt, failure absorption.
pub struct Geocoder<L> {
    lookup: Option<L>,
    min_address_len: usize,
}

impl<L: AddressLookup> Geocoder<L> {
    /// Create a geocoder backed by `lookup`.
    pub fn new(lookup: L) -> Self {
        Self {
            lookup: Some(lookup),
            min_address_len: MIN_GEOCODE_ADDRESS_LEN,
        }
    }

    /// A geocoder that never performs lookups.
    pub fn disabled() -> Self {
        Self {
            lookup: None,
            min_address_len: MIN_GEOCODE_ADDRESS_LEN,
        }
    }

    /// Skip lookups for addresses shorter than `len` characters.
    pub fn with_min_address_len(mut self, len: usize) -> Self {
        self.min_address_len = len;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.lookup.is_some()
    }

    /// Resolve an address to coordinates.
    ///
    /// Skips the lookup for the not-found sentinel and short addresses.
    /// Never fails: any error yields [`SiteLocation::ungeocoded`].
    pub async fn geocode(&self, address: &str) -> SiteLocation {
        let address = address.trim();
        let Some(lookup) = &self.lookup else {
            debug!("Geocoding disabled, skipping lookup");
            return SiteLocation::ungeocoded();
        };

        if address == ADDRESS_NOT_FOUND || address.chars().count() < self.min_address_len {
            debug!("Address {:?} not usable for geocoding", address);
            return SiteLocation::ungeocoded();
        }

        info!("Geocoding address: {}", address);

        match self.try_geocode(lookup, address).await {
            Ok(location) => {
                info!(
                    "Geocoded to {}, {}",
                    location.latitude, location.longitude
                );
                location
            }
            Err(e) => {
                warn!("Geocoding failed for address {:?}: {}", address, e);
                SiteLocation::ungeocoded()
            }
        }
    }

    async fn try_geocode(&self, lookup: &L, address: &str) -> Result<SiteLocation> {
        let candidates = lookup.lookup(address).await?;
        let first = candidates.first().ok_or(GeocodeError::NoResults)?;
        parse_candidate(first)
    }
}

impl Geocoder<NominatimLookup> {
    /// Build the geocoder described by `config`.
    ///
    /// A lookup client that cannot be constructed disables geocoding.
    pub fn from_config(config: &GeocoderConfig) -> Self {
        if !config.enabled {
            return Self::disabled();
        }
        match NominatimLookup::new(config) {
            Ok(lookup) => Self::new(lookup),
            Err(e) => {
                warn!("Geocoder unavailable, continuing without it: {}", e);
                Self::disabled()
            }
        }
    }
}

fn parse_candidate(candidate: &GeoCandidate) -> Result<SiteLocation> {
    let latitude = parse_coordinate(&candidate.lat)?;
    let longitude = parse_coordinate(&candidate.lon)?;
    Ok(SiteLocation::geocoded(latitude, longitude))
}

fn parse_coordinate(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeocodeError::InvalidCoordinate(raw.to_string()))
}
