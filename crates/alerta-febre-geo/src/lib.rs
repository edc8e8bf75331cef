//! Reverse geocoding for fever records.
//!
//! Turns device coordinates into a human-readable address. Two sources are
//! supported: the public Nominatim service over HTTP (feature `nominatim`)
//! and platform geocoders that hand back address components.

pub mod address;
pub mod mock;
#[cfg(feature = "nominatim")]
pub mod nominatim;

pub use address::*;
pub use mock::*;
#[cfg(feature = "nominatim")]
pub use nominatim::*;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Geocoding errors.
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[cfg(feature = "nominatim")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Geocoder returned status {0}")]
    Status(u16),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Geocoder error: {0}")]
    Service(String),
}

pub type GeocodeResult<T> = Result<T, GeocodeError>;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Converts coordinates into an address string.
///
/// `Ok(None)` means the service answered but had no address for the point.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse(&self, coords: Coordinates) -> GeocodeResult<Option<String>>;
}
