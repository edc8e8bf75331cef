//! Mock geocoder for testing without network access.

use async_trait::async_trait;

use crate::{Coordinates, GeocodeError, GeocodeResult, ReverseGeocoder};

/// Geocoder that answers every lookup the same way.
#[derive(Debug, Clone)]
pub enum MockGeocoder {
    /// Always returns this address
    Address(String),
    /// Answers, but with no address
    Empty,
    /// Always fails with a service error
    Failing(String),
}

#[async_trait]
impl ReverseGeocoder for MockGeocoder {
    async fn reverse(&self, _coords: Coordinates) -> GeocodeResult<Option<String>> {
        match self {
            MockGeocoder::Address(address) => Ok(Some(address.clone())),
            MockGeocoder::Empty => Ok(None),
            MockGeocoder::Failing(reason) => Err(GeocodeError::Service(reason.clone())),
        }
    }
}
