//! Location resolution for new records.
//!
//! Permission → position fix → reverse geocoding. Every step is best-effort:
//! a record is submitted with whatever the resolver could get.

mod providers;

pub use providers::*;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Localizacao;
use alerta_febre_geo::{Coordinates, ReverseGeocoder};

/// Answer to a location permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Location provider errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("No position fix available: {0}")]
    Unavailable(String),
}

/// Host platform location capability.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_permission(&self) -> PermissionStatus;

    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Result of a resolution attempt. Never an error: the caller decides whether
/// to tell the user.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    /// Coordinates, with an address when geocoding succeeded
    Resolved(Localizacao),
    /// The user refused location access
    PermissionDenied,
    /// Permission granted but no fix could be obtained
    Unavailable(String),
}

impl LocationOutcome {
    pub fn into_location(self) -> Option<Localizacao> {
        match self {
            LocationOutcome::Resolved(location) => Some(location),
            _ => None,
        }
    }

    pub fn location(&self) -> Option<&Localizacao> {
        match self {
            LocationOutcome::Resolved(location) => Some(location),
            _ => None,
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, LocationOutcome::PermissionDenied)
    }
}

/// Resolves the device location, optionally with an address.
#[derive(Clone)]
pub struct LocationResolver {
    provider: Arc<dyn LocationProvider>,
    geocoder: Option<Arc<dyn ReverseGeocoder>>,
}

impl LocationResolver {
    /// Create a resolver. Without a geocoder, addresses are always `None`.
    pub fn new(
        provider: Arc<dyn LocationProvider>,
        geocoder: Option<Arc<dyn ReverseGeocoder>>,
    ) -> Self {
        Self { provider, geocoder }
    }

    pub async fn resolve(&self) -> LocationOutcome {
        if self.provider.request_permission().await == PermissionStatus::Denied {
            tracing::warn!("location permission denied, continuing without location");
            return LocationOutcome::PermissionDenied;
        }

        let coords = match self.provider.current_position().await {
            Ok(coords) => coords,
            Err(e) => {
                tracing::warn!(error = %e, "could not read device position");
                return LocationOutcome::Unavailable(e.to_string());
            }
        };

        let endereco = self.reverse_geocode(coords).await;
        LocationOutcome::Resolved(Localizacao::new(coords, endereco))
    }

    /// Address lookup; failures are logged and swallowed.
    async fn reverse_geocode(&self, coords: Coordinates) -> Option<String> {
        let geocoder = self.geocoder.as_ref()?;

        match geocoder.reverse(coords).await {
            Ok(address) => address,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    lat = coords.latitude,
                    lon = coords.longitude,
                    "reverse geocoding failed"
                );
                None
            }
        }
    }
}
