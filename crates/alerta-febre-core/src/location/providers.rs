//! Location providers that need no device.

use async_trait::async_trait;

use super::{LocationError, LocationProvider, PermissionStatus};
use alerta_febre_geo::Coordinates;

/// Always grants permission and reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    coords: Coordinates,
}

impl FixedLocation {
    pub fn new(coords: Coordinates) -> Self {
        Self { coords }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.coords)
    }
}

/// Always refuses permission.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedLocation;

#[async_trait]
impl LocationProvider for DeniedLocation {
    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Denied
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unavailable("permission denied".into()))
    }
}

/// Grants permission but never gets a fix (e.g. GPS off).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFixLocation;

#[async_trait]
impl LocationProvider for NoFixLocation {
    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unavailable("location services disabled".into()))
    }
}
