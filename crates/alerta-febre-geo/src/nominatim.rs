//! Reverse geocoding through the public Nominatim API.
//!
//! Usage policy requires an identifying `User-Agent`, so the client is always
//! built with one.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{Coordinates, GeocodeError, GeocodeResult, ReverseGeocoder};

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = concat!("alerta-febre/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_GEOCODER_TIMEOUT: Duration = Duration::from_secs(10);

/// Subset of the `format=jsonv2` reverse response we use.
#[derive(Debug, Clone, Deserialize)]
pub struct ReverseResponse {
    pub display_name: Option<String>,
    /// Set instead of an address when the point cannot be geocoded
    pub error: Option<String>,
}

/// Parse a Nominatim reverse response body into an address.
pub fn parse_reverse_response(body: &str) -> GeocodeResult<Option<String>> {
    let response: ReverseResponse = serde_json::from_str(body)?;

    if let Some(error) = response.error {
        return Err(GeocodeError::Service(error));
    }

    Ok(response
        .display_name
        .filter(|name| !name.trim().is_empty()))
}

/// HTTP geocoder backed by Nominatim.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    client: reqwest::Client,
}

impl NominatimGeocoder {
    /// Create a geocoder for the given service root.
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> GeocodeResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Geocoder for the public OpenStreetMap instance.
    pub fn with_defaults() -> GeocodeResult<Self> {
        Self::new(
            DEFAULT_NOMINATIM_URL,
            DEFAULT_USER_AGENT,
            DEFAULT_GEOCODER_TIMEOUT,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse(&self, coords: Coordinates) -> GeocodeResult<Option<String>> {
        let url = format!("{}/reverse", self.base_url);
        tracing::debug!(%url, lat = coords.latitude, lon = coords.longitude, "reverse geocoding");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_reverse_response(&body)
    }
}
