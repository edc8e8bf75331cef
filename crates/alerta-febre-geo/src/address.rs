//! Address components returned by platform geocoders.

use serde::{Deserialize, Serialize};

/// Structured address as returned by iOS/Android geocoders.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AddressComponents {
    pub street: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl AddressComponents {
    /// Join the non-empty components as `street, city, region, country`.
    ///
    /// Returns `None` when every component is missing or blank.
    pub fn format(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.street, &self.city, &self.region, &self.country]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}
