//! Location attached to a record at creation time.

use serde::{Deserialize, Serialize};

use alerta_febre_geo::Coordinates;

/// Where the reading was taken. `endereco` is null when reverse geocoding
/// failed or was unavailable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Localizacao {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub endereco: Option<String>,
}

impl Localizacao {
    pub fn new(coords: Coordinates, endereco: Option<String>) -> Self {
        Self {
            latitude: coords.latitude,
            longitude: coords.longitude,
            endereco,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn has_address(&self) -> bool {
        self.endereco.is_some()
    }
}
