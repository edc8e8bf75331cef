//! Text shown on record cards.

use crate::models::{Localizacao, Record};

pub const UNKNOWN_LOCATION: &str = "Localização não identificada";

/// Shorten a geocoder display string to `street - city`.
///
/// Nominatim addresses read `street, district, city, ...`, so with three or
/// more comma-separated parts the first and third are kept.
pub fn short_address(endereco: Option<&str>) -> String {
    let endereco = match endereco.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => return UNKNOWN_LOCATION.to_string(),
    };

    let parts: Vec<&str> = endereco.split(',').map(str::trim).collect();
    if parts.len() >= 3 {
        format!("{} - {}", parts[0], parts[2])
    } else {
        parts[0].to_string()
    }
}

/// Card title, e.g. `Ana, 30 anos`.
pub fn summary_line(record: &Record) -> String {
    format!("{}, {} anos", record.nome, record.idade)
}

/// e.g. `Temperatura: 38.2°C`
pub fn temperature_line(record: &Record) -> String {
    format!("Temperatura: {}°C", record.temperatura)
}

/// `SIM` / `NAO`
pub fn medication_flag_label(record: &Record) -> String {
    record.medicacao.flag().to_uppercase()
}

/// Shortened address, or `Coords: lat, lon` (4 decimals) when the lookup
/// gave nothing.
pub fn location_label(location: &Localizacao) -> String {
    match location.endereco.as_deref().map(str::trim) {
        Some(endereco) if !endereco.is_empty() => short_address(Some(endereco)),
        _ => format!(
            "Coords: {:.4}, {:.4}",
            location.latitude, location.longitude
        ),
    }
}

/// Location line for a record's card.
pub fn record_address(record: &Record) -> String {
    match &record.localizacao {
        Some(location) => location_label(location),
        None => UNKNOWN_LOCATION.to_string(),
    }
}
