//! Lenient decoding helpers for the remote store's JSON.
//!
//! The registry is a schemaless JSON server, so values typed as text in the
//! form may come back as numbers (and ids are usually numeric).

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Errors converting wire JSON into domain records.
#[derive(Error, Debug, PartialEq)]
pub enum WireError {
    #[error("Unknown tomouRemedio value: {0:?}")]
    UnknownMedicationFlag(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(number) => number.to_string(),
        }
    }
}

/// Accept a JSON string or number, keeping the number's textual form.
pub(crate) fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    TextOrNumber::deserialize(deserializer).map(TextOrNumber::into_text)
}

/// Optional variant of [`text_or_number`].
pub(crate) fn optional_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TextOrNumber>::deserialize(deserializer)?.map(TextOrNumber::into_text))
}
