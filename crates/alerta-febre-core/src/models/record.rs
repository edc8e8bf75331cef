//! Fever record model.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::location::Localizacao;
use super::medication::{MedicationDetails, MedicationStatus};
use super::wire::{optional_text_or_number, text_or_number, WireError};

/// Identifier assigned by the remote store. Opaque: numeric ids are kept in
/// their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        text_or_number(deserializer).map(RecordId)
    }
}

/// A single fever observation.
///
/// `id` is `None` for drafts that have not been created remotely yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecordWire", into = "RecordWire")]
pub struct Record {
    pub id: Option<RecordId>,
    /// Person's name
    pub nome: String,
    /// Age, verbatim as entered
    pub idade: String,
    /// Temperature reading in °C, verbatim as entered
    pub temperatura: String,
    /// Medication taken, if any
    pub medicacao: MedicationStatus,
    /// Where the reading was taken (best-effort)
    pub localizacao: Option<Localizacao>,
}

impl Record {
    /// Check if this record has been created on the remote store.
    pub fn is_stored(&self) -> bool {
        self.id.is_some()
    }

    /// Copy suitable as a request body. Ids travel in the path, never the body.
    pub fn without_id(&self) -> Record {
        Record {
            id: None,
            ..self.clone()
        }
    }

    /// Copy carrying the given id.
    pub fn with_id(self, id: RecordId) -> Record {
        Record {
            id: Some(id),
            ..self
        }
    }
}

/// JSON shape exchanged with the remote store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordWire {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_text_or_number"
    )]
    id: Option<String>,
    nome: String,
    #[serde(deserialize_with = "text_or_number")]
    idade: String,
    #[serde(deserialize_with = "text_or_number")]
    temperatura: String,
    tomou_remedio: String,
    #[serde(default)]
    remedio: Option<MedicationDetails>,
    #[serde(default)]
    localizacao: Option<Localizacao>,
}

impl TryFrom<RecordWire> for Record {
    type Error = WireError;

    fn try_from(wire: RecordWire) -> Result<Self, Self::Error> {
        Ok(Record {
            id: wire.id.map(RecordId),
            nome: wire.nome,
            idade: wire.idade,
            temperatura: wire.temperatura,
            medicacao: MedicationStatus::from_wire(&wire.tomou_remedio, wire.remedio)?,
            localizacao: wire.localizacao,
        })
    }
}

impl From<Record> for RecordWire {
    fn from(record: Record) -> Self {
        let (flag, remedio) = record.medicacao.to_wire();
        RecordWire {
            id: record.id.map(|id| id.0),
            nome: record.nome,
            idade: record.idade,
            temperatura: record.temperatura,
            tomou_remedio: flag.to_string(),
            remedio,
            localizacao: record.localizacao,
        }
    }
}
