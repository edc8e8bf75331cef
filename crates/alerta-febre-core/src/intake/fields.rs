//! Raw form input.

use serde::{Deserialize, Serialize};

use crate::models::{MedicationStatus, Record};

/// Field values exactly as typed in the form, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFields {
    pub nome: String,
    pub idade: String,
    pub temperatura: String,
    /// `"sim"` or `"nao"`; `None` until the user picks one
    pub tomou_remedio: Option<String>,
    pub nome_remedio: String,
    pub dosagem: String,
    pub hora: String,
}

impl RecordFields {
    /// Pre-fill the form from a stored record (edit flow).
    pub fn from_record(record: &Record) -> Self {
        let (nome_remedio, dosagem, hora) = match &record.medicacao {
            MedicationStatus::Taken(details) => (
                details.nome.clone(),
                details.dosagem.clone(),
                details.hora.clone(),
            ),
            MedicationStatus::NotTaken => (String::new(), String::new(), String::new()),
        };

        Self {
            nome: record.nome.clone(),
            idade: record.idade.clone(),
            temperatura: record.temperatura.clone(),
            tomou_remedio: Some(record.medicacao.flag().to_string()),
            nome_remedio,
            dosagem,
            hora,
        }
    }
}
