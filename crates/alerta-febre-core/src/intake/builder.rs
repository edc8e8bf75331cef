//! Record builder/validator.
//!
//! Pure function from [`RecordFields`] (plus an optional location) to a
//! [`Record`]. Nothing here touches the network.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::fields::RecordFields;
use crate::models::{
    Localizacao, MedicationDetails, MedicationStatus, Record, FLAG_NOT_TAKEN, FLAG_TAKEN,
};

/// Form fields that can be reported as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Nome,
    Idade,
    Temperatura,
    TomouRemedio,
    NomeRemedio,
    Dosagem,
    Hora,
}

impl RequiredField {
    /// Field name as used on the wire / in the form.
    pub fn wire_name(&self) -> &'static str {
        match self {
            RequiredField::Nome => "nome",
            RequiredField::Idade => "idade",
            RequiredField::Temperatura => "temperatura",
            RequiredField::TomouRemedio => "tomouRemedio",
            RequiredField::NomeRemedio => "remedio.nome",
            RequiredField::Dosagem => "remedio.dosagem",
            RequiredField::Hora => "remedio.hora",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Local validation failures. Raised before any I/O.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(RequiredField),

    #[error("tomouRemedio must be \"sim\" or \"nao\", got {0:?}")]
    InvalidMedicationFlag(String),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// How strict validation is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakePolicy {
    /// Reject `"sim"` records whose medication name, dosage or time is empty.
    /// Off by default: the mobile forms never required them.
    pub require_medication_details: bool,
}

impl IntakePolicy {
    pub fn strict() -> Self {
        Self {
            require_medication_details: true,
        }
    }
}

/// Builds validated records under an [`IntakePolicy`].
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    policy: IntakePolicy,
}

impl RecordBuilder {
    pub fn new(policy: IntakePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> IntakePolicy {
        self.policy
    }

    /// Validate the fields and assemble a draft record (no id).
    pub fn build(
        &self,
        fields: &RecordFields,
        localizacao: Option<Localizacao>,
    ) -> ValidationResult<Record> {
        let flag = self.validate(fields)?;

        let medicacao = if flag == FLAG_TAKEN {
            MedicationStatus::Taken(MedicationDetails {
                nome: fields.nome_remedio.clone(),
                dosagem: fields.dosagem.clone(),
                hora: fields.hora.clone(),
            })
        } else {
            MedicationStatus::NotTaken
        };

        Ok(Record {
            id: None,
            nome: fields.nome.clone(),
            idade: fields.idade.clone(),
            temperatura: fields.temperatura.clone(),
            medicacao,
            localizacao,
        })
    }

    /// Check required fields, returning the medication flag.
    pub fn validate<'a>(&self, fields: &'a RecordFields) -> ValidationResult<&'a str> {
        require(&fields.nome, RequiredField::Nome)?;
        require(&fields.idade, RequiredField::Idade)?;
        require(&fields.temperatura, RequiredField::Temperatura)?;

        let flag = fields.tomou_remedio.as_deref().unwrap_or_default();
        require(flag, RequiredField::TomouRemedio)?;

        match flag {
            FLAG_TAKEN => {
                if self.policy.require_medication_details {
                    require(&fields.nome_remedio, RequiredField::NomeRemedio)?;
                    require(&fields.dosagem, RequiredField::Dosagem)?;
                    require(&fields.hora, RequiredField::Hora)?;
                }
                Ok(flag)
            }
            FLAG_NOT_TAKEN => Ok(flag),
            other => Err(ValidationError::InvalidMedicationFlag(other.to_string())),
        }
    }
}

fn require(value: &str, field: RequiredField) -> ValidationResult<()> {
    if value.is_empty() {
        Err(ValidationError::MissingRequiredField(field))
    } else {
        Ok(())
    }
}

/// Build a record with the default (lenient) policy.
pub fn build_record(
    fields: &RecordFields,
    localizacao: Option<Localizacao>,
) -> ValidationResult<Record> {
    RecordBuilder::default().build(fields, localizacao)
}
