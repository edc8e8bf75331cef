//! Medication models.

use serde::{Deserialize, Serialize};

use super::wire::WireError;

/// Wire value of `tomouRemedio` when medication was taken.
pub const FLAG_TAKEN: &str = "sim";
/// Wire value of `tomouRemedio` when no medication was taken.
pub const FLAG_NOT_TAKEN: &str = "nao";

/// Medication taken, all free text as typed by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MedicationDetails {
    /// Medication name
    #[serde(default)]
    pub nome: String,
    /// Dosage (e.g., "500mg")
    #[serde(default)]
    pub dosagem: String,
    /// Time taken (e.g., "14:00")
    #[serde(default)]
    pub hora: String,
}

impl MedicationDetails {
    pub fn new(nome: impl Into<String>, dosagem: impl Into<String>, hora: impl Into<String>) -> Self {
        Self {
            nome: nome.into(),
            dosagem: dosagem.into(),
            hora: hora.into(),
        }
    }

    /// True when none of the fields were filled in.
    pub fn is_blank(&self) -> bool {
        self.nome.is_empty() && self.dosagem.is_empty() && self.hora.is_empty()
    }
}

/// Whether medication was taken. Replaces the `tomouRemedio` flag + nullable
/// `remedio` pair so the two cannot disagree.
#[derive(Debug, Clone, PartialEq)]
pub enum MedicationStatus {
    Taken(MedicationDetails),
    NotTaken,
}

impl MedicationStatus {
    /// The `tomouRemedio` wire value.
    pub fn flag(&self) -> &'static str {
        match self {
            MedicationStatus::Taken(_) => FLAG_TAKEN,
            MedicationStatus::NotTaken => FLAG_NOT_TAKEN,
        }
    }

    pub fn details(&self) -> Option<&MedicationDetails> {
        match self {
            MedicationStatus::Taken(details) => Some(details),
            MedicationStatus::NotTaken => None,
        }
    }

    pub fn is_taken(&self) -> bool {
        matches!(self, MedicationStatus::Taken(_))
    }

    /// Rebuild from the wire pair. A `"sim"` record stored without details is
    /// read as taken with empty details.
    pub fn from_wire(flag: &str, remedio: Option<MedicationDetails>) -> Result<Self, WireError> {
        match flag {
            FLAG_TAKEN => Ok(MedicationStatus::Taken(remedio.unwrap_or_default())),
            FLAG_NOT_TAKEN => Ok(MedicationStatus::NotTaken),
            other => Err(WireError::UnknownMedicationFlag(other.to_string())),
        }
    }

    /// Split into the wire pair.
    pub fn to_wire(&self) -> (&'static str, Option<MedicationDetails>) {
        (self.flag(), self.details().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_wire_taken() {
        let details = MedicationDetails::new("Paracetamol", "500mg", "14:00");
        let status = MedicationStatus::from_wire("sim", Some(details.clone())).unwrap();
        assert_eq!(status, MedicationStatus::Taken(details));
        assert_eq!(status.flag(), "sim");
    }

    #[test]
    fn test_from_wire_taken_without_details() {
        let status = MedicationStatus::from_wire("sim", None).unwrap();
        assert!(status.is_taken());
        assert!(status.details().unwrap().is_blank());
    }

    #[test]
    fn test_from_wire_not_taken_drops_details() {
        let details = MedicationDetails::new("Dipirona", "1g", "08:00");
        let status = MedicationStatus::from_wire("nao", Some(details)).unwrap();
        assert_eq!(status, MedicationStatus::NotTaken);
        assert_eq!(status.to_wire(), ("nao", None));
    }

    #[test]
    fn test_from_wire_unknown_flag() {
        let result = MedicationStatus::from_wire("talvez", None);
        assert_eq!(result, Err(WireError::UnknownMedicationFlag("talvez".into())));
    }
}
