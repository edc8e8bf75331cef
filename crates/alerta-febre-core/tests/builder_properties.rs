//! Property tests for the record builder.

use proptest::prelude::*;

use alerta_febre_core::intake::{build_record, RecordFields, ValidationError};
use alerta_febre_core::models::{MedicationDetails, MedicationStatus, Record};

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 :.,]{0,16}"
}

fn non_empty() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 :.,]{1,16}"
}

fn flag() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("sim".to_string())),
        Just(Some("nao".to_string())),
    ]
}

prop_compose! {
    fn any_fields()(
        nome in text(),
        idade in text(),
        temperatura in text(),
        tomou_remedio in flag(),
        nome_remedio in text(),
        dosagem in text(),
        hora in text(),
    ) -> RecordFields {
        RecordFields { nome, idade, temperatura, tomou_remedio, nome_remedio, dosagem, hora }
    }
}

prop_compose! {
    fn valid_fields(taken: bool)(
        nome in non_empty(),
        idade in non_empty(),
        temperatura in non_empty(),
        nome_remedio in text(),
        dosagem in text(),
        hora in text(),
    ) -> RecordFields {
        let tomou_remedio = Some(if taken { "sim" } else { "nao" }.to_string());
        RecordFields { nome, idade, temperatura, tomou_remedio, nome_remedio, dosagem, hora }
    }
}

fn missing_required(fields: &RecordFields) -> bool {
    fields.nome.is_empty()
        || fields.idade.is_empty()
        || fields.temperatura.is_empty()
        || fields.tomou_remedio.as_deref().unwrap_or_default().is_empty()
}

proptest! {
    #[test]
    fn missing_required_field_always_fails(fields in any_fields()) {
        let result = build_record(&fields, None);
        if missing_required(&fields) {
            prop_assert!(matches!(result, Err(ValidationError::MissingRequiredField(_))));
        } else {
            prop_assert!(result.is_ok());
        }
    }

    #[test]
    fn not_taken_never_carries_medication(fields in valid_fields(false)) {
        let record = build_record(&fields, None).unwrap();
        prop_assert_eq!(record.medicacao, MedicationStatus::NotTaken);
    }

    #[test]
    fn taken_copies_medication_verbatim(fields in valid_fields(true)) {
        let record = build_record(&fields, None).unwrap();
        let expected = MedicationDetails {
            nome: fields.nome_remedio.clone(),
            dosagem: fields.dosagem.clone(),
            hora: fields.hora.clone(),
        };
        prop_assert_eq!(record.medicacao, MedicationStatus::Taken(expected));
    }

    #[test]
    fn built_records_survive_the_wire(fields in valid_fields(true)) {
        let record = build_record(&fields, None).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        let decoded: Record = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(decoded, record);
    }
}
