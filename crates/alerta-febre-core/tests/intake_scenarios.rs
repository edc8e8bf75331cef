//! End-to-end intake scenarios over HTTP.

mod common;

use std::sync::Arc;

use alerta_febre_core::intake::{IntakePolicy, RecordFields, RequiredField, ValidationError};
use alerta_febre_core::location::{DeniedLocation, FixedLocation, LocationResolver};
use alerta_febre_core::models::{Localizacao, MedicationDetails, MedicationStatus, RecordId};
use alerta_febre_core::store::{HttpRecordStore, StoreError, DEFAULT_TIMEOUT};
use alerta_febre_core::workflow::{IntakeError, RecordIntake};
use alerta_febre_geo::{Coordinates, MockGeocoder};

use common::{spawn_registry, unreachable_address};

fn ana_fields() -> RecordFields {
    RecordFields {
        nome: "Ana".into(),
        idade: "30".into(),
        temperatura: "38.2".into(),
        tomou_remedio: Some("sim".into()),
        nome_remedio: "Paracetamol".into(),
        dosagem: "500mg".into(),
        hora: "14:00".into(),
    }
}

fn intake(address: &str, locator: LocationResolver) -> RecordIntake {
    let store = HttpRecordStore::new(address, DEFAULT_TIMEOUT).unwrap();
    RecordIntake::new(Arc::new(store), locator, IntakePolicy::default())
}

fn sao_paulo_locator() -> LocationResolver {
    LocationResolver::new(
        Arc::new(FixedLocation::new(Coordinates::new(-23.5, -46.6))),
        Some(Arc::new(MockGeocoder::Address("Rua X, São Paulo".into()))),
    )
}

#[tokio::test]
async fn test_submit_example_record() {
    let app = spawn_registry().await;
    let intake = intake(&app.address, sao_paulo_locator());

    let submission = intake.submit(&ana_fields()).await.unwrap();
    let created = submission.record;
    assert!(created.id.is_some());

    let listed = intake.list().await.unwrap();
    let found = listed
        .iter()
        .find(|r| r.id == created.id)
        .expect("created record is listed");

    assert_eq!(found.nome, "Ana");
    assert_eq!(found.idade, "30");
    assert_eq!(found.temperatura, "38.2");
    assert_eq!(
        found.medicacao,
        MedicationStatus::Taken(MedicationDetails::new("Paracetamol", "500mg", "14:00"))
    );
    assert_eq!(
        found.localizacao,
        Some(Localizacao {
            latitude: -23.5,
            longitude: -46.6,
            endereco: Some("Rua X, São Paulo".into()),
        })
    );
}

#[tokio::test]
async fn test_denied_permission_still_creates() {
    let app = spawn_registry().await;
    let intake = intake(&app.address, LocationResolver::new(Arc::new(DeniedLocation), None));

    let submission = intake.submit(&ana_fields()).await.unwrap();
    assert!(submission.permission_denied());
    assert!(submission.record.localizacao.is_none());

    let body = app.registry.bodies().pop().unwrap();
    assert!(body["localizacao"].is_null());
}

#[tokio::test]
async fn test_failed_geocoding_keeps_coordinates() {
    let app = spawn_registry().await;
    let locator = LocationResolver::new(
        Arc::new(FixedLocation::new(Coordinates::new(-8.05, -34.9))),
        Some(Arc::new(MockGeocoder::Failing("no network".into()))),
    );
    let intake = intake(&app.address, locator);

    let created = intake.submit(&ana_fields()).await.unwrap().record;
    let location = created.localizacao.unwrap();
    assert_eq!(location.latitude, -8.05);
    assert_eq!(location.longitude, -34.9);
    assert_eq!(location.endereco, None);
}

#[tokio::test]
async fn test_validation_failure_makes_no_request() {
    // Nothing listens here; a request would surface as a network error.
    let intake = intake(&unreachable_address(), sao_paulo_locator());

    let mut fields = ana_fields();
    fields.tomou_remedio = None;

    let result = intake.submit(&fields).await;
    assert!(matches!(
        result,
        Err(IntakeError::Validation(ValidationError::MissingRequiredField(
            RequiredField::TomouRemedio
        )))
    ));
}

#[tokio::test]
async fn test_network_failure_surfaces() {
    let intake = intake(&unreachable_address(), sao_paulo_locator());

    let result = intake.submit(&ana_fields()).await;
    assert!(matches!(result, Err(IntakeError::Store(StoreError::Network(_)))));
}

#[tokio::test]
async fn test_edit_flow_preserves_location() {
    let app = spawn_registry().await;
    let intake = intake(&app.address, sao_paulo_locator());

    let created = intake.submit(&ana_fields()).await.unwrap().record;
    let stored = intake.get(created.id.as_ref().unwrap()).await.unwrap();

    let mut fields = RecordFields::from_record(&stored);
    fields.temperatura = "37.4".into();
    fields.tomou_remedio = Some("nao".into());

    let updated = intake.edit(&stored, &fields).await.unwrap();
    assert_eq!(updated.temperatura, "37.4");
    assert_eq!(updated.medicacao, MedicationStatus::NotTaken);
    assert_eq!(updated.localizacao, stored.localizacao);

    let relisted = intake.list().await.unwrap();
    assert_eq!(relisted, vec![updated]);
}

#[tokio::test]
async fn test_remove_unknown_then_list() {
    let app = spawn_registry().await;
    let intake = intake(&app.address, sao_paulo_locator());
    intake.submit(&ana_fields()).await.unwrap();

    let missing = RecordId::new("999");
    let err = intake.remove(&missing).await.unwrap_err();
    assert!(matches!(err, IntakeError::Store(StoreError::Remote { status: 404, .. })));

    let listed = intake.list().await.unwrap();
    assert!(listed.iter().all(|r| r.id.as_ref() != Some(&missing)));
}
