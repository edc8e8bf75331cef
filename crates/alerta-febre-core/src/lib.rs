//! Alerta Febre Core Library
//!
//! Intake and sync client for fever records: temperature readings, optional
//! medication taken and device location, stored on a remote REST registry.
//!
//! # Architecture
//!
//! ```text
//! Form fields ──► RecordBuilder (validate, no I/O)
//!                      │
//!                      ▼
//!              LocationResolver  (create only)
//!      permission → position fix → reverse geocode
//!                      │
//!                      ▼
//!                 RecordStore ──► GET/POST/PUT/DELETE /registros
//!                      │
//!                      ▼
//!           UI re-lists from the store
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain types (Record, MedicationStatus, Localizacao)
//! - [`intake`]: Form fields and the record builder/validator
//! - [`location`]: Permission, position and reverse geocoding
//! - [`store`]: Remote store client (HTTP) and in-memory store
//! - [`workflow`]: The submit/edit/list/remove flow
//! - [`display`]: Card text (short address, summary lines)
//! - [`config`], [`telemetry`]: Settings and logging

pub mod config;
pub mod display;
pub mod intake;
pub mod location;
pub mod models;
pub mod store;
pub mod telemetry;
pub mod workflow;

// Re-export commonly used types
pub use intake::{build_record, IntakePolicy, RecordBuilder, RecordFields, ValidationError};
pub use location::{LocationOutcome, LocationProvider, LocationResolver, PermissionStatus};
pub use models::{Localizacao, MedicationDetails, MedicationStatus, Record, RecordId};
pub use store::{HttpRecordStore, MemoryRecordStore, RecordStore, StoreError};
pub use workflow::{IntakeError, RecordIntake, Submission};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

use alerta_febre_geo::{AddressComponents, Coordinates, GeocodeResult, ReverseGeocoder};
use async_trait::async_trait;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum AlertaFebreError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Remote error: {0}")]
    RemoteError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<ValidationError> for AlertaFebreError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::MissingRequiredField(field) => {
                AlertaFebreError::MissingRequiredField(field.wire_name().to_string())
            }
            other => AlertaFebreError::InvalidInput(other.to_string()),
        }
    }
}

impl From<StoreError> for AlertaFebreError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Network(msg) => AlertaFebreError::NetworkError(msg),
            StoreError::Remote { status, body } => {
                AlertaFebreError::RemoteError(format!("{}: {}", status, body))
            }
            StoreError::Config(msg) => AlertaFebreError::ConfigError(msg),
            other => AlertaFebreError::RemoteError(other.to_string()),
        }
    }
}

impl From<IntakeError> for AlertaFebreError {
    fn from(e: IntakeError) -> Self {
        match e {
            IntakeError::Validation(e) => e.into(),
            IntakeError::Store(e) => e.into(),
            IntakeError::Geocoder(e) => AlertaFebreError::ConfigError(e.to_string()),
            IntakeError::NotStored => {
                AlertaFebreError::InvalidInput("record has no id".to_string())
            }
        }
    }
}

impl From<models::WireError> for AlertaFebreError {
    fn from(e: models::WireError) -> Self {
        AlertaFebreError::InvalidInput(e.to_string())
    }
}

// =========================================================================
// Host Capabilities (implemented in Swift/Kotlin)
// =========================================================================

/// Device location service.
#[uniffi::export(with_foreign)]
pub trait HostLocation: Send + Sync {
    /// Ask for foreground location permission; `true` when granted.
    fn request_permission(&self) -> bool;

    /// Current position, or `None` when no fix is available.
    fn current_position(&self) -> Option<FfiCoordinates>;
}

/// Platform reverse geocoder (e.g. CLGeocoder / android.location.Geocoder).
#[uniffi::export(with_foreign)]
pub trait HostGeocoder: Send + Sync {
    fn reverse_geocode(&self, coordinates: FfiCoordinates) -> Option<FfiAddressComponents>;
}

/// Adapts a [`HostLocation`] to [`LocationProvider`]. Host calls may block,
/// so they run on the blocking pool.
struct HostLocationProvider(Arc<dyn HostLocation>);

#[async_trait]
impl LocationProvider for HostLocationProvider {
    async fn request_permission(&self) -> PermissionStatus {
        let host = self.0.clone();
        match tokio::task::spawn_blocking(move || host.request_permission()).await {
            Ok(true) => PermissionStatus::Granted,
            _ => PermissionStatus::Denied,
        }
    }

    async fn current_position(&self) -> Result<Coordinates, location::LocationError> {
        let host = self.0.clone();
        match tokio::task::spawn_blocking(move || host.current_position()).await {
            Ok(Some(coords)) => Ok(coords.into()),
            Ok(None) => Err(location::LocationError::Unavailable(
                "host returned no position".into(),
            )),
            Err(e) => Err(location::LocationError::Unavailable(e.to_string())),
        }
    }
}

/// Adapts a [`HostGeocoder`] to [`ReverseGeocoder`].
struct HostReverseGeocoder(Arc<dyn HostGeocoder>);

#[async_trait]
impl ReverseGeocoder for HostReverseGeocoder {
    async fn reverse(&self, coords: Coordinates) -> GeocodeResult<Option<String>> {
        let host = self.0.clone();
        let components =
            tokio::task::spawn_blocking(move || host.reverse_geocode(coords.into()))
                .await
                .map_err(|e| alerta_febre_geo::GeocodeError::Service(e.to_string()))?;

        Ok(components.and_then(|c| AddressComponents::from(c).format()))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a client for the registry at `base_url` (build-time default when
/// `None`). Without a host geocoder, addresses come from Nominatim.
#[uniffi::export]
pub fn open_client(
    base_url: Option<String>,
    location: Arc<dyn HostLocation>,
    geocoder: Option<Arc<dyn HostGeocoder>>,
) -> Result<Arc<AlertaFebreCore>, AlertaFebreError> {
    let mut settings = config::Settings::default();
    if let Some(url) = base_url {
        settings.api.base_url = url;
    }

    let provider = Arc::new(HostLocationProvider(location));
    let intake = match geocoder {
        Some(host) => {
            let store =
                HttpRecordStore::new(&settings.api.base_url, settings.api.timeout())?;
            let locator = LocationResolver::new(
                provider,
                Some(Arc::new(HostReverseGeocoder(host))),
            );
            RecordIntake::new(Arc::new(store), locator, settings.intake)
        }
        None => RecordIntake::from_settings(&settings, provider)?,
    };

    Ok(Arc::new(AlertaFebreCore { intake }))
}

/// Open a client backed by an in-memory store (for testing and demos).
#[uniffi::export]
pub fn open_client_in_memory(location: Arc<dyn HostLocation>) -> Arc<AlertaFebreCore> {
    let locator = LocationResolver::new(Arc::new(HostLocationProvider(location)), None);
    let intake = RecordIntake::new(
        Arc::new(MemoryRecordStore::new()),
        locator,
        IntakePolicy::default(),
    );
    Arc::new(AlertaFebreCore { intake })
}

/// Install a stderr log subscriber. Returns `false` if one was already set.
#[uniffi::export]
pub fn init_logging(level: String) -> bool {
    telemetry::try_init_logging(&level)
}

/// Short `street - city` form of a geocoded address.
#[uniffi::export]
pub fn short_address(endereco: Option<String>) -> String {
    display::short_address(endereco.as_deref())
}

// =========================================================================
// Main API Object
// =========================================================================

/// Intake client exposed to the mobile app.
#[derive(uniffi::Object)]
pub struct AlertaFebreCore {
    intake: RecordIntake,
}

#[uniffi::export]
impl AlertaFebreCore {
    /// Validate form fields without submitting anything.
    pub fn build_record(&self, fields: FfiRecordFields) -> Result<FfiRecord, AlertaFebreError> {
        let record = self.intake.builder().build(&fields.into(), None)?;
        Ok(record.into())
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl AlertaFebreCore {
    /// Validate, locate and create a record.
    pub async fn submit_record(
        &self,
        fields: FfiRecordFields,
    ) -> Result<FfiSubmission, AlertaFebreError> {
        let submission = self.intake.submit(&fields.into()).await?;
        Ok(submission.into())
    }

    /// All records on the registry.
    pub async fn list_records(&self) -> Result<Vec<FfiRecord>, AlertaFebreError> {
        let records = self.intake.list().await?;
        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    /// A single record by id.
    pub async fn get_record(&self, id: String) -> Result<FfiRecord, AlertaFebreError> {
        let record = self.intake.get(&RecordId::new(id)).await?;
        Ok(record.into())
    }

    /// Replace a stored record with edited fields, keeping its location.
    pub async fn update_record(
        &self,
        record: FfiRecord,
        fields: FfiRecordFields,
    ) -> Result<FfiRecord, AlertaFebreError> {
        let record = Record::try_from(record)?;
        let updated = self.intake.edit(&record, &fields.into()).await?;
        Ok(updated.into())
    }

    /// Delete a record by id.
    pub async fn delete_record(&self, id: String) -> Result<(), AlertaFebreError> {
        self.intake.remove(&RecordId::new(id)).await?;
        Ok(())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe coordinates.
#[derive(Debug, Clone, Copy, uniffi::Record)]
pub struct FfiCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<FfiCoordinates> for Coordinates {
    fn from(coords: FfiCoordinates) -> Self {
        Coordinates::new(coords.latitude, coords.longitude)
    }
}

impl From<Coordinates> for FfiCoordinates {
    fn from(coords: Coordinates) -> Self {
        Self {
            latitude: coords.latitude,
            longitude: coords.longitude,
        }
    }
}

/// FFI-safe address components from a platform geocoder.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAddressComponents {
    pub street: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl From<FfiAddressComponents> for AddressComponents {
    fn from(address: FfiAddressComponents) -> Self {
        AddressComponents {
            street: address.street,
            city: address.city,
            region: address.region,
            country: address.country,
        }
    }
}

/// FFI-safe form input.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecordFields {
    pub nome: String,
    pub idade: String,
    pub temperatura: String,
    pub tomou_remedio: Option<String>,
    pub nome_remedio: String,
    pub dosagem: String,
    pub hora: String,
}

impl From<FfiRecordFields> for RecordFields {
    fn from(fields: FfiRecordFields) -> Self {
        RecordFields {
            nome: fields.nome,
            idade: fields.idade,
            temperatura: fields.temperatura,
            tomou_remedio: fields.tomou_remedio,
            nome_remedio: fields.nome_remedio,
            dosagem: fields.dosagem,
            hora: fields.hora,
        }
    }
}

/// FFI-safe medication details.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedication {
    pub nome: String,
    pub dosagem: String,
    pub hora: String,
}

/// FFI-safe location.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub endereco: Option<String>,
    /// Card text: `street - city`, or the coordinates when there is no address
    pub label: String,
}

/// FFI-safe record, in wire shape (flag + optional medication).
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecord {
    pub id: Option<String>,
    pub nome: String,
    pub idade: String,
    pub temperatura: String,
    pub tomou_remedio: String,
    pub remedio: Option<FfiMedication>,
    pub localizacao: Option<FfiLocation>,
}

impl From<Record> for FfiRecord {
    fn from(record: Record) -> Self {
        let (flag, remedio) = record.medicacao.to_wire();
        Self {
            id: record.id.map(|id| id.to_string()),
            nome: record.nome,
            idade: record.idade,
            temperatura: record.temperatura,
            tomou_remedio: flag.to_string(),
            remedio: remedio.map(|m| FfiMedication {
                nome: m.nome,
                dosagem: m.dosagem,
                hora: m.hora,
            }),
            localizacao: record.localizacao.map(|l| FfiLocation {
                label: display::location_label(&l),
                latitude: l.latitude,
                longitude: l.longitude,
                endereco: l.endereco,
            }),
        }
    }
}

impl TryFrom<FfiRecord> for Record {
    type Error = models::WireError;

    fn try_from(record: FfiRecord) -> Result<Self, Self::Error> {
        let remedio = record.remedio.map(|m| MedicationDetails {
            nome: m.nome,
            dosagem: m.dosagem,
            hora: m.hora,
        });

        Ok(Record {
            id: record.id.map(RecordId::new),
            nome: record.nome,
            idade: record.idade,
            temperatura: record.temperatura,
            medicacao: MedicationStatus::from_wire(&record.tomou_remedio, remedio)?,
            localizacao: record.localizacao.map(|l| Localizacao {
                latitude: l.latitude,
                longitude: l.longitude,
                endereco: l.endereco,
            }),
        })
    }
}

/// FFI-safe submission result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSubmission {
    pub record: FfiRecord,
    /// Show the "permission denied" notice
    pub permission_denied: bool,
    /// Permission granted but no position could be read
    pub location_unavailable: bool,
}

impl From<Submission> for FfiSubmission {
    fn from(submission: Submission) -> Self {
        Self {
            permission_denied: submission.location.is_permission_denied(),
            location_unavailable: matches!(
                submission.location,
                LocationOutcome::Unavailable(_)
            ),
            record: submission.record.into(),
        }
    }
}
