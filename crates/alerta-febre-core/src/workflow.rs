//! Intake workflow: validate → locate (create only) → persist.
//!
//! Failures are returned to the caller that triggered the action; nothing is
//! retried or committed locally.

use std::sync::Arc;

use thiserror::Error;

use crate::config::Settings;
use crate::intake::{IntakePolicy, RecordBuilder, RecordFields, ValidationError};
use crate::location::{DeniedLocation, LocationOutcome, LocationProvider, LocationResolver};
use crate::models::{Record, RecordId};
use crate::store::{HttpRecordStore, RecordStore, StoreError};
use alerta_febre_geo::{GeocodeError, NominatimGeocoder, ReverseGeocoder};

/// Workflow errors.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Geocoder setup failed: {0}")]
    Geocoder(#[from] GeocodeError),

    #[error("Record has not been created on the remote store")]
    NotStored,
}

pub type IntakeResult<T> = Result<T, IntakeError>;

/// A created record and how its location was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub record: Record,
    pub location: LocationOutcome,
}

impl Submission {
    /// True when the user should be told location access was refused.
    pub fn permission_denied(&self) -> bool {
        self.location.is_permission_denied()
    }
}

/// Coordinates builder, location resolver and store.
#[derive(Clone)]
pub struct RecordIntake {
    builder: RecordBuilder,
    store: Arc<dyn RecordStore>,
    locator: LocationResolver,
}

impl RecordIntake {
    pub fn new(
        store: Arc<dyn RecordStore>,
        locator: LocationResolver,
        policy: IntakePolicy,
    ) -> Self {
        Self {
            builder: RecordBuilder::new(policy),
            store,
            locator,
        }
    }

    /// Wire up the HTTP store and (if enabled) the Nominatim geocoder.
    pub fn from_settings(
        settings: &Settings,
        provider: Arc<dyn LocationProvider>,
    ) -> IntakeResult<Self> {
        let store = HttpRecordStore::new(&settings.api.base_url, settings.api.timeout())?;

        let geocoder: Option<Arc<dyn ReverseGeocoder>> = if settings.geocoder.enabled {
            Some(Arc::new(NominatimGeocoder::new(
                settings.geocoder.base_url.clone(),
                &settings.geocoder.user_agent,
                settings.geocoder.timeout(),
            )?))
        } else {
            None
        };

        Ok(Self::new(
            Arc::new(store),
            LocationResolver::new(provider, geocoder),
            settings.intake,
        ))
    }

    /// Store access only, for reading, editing and deleting. No location
    /// provider or geocoder is set up.
    pub fn without_location(settings: &Settings) -> IntakeResult<Self> {
        let store = HttpRecordStore::new(&settings.api.base_url, settings.api.timeout())?;

        Ok(Self::new(
            Arc::new(store),
            LocationResolver::new(Arc::new(DeniedLocation), None),
            settings.intake,
        ))
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn builder(&self) -> &RecordBuilder {
        &self.builder
    }

    /// Create a new record from form fields.
    ///
    /// Validation runs before any I/O. A denied permission or failed lookup
    /// does not block submission; the record is sent without location.
    pub async fn submit(&self, fields: &RecordFields) -> IntakeResult<Submission> {
        self.builder.validate(fields)?;

        let location = self.locator.resolve().await;
        let draft = self.builder.build(fields, location.location().cloned())?;

        let record = self.store.create(&draft).await?;
        Ok(Submission { record, location })
    }

    /// Replace a stored record with edited fields. The original location is
    /// kept as is.
    pub async fn edit(&self, record: &Record, fields: &RecordFields) -> IntakeResult<Record> {
        let id = record.id.as_ref().ok_or(IntakeError::NotStored)?;
        let updated = self.builder.build(fields, record.localizacao.clone())?;

        Ok(self.store.update(id, &updated).await?)
    }

    pub async fn list(&self) -> IntakeResult<Vec<Record>> {
        Ok(self.store.list().await?)
    }

    pub async fn get(&self, id: &RecordId) -> IntakeResult<Record> {
        Ok(self.store.get(id).await?)
    }

    pub async fn remove(&self, id: &RecordId) -> IntakeResult<()> {
        Ok(self.store.delete(id).await?)
    }
}
