//! Remote store access.
//!
//! The registry exposes a plain CRUD collection at `/registros`. There is no
//! local cache: every call is a round trip, and callers re-list after
//! mutations to see the new state.

mod http;
mod memory;

pub use http::*;
pub use memory::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Record, RecordId};

/// Collection path on the remote store.
pub const REGISTROS_PATH: &str = "registros";

/// Store errors. Nothing is retried at this layer.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Remote store returned status {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Could not decode store response: {0}")]
    Decode(String),

    #[error("Invalid store configuration: {0}")]
    Config(String),

    #[error("Store lock poisoned: {0}")]
    Poisoned(String),
}

impl StoreError {
    /// HTTP status for `Remote` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub(crate) fn not_found(id: &RecordId) -> Self {
        StoreError::Remote {
            status: 404,
            body: format!("registro {} not found", id),
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            StoreError::Decode(e.to_string())
        } else {
            StoreError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Decode(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        StoreError::Poisoned(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD over the `/registros` collection.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// `GET /registros`
    async fn list(&self) -> StoreResult<Vec<Record>>;

    /// `GET /registros/{id}`
    async fn get(&self, id: &RecordId) -> StoreResult<Record>;

    /// `POST /registros`; the returned record carries the assigned id.
    async fn create(&self, record: &Record) -> StoreResult<Record>;

    /// `PUT /registros/{id}` with the full record.
    async fn update(&self, id: &RecordId, record: &Record) -> StoreResult<Record>;

    /// `DELETE /registros/{id}`
    async fn delete(&self, id: &RecordId) -> StoreResult<()>;
}
