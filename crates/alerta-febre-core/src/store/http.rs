//! HTTP client for the remote registry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use super::{RecordStore, StoreError, StoreResult, REGISTROS_PATH};
use crate::models::{Record, RecordId};

/// Registry address baked in at build time (`ALERTA_FEBRE_API_URL`).
pub const DEFAULT_API_URL: &str = match option_env!("ALERTA_FEBRE_API_URL") {
    Some(url) => url,
    None => "http://192.168.15.179:3000",
};

/// Per-request timeout budget.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// [`RecordStore`] over JSON/HTTP.
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    base_url: Url,
    client: Client,
}

impl HttpRecordStore {
    /// Create a client for the registry at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> StoreResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StoreError::Config(format!("invalid base URL {:?}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::Config(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, client })
    }

    /// Client for the build-time registry address.
    pub fn with_defaults() -> StoreResult<Self> {
        Self::new(DEFAULT_API_URL, DEFAULT_TIMEOUT)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/registros` or `{base}/registros/{id}`, with the id escaped.
    pub fn url_for(&self, id: Option<&RecordId>) -> StoreResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                StoreError::Config(format!("{} cannot be used as a base URL", self.base_url))
            })?;
            segments.pop_if_empty().push(REGISTROS_PATH);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    /// Send a request and return the body of a successful response.
    async fn send(&self, request: RequestBuilder) -> StoreResult<String> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            // Keep the status even if the body cannot be read.
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %body, "remote store rejected request");
            return Err(StoreError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }

    fn decode<T: DeserializeOwned>(body: &str) -> StoreResult<T> {
        Ok(serde_json::from_str(body)?)
    }
}

/// Decode listed rows one by one. Rows that are not valid records are
/// logged and left out.
fn decode_rows(rows: Vec<serde_json::Value>) -> Vec<Record> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value::<Record>(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed record");
                None
            }
        })
        .collect()
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list(&self) -> StoreResult<Vec<Record>> {
        let url = self.url_for(None)?;
        tracing::debug!(%url, "listing records");

        let body = self.send(self.client.get(url)).await?;
        let rows: Vec<serde_json::Value> = Self::decode(&body)?;
        Ok(decode_rows(rows))
    }

    async fn get(&self, id: &RecordId) -> StoreResult<Record> {
        let url = self.url_for(Some(id))?;
        tracing::debug!(%url, "fetching record");

        let body = self.send(self.client.get(url)).await?;
        let record: Record = Self::decode(&body)?;
        Ok(record.with_id(id.clone()))
    }

    async fn create(&self, record: &Record) -> StoreResult<Record> {
        let url = self.url_for(None)?;
        tracing::debug!(%url, nome = %record.nome, "creating record");

        let body = self
            .send(self.client.post(url).json(&record.without_id()))
            .await?;
        let created: Record = Self::decode(&body)?;

        match &created.id {
            Some(id) => {
                tracing::info!(%id, "record created");
                Ok(created)
            }
            None => Err(StoreError::Decode(
                "created record has no id".to_string(),
            )),
        }
    }

    async fn update(&self, id: &RecordId, record: &Record) -> StoreResult<Record> {
        let url = self.url_for(Some(id))?;
        tracing::debug!(%url, "updating record");

        let body = self
            .send(self.client.put(url).json(&record.without_id()))
            .await?;
        let updated: Record = Self::decode(&body)?;

        tracing::info!(%id, "record updated");
        Ok(updated.with_id(id.clone()))
    }

    async fn delete(&self, id: &RecordId) -> StoreResult<()> {
        let url = self.url_for(Some(id))?;
        tracing::debug!(%url, "deleting record");

        self.send(self.client.delete(url)).await?;

        tracing::info!(%id, "record deleted");
        Ok(())
    }
}
