//! In-process record store (for testing and offline demos).

use std::sync::Mutex;

use async_trait::async_trait;

use super::{RecordStore, StoreError, StoreResult};
use crate::models::{Record, RecordId};

/// [`RecordStore`] held in memory, with the same status semantics as the
/// remote registry (unknown ids are a remote 404).
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<Record>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.records.lock()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list(&self) -> StoreResult<Vec<Record>> {
        Ok(self.records.lock()?.clone())
    }

    async fn get(&self, id: &RecordId) -> StoreResult<Record> {
        self.records
            .lock()?
            .iter()
            .find(|record| record.id.as_ref() == Some(id))
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn create(&self, record: &Record) -> StoreResult<Record> {
        let id = RecordId::new(uuid::Uuid::new_v4().to_string());
        let created = record.without_id().with_id(id);
        self.records.lock()?.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &RecordId, record: &Record) -> StoreResult<Record> {
        let mut records = self.records.lock()?;
        let slot = records
            .iter_mut()
            .find(|stored| stored.id.as_ref() == Some(id))
            .ok_or_else(|| StoreError::not_found(id))?;

        *slot = record.without_id().with_id(id.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: &RecordId) -> StoreResult<()> {
        let mut records = self.records.lock()?;
        let index = records
            .iter()
            .position(|record| record.id.as_ref() == Some(id))
            .ok_or_else(|| StoreError::not_found(id))?;

        records.remove(index);
        Ok(())
    }
}
