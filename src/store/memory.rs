//! In-memory record store. Same semantics as the PostgreSQL store; used for tests and local runs.

use super::{parse_id, RecordStore};
use crate::error::StoreError;
use crate::record::{FarmerRecord, RecordFields, RecordPatch, FARMER_ROLE};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<FarmerRecord>>,
    offline: AtomicBool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a lost connection: every operation fails with `Unavailable` while set.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<FarmerRecord>>, StoreError> {
        self.check_online()?;
        self.records
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<FarmerRecord>>, StoreError> {
        self.check_online()?;
        self.records
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(&self, mut fields: RecordFields) -> Result<FarmerRecord, StoreError> {
        fields.role = FARMER_ROLE.to_string();
        let record = FarmerRecord {
            id: Uuid::new_v4(),
            fields,
        };
        self.write()?.push(record.clone());
        Ok(record)
    }

    async fn get_all(&self) -> Result<Vec<FarmerRecord>, StoreError> {
        Ok(self.read()?.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<FarmerRecord, StoreError> {
        let id = parse_id(id)?;
        self.read()?
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_by_id(&self, id: &str, patch: &RecordPatch) -> Result<FarmerRecord, StoreError> {
        let id = parse_id(id)?;
        let mut records = self.write()?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;
        patch.apply(&mut record.fields);
        Ok(record.clone())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let id = parse_id(id)?;
        let mut records = self.write()?;
        let pos = records
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;
        records.remove(pos);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Patch;

    #[tokio::test]
    async fn create_forces_farmer_role_and_assigns_id() {
        let store = MemoryRecordStore::new();
        let fields = RecordFields {
            crop: Some("Cotton".into()),
            role: "admin".into(),
            ..Default::default()
        };
        let created = store.create(fields).await.unwrap();
        assert_eq!(created.fields.role, FARMER_ROLE);
        let fetched = store.get_by_id(&created.id.to_string()).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_all_keeps_insertion_order() {
        let store = MemoryRecordStore::new();
        let a = store.create(RecordFields::default()).await.unwrap();
        let b = store.create(RecordFields::default()).await.unwrap();
        let ids: Vec<Uuid> = store.get_all().await.unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_ids() {
        let store = MemoryRecordStore::new();
        let missing = Uuid::new_v4().to_string();
        let patch = RecordPatch {
            crop: Patch::Set("Maize".into()),
            ..Default::default()
        };
        assert!(matches!(store.update_by_id(&missing, &patch).await, Err(StoreError::NotFound)));
        assert!(matches!(store.delete_by_id(&missing).await, Err(StoreError::NotFound)));
        assert!(matches!(store.get_by_id("nope").await, Err(StoreError::InvalidId(_))));
    }

    #[tokio::test]
    async fn offline_store_fails_every_operation() {
        let store = MemoryRecordStore::new();
        store.set_offline(true);
        assert!(matches!(store.get_all().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));
        store.set_offline(false);
        assert!(store.ping().await.is_ok());
    }
}
