//! Record Store: keyed document storage for farmer records.
//!
//! Two backends share the [`RecordStore`] trait: PostgreSQL JSONB documents and an in-memory list.

mod memory;
mod postgres;

pub use memory::MemoryRecordStore;
pub use postgres::{ensure_database_exists, PgRecordStore, COLLECTION_TABLE};

use crate::error::StoreError;
use crate::record::{FarmerRecord, RecordFields, RecordPatch};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a new record with a fresh id. `role` is forced to `"farmer"`.
    async fn create(&self, fields: RecordFields) -> Result<FarmerRecord, StoreError>;

    /// Every stored record, in insertion order.
    async fn get_all(&self) -> Result<Vec<FarmerRecord>, StoreError>;

    async fn get_by_id(&self, id: &str) -> Result<FarmerRecord, StoreError>;

    /// Replace only the fields named by `patch`; returns the record after the update.
    async fn update_by_id(&self, id: &str, patch: &RecordPatch) -> Result<FarmerRecord, StoreError>;

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;

    /// Round trip to the backing storage.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Parse a path id into the store's id space.
pub fn parse_id(raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw.trim()).map_err(|_| StoreError::InvalidId(raw.to_string()))
}
