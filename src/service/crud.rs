//! Generic record CRUD over a [`RecordStore`], parametrized by a route family's [`FieldMapping`].

use crate::error::{AppError, StoreError};
use crate::record::{FarmerRecord, RecordPatch};
use crate::service::mapping::FieldMapping;
use crate::store::RecordStore;
use serde_json::{Map, Value};
use std::marker::PhantomData;
use std::sync::Arc;

pub struct RecordService<M> {
    store: Arc<dyn RecordStore>,
    _mapping: PhantomData<M>,
}

impl<M: FieldMapping> RecordService<M> {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        RecordService {
            store,
            _mapping: PhantomData,
        }
    }

    /// Coerce a request body through the family's schema into a record patch. A value that
    /// cannot be coerced fails like a store write, under the operation's `failed` message.
    pub fn parse_body(body: Map<String, Value>, failed: &'static str) -> Result<RecordPatch, AppError> {
        let parsed: M::Body = serde_json::from_value(Value::Object(body)).map_err(|e| AppError::Storage {
            message: failed,
            source: StoreError::Cast(e.to_string()),
        })?;
        Ok(M::into_patch(parsed))
    }

    pub async fn list(&self) -> Result<Vec<FarmerRecord>, AppError> {
        self.store
            .get_all()
            .await
            .map_err(|e| AppError::from_store(e, M::MESSAGES.read_missing, M::MESSAGES.list_failed))
    }

    pub async fn read(&self, id: &str) -> Result<FarmerRecord, AppError> {
        self.store
            .get_by_id(id)
            .await
            .map_err(|e| AppError::from_store(e, M::MESSAGES.read_missing, M::MESSAGES.read_failed))
    }

    pub async fn create(&self, body: Map<String, Value>) -> Result<FarmerRecord, AppError> {
        let fields = Self::parse_body(body, M::MESSAGES.create_failed)?.into_new_fields();
        let record = self
            .store
            .create(fields)
            .await
            .map_err(|e| AppError::from_store(e, M::MESSAGES.read_missing, M::MESSAGES.create_failed))?;
        tracing::info!(id = %record.id, "record created");
        Ok(record)
    }

    pub async fn update(&self, id: &str, body: Map<String, Value>) -> Result<FarmerRecord, AppError> {
        let patch = Self::parse_body(body, M::MESSAGES.update_failed)?;
        let record = self
            .store
            .update_by_id(id, &patch)
            .await
            .map_err(|e| AppError::from_store(e, M::MESSAGES.update_missing, M::MESSAGES.update_failed))?;
        tracing::info!(id = %record.id, "record updated");
        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.store
            .delete_by_id(id)
            .await
            .map_err(|e| AppError::from_store(e, M::MESSAGES.delete_missing, M::MESSAGES.delete_failed))?;
        tracing::info!(id, "record deleted");
        Ok(())
    }
}
