//! Shared application state for all routes. Built once at startup and injected into the router.

use crate::config::CredentialList;
use crate::service::{FieldMapping, RecordService};
use crate::store::RecordStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Process-wide record store; there is no reconnect beyond what the backend does itself.
    pub store: Arc<dyn RecordStore>,
    pub credentials: Arc<CredentialList>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, credentials: CredentialList) -> Self {
        AppState {
            store,
            credentials: Arc::new(credentials),
        }
    }

    /// Record service speaking route family `M`.
    pub fn records<M: FieldMapping>(&self) -> RecordService<M> {
        RecordService::new(self.store.clone())
    }
}
