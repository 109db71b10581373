//! Farmers API: role-based login redirect plus CRUD over one farmer record collection,
//! served under two route families (current `/api/farmers` and legacy `/farmers`, `/farmer`).

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod record;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{load_credentials, AppConfig, Credential, CredentialList, Role, StoreBackend};
pub use error::{AppError, ConfigError, StoreError};
pub use record::{FarmerRecord, RecordFields, RecordPatch};
pub use routes::app_router;
pub use service::{Current, FieldMapping, Legacy, RecordService};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryRecordStore, PgRecordStore, RecordStore};
