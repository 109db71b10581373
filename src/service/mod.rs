//! RecordService: one CRUD implementation shared by both route families.

mod crud;
pub mod mapping;
pub use crud::RecordService;
pub use mapping::{Current, FieldMapping, Legacy, RouteMessages};
