//! Request extractors.

pub mod body;
pub use body::JsonOrForm;
