//! HTTP handlers for login and record CRUD.

pub mod auth;
pub mod records;
