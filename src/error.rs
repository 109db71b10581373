//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Startup configuration failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("credentials file {}: {source}", path.display())]
    CredentialsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("credentials file {}: {source}", path.display())]
    CredentialsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("credentials file {} holds no credentials", .0.display())]
    NoCredentials(PathBuf),
}

/// Failures raised by a record store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("invalid id '{0}'")]
    InvalidId(String),
    #[error("cast failed: {0}")]
    Cast(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by the HTTP handlers. Messages are per route family.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{message}: {source}")]
    Storage {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Split a store failure into a 404 (record missing) or a 500 carrying the raw cause.
    pub fn from_store(err: StoreError, not_found: &'static str, failed: &'static str) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound(not_found),
            source => AppError::Storage { message: failed, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::NotFound(message) => ErrorBody {
                message: message.to_string(),
                error: None,
            },
            AppError::Storage { message, source } => {
                tracing::error!(error = %source, "{}", message);
                ErrorBody {
                    message: message.to_string(),
                    error: Some(source.to_string()),
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_store_error_maps_to_404() {
        let err = AppError::from_store(StoreError::NotFound, "Farmer not found", "Error retrieving farmer");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Farmer not found");
    }

    #[test]
    fn other_store_errors_map_to_500_with_cause() {
        let err = AppError::from_store(
            StoreError::Unavailable("connection refused".into()),
            "Farmer not found",
            "Error retrieving farmer",
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Error retrieving farmer: storage unavailable: connection refused"
        );
    }

    #[test]
    fn invalid_id_is_reported_as_storage_failure() {
        let err = AppError::from_store(
            StoreError::InvalidId("abc".into()),
            "Crop not found",
            "Error fetching crop",
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
