//! Request bodies sent either as JSON or as a url-encoded form.

use async_trait::async_trait;
use axum::{
    extract::{Form, FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

/// Body parsed by content type. A missing or unrecognized content type, or a body that does
/// not parse, yields `T::default()`; only an oversized body is rejected.
#[derive(Debug, Clone, Default)]
pub struct JsonOrForm<T>(pub T);

enum BodyKind {
    Json,
    Form,
}

fn body_kind(req: &Request) -> Option<BodyKind> {
    let content_type = req.headers().get(CONTENT_TYPE)?.to_str().ok()?;
    let content_type = content_type.trim_start().to_ascii_lowercase();
    if content_type.starts_with("application/json") {
        Some(BodyKind::Json)
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        Some(BodyKind::Form)
    } else {
        None
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let parsed = match body_kind(&req) {
            Some(BodyKind::Json) => Json::<T>::from_request(req, state)
                .await
                .map(|Json(value)| value)
                .map_err(|e| (e.status(), e.body_text())),
            Some(BodyKind::Form) => Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| value)
                .map_err(|e| (e.status(), e.body_text())),
            None => return Ok(JsonOrForm(T::default())),
        };
        match parsed {
            Ok(value) => Ok(JsonOrForm(value)),
            Err((status, reason)) if status == StatusCode::PAYLOAD_TOO_LARGE => Err((status, reason).into_response()),
            Err((_, reason)) => {
                tracing::debug!(%reason, "unreadable request body, using an empty one");
                Ok(JsonOrForm(T::default()))
            }
        }
    }
}
