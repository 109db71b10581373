//! Record CRUD handlers, generic over the route family.

use crate::error::AppError;
use crate::extractors::JsonOrForm;
use crate::record::FarmerRecord;
use crate::response::{created, message, updated};
use crate::service::FieldMapping;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};

pub async fn list<M: FieldMapping>(State(state): State<AppState>) -> Result<Json<Vec<FarmerRecord>>, AppError> {
    let rows = state.records::<M>().list().await?;
    Ok(Json(rows))
}

pub async fn read<M: FieldMapping>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FarmerRecord>, AppError> {
    let row = state.records::<M>().read(&id).await?;
    Ok(Json(row))
}

pub async fn create<M: FieldMapping>(
    State(state): State<AppState>,
    JsonOrForm(body): JsonOrForm<Map<String, Value>>,
) -> Result<impl IntoResponse, AppError> {
    let row = state.records::<M>().create(body).await?;
    Ok(created(M::MESSAGES.created, M::ENTRY_KEY, row))
}

pub async fn update<M: FieldMapping>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonOrForm(body): JsonOrForm<Map<String, Value>>,
) -> Result<impl IntoResponse, AppError> {
    let row = state.records::<M>().update(&id, body).await?;
    Ok(updated(M::MESSAGES.updated, M::ENTRY_KEY, row))
}

pub async fn delete<M: FieldMapping>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.records::<M>().delete(&id).await?;
    Ok(message(M::MESSAGES.deleted))
}
