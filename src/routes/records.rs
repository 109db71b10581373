//! Record CRUD routes for both families over the same collection.
//!
//! None of these routes check the login step: any caller may read or change records.

use crate::handlers::records::{create, delete, list, read, update};
use crate::service::{Current, Legacy};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Current family: /api/farmers and /api/farmers/:id.
pub fn current_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/farmers", get(list::<Current>).post(create::<Current>))
        .route(
            "/api/farmers/:id",
            get(read::<Current>).put(update::<Current>).delete(delete::<Current>),
        )
        .with_state(state)
}

/// Legacy family: GET /farmers, POST /farmer, and /farmer/:id.
/// `GET /farmer` itself is the farmer page, mounted by the page routes.
pub fn legacy_routes(state: AppState) -> Router {
    Router::new()
        .route("/farmers", get(list::<Legacy>))
        .route("/farmer", post(create::<Legacy>))
        .route(
            "/farmer/:id",
            get(read::<Legacy>).put(update::<Legacy>).delete(delete::<Legacy>),
        )
        .with_state(state)
}
