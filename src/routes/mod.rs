//! Route assembly.

pub mod common;
pub mod pages;
pub mod records;

pub use common::common_routes;
pub use pages::page_routes;
pub use records::{current_routes, legacy_routes};

use crate::config::AppConfig;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Full application: pages, login, both record families, common routes, and static assets as fallback.
pub fn app_router(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(page_routes(state.clone(), &config.static_dir))
        .merge(current_routes(state.clone()))
        .merge(legacy_routes(state))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
