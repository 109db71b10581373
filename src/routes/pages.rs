//! Static pages and the login form handler.

use crate::handlers::auth::login;
use crate::state::AppState;
use axum::{
    routing::{get_service, post},
    Router,
};
use std::path::Path;
use tower_http::services::ServeFile;

/// Path to file name for the named pages.
pub const PAGES: &[(&str, &str)] = &[
    ("/", "login.html"),
    ("/farmer", "farmer.html"),
    ("/manage", "manage.html"),
    ("/next", "next.html"),
];

/// GET pages from `static_dir` and POST /login.
pub fn page_routes(state: AppState, static_dir: &Path) -> Router {
    let mut router = Router::new().route("/login", post(login));
    for (path, file) in PAGES {
        router = router.route(path, get_service(ServeFile::new(static_dir.join(file))));
    }
    router.with_state(state)
}
