//! Login: check the credential list and redirect by role. No session is issued.

use crate::extractors::JsonOrForm;
use crate::state::AppState;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

/// Missing fields are read as empty strings, which never match a credential.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Returned on a failed login: the browser shows an alert and goes back to the entry page.
pub const INVALID_LOGIN_SCRIPT: &str = r#"
      <script>
        alert('Invalid username or password');
        window.location.href = '/';
      </script>
    "#;

pub async fn login(State(state): State<AppState>, JsonOrForm(form): JsonOrForm<LoginForm>) -> Response {
    match state.credentials.authenticate(&form.username, &form.password) {
        Some(credential) => {
            tracing::info!(username = %credential.username, role = credential.role.as_str(), "login accepted");
            Redirect::to(credential.role.landing_path()).into_response()
        }
        None => {
            tracing::warn!(username = %form.username, "login rejected");
            Html(INVALID_LOGIN_SCRIPT).into_response()
        }
    }
}
