//! Configuration types: runtime settings and the static credential list.

use serde::Deserialize;
use std::path::PathBuf;

/// Role attached to a credential; decides the landing page after login.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Farmer,
    Dealer,
}

impl Role {
    /// Page a successful login is redirected to.
    pub fn landing_path(self) -> &'static str {
        match self {
            Role::Admin | Role::Dealer => "/manage",
            Role::Farmer => "/farmer",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Farmer => "farmer",
            Role::Dealer => "dealer",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl Credential {
    pub fn new(username: &str, password: &str, role: Role) -> Self {
        Credential {
            username: username.to_string(),
            password: password.to_string(),
            role,
        }
    }
}

/// Read-only credential list, fixed at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredentialList(Vec<Credential>);

impl CredentialList {
    pub fn new(credentials: Vec<Credential>) -> Self {
        CredentialList(credentials)
    }

    /// Exact, case-sensitive match on both username and password; first match wins.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&Credential> {
        self.0
            .iter()
            .find(|c| c.username == username && c.password == password)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CredentialList {
    fn default() -> Self {
        CredentialList(vec![
            Credential::new("admin", "pass123", Role::Admin),
            Credential::new("farmer1", "pass123", Role::Farmer),
            Credential::new("farmer2", "pass123", Role::Farmer),
            Credential::new("dealer1", "pass123", Role::Dealer),
            Credential::new("dealer2", "pass123", Role::Dealer),
        ])
    }
}

/// Which record store backs the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(other.to_string()),
        }
    }
}

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_DATABASE_URL: &str = "postgres://127.0.0.1:5432/farmersdb";
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: String,
    /// Schema holding the collection table.
    pub schema: String,
    /// Directory with login.html, farmer.html, manage.html, next.html and other assets.
    pub static_dir: PathBuf,
    /// JSON file with `[{username, password, role}]`; the built-in list is used when unset.
    pub credentials_path: Option<PathBuf>,
    pub body_limit_bytes: usize,
    pub store_backend: StoreBackend,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            database_url: DEFAULT_DATABASE_URL.into(),
            schema: DEFAULT_SCHEMA.into(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            credentials_path: None,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            store_backend: StoreBackend::Postgres,
        }
    }
}
