//! Load settings from the environment (after `.env`) and credentials from an optional JSON file.

use crate::config::types::{AppConfig, Credential, CredentialList, StoreBackend};
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

impl AppConfig {
    /// Read settings from process env. Unset keys keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = AppConfig::default();
        if let Some(v) = get("BIND_ADDR") {
            config.bind_addr = v;
        }
        if let Some(v) = get("DATABASE_URL") {
            config.database_url = v;
        }
        if let Some(v) = get("FARMERS_SCHEMA") {
            config.schema = v;
        }
        if let Some(v) = get("STATIC_DIR") {
            config.static_dir = PathBuf::from(v);
        }
        config.credentials_path = get("CREDENTIALS_PATH").map(PathBuf::from);
        if let Some(v) = get("BODY_LIMIT_BYTES") {
            config.body_limit_bytes = v.parse().map_err(|_| ConfigError::Invalid {
                key: "BODY_LIMIT_BYTES",
                value: v.clone(),
            })?;
        }
        if let Some(v) = get("STORE_BACKEND") {
            config.store_backend = v.parse::<StoreBackend>().map_err(|value| ConfigError::Invalid {
                key: "STORE_BACKEND",
                value,
            })?;
        }
        Ok(config)
    }
}

/// Load the credential list from `path`, or the built-in list when `path` is `None`.
pub fn load_credentials(path: Option<&Path>) -> Result<CredentialList, ConfigError> {
    let Some(path) = path else {
        return Ok(CredentialList::default());
    };
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::CredentialsRead {
        path: path.to_path_buf(),
        source,
    })?;
    let credentials: Vec<Credential> =
        serde_json::from_str(&raw).map_err(|source| ConfigError::CredentialsParse {
            path: path.to_path_buf(),
            source,
        })?;
    if credentials.is_empty() {
        return Err(ConfigError::NoCredentials(path.to_path_buf()));
    }
    Ok(CredentialList::new(credentials))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Role;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_env_is_empty() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.schema, "public");
        assert_eq!(config.store_backend, StoreBackend::Postgres);
        assert!(config.credentials_path.is_none());
    }

    #[test]
    fn env_values_override_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("STORE_BACKEND", "Memory"),
            ("BODY_LIMIT_BYTES", "2048"),
            ("FARMERS_SCHEMA", " "),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.body_limit_bytes, 2048);
        assert_eq!(config.schema, "public");
    }

    #[test]
    fn bad_values_are_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("STORE_BACKEND", "mongo")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "STORE_BACKEND", .. }));
        let err = AppConfig::from_lookup(lookup_from(&[("BODY_LIMIT_BYTES", "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "BODY_LIMIT_BYTES", .. }));
    }

    #[test]
    fn built_in_credentials_are_used_without_a_file() {
        let list = load_credentials(None).unwrap();
        assert_eq!(list.len(), 5);
        assert_eq!(list.authenticate("dealer2", "pass123").map(|c| c.role), Some(Role::Dealer));
        assert!(list.authenticate("Admin", "pass123").is_none());
    }

    #[test]
    fn credentials_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"username":"ravi","password":"s3cret","role":"farmer"}}]"#).unwrap();
        let list = load_credentials(Some(file.path())).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.authenticate("ravi", "s3cret").map(|c| c.role), Some(Role::Farmer));
    }

    #[test]
    fn empty_or_malformed_credential_files_fail() {
        let mut empty = tempfile::NamedTempFile::new().unwrap();
        write!(empty, "[]").unwrap();
        assert!(matches!(load_credentials(Some(empty.path())), Err(ConfigError::NoCredentials(_))));

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        write!(bad, r#"[{{"username":"x","password":"y","role":"owner"}}]"#).unwrap();
        assert!(matches!(load_credentials(Some(bad.path())), Err(ConfigError::CredentialsParse { .. })));
    }
}
