//! Configuration loading
//!
//! The process environment is snapshotted into a [`ConfigService`] once at
//! startup. Typed loaders ([`DatabaseConfig`], [`ServerConfig`]) read from the
//! snapshot, so they can be exercised without touching the real environment.

mod database;
mod server;

pub use database::{DB_HOST, DB_NAME, DB_PASS, DB_PORT, DB_USER, DatabaseConfig};
pub use server::ServerConfig;

use crate::error::{AppError, Result};
use dashmap::DashMap;
use std::env;
use std::sync::Arc;

/// Development connection settings, applied only in debug builds.
pub const DEV_DEFAULTS: [(&str, &str); 5] = [
    (DB_HOST, "127.0.0.1"),
    (DB_PORT, "5432"),
    (DB_USER, "joao"),
    (DB_PASS, "123456789"),
    (DB_NAME, "users"),
];

/// Configuration service
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Snapshot the process environment, after loading `.env` if present.
    ///
    /// Variables already set in the environment win over `.env` entries.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
        }

        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    /// Set `key` only when it has no value yet. Returns whether it was applied.
    pub fn set_default(&self, key: &str, value: &str) -> bool {
        let mut applied = false;
        self.config.entry(key.to_string()).or_insert_with(|| {
            applied = true;
            value.to_string()
        });
        applied
    }

    /// Fetch a mandatory value.
    pub fn require(&self, key: &str) -> Result<String> {
        self.get(key).ok_or_else(|| AppError::missing_config(key))
    }

    /// Fill unset connection keys with [`DEV_DEFAULTS`] in debug builds.
    ///
    /// Release builds leave the snapshot untouched, so a missing key still
    /// fails startup there.
    pub fn with_dev_defaults(self) -> Self {
        if cfg!(debug_assertions) {
            for (key, value) in DEV_DEFAULTS {
                if self.set_default(key, value) {
                    tracing::debug!("{} not set, using development default", key);
                }
            }
        }
        self
    }
}
