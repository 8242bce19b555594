//! Runtime configuration for embedding applications.
//!
//! # Responsibility
//! - Select the entity store backend and logging parameters.
//! - Read overrides from `STAFFDIR_*` environment variables.
//!
//! # Invariants
//! - An unset or blank `STAFFDIR_DB_PATH` selects the in-memory store.
//! - Logging stays off unless a log directory is configured.

use crate::logging::{default_log_level, init_logging, LoggingError};
use crate::repo::memory_store::InMemoryEntityStore;
use crate::repo::sqlite_store::SqliteEntityStore;
use crate::repo::{EntityStore, StoreResult};
use serde::Deserialize;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "STAFFDIR_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "STAFFDIR_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "STAFFDIR_LOG_DIR";

/// Entity store backend selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Memory,
    Sqlite {
        path: PathBuf,
    },
}

/// Core configuration consumed by embedding applications.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub storage: StorageBackend,
    #[serde(default = "default_level_string")]
    pub log_level: String,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            log_level: default_level_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Builds configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let storage = match value(DB_PATH_ENV) {
            Some(path) => StorageBackend::Sqlite {
                path: PathBuf::from(path),
            },
            None => StorageBackend::Memory,
        };

        Self {
            storage,
            log_level: value(LOG_LEVEL_ENV).unwrap_or_else(default_level_string),
            log_dir: value(LOG_DIR_ENV).map(PathBuf::from),
        }
    }

    /// Starts file logging when `log_dir` is set.
    ///
    /// Returns `Ok(false)` when logging is not configured.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        match &self.log_dir {
            Some(dir) => init_logging(&self.log_level, dir).map(|()| true),
            None => Ok(false),
        }
    }

    /// Opens the configured entity store.
    pub fn open_store(&self) -> StoreResult<Box<dyn EntityStore>> {
        open_store(&self.storage)
    }
}

/// Opens an entity store for `backend`.
pub fn open_store(backend: &StorageBackend) -> StoreResult<Box<dyn EntityStore>> {
    match backend {
        StorageBackend::Memory => Ok(Box::new(InMemoryEntityStore::new())),
        StorageBackend::Sqlite { path } => Ok(Box::new(SqliteEntityStore::open(path)?)),
    }
}

fn default_level_string() -> String {
    default_log_level().to_string()
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, StorageBackend, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::repo::EntityStore;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_selects_memory_store_without_logging() {
        let config = CoreConfig::from_lookup(lookup(&[]));
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.init_logging(), Ok(false));
    }

    #[test]
    fn db_path_selects_sqlite_and_blank_values_are_ignored() {
        let config = CoreConfig::from_lookup(lookup(&[
            (DB_PATH_ENV, " /var/lib/staffdir.db "),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, "   "),
        ]));
        assert_eq!(
            config.storage,
            StorageBackend::Sqlite {
                path: PathBuf::from("/var/lib/staffdir.db")
            }
        );
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn deserializes_tagged_storage_backend() {
        let config: CoreConfig = serde_json::from_str(
            r#"{"storage":{"kind":"sqlite","path":"/tmp/staffdir.db"},"log_level":"info"}"#,
        )
        .unwrap();
        assert_eq!(
            config.storage,
            StorageBackend::Sqlite {
                path: PathBuf::from("/tmp/staffdir.db")
            }
        );
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn open_store_builds_a_working_memory_backend() {
        let store = CoreConfig::default().open_store().unwrap();
        assert!(store.list_employees().unwrap().is_empty());
    }
}
