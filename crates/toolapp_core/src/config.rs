//! Process configuration read from the environment.
//!
//! | Variable            | Default                          |
//! |---------------------|----------------------------------|
//! | `TOOLAPP_DB_PATH`   | `<temp_dir>/toolapp.sqlite3`     |
//! | `TOOLAPP_LOG_LEVEL` | [`default_log_level`]            |
//! | `TOOLAPP_LOG_DIR`   | unset, file logging stays off    |
//!
//! Blank values count as unset.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "TOOLAPP_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "TOOLAPP_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "TOOLAPP_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "toolapp.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl CoreConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_ENV),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = CoreConfig::default();
        assert_eq!(config.db_path, std::env::temp_dir().join("toolapp.sqlite3"));
        assert_eq!(config.log_level, default_log_level());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = CoreConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, "/var/lib/toolapp/data.sqlite3"),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, "/var/log/toolapp"),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/var/lib/toolapp/data.sqlite3"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/toolapp"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = CoreConfig::from_lookup(lookup_from(&[(DB_PATH_ENV, "  "), (LOG_DIR_ENV, "")]));
        assert_eq!(config.db_path, std::env::temp_dir().join("toolapp.sqlite3"));
        assert!(config.log_dir.is_none());
    }
}
