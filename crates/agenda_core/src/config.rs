//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database and logging settings for hosts (FFI, CLI).
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never fails; invalid values surface when they are used.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "AGENDA_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "AGENDA_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "AGENDA_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "agenda.sqlite3";

/// Host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaConfig {
    /// SQLite file backing the contact slot.
    pub db_path: PathBuf,
    /// Log level name, validated by `init_logging`.
    pub log_level: String,
    /// Directory for rolling log files. Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl AgendaConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: non_blank(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            log_level: non_blank(LOG_LEVEL_ENV)
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: non_blank(LOG_DIR_ENV).map(PathBuf::from),
        }
    }
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Default database location in the system temp directory.
pub fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{default_db_path, AgendaConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn defaults_apply_when_variables_are_missing_or_blank() {
        let env = HashMap::from([(DB_PATH_ENV, "   ")]);
        let config = AgendaConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.db_path, default_db_path());
        assert_eq!(config.log_dir, None);
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn variables_override_defaults() {
        let env = HashMap::from([
            (DB_PATH_ENV, "/data/contacts.db"),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, "/var/log/agenda"),
        ]);
        let config = AgendaConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.db_path, PathBuf::from("/data/contacts.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/agenda")));
    }
}
