//! Runtime configuration for core callers.
//!
//! # Responsibility
//! - Resolve database location and logging settings with sane defaults.
//! - Allow overrides through `WORDKEEPER_*` environment variables.
//!
//! # Invariants
//! - Blank override values are ignored, never applied.
//! - Resolution never fails; invalid log settings surface in `init_logging`.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Database file name used when no path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "wordkeeper.db";

pub const DB_PATH_ENV: &str = "WORDKEEPER_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "WORDKEEPER_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "WORDKEEPER_LOG_DIR";

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Directory for rolling log files. Logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Builds config from defaults plus process environment overrides.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds config from defaults plus overrides returned by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        if let Some(dir) = read(LOG_DIR_ENV) {
            config.log_dir = Some(PathBuf::from(dir));
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DB_PATH_ENV, DEFAULT_DB_FILE_NAME, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn defaults_point_at_temp_dir_database() {
        let config = CoreConfig::from_lookup(|_| None);
        assert!(config.db_path.ends_with(DEFAULT_DB_FILE_NAME));
        assert!(config.log_dir.is_none());
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn overrides_apply_and_blank_values_are_ignored() {
        let env = HashMap::from([
            (DB_PATH_ENV, "/data/words.db"),
            (LOG_LEVEL_ENV, "  warn "),
            (LOG_DIR_ENV, "   "),
        ]);
        let config = CoreConfig::from_lookup(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.db_path, PathBuf::from("/data/words.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }
}
