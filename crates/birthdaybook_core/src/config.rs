//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database path and logging settings with sane defaults.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never fails; validation happens where values are used
//!   (`init_logging`, `open_db`).

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Database file path override.
pub const DB_PATH_ENV: &str = "BIRTHDAYBOOK_DB_PATH";
/// Log level override (`trace|debug|info|warn|error`).
pub const LOG_LEVEL_ENV: &str = "BIRTHDAYBOOK_LOG_LEVEL";
/// Absolute log directory override.
pub const LOG_DIR_ENV: &str = "BIRTHDAYBOOK_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "birthdaybook.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "birthdaybook-logs";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl CoreConfig {
    /// Resolves settings from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`, so tests need not touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: non_blank(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: non_blank(LOG_LEVEL_ENV)
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: non_blank(LOG_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME)),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn defaults_live_under_temp_dir() {
        let config = CoreConfig::default();
        assert_eq!(
            config.db_path,
            std::env::temp_dir().join("birthdaybook.sqlite3")
        );
        assert_eq!(config.log_level, default_log_level());
        assert!(config.log_dir.starts_with(std::env::temp_dir()));
    }

    #[test]
    fn overrides_are_trimmed_and_blank_values_ignored() {
        let env = HashMap::from([
            (DB_PATH_ENV, " /data/agenda.sqlite3 ".to_string()),
            (LOG_LEVEL_ENV, "warn".to_string()),
            (LOG_DIR_ENV, "   ".to_string()),
        ]);
        let config = CoreConfig::from_lookup(|key| env.get(key).cloned());

        assert_eq!(config.db_path, PathBuf::from("/data/agenda.sqlite3"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, CoreConfig::default().log_dir);
    }
}
