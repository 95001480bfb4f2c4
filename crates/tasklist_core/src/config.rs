//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Resolve where the task database lives and how logging is set up.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never fails; every setting has a default.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Overrides the SQLite file backing the key-value store.
pub const DB_PATH_ENV: &str = "TASKLIST_DB_PATH";
/// Overrides the log level (`trace|debug|info|warn|error`).
pub const LOG_LEVEL_ENV: &str = "TASKLIST_LOG_LEVEL";
/// Absolute directory for rolling log files.
pub const LOG_DIR_ENV: &str = "TASKLIST_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "tasklist.sqlite3";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// `None` leaves file logging disabled.
    pub log_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, so tests need not touch the real environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }
}
