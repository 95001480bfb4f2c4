//! On-device SQLite file that backs the key-value store.
//!
//! # Responsibility
//! - Hand out connections whose `kv_store` table is ready for reads/writes.
//! - Bring older task databases up to the schema this build writes.
//!
//! # Invariants
//! - The schema revision lives in `PRAGMA user_version`.
//! - A database written by a newer build is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure to prepare the task database for the key-value store.
#[derive(Debug)]
pub enum DbError {
    /// SQLite refused to open, configure or migrate the file.
    Sqlite(rusqlite::Error),
    /// The file carries a schema revision this build does not know.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "task database unavailable: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "task database uses schema {found}, this build reads up to {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
