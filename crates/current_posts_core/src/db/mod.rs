//! Item store bootstrap.
//!
//! The item store is owned by the host site; this crate only adds the
//! `items` projection schema and reads from it. Schema revisions are stamped
//! into `PRAGMA user_version`, so a store touched by a newer build of this
//! module is detected before any query runs against columns this build does
//! not know about.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failures while opening or migrating the item store.
#[derive(Debug)]
pub enum DbError {
    /// The SQLite engine refused the operation.
    Sqlite(rusqlite::Error),
    /// The store carries a schema revision newer than this build supports.
    ///
    /// The store is left untouched; upgrading this module is the only fix.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "item store unavailable: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "item store was migrated to schema revision {db_version} by a newer build; \
                 this build reads revisions up to {latest_supported} and will not open it"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
