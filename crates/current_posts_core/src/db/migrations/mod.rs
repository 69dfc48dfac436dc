//! Schema revisions of the `items` projection.
//!
//! Revision numbers start at 1 and grow by one. A fresh store is at revision
//! 0; every pending revision is applied inside one transaction so a failed
//! upgrade leaves the store at its previous revision.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// `(revision, sql)` pairs in application order.
const SCHEMA_REVISIONS: &[(u32, &str)] = &[(1, include_str!("0001_items.sql"))];

/// Highest schema revision this build can read.
pub fn latest_version() -> u32 {
    SCHEMA_REVISIONS.last().map_or(0, |&(revision, _)| revision)
}

/// Brings the item store up to [`latest_version`].
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the store is ahead of this build.
/// - `Sqlite` when a revision fails; nothing from this call is kept.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let stored: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();

    if stored > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: stored,
            latest_supported: latest,
        });
    }

    let pending: Vec<_> = SCHEMA_REVISIONS
        .iter()
        .filter(|&&(revision, _)| revision > stored)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for &&(revision, sql) in &pending {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", revision)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={stored} to_version={latest} applied={}",
        pending.len()
    );
    Ok(())
}
