//! Schema revisions of the task database.
//!
//! Revision `n` is `SCHEMA_STEPS[n - 1]`; steps are only ever appended.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const SCHEMA_STEPS: &[&str] = &[include_str!("0001_kv_store.sql")];

/// Schema revision this build writes.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.len() as u32
}

/// Runs every step the database has not seen yet, in one transaction.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }
    if found == supported {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (revision, sql) in (1..).zip(SCHEMA_STEPS).skip(found as usize) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", revision)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={found} to_version={supported}");
    Ok(())
}
