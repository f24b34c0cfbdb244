//! Ordered schema steps for the key-value table.
//!
//! # Invariants
//! - Step versions start at 1 and grow by one.
//! - All pending steps commit together or not at all.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "kv_entries",
    sql: include_str!("0001_init.sql"),
}];

/// Outcome of one `apply_migrations` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub from_version: u32,
    pub to_version: u32,
    /// Names of the steps that ran, oldest first.
    pub applied: Vec<&'static str>,
}

impl MigrationReport {
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Highest schema version this build can write.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Schema version recorded in the database file.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Runs every step newer than the recorded schema version.
///
/// # Errors
/// - `SchemaTooNew` when the file records a version above [`latest_version`].
/// - `Sqlite` when a step fails; nothing is committed in that case.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<MigrationReport> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let mut report = MigrationReport {
        from_version: found,
        to_version: found,
        applied: Vec::new(),
    };

    let tx = conn.transaction()?;
    for step in SCHEMA_STEPS.iter().filter(|step| step.version > found) {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        report.to_version = step.version;
        report.applied.push(step.name);
    }
    tx.commit()?;

    if !report.is_noop() {
        info!(
            "event=db_migrate module=db status=ok from_version={} to_version={} steps={}",
            report.from_version,
            report.to_version,
            report.applied.join(",")
        );
    }
    Ok(report)
}
