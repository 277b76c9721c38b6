//! Ordered schema steps for the inventory store.
//!
//! # Invariants
//! - Step versions start at 1 and increase by one.
//! - All pending steps run in one transaction; `PRAGMA user_version` is bumped
//!   after each step so a failed upgrade leaves the previous version intact.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, Transaction};

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "fridges_locations_items",
        sql: include_str!("0001_init.sql"),
    },
    SchemaStep {
        version: 2,
        name: "preferences",
        sql: include_str!("0002_preferences.sql"),
    },
];

/// Highest schema version this build can write.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Schema version stored in the database header.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Brings `conn` up to [`latest_version`].
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer build.
/// - `Migration` when a step fails; nothing from this call is committed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = schema_version(conn)?;
    let latest = latest_version();
    if from > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: latest,
        });
    }

    let pending = STEPS
        .iter()
        .filter(|step| step.version > from)
        .collect::<Vec<_>>();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        run_step(&tx, step).map_err(|source| DbError::Migration {
            version: step.version,
            source,
        })?;
        info!(
            "event=db_migrate_step module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from} to_version={latest}");
    Ok(())
}

fn run_step(tx: &Transaction<'_>, step: &SchemaStep) -> rusqlite::Result<()> {
    tx.execute_batch(step.sql)?;
    tx.pragma_update(None, "user_version", step.version)
}
