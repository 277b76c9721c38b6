//! Connection bootstrap for the inventory store.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` so shelf/drawer rows cascade
//!   with their fridge.
//! - Returned connections wait up to 5s on a locked file.
//! - Returned connections are at the latest schema version.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy)]
enum StoreKind {
    File,
    Memory,
}

impl StoreKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Memory => "memory",
        }
    }
}

/// Opens (creating if needed) an inventory database file.
///
/// Emits `db_open` events with status and duration.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_store(StoreKind::File, || Connection::open(path))
}

/// Opens a private in-memory inventory database.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_store(StoreKind::Memory, Connection::open_in_memory)
}

fn open_store(
    kind: StoreKind,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started = Instant::now();
    let result = connect()
        .map_err(Into::into)
        .and_then(|mut conn| prepare(&mut conn).map(|()| conn));

    let elapsed = started.elapsed().as_millis();
    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={} duration_ms={elapsed}",
            kind.as_str()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={} duration_ms={elapsed} error={err}",
            kind.as_str()
        ),
    }
    result
}

fn prepare(conn: &mut Connection) -> DbResult<()> {
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)
}
