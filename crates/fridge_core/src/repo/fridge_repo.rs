//! Fridge repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the fridge aggregate (fridge row plus owned shelves/drawers).
//! - Keep SQL details and ordering behavior inside repository boundary.
//!
//! # Invariants
//! - Fridge listing is deterministic: `created_at ASC, rowid ASC`.
//! - Shelves/drawers are listed `position ASC, rowid ASC`.
//! - Deleting a fridge cascades to its shelves/drawers; item rows are never
//!   touched, so their location references may dangle.

use super::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use crate::model::fridge::{Drawer, Fridge, FridgeId, FridgeType, Shelf};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

const FRIDGE_SELECT_SQL: &str = "SELECT uuid, name, type, created_at FROM fridges";

/// Repository interface for fridge aggregate operations.
pub trait FridgeRepository {
    /// Inserts one fridge together with its shelves and drawers.
    fn create_fridge(&self, fridge: &Fridge) -> RepoResult<FridgeId>;
    /// Replaces fridge fields and reconciles owned shelves/drawers by id.
    fn update_fridge(&self, fridge: &Fridge) -> RepoResult<()>;
    /// Loads one fridge with its locations.
    fn get_fridge(&self, id: FridgeId) -> RepoResult<Option<Fridge>>;
    /// Lists all fridges with their locations.
    fn list_fridges(&self) -> RepoResult<Vec<Fridge>>;
    /// Deletes one fridge and, by cascade, its locations.
    fn delete_fridge(&self, id: FridgeId) -> RepoResult<()>;
    /// Deletes every fridge. Returns the number of removed fridges.
    fn delete_all_fridges(&self) -> RepoResult<usize>;
}

/// SQLite-backed fridge repository.
pub struct SqliteFridgeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFridgeRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["fridges", "shelves", "drawers"])?;
        Ok(Self { conn })
    }
}

impl FridgeRepository for SqliteFridgeRepository<'_> {
    fn create_fridge(&self, fridge: &Fridge) -> RepoResult<FridgeId> {
        fridge.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO fridges (uuid, name, type, created_at) VALUES (?1, ?2, ?3, ?4);",
            params![
                fridge.uuid.to_string(),
                fridge.name.as_str(),
                fridge.kind.label(),
                fridge.created_at,
            ],
        )?;
        write_locations(&tx, fridge)?;
        tx.commit()?;

        Ok(fridge.uuid)
    }

    fn update_fridge(&self, fridge: &Fridge) -> RepoResult<()> {
        fridge.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE fridges SET name = ?2, type = ?3 WHERE uuid = ?1;",
            params![fridge.uuid.to_string(), fridge.name.as_str(), fridge.kind.label()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(fridge.uuid));
        }

        let keep_shelves: HashSet<Uuid> = fridge.shelves.iter().map(|shelf| shelf.uuid).collect();
        prune_locations(&tx, LocationTable::Shelves, fridge.uuid, &keep_shelves)?;
        let keep_drawers: HashSet<Uuid> = fridge.drawers.iter().map(|drawer| drawer.uuid).collect();
        prune_locations(&tx, LocationTable::Drawers, fridge.uuid, &keep_drawers)?;
        write_locations(&tx, fridge)?;

        tx.commit()?;
        Ok(())
    }

    fn get_fridge(&self, id: FridgeId) -> RepoResult<Option<Fridge>> {
        let fridge = self
            .conn
            .query_row(
                &format!("{FRIDGE_SELECT_SQL} WHERE uuid = ?1;"),
                [id.to_string()],
                read_fridge_columns,
            )
            .optional()?;

        let Some(columns) = fridge else {
            return Ok(None);
        };
        let mut fridge = parse_fridge_columns(columns)?;
        fridge.shelves = list_shelves(self.conn, Some(id))?
            .remove(&id)
            .unwrap_or_default();
        fridge.drawers = list_drawers(self.conn, Some(id))?
            .remove(&id)
            .unwrap_or_default();
        Ok(Some(fridge))
    }

    fn list_fridges(&self) -> RepoResult<Vec<Fridge>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FRIDGE_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"))?;
        let rows = stmt.query_map([], read_fridge_columns)?;

        let mut shelves = list_shelves(self.conn, None)?;
        let mut drawers = list_drawers(self.conn, None)?;
        let mut fridges = Vec::new();
        for row in rows {
            let mut fridge = parse_fridge_columns(row?)?;
            fridge.shelves = shelves.remove(&fridge.uuid).unwrap_or_default();
            fridge.drawers = drawers.remove(&fridge.uuid).unwrap_or_default();
            fridges.push(fridge);
        }
        Ok(fridges)
    }

    fn delete_fridge(&self, id: FridgeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM fridges WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete_all_fridges(&self) -> RepoResult<usize> {
        let removed = self.conn.execute("DELETE FROM fridges;", [])?;
        Ok(removed)
    }
}

#[derive(Debug, Clone, Copy)]
enum LocationTable {
    Shelves,
    Drawers,
}

impl LocationTable {
    fn name(self) -> &'static str {
        match self {
            Self::Shelves => "shelves",
            Self::Drawers => "drawers",
        }
    }
}

type FridgeColumns = (String, String, String, i64);

fn read_fridge_columns(row: &Row<'_>) -> rusqlite::Result<FridgeColumns> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn parse_fridge_columns((uuid, name, kind, created_at): FridgeColumns) -> RepoResult<Fridge> {
    let uuid = parse_uuid(uuid.as_str(), "fridges.uuid")?;
    Ok(Fridge::with_id(uuid, name, FridgeType::from_label(kind.as_str()), created_at)?)
}

fn write_locations(tx: &Transaction<'_>, fridge: &Fridge) -> RepoResult<()> {
    for shelf in &fridge.shelves {
        upsert_location(
            tx,
            LocationTable::Shelves,
            fridge.uuid,
            shelf.uuid,
            &shelf.name,
            shelf.position,
        )?;
    }
    for drawer in &fridge.drawers {
        upsert_location(
            tx,
            LocationTable::Drawers,
            fridge.uuid,
            drawer.uuid,
            &drawer.name,
            drawer.position,
        )?;
    }
    Ok(())
}

fn upsert_location(
    tx: &Transaction<'_>,
    table: LocationTable,
    fridge_uuid: FridgeId,
    uuid: Uuid,
    name: &str,
    position: i64,
) -> RepoResult<()> {
    tx.execute(
        &format!(
            "INSERT INTO {} (uuid, fridge_uuid, name, position)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(uuid) DO UPDATE SET
                name = excluded.name,
                position = excluded.position
             WHERE fridge_uuid = excluded.fridge_uuid;",
            table.name()
        ),
        params![uuid.to_string(), fridge_uuid.to_string(), name, position],
    )?;
    Ok(())
}

fn prune_locations(
    tx: &Transaction<'_>,
    table: LocationTable,
    fridge_uuid: FridgeId,
    keep: &HashSet<Uuid>,
) -> RepoResult<()> {
    let existing = {
        let mut stmt = tx.prepare(&format!(
            "SELECT uuid FROM {} WHERE fridge_uuid = ?1;",
            table.name()
        ))?;
        let rows = stmt.query_map([fridge_uuid.to_string()], |row| row.get::<_, String>(0))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()?
    };

    for raw in existing {
        let uuid = parse_uuid(raw.as_str(), table.name())?;
        if !keep.contains(&uuid) {
            tx.execute(
                &format!("DELETE FROM {} WHERE uuid = ?1;", table.name()),
                [raw],
            )?;
        }
    }
    Ok(())
}

/// Loads `(fridge_uuid, uuid, name, position)` rows grouped by owner.
fn list_location_rows(
    conn: &Connection,
    table: LocationTable,
    fridge_uuid: Option<FridgeId>,
) -> RepoResult<HashMap<FridgeId, Vec<(Uuid, String, i64)>>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT fridge_uuid, uuid, name, position
         FROM {}
         WHERE (?1 IS NULL OR fridge_uuid = ?1)
         ORDER BY position ASC, rowid ASC;",
        table.name()
    ))?;
    let rows = stmt.query_map([fridge_uuid.map(|id| id.to_string())], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, i64>(3)?,
        ))
    })?;

    let mut grouped: HashMap<FridgeId, Vec<(Uuid, String, i64)>> = HashMap::new();
    for row in rows {
        let (owner, uuid, name, position) = row?;
        let owner = parse_uuid(owner.as_str(), "fridge_uuid")?;
        let uuid = parse_uuid(uuid.as_str(), table.name())?;
        grouped.entry(owner).or_default().push((uuid, name, position));
    }
    Ok(grouped)
}

fn list_shelves(
    conn: &Connection,
    fridge_uuid: Option<FridgeId>,
) -> RepoResult<HashMap<FridgeId, Vec<Shelf>>> {
    Ok(list_location_rows(conn, LocationTable::Shelves, fridge_uuid)?
        .into_iter()
        .map(|(owner, rows)| {
            let shelves = rows
                .into_iter()
                .map(|(uuid, name, position)| Shelf {
                    uuid,
                    name,
                    position,
                })
                .collect();
            (owner, shelves)
        })
        .collect())
}

fn list_drawers(
    conn: &Connection,
    fridge_uuid: Option<FridgeId>,
) -> RepoResult<HashMap<FridgeId, Vec<Drawer>>> {
    Ok(list_location_rows(conn, LocationTable::Drawers, fridge_uuid)?
        .into_iter()
        .map(|(owner, rows)| {
            let drawers = rows
                .into_iter()
                .map(|(uuid, name, position)| Drawer {
                    uuid,
                    name,
                    position,
                })
                .collect();
            (owner, drawers)
        })
        .collect())
}
