//! Fridge item repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over `fridge_items` storage.
//!
//! # Invariants
//! - Write paths call `FridgeItem::validate()` before SQL mutations.
//! - Location is stored as two nullable columns; rows with both set are
//!   rejected as invalid data.
//! - Listing is deterministic: `created_at ASC, rowid ASC`.

use super::{ensure_connection_ready, parse_optional_uuid, parse_uuid, RepoError, RepoResult};
use crate::model::item::{FridgeItem, ItemId, ItemLocation};
use rusqlite::{params, Connection, Row};

const ITEM_SELECT_SQL: &str = "SELECT
    uuid,
    product_name,
    created_at,
    expiration_date,
    shelf_uuid,
    drawer_uuid,
    fridge_uuid,
    image
FROM fridge_items";

/// Repository interface for fridge item CRUD operations.
pub trait ItemRepository {
    fn create_item(&self, item: &FridgeItem) -> RepoResult<ItemId>;
    fn update_item(&self, item: &FridgeItem) -> RepoResult<()>;
    fn get_item(&self, id: ItemId) -> RepoResult<Option<FridgeItem>>;
    fn list_items(&self) -> RepoResult<Vec<FridgeItem>>;
    fn delete_item(&self, id: ItemId) -> RepoResult<()>;
}

/// SQLite-backed item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["fridge_items"])?;
        Ok(Self { conn })
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn create_item(&self, item: &FridgeItem) -> RepoResult<ItemId> {
        item.validate()?;

        self.conn.execute(
            "INSERT INTO fridge_items (
                uuid,
                product_name,
                created_at,
                expiration_date,
                shelf_uuid,
                drawer_uuid,
                fridge_uuid,
                image
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                item.uuid.to_string(),
                item.product_name.as_str(),
                item.created_at,
                item.expiration_date,
                item.location.shelf_id().map(|id| id.to_string()),
                item.location.drawer_id().map(|id| id.to_string()),
                item.fridge_uuid.map(|id| id.to_string()),
                item.image.as_deref(),
            ],
        )?;

        Ok(item.uuid)
    }

    fn update_item(&self, item: &FridgeItem) -> RepoResult<()> {
        item.validate()?;

        let changed = self.conn.execute(
            "UPDATE fridge_items
             SET
                product_name = ?1,
                expiration_date = ?2,
                shelf_uuid = ?3,
                drawer_uuid = ?4,
                fridge_uuid = ?5,
                image = ?6
             WHERE uuid = ?7;",
            params![
                item.product_name.as_str(),
                item.expiration_date,
                item.location.shelf_id().map(|id| id.to_string()),
                item.location.drawer_id().map(|id| id.to_string()),
                item.fridge_uuid.map(|id| id.to_string()),
                item.image.as_deref(),
                item.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(item.uuid));
        }

        Ok(())
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<FridgeItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_item_columns(read_item_columns(row)?)?));
        }

        Ok(None)
    }

    fn list_items(&self) -> RepoResult<Vec<FridgeItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_item_columns(read_item_columns(row)?)?);
        }

        Ok(items)
    }

    fn delete_item(&self, id: ItemId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM fridge_items WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

struct ItemColumns {
    uuid: String,
    product_name: String,
    created_at: i64,
    expiration_date: i64,
    shelf_uuid: Option<String>,
    drawer_uuid: Option<String>,
    fridge_uuid: Option<String>,
    image: Option<Vec<u8>>,
}

fn read_item_columns(row: &Row<'_>) -> RepoResult<ItemColumns> {
    Ok(ItemColumns {
        uuid: row.get("uuid")?,
        product_name: row.get("product_name")?,
        created_at: row.get("created_at")?,
        expiration_date: row.get("expiration_date")?,
        shelf_uuid: row.get("shelf_uuid")?,
        drawer_uuid: row.get("drawer_uuid")?,
        fridge_uuid: row.get("fridge_uuid")?,
        image: row.get("image")?,
    })
}

fn parse_item_columns(columns: ItemColumns) -> RepoResult<FridgeItem> {
    let uuid = parse_uuid(columns.uuid.as_str(), "fridge_items.uuid")?;
    let shelf = parse_optional_uuid(columns.shelf_uuid, "fridge_items.shelf_uuid")?;
    let drawer = parse_optional_uuid(columns.drawer_uuid, "fridge_items.drawer_uuid")?;
    let location = ItemLocation::from_parts(shelf, drawer).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "item `{uuid}` references both a shelf and a drawer"
        ))
    })?;

    let mut item = FridgeItem::with_id(
        uuid,
        columns.product_name,
        columns.created_at,
        columns.expiration_date,
    )?;
    item.location = location;
    item.fridge_uuid = parse_optional_uuid(columns.fridge_uuid, "fridge_items.fridge_uuid")?;
    item.image = columns.image;
    item.validate()?;
    Ok(item)
}
