use fridge_core::db::migrations::latest_version;
use fridge_core::db::{open_db, open_db_in_memory, DbError};
use fridge_core::{RepoError, SqliteFridgeRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "fridges");
    assert_table_exists(&conn, "shelves");
    assert_table_exists(&conn, "drawers");
    assert_table_exists(&conn, "fridge_items");
    assert_table_exists(&conn, "preferences");
}

#[test]
fn foreign_keys_are_enabled_on_open() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn reopening_file_database_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fridgemanager.db");

    let first = open_db(&path).unwrap();
    assert_eq!(schema_version(&first), latest_version());
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    assert_table_exists(&second, "fridge_items");
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteFridgeRepository::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}

#[test]
fn item_rows_cannot_hold_both_shelf_and_drawer() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO fridge_items (uuid, product_name, created_at, expiration_date, shelf_uuid, drawer_uuid)
         VALUES ('a', 'Milk', 0, 0, 'shelf', 'drawer');",
        [],
    );
    assert!(result.is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    fridge_core::db::migrations::schema_version(conn).unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1, "missing table {table_name}");
}
