use fridge_core::db::open_db_in_memory;
use fridge_core::{
    AppSettings, Drawer, Fridge, FridgeRepository, FridgeService, FridgeSetup, FridgeType,
    RepoError, RepoResult, ServiceError, SettingsRepository, Shelf, SqliteFridgeRepository,
    SqliteSettingsRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

type SqliteFridgeService<'conn> =
    FridgeService<SqliteFridgeRepository<'conn>, SqliteSettingsRepository<'conn>>;

fn service(conn: &Connection) -> SqliteFridgeService<'_> {
    FridgeService::new(
        SqliteFridgeRepository::try_new(conn).unwrap(),
        SqliteSettingsRepository::try_new(conn).unwrap(),
    )
}

fn setup(name: &str, shelves: u32, drawers: u32) -> FridgeSetup {
    FridgeSetup {
        name: name.to_string(),
        kind: FridgeType::Standard,
        shelf_count: shelves,
        drawer_count: drawers,
    }
}

fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn create_and_get_roundtrip_keeps_locations() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFridgeRepository::try_new(&conn).unwrap();

    let mut fridge = Fridge::new("Kitchen", FridgeType::DoubleDoor);
    fridge.shelves.push(Shelf::new("Bottom", 2));
    fridge.shelves.push(Shelf::new("Top", 1));
    fridge.drawers.push(Drawer::new("Crisper", 1));
    let id = repo.create_fridge(&fridge).unwrap();

    let loaded = repo.get_fridge(id).unwrap().unwrap();
    assert_eq!(loaded.name, "Kitchen");
    assert_eq!(loaded.kind, FridgeType::DoubleDoor);
    let names = loaded
        .shelves
        .iter()
        .map(|shelf| shelf.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Top", "Bottom"]);
    assert_eq!(loaded.drawers.len(), 1);
    assert_eq!(loaded.drawers[0].uuid, fridge.drawers[0].uuid);
}

#[test]
fn get_missing_fridge_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFridgeRepository::try_new(&conn).unwrap();
    assert!(repo.get_fridge(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn list_orders_by_creation_time() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFridgeRepository::try_new(&conn).unwrap();

    let later = Fridge::with_id(Uuid::new_v4(), "Garage", FridgeType::Mini, 2_000).unwrap();
    let earlier = Fridge::with_id(Uuid::new_v4(), "Kitchen", FridgeType::Standard, 1_000).unwrap();
    repo.create_fridge(&later).unwrap();
    repo.create_fridge(&earlier).unwrap();

    let names = repo
        .list_fridges()
        .unwrap()
        .into_iter()
        .map(|fridge| fridge.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Kitchen", "Garage"]);
}

#[test]
fn update_prunes_removed_locations() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFridgeRepository::try_new(&conn).unwrap();

    let mut fridge = Fridge::new("Kitchen", FridgeType::Standard);
    fridge.shelves.push(Shelf::new("Top", 1));
    fridge.shelves.push(Shelf::new("Bottom", 2));
    repo.create_fridge(&fridge).unwrap();

    fridge.shelves.truncate(1);
    fridge.shelves[0].name = "Upper".to_string();
    fridge.drawers.push(Drawer::new("Crisper", 1));
    repo.update_fridge(&fridge).unwrap();

    let loaded = repo.get_fridge(fridge.uuid).unwrap().unwrap();
    assert_eq!(loaded.shelves.len(), 1);
    assert_eq!(loaded.shelves[0].name, "Upper");
    assert_eq!(loaded.drawers.len(), 1);
    assert_eq!(count_rows(&conn, "shelves"), 1);
}

#[test]
fn update_missing_fridge_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFridgeRepository::try_new(&conn).unwrap();

    let fridge = Fridge::new("Ghost", FridgeType::Standard);
    let err = repo.update_fridge(&fridge).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == fridge.uuid));
}

#[test]
fn delete_cascades_to_locations() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFridgeRepository::try_new(&conn).unwrap();

    let mut fridge = Fridge::new("Kitchen", FridgeType::Standard);
    fridge.shelves.push(Shelf::new("Top", 1));
    fridge.drawers.push(Drawer::new("Crisper", 1));
    repo.create_fridge(&fridge).unwrap();

    repo.delete_fridge(fridge.uuid).unwrap();
    assert_eq!(count_rows(&conn, "shelves"), 0);
    assert_eq!(count_rows(&conn, "drawers"), 0);

    let err = repo.delete_fridge(fridge.uuid).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[test]
fn negative_position_is_rejected_before_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFridgeRepository::try_new(&conn).unwrap();

    let mut fridge = Fridge::new("Kitchen", FridgeType::Standard);
    fridge.shelves.push(Shelf::new("Broken", -1));
    let err = repo.create_fridge(&fridge).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(count_rows(&conn, "fridges"), 0);
}

#[test]
fn wizard_creates_numbered_locations_and_completes_first_run() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    assert!(service.settings().unwrap().should_show_wizard());

    let fridge = service.create_fridge(&setup("  Kitchen  ", 3, 2)).unwrap();
    assert_eq!(fridge.name, "Kitchen");
    let shelves = fridge
        .shelves
        .iter()
        .map(|shelf| (shelf.name.as_str(), shelf.position))
        .collect::<Vec<_>>();
    assert_eq!(shelves, vec![("Shelf 1", 1), ("Shelf 2", 2), ("Shelf 3", 3)]);
    assert_eq!(fridge.drawers[1].name, "Drawer 2");

    assert!(!service.settings().unwrap().should_show_wizard());
    assert_eq!(service.list_fridges().unwrap().len(), 1);
}

#[test]
fn wizard_rejects_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service.create_fridge(&setup("   ", 3, 0)).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidName));
    assert!(err.to_string().starts_with("Invalid Input"));
    assert!(service.list_fridges().unwrap().is_empty());
}

#[test]
fn editing_counts_keeps_existing_shelf_ids() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let created = service.create_fridge(&setup("Kitchen", 2, 1)).unwrap();
    let first_shelf = created.shelves[0].uuid;

    let mut edit = FridgeSetup::from_fridge(&created);
    assert_eq!(edit.shelf_count, 2);
    edit.shelf_count = 4;
    edit.drawer_count = 0;
    edit.kind = FridgeType::Smart;
    let updated = service.update_fridge(created.uuid, &edit).unwrap();

    let loaded = service.get_fridge(updated.uuid).unwrap();
    assert_eq!(loaded.kind, FridgeType::Smart);
    assert_eq!(loaded.shelves.len(), 4);
    assert_eq!(loaded.shelves[0].uuid, first_shelf);
    assert_eq!(loaded.shelves[3].name, "Shelf 4");
    assert!(loaded.drawers.is_empty());
}

#[test]
fn deleting_default_fridge_clears_preference() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let kitchen = service.create_fridge(&setup("Kitchen", 1, 0)).unwrap();
    let garage = service.create_fridge(&setup("Garage", 1, 0)).unwrap();
    service.set_default_fridge(kitchen.uuid).unwrap();

    service.delete_fridge(garage.uuid).unwrap();
    assert_eq!(service.settings().unwrap().default_fridge_id, Some(kitchen.uuid));

    service.delete_fridge(kitchen.uuid).unwrap();
    assert_eq!(service.settings().unwrap().default_fridge_id, None);
}

#[test]
fn set_default_requires_existing_fridge() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let missing = Uuid::new_v4();
    let err = service.set_default_fridge(missing).unwrap_err();
    assert!(matches!(err, ServiceError::FridgeNotFound(id) if id == missing));
}

#[test]
fn delete_all_resets_first_run_state() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let kitchen = service.create_fridge(&setup("Kitchen", 1, 0)).unwrap();
    service.create_fridge(&setup("Garage", 1, 0)).unwrap();
    service.set_default_fridge(kitchen.uuid).unwrap();

    assert_eq!(service.delete_all_fridges().unwrap(), 2);
    let settings = SqliteSettingsRepository::try_new(&conn)
        .unwrap()
        .load_settings()
        .unwrap();
    assert!(settings.should_show_wizard());
    assert_eq!(settings.default_fridge_id, None);
    assert_eq!(count_rows(&conn, "shelves"), 0);
}

struct BrokenSettings;

impl SettingsRepository for BrokenSettings {
    fn load_settings(&self) -> RepoResult<AppSettings> {
        Err(RepoError::InvalidData("preferences unavailable".to_string()))
    }

    fn save_settings(&self, _settings: &AppSettings) -> RepoResult<()> {
        Err(RepoError::InvalidData("preferences unavailable".to_string()))
    }
}

#[test]
fn preference_failure_after_fridge_write_does_not_fail_the_call() {
    let conn = open_db_in_memory().unwrap();
    let service = FridgeService::new(
        SqliteFridgeRepository::try_new(&conn).unwrap(),
        BrokenSettings,
    );

    let fridge = service.create_fridge(&setup("Garage", 2, 1)).unwrap();
    assert_eq!(count_rows(&conn, "fridges"), 1);

    service.delete_fridge(fridge.uuid).unwrap();
    assert_eq!(count_rows(&conn, "fridges"), 0);

    service.create_fridge(&setup("Cellar", 1, 0)).unwrap();
    assert_eq!(service.delete_all_fridges().unwrap(), 1);
}

#[test]
fn set_default_still_reports_preference_failure() {
    let conn = open_db_in_memory().unwrap();
    let service = FridgeService::new(
        SqliteFridgeRepository::try_new(&conn).unwrap(),
        BrokenSettings,
    );
    let fridge = service.create_fridge(&setup("Garage", 1, 0)).unwrap();

    let err = service.set_default_fridge(fridge.uuid).unwrap_err();
    assert!(matches!(err, ServiceError::Repo(RepoError::InvalidData(_))));
}
