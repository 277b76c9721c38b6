use fridge_core::db::open_db_in_memory;
use fridge_core::{
    Fridge, FridgeItem, FridgeRepository, FridgeService, FridgeSetup, FridgeType, ItemDraft,
    ItemLocation, ItemRepository, ItemService, LocationKind, LocationSelection, RepoError,
    ServiceError, Shelf, SqliteFridgeRepository, SqliteItemRepository, SqliteSettingsRepository,
    MILLIS_PER_DAY,
};
use rusqlite::Connection;
use uuid::Uuid;

const NOW: i64 = 1_771_489_800_000;

type SqliteItemService<'conn> = ItemService<
    SqliteItemRepository<'conn>,
    SqliteFridgeRepository<'conn>,
    SqliteSettingsRepository<'conn>,
>;

fn item_service(conn: &Connection) -> SqliteItemService<'_> {
    ItemService::new(
        SqliteItemRepository::try_new(conn).unwrap(),
        SqliteFridgeRepository::try_new(conn).unwrap(),
        SqliteSettingsRepository::try_new(conn).unwrap(),
    )
}

fn create_fridge(conn: &Connection, name: &str, shelves: u32, drawers: u32) -> Fridge {
    let service = FridgeService::new(
        SqliteFridgeRepository::try_new(conn).unwrap(),
        SqliteSettingsRepository::try_new(conn).unwrap(),
    );
    service
        .create_fridge(&FridgeSetup {
            name: name.to_string(),
            kind: FridgeType::Standard,
            shelf_count: shelves,
            drawer_count: drawers,
        })
        .unwrap()
}

#[test]
fn repo_roundtrip_preserves_location_and_image() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let shelf_id = Uuid::new_v4();
    let mut item = FridgeItem::with_id(Uuid::new_v4(), "Milk", NOW, NOW + MILLIS_PER_DAY).unwrap();
    item.assign_shelf(shelf_id);
    item.image = Some(vec![0xFF, 0xD8, 0xFF]);
    repo.create_item(&item).unwrap();

    let loaded = repo.get_item(item.uuid).unwrap().unwrap();
    assert_eq!(loaded, item);
    assert_eq!(loaded.location, ItemLocation::Shelf(shelf_id));
}

#[test]
fn repo_update_moves_item_to_drawer() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let mut item = FridgeItem::with_id(Uuid::new_v4(), "Carrots", NOW, NOW).unwrap();
    item.assign_shelf(Uuid::new_v4());
    repo.create_item(&item).unwrap();

    let drawer_id = Uuid::new_v4();
    item.assign_drawer(drawer_id);
    repo.update_item(&item).unwrap();

    let loaded = repo.get_item(item.uuid).unwrap().unwrap();
    assert_eq!(loaded.location, ItemLocation::Drawer(drawer_id));
}

#[test]
fn repo_lists_in_creation_order_and_deletes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let second = FridgeItem::with_id(Uuid::new_v4(), "Jam", NOW + 10, NOW).unwrap();
    let first = FridgeItem::with_id(Uuid::new_v4(), "Eggs", NOW, NOW).unwrap();
    repo.create_item(&second).unwrap();
    repo.create_item(&first).unwrap();

    let names = repo
        .list_items()
        .unwrap()
        .into_iter()
        .map(|item| item.product_name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Eggs", "Jam"]);

    repo.delete_item(first.uuid).unwrap();
    assert!(repo.get_item(first.uuid).unwrap().is_none());
    let err = repo.delete_item(first.uuid).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == first.uuid));
}

#[test]
fn repo_rejects_row_with_malformed_uuid() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO fridge_items (uuid, product_name, created_at, expiration_date)
         VALUES ('not-a-uuid', 'Milk', 0, 0);",
        [],
    )
    .unwrap();

    let repo = SqliteItemRepository::try_new(&conn).unwrap();
    let err = repo.list_items().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn add_item_defaults_expiration_and_default_fridge() {
    let conn = open_db_in_memory().unwrap();
    let fridge = create_fridge(&conn, "Kitchen", 2, 0);
    FridgeService::new(
        SqliteFridgeRepository::try_new(&conn).unwrap(),
        SqliteSettingsRepository::try_new(&conn).unwrap(),
    )
    .set_default_fridge(fridge.uuid)
    .unwrap();

    let service = item_service(&conn);
    let mut draft = ItemDraft::new("  Butter ");
    draft.selection = LocationSelection {
        kind: LocationKind::Shelf,
        ..LocationSelection::default()
    };
    let item = service.add_item(&draft, NOW).unwrap();

    assert_eq!(item.product_name, "Butter");
    assert_eq!(item.created_at, NOW);
    assert_eq!(item.expiration_date, NOW + 7 * MILLIS_PER_DAY);
    assert_eq!(item.fridge_uuid, Some(fridge.uuid));
    assert_eq!(item.location, ItemLocation::Shelf(fridge.shelves[0].uuid));

    let stored = service.get_item(item.uuid).unwrap();
    assert_eq!(stored, item);
}

#[test]
fn add_item_without_fridges_is_unassigned() {
    let conn = open_db_in_memory().unwrap();
    let service = item_service(&conn);

    let mut draft = ItemDraft::new("Yogurt");
    draft.expiration_date = Some(NOW + MILLIS_PER_DAY);
    draft.selection = LocationSelection::shelf(Uuid::new_v4(), Uuid::new_v4());
    let item = service.add_item(&draft, NOW).unwrap();

    assert_eq!(item.location, ItemLocation::Unassigned);
    assert_eq!(item.fridge_uuid, None);
    assert_eq!(item.expiration_date, NOW + MILLIS_PER_DAY);
}

#[test]
fn add_item_rejects_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let service = item_service(&conn);

    let err = service.add_item(&ItemDraft::new(" \t"), NOW).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidName));
    assert!(service.load_snapshot().unwrap().items().is_empty());
}

#[test]
fn edit_item_applies_drawer_selection_and_keeps_photo() {
    let conn = open_db_in_memory().unwrap();
    let fridge = create_fridge(&conn, "Kitchen", 1, 2);
    let service = item_service(&conn);

    let mut draft = ItemDraft::new("Carrots");
    draft.image = Some(vec![1, 2, 3]);
    draft.selection = LocationSelection::shelf(fridge.uuid, fridge.shelves[0].uuid);
    let item = service.add_item(&draft, NOW).unwrap();

    let mut edit = ItemDraft::new("Baby carrots");
    edit.selection = LocationSelection::drawer(fridge.uuid, fridge.drawers[1].uuid);
    let edited = service.edit_item(item.uuid, &edit).unwrap();

    assert_eq!(edited.product_name, "Baby carrots");
    assert_eq!(edited.expiration_date, item.expiration_date);
    assert_eq!(edited.location, ItemLocation::Drawer(fridge.drawers[1].uuid));
    assert_eq!(edited.image.as_deref(), Some(&[1u8, 2, 3][..]));

    service.clear_image(item.uuid).unwrap();
    assert_eq!(service.get_item(item.uuid).unwrap().image, None);
}

#[test]
fn edit_and_delete_missing_item_report_item_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = item_service(&conn);
    let missing = Uuid::new_v4();

    let err = service
        .edit_item(missing, &ItemDraft::new("Ghost"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::ItemNotFound(id) if id == missing));

    let err = service.delete_item(missing).unwrap_err();
    assert!(matches!(err, ServiceError::ItemNotFound(id) if id == missing));
}

#[test]
fn selection_for_finds_fridge_owning_the_shelf() {
    let conn = open_db_in_memory().unwrap();
    let kitchen = create_fridge(&conn, "Kitchen", 1, 0);
    let garage = create_fridge(&conn, "Garage", 3, 0);
    let service = item_service(&conn);

    let mut draft = ItemDraft::new("Soda");
    draft.selection = LocationSelection::shelf(garage.uuid, garage.shelves[2].uuid);
    let item = service.add_item(&draft, NOW).unwrap();

    let selection = service.selection_for(item.uuid).unwrap();
    assert_eq!(selection.fridge, Some(garage.uuid));
    assert_eq!(selection.kind, LocationKind::Shelf);

    let fridges = service.load_snapshot().unwrap().fridges().to_vec();
    let resolved = selection.resolve(&fridges);
    assert_eq!(resolved.fridge_index, Some(1));
    assert_eq!(resolved.shelf_index, Some(2));
    assert_ne!(resolved.fridge, Some(kitchen.uuid));
}

#[test]
fn deleting_fridge_leaves_item_references_dangling() {
    let conn = open_db_in_memory().unwrap();
    let fridges = SqliteFridgeRepository::try_new(&conn).unwrap();
    let mut fridge = Fridge::new("Kitchen", FridgeType::Standard);
    fridge.shelves.push(Shelf::new("Top", 1));
    fridges.create_fridge(&fridge).unwrap();

    let service = item_service(&conn);
    let mut draft = ItemDraft::new("Milk");
    draft.selection = LocationSelection::shelf(fridge.uuid, fridge.shelves[0].uuid);
    let item = service.add_item(&draft, NOW).unwrap();

    fridges.delete_fridge(fridge.uuid).unwrap();

    let stored = service.get_item(item.uuid).unwrap();
    assert_eq!(stored.location, ItemLocation::Shelf(fridge.shelves[0].uuid));
    let snapshot = service.load_snapshot().unwrap();
    assert_eq!(snapshot.location_display(&stored), "Unassigned");
}
