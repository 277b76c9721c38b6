//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose wizard, item-form and inventory-view use-cases to Dart via FRB.
//! - Translate core errors into `ok=false` envelopes with readable messages.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Identifiers cross the boundary as UUID strings.
//! - Each call opens its own connection; nothing is cached between calls
//!   except the resolved database path.

use fridge_core::db::open_db;
use fridge_core::{
    core_version as core_version_inner, expiration_status, init_logging as init_logging_inner,
    now_epoch_ms, ping as ping_inner, Fridge, FridgeItem, FridgeService, FridgeSetup, FridgeType,
    InventorySnapshot, ItemDraft, ItemFilter, ItemService, LocationKind, LocationSelection,
    SqliteFridgeRepository, SqliteItemRepository, SqliteSettingsRepository,
};
use log::error;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const DB_PATH_ENV: &str = "FRIDGE_DB_PATH";
const DB_FILE_NAME: &str = "fridgemanager.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

type FfiFridgeService<'conn> =
    FridgeService<SqliteFridgeRepository<'conn>, SqliteSettingsRepository<'conn>>;
type FfiItemService<'conn> = ItemService<
    SqliteItemRepository<'conn>,
    SqliteFridgeRepository<'conn>,
    SqliteSettingsRepository<'conn>,
>;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Shelf or drawer as shown by the wizard and pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationView {
    pub id: String,
    pub name: String,
    pub position: i64,
}

/// Fridge with position-ordered locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FridgeView {
    pub fridge_id: String,
    pub name: String,
    /// Display label, e.g. `Double Door`.
    pub kind: String,
    pub shelves: Vec<LocationView>,
    pub drawers: Vec<LocationView>,
}

/// Result of a fridge mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FridgeActionResponse {
    pub ok: bool,
    pub fridge: Option<FridgeView>,
    pub message: String,
}

impl FridgeActionResponse {
    fn success(message: impl Into<String>, fridge: Option<FridgeView>) -> Self {
        Self {
            ok: true,
            fridge,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            fridge: None,
            message: message.into(),
        }
    }
}

/// Fridge list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FridgeListResponse {
    pub ok: bool,
    pub fridges: Vec<FridgeView>,
    pub default_fridge_id: Option<String>,
    pub message: String,
}

/// Add/edit form payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemInput {
    pub product_name: String,
    /// `None` keeps the current value on edit, or defaults to one week out.
    pub expiration_epoch_ms: Option<i64>,
    pub fridge_id: Option<String>,
    /// `shelf|drawer|unassigned`; blank means `shelf`.
    pub location_kind: String,
    pub shelf_id: Option<String>,
    pub drawer_id: Option<String>,
    pub image: Option<Vec<u8>>,
}

/// Result of an item mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemActionResponse {
    pub ok: bool,
    pub item_id: Option<String>,
    pub message: String,
}

impl ItemActionResponse {
    fn success(message: impl Into<String>, item_id: Option<String>) -> Self {
        Self {
            ok: true,
            item_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            item_id: None,
            message: message.into(),
        }
    }
}

/// One inventory row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItemView {
    pub item_id: String,
    pub product_name: String,
    /// `Shelf: X`, `Drawer: X` or `Unassigned`.
    pub location: String,
    pub expiration_epoch_ms: i64,
    pub created_at_epoch_ms: i64,
    /// Stable status label, e.g. `expires_soon`.
    pub status: String,
    pub icon: String,
    pub severity: u8,
    pub highlighted: bool,
    pub has_image: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySectionView {
    pub label: String,
    pub items: Vec<InventoryItemView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryFridgeView {
    pub fridge_id: String,
    pub name: String,
    pub sections: Vec<InventorySectionView>,
}

/// Grouped inventory envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySectionsResponse {
    pub ok: bool,
    pub fridges: Vec<InventoryFridgeView>,
    /// Items without a valid shelf/drawer across all fridges.
    pub orphaned: Vec<InventoryItemView>,
    pub message: String,
}

/// Plain-text summary envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySummaryResponse {
    pub ok: bool,
    pub text: String,
    pub message: String,
}

/// Boolean query envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagResponse {
    pub ok: bool,
    pub value: bool,
    pub message: String,
}

/// Creates a fridge from the setup wizard.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Blank names fail with an `Invalid Input` message.
/// - Counts are clamped: shelves `1..=12`, drawers `0..=12`.
#[flutter_rust_bridge::frb(sync)]
pub fn fridge_create(
    name: String,
    kind: String,
    shelf_count: u32,
    drawer_count: u32,
) -> FridgeActionResponse {
    let setup = FridgeSetup {
        name,
        kind: FridgeType::from_label(kind.as_str()),
        shelf_count,
        drawer_count,
    };
    match with_fridge_service("fridge_create", |service| {
        service.create_fridge(&setup).map_err(|err| err.to_string())
    }) {
        Ok(fridge) => {
            FridgeActionResponse::success("Fridge created.", Some(to_fridge_view(&fridge)))
        }
        Err(err) => FridgeActionResponse::failure(err),
    }
}

/// Applies wizard edits to an existing fridge.
///
/// Existing shelves and drawers keep their ids; counts are reconciled by
/// adding or removing the highest positions.
#[flutter_rust_bridge::frb(sync)]
pub fn fridge_update(
    fridge_id: String,
    name: String,
    kind: String,
    shelf_count: u32,
    drawer_count: u32,
) -> FridgeActionResponse {
    let setup = FridgeSetup {
        name,
        kind: FridgeType::from_label(kind.as_str()),
        shelf_count,
        drawer_count,
    };
    match with_fridge_service("fridge_update", |service| {
        let id = parse_id(fridge_id.as_str(), "fridge_id")?;
        service.update_fridge(id, &setup).map_err(|err| err.to_string())
    }) {
        Ok(fridge) => {
            FridgeActionResponse::success("Fridge updated.", Some(to_fridge_view(&fridge)))
        }
        Err(err) => FridgeActionResponse::failure(err),
    }
}

/// Deletes one fridge; its items become unassigned.
#[flutter_rust_bridge::frb(sync)]
pub fn fridge_delete(fridge_id: String) -> FridgeActionResponse {
    match with_fridge_service("fridge_delete", |service| {
        let id = parse_id(fridge_id.as_str(), "fridge_id")?;
        service.delete_fridge(id).map_err(|err| err.to_string())
    }) {
        Ok(()) => FridgeActionResponse::success("Fridge deleted.", None),
        Err(err) => FridgeActionResponse::failure(err),
    }
}

/// Deletes every fridge and re-arms the first-run wizard.
#[flutter_rust_bridge::frb(sync)]
pub fn fridge_delete_all() -> FridgeActionResponse {
    match with_fridge_service("fridge_delete_all", |service| {
        service.delete_all_fridges().map_err(|err| err.to_string())
    }) {
        Ok(removed) => {
            FridgeActionResponse::success(format!("Removed {removed} fridge(s)."), None)
        }
        Err(err) => FridgeActionResponse::failure(err),
    }
}

/// Stores the fridge preselected by the add-item form.
#[flutter_rust_bridge::frb(sync)]
pub fn fridge_set_default(fridge_id: String) -> FridgeActionResponse {
    match with_fridge_service("fridge_set_default", |service| {
        let id = parse_id(fridge_id.as_str(), "fridge_id")?;
        service.set_default_fridge(id).map_err(|err| err.to_string())
    }) {
        Ok(()) => FridgeActionResponse::success("Default fridge updated.", None),
        Err(err) => FridgeActionResponse::failure(err),
    }
}

/// Lists fridges in creation order together with the default fridge id.
#[flutter_rust_bridge::frb(sync)]
pub fn fridge_list() -> FridgeListResponse {
    let result = with_fridge_service("fridge_list", |service| {
        let fridges = service.list_fridges().map_err(|err| err.to_string())?;
        let settings = service.settings().map_err(|err| err.to_string())?;
        Ok((fridges, settings.default_fridge_id))
    });
    match result {
        Ok((fridges, default_fridge_id)) => FridgeListResponse {
            ok: true,
            message: format!("Loaded {} fridge(s).", fridges.len()),
            fridges: fridges.iter().map(to_fridge_view).collect(),
            default_fridge_id: default_fridge_id.map(|id| id.to_string()),
        },
        Err(err) => FridgeListResponse {
            ok: false,
            fridges: Vec::new(),
            default_fridge_id: None,
            message: err,
        },
    }
}

/// Adds an item from the add form.
///
/// # FFI contract
/// - Missing fridge falls back to the default fridge, then the first one.
/// - Stale shelf/drawer ids fall back to the first entry of the fridge.
#[flutter_rust_bridge::frb(sync)]
pub fn item_add(input: ItemInput) -> ItemActionResponse {
    match with_item_service("item_add", |service| {
        let draft = to_draft(input)?;
        service
            .add_item(&draft, now_epoch_ms())
            .map_err(|err| err.to_string())
    }) {
        Ok(item) => ItemActionResponse::success("Item added.", Some(item.uuid.to_string())),
        Err(err) => ItemActionResponse::failure(err),
    }
}

/// Applies edit-form changes; a `None` image keeps the existing photo.
#[flutter_rust_bridge::frb(sync)]
pub fn item_edit(item_id: String, input: ItemInput) -> ItemActionResponse {
    match with_item_service("item_edit", |service| {
        let id = parse_id(item_id.as_str(), "item_id")?;
        let draft = to_draft(input)?;
        service.edit_item(id, &draft).map_err(|err| err.to_string())
    }) {
        Ok(item) => ItemActionResponse::success("Item updated.", Some(item.uuid.to_string())),
        Err(err) => ItemActionResponse::failure(err),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn item_delete(item_id: String) -> ItemActionResponse {
    match with_item_service("item_delete", |service| {
        let id = parse_id(item_id.as_str(), "item_id")?;
        service.delete_item(id).map_err(|err| err.to_string())
    }) {
        Ok(()) => ItemActionResponse::success("Item deleted.", None),
        Err(err) => ItemActionResponse::failure(err),
    }
}

/// Grouped fridge → section → item view plus the orphaned list.
#[flutter_rust_bridge::frb(sync)]
pub fn inventory_sections(urgent_only: bool) -> InventorySectionsResponse {
    let now = now_epoch_ms();
    let filter = ItemFilter { urgent_only, now };
    match with_item_service("inventory_sections", |service| {
        service.load_snapshot().map_err(|err| err.to_string())
    }) {
        Ok(snapshot) => {
            let fridges = snapshot
                .grouped_sections(filter)
                .iter()
                .map(|group| InventoryFridgeView {
                    fridge_id: group.fridge.uuid.to_string(),
                    name: group.fridge.name.clone(),
                    sections: group
                        .sections
                        .iter()
                        .map(|section| InventorySectionView {
                            label: section.header.label().to_string(),
                            items: section
                                .items
                                .iter()
                                .map(|item| to_item_view(&snapshot, item, now))
                                .collect(),
                        })
                        .collect(),
                })
                .collect::<Vec<_>>();
            let orphaned = snapshot
                .orphaned_items(filter)
                .into_iter()
                .map(|item| to_item_view(&snapshot, item, now))
                .collect();
            InventorySectionsResponse {
                ok: true,
                message: format!("Loaded {} fridge group(s).", fridges.len()),
                fridges,
                orphaned,
            }
        }
        Err(err) => InventorySectionsResponse {
            ok: false,
            fridges: Vec::new(),
            orphaned: Vec::new(),
            message: err,
        },
    }
}

/// Share/mail text for the current inventory.
#[flutter_rust_bridge::frb(sync)]
pub fn inventory_summary(urgent_only: bool) -> InventorySummaryResponse {
    let filter = ItemFilter {
        urgent_only,
        now: now_epoch_ms(),
    };
    match with_item_service("inventory_summary", |service| {
        service.load_snapshot().map_err(|err| err.to_string())
    }) {
        Ok(snapshot) => InventorySummaryResponse {
            ok: true,
            text: snapshot.compose_summary(filter),
            message: "Summary ready.".to_string(),
        },
        Err(err) => InventorySummaryResponse {
            ok: false,
            text: String::new(),
            message: err,
        },
    }
}

/// Whether the first-run setup wizard should be shown.
#[flutter_rust_bridge::frb(sync)]
pub fn wizard_should_show() -> FlagResponse {
    match with_fridge_service("wizard_should_show", |service| {
        service.settings().map_err(|err| err.to_string())
    }) {
        Ok(settings) => FlagResponse {
            ok: true,
            value: settings.should_show_wizard(),
            message: "Wizard state loaded.".to_string(),
        },
        Err(err) => FlagResponse {
            ok: false,
            value: false,
            message: err,
        },
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_connection<T>(
    op: &'static str,
    f: impl FnOnce(&Connection) -> Result<T, String>,
) -> Result<T, String> {
    let result = open_db(resolve_db_path())
        .map_err(|err| format!("{op} failed: DB open failed: {err}"))
        .and_then(|conn| f(&conn).map_err(|err| format!("{op} failed: {err}")));
    if let Err(err) = &result {
        error!("event=ffi_call module=ffi status=error op={op} error={err}");
    }
    result
}

fn with_fridge_service<T>(
    op: &'static str,
    f: impl FnOnce(&FfiFridgeService<'_>) -> Result<T, String>,
) -> Result<T, String> {
    with_connection(op, |conn| {
        let service = FridgeService::new(
            SqliteFridgeRepository::try_new(conn).map_err(|err| err.to_string())?,
            SqliteSettingsRepository::try_new(conn).map_err(|err| err.to_string())?,
        );
        f(&service)
    })
}

fn with_item_service<T>(
    op: &'static str,
    f: impl FnOnce(&FfiItemService<'_>) -> Result<T, String>,
) -> Result<T, String> {
    with_connection(op, |conn| {
        let service = ItemService::new(
            SqliteItemRepository::try_new(conn).map_err(|err| err.to_string())?,
            SqliteFridgeRepository::try_new(conn).map_err(|err| err.to_string())?,
            SqliteSettingsRepository::try_new(conn).map_err(|err| err.to_string())?,
        );
        f(&service)
    })
}

fn parse_id(raw: &str, field: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid {field} `{raw}`"))
}

fn parse_optional_id(raw: Option<&str>, field: &str) -> Result<Option<Uuid>, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_id(value, field).map(Some),
    }
}

fn to_draft(input: ItemInput) -> Result<ItemDraft, String> {
    let kind = if input.location_kind.trim().is_empty() {
        LocationKind::default()
    } else {
        LocationKind::parse(input.location_kind.as_str())
            .ok_or_else(|| format!("invalid location_kind `{}`", input.location_kind))?
    };

    Ok(ItemDraft {
        product_name: input.product_name,
        expiration_date: input.expiration_epoch_ms,
        selection: LocationSelection {
            fridge: parse_optional_id(input.fridge_id.as_deref(), "fridge_id")?,
            kind,
            shelf: parse_optional_id(input.shelf_id.as_deref(), "shelf_id")?,
            drawer: parse_optional_id(input.drawer_id.as_deref(), "drawer_id")?,
        },
        image: input.image,
    })
}

fn to_fridge_view(fridge: &Fridge) -> FridgeView {
    FridgeView {
        fridge_id: fridge.uuid.to_string(),
        name: fridge.name.clone(),
        kind: fridge.kind.label().to_string(),
        shelves: fridge
            .shelves_in_order()
            .into_iter()
            .map(|shelf| LocationView {
                id: shelf.uuid.to_string(),
                name: shelf.name.clone(),
                position: shelf.position,
            })
            .collect(),
        drawers: fridge
            .drawers_in_order()
            .into_iter()
            .map(|drawer| LocationView {
                id: drawer.uuid.to_string(),
                name: drawer.name.clone(),
                position: drawer.position,
            })
            .collect(),
    }
}

fn to_item_view(snapshot: &InventorySnapshot, item: &FridgeItem, now: i64) -> InventoryItemView {
    let status = expiration_status(item, now);
    InventoryItemView {
        item_id: item.uuid.to_string(),
        product_name: item.display_name().to_string(),
        location: snapshot.location_display(item),
        expiration_epoch_ms: item.expiration_date,
        created_at_epoch_ms: item.created_at,
        status: status.as_str().to_string(),
        icon: status.icon().to_string(),
        severity: status.severity(),
        highlighted: status.has_background(),
        has_image: item.image.is_some(),
    }
}
