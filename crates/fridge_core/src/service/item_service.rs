//! Add/edit item form use-case service.
//!
//! # Responsibility
//! - Validate item form input and apply picker selections.
//! - Load consistent inventory snapshots for derived views.
//!
//! # Invariants
//! - Product names are trimmed and must be non-empty.
//! - New items expire 7 days after creation unless the form says otherwise.
//! - A new item without an explicit fridge lands in the default fridge when
//!   that fridge still exists.

use super::selection::{LocationSelection, ResolvedSelection};
use super::{normalize_name, ServiceError, ServiceResult};
use crate::model::fridge::Fridge;
use crate::model::item::{FridgeItem, ItemId};
use crate::model::MILLIS_PER_DAY;
use crate::repo::fridge_repo::FridgeRepository;
use crate::repo::item_repo::ItemRepository;
use crate::repo::settings_repo::SettingsRepository;
use crate::repo::RepoError;
use crate::view::InventorySnapshot;
use log::info;
use uuid::Uuid;

/// Days added to creation time when the form leaves expiration unset.
pub const DEFAULT_EXPIRATION_DAYS: i64 = 7;

/// Add/edit form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub product_name: String,
    /// Epoch ms; `None` keeps the current value (edit) or uses the default.
    pub expiration_date: Option<i64>,
    pub selection: LocationSelection,
    /// Replacement photo bytes; `None` keeps the existing photo.
    pub image: Option<Vec<u8>>,
}

impl ItemDraft {
    pub fn new(product_name: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            expiration_date: None,
            selection: LocationSelection::unassigned(None),
            image: None,
        }
    }
}

/// Item form service facade.
pub struct ItemService<I: ItemRepository, F: FridgeRepository, S: SettingsRepository> {
    items: I,
    fridges: F,
    settings: S,
}

impl<I, F, S> ItemService<I, F, S>
where
    I: ItemRepository,
    F: FridgeRepository,
    S: SettingsRepository,
{
    pub fn new(items: I, fridges: F, settings: S) -> Self {
        Self {
            items,
            fridges,
            settings,
        }
    }

    /// Creates an item from the add form.
    pub fn add_item(&self, draft: &ItemDraft, now: i64) -> ServiceResult<FridgeItem> {
        let name = normalize_name(draft.product_name.as_str())?;
        let fridges = self.fridges.list_fridges()?;

        let mut selection = draft.selection;
        if selection.fridge.is_none() {
            selection.fridge = self.default_fridge(&fridges)?;
        }
        let resolved = selection.resolve(&fridges);

        let expiration = draft
            .expiration_date
            .unwrap_or_else(|| now.saturating_add(DEFAULT_EXPIRATION_DAYS * MILLIS_PER_DAY));
        let mut item = FridgeItem::with_id(Uuid::new_v4(), name, now, expiration)?;
        apply_selection(&mut item, &resolved);
        item.image = draft.image.clone();

        self.items.create_item(&item)?;
        info!(
            "event=item_create module=service status=ok item_id={} placed={}",
            item.uuid,
            location_tag(&resolved)
        );
        Ok(item)
    }

    /// Applies edit-form changes to an existing item.
    pub fn edit_item(&self, id: ItemId, draft: &ItemDraft) -> ServiceResult<FridgeItem> {
        let name = normalize_name(draft.product_name.as_str())?;
        let mut item = self.get_item(id)?;
        let fridges = self.fridges.list_fridges()?;
        let resolved = draft.selection.resolve(&fridges);

        item.product_name = name;
        if let Some(expiration) = draft.expiration_date {
            item.expiration_date = expiration;
        }
        apply_selection(&mut item, &resolved);
        if let Some(image) = &draft.image {
            item.image = Some(image.clone());
        }

        self.items
            .update_item(&item)
            .map_err(|err| not_found_as_item(err, id))?;
        info!(
            "event=item_update module=service status=ok item_id={} placed={}",
            item.uuid,
            location_tag(&resolved)
        );
        Ok(item)
    }

    pub fn get_item(&self, id: ItemId) -> ServiceResult<FridgeItem> {
        self.items.get_item(id)?.ok_or(ServiceError::ItemNotFound(id))
    }

    pub fn delete_item(&self, id: ItemId) -> ServiceResult<()> {
        self.items
            .delete_item(id)
            .map_err(|err| not_found_as_item(err, id))?;
        info!("event=item_delete module=service status=ok item_id={id}");
        Ok(())
    }

    /// Removes the photo from an item.
    pub fn clear_image(&self, id: ItemId) -> ServiceResult<()> {
        let mut item = self.get_item(id)?;
        item.image = None;
        self.items
            .update_item(&item)
            .map_err(|err| not_found_as_item(err, id))?;
        Ok(())
    }

    /// Initial picker state for the edit form.
    pub fn selection_for(&self, id: ItemId) -> ServiceResult<LocationSelection> {
        let item = self.get_item(id)?;
        let fridges = self.fridges.list_fridges()?;
        Ok(LocationSelection::initial_for(&item, &fridges))
    }

    /// Loads every fridge and item into a fresh snapshot.
    pub fn load_snapshot(&self) -> ServiceResult<InventorySnapshot> {
        let fridges = self.fridges.list_fridges()?;
        let items = self.items.list_items()?;
        Ok(InventorySnapshot::new(fridges, items))
    }

    fn default_fridge(&self, fridges: &[Fridge]) -> ServiceResult<Option<Uuid>> {
        let settings = self.settings.load_settings()?;
        Ok(settings
            .default_fridge_id
            .filter(|id| fridges.iter().any(|fridge| fridge.uuid == *id)))
    }
}

fn apply_selection(item: &mut FridgeItem, resolved: &ResolvedSelection) {
    item.location = resolved.location;
    item.fridge_uuid = resolved.fridge;
}

fn location_tag(resolved: &ResolvedSelection) -> &'static str {
    match resolved.location {
        crate::model::item::ItemLocation::Shelf(_) => "shelf",
        crate::model::item::ItemLocation::Drawer(_) => "drawer",
        crate::model::item::ItemLocation::Unassigned => "unassigned",
    }
}

fn not_found_as_item(err: RepoError, id: ItemId) -> ServiceError {
    match err {
        RepoError::NotFound(_) => ServiceError::ItemNotFound(id),
        other => ServiceError::Repo(other),
    }
}
