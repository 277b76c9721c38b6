//! Fridge item domain model.
//!
//! # Responsibility
//! - Define the tracked grocery record and its optional location.
//!
//! # Invariants
//! - `location` holds at most one of shelf/drawer by construction.
//! - Location ids are plain references; they may dangle after a fridge is
//!   deleted and must be resolved against live data before display.

use super::fridge::{DrawerId, FridgeId, ShelfId};
use super::{now_epoch_ms, ModelValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ItemId = Uuid;

/// Label used when a product name is blank.
pub const UNNAMED_PRODUCT_LABEL: &str = "(No name)";

/// Where an item is stored inside a fridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ItemLocation {
    #[default]
    Unassigned,
    Shelf(ShelfId),
    Drawer(DrawerId),
}

impl ItemLocation {
    pub fn shelf_id(&self) -> Option<ShelfId> {
        match self {
            Self::Shelf(id) => Some(*id),
            _ => None,
        }
    }

    pub fn drawer_id(&self) -> Option<DrawerId> {
        match self {
            Self::Drawer(id) => Some(*id),
            _ => None,
        }
    }

    /// Rebuilds a location from two nullable columns.
    ///
    /// Returns `None` when both are set, which violates the exclusivity rule.
    pub fn from_parts(shelf: Option<ShelfId>, drawer: Option<DrawerId>) -> Option<Self> {
        match (shelf, drawer) {
            (None, None) => Some(Self::Unassigned),
            (Some(id), None) => Some(Self::Shelf(id)),
            (None, Some(id)) => Some(Self::Drawer(id)),
            (Some(_), Some(_)) => None,
        }
    }
}

/// A tracked grocery product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FridgeItem {
    pub uuid: ItemId,
    /// May be empty; forms reject blank names but the model does not.
    pub product_name: String,
    /// Unix epoch milliseconds when the item was added.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub expiration_date: i64,
    pub location: ItemLocation,
    /// Home fridge used to group unassigned items.
    pub fridge_uuid: Option<FridgeId>,
    /// Optional encoded photo bytes.
    pub image: Option<Vec<u8>>,
}

impl FridgeItem {
    /// Creates an unassigned item with a generated id.
    pub fn new(product_name: impl Into<String>, expiration_date: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            product_name: product_name.into(),
            created_at: now_epoch_ms(),
            expiration_date,
            location: ItemLocation::Unassigned,
            fridge_uuid: None,
            image: None,
        }
    }

    /// Creates an item with a caller-provided id and creation time.
    ///
    /// # Errors
    /// - Returns `NilUuid` when `uuid` is nil.
    pub fn with_id(
        uuid: ItemId,
        product_name: impl Into<String>,
        created_at: i64,
        expiration_date: i64,
    ) -> Result<Self, ModelValidationError> {
        if uuid.is_nil() {
            return Err(ModelValidationError::NilUuid);
        }
        Ok(Self {
            uuid,
            product_name: product_name.into(),
            created_at,
            expiration_date,
            location: ItemLocation::Unassigned,
            fridge_uuid: None,
            image: None,
        })
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.uuid.is_nil() {
            return Err(ModelValidationError::NilUuid);
        }
        match self.location {
            ItemLocation::Shelf(id) | ItemLocation::Drawer(id) if id.is_nil() => {
                Err(ModelValidationError::NilLocationId)
            }
            _ => Ok(()),
        }
    }

    pub fn assign_shelf(&mut self, shelf: ShelfId) {
        self.location = ItemLocation::Shelf(shelf);
    }

    pub fn assign_drawer(&mut self, drawer: DrawerId) {
        self.location = ItemLocation::Drawer(drawer);
    }

    pub fn clear_location(&mut self) {
        self.location = ItemLocation::Unassigned;
    }

    /// Product name for display, with a placeholder for blank names.
    pub fn display_name(&self) -> &str {
        let trimmed = self.product_name.trim();
        if trimmed.is_empty() {
            UNNAMED_PRODUCT_LABEL
        } else {
            trimmed
        }
    }
}
