//! Item-location picker state.
//!
//! # Responsibility
//! - Hold the add/edit form's fridge/shelf/drawer choice by identifier.
//! - Recompute clamped picker indices against the current fridge list.
//!
//! # Invariants
//! - Selections never store raw indices; indices are derived on demand.
//! - Unknown or stale ids fall back to the first entry; an empty fridge list
//!   or an empty shelf/drawer list resolves to `Unassigned`.

use crate::model::fridge::{DrawerId, Fridge, FridgeId, ShelfId};
use crate::model::item::{FridgeItem, ItemLocation};
use serde::{Deserialize, Serialize};

/// Segmented "Location Type" choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    #[default]
    Shelf,
    Drawer,
    Unassigned,
}

impl LocationKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "shelf" => Some(Self::Shelf),
            "drawer" => Some(Self::Drawer),
            "unassigned" => Some(Self::Unassigned),
            _ => None,
        }
    }
}

/// Picker state selected by identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSelection {
    pub fridge: Option<FridgeId>,
    pub kind: LocationKind,
    pub shelf: Option<ShelfId>,
    pub drawer: Option<DrawerId>,
}

/// Picker state projected onto the current fridge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSelection {
    /// Index into the fridge list, `None` when there are no fridges.
    pub fridge_index: Option<usize>,
    /// Index into the selected fridge's position-ordered shelves.
    pub shelf_index: Option<usize>,
    /// Index into the selected fridge's position-ordered drawers.
    pub drawer_index: Option<usize>,
    pub fridge: Option<FridgeId>,
    /// Location the item is saved with.
    pub location: ItemLocation,
}

impl ResolvedSelection {
    fn empty() -> Self {
        Self {
            fridge_index: None,
            shelf_index: None,
            drawer_index: None,
            fridge: None,
            location: ItemLocation::Unassigned,
        }
    }
}

impl LocationSelection {
    pub fn unassigned(fridge: Option<FridgeId>) -> Self {
        Self {
            fridge,
            kind: LocationKind::Unassigned,
            shelf: None,
            drawer: None,
        }
    }

    pub fn shelf(fridge: FridgeId, shelf: ShelfId) -> Self {
        Self {
            fridge: Some(fridge),
            kind: LocationKind::Shelf,
            shelf: Some(shelf),
            drawer: None,
        }
    }

    pub fn drawer(fridge: FridgeId, drawer: DrawerId) -> Self {
        Self {
            fridge: Some(fridge),
            kind: LocationKind::Drawer,
            shelf: None,
            drawer: Some(drawer),
        }
    }

    /// Initial edit-form state for an existing item.
    ///
    /// Picks the fridge owning the item's shelf or drawer; otherwise the
    /// item's home fridge, defaulting the kind to `Shelf`.
    pub fn initial_for(item: &FridgeItem, fridges: &[Fridge]) -> Self {
        match item.location {
            ItemLocation::Shelf(id) => {
                if let Some(fridge) = fridges.iter().find(|fridge| fridge.shelf(id).is_some()) {
                    return Self::shelf(fridge.uuid, id);
                }
            }
            ItemLocation::Drawer(id) => {
                if let Some(fridge) = fridges.iter().find(|fridge| fridge.drawer(id).is_some()) {
                    return Self::drawer(fridge.uuid, id);
                }
            }
            ItemLocation::Unassigned => {}
        }

        let fridge = item
            .fridge_uuid
            .filter(|id| fridges.iter().any(|fridge| fridge.uuid == *id));
        Self {
            fridge,
            kind: LocationKind::Shelf,
            shelf: None,
            drawer: None,
        }
    }

    /// Projects this selection onto `fridges`, clamping every index.
    pub fn resolve(&self, fridges: &[Fridge]) -> ResolvedSelection {
        if fridges.is_empty() {
            return ResolvedSelection::empty();
        }

        let fridge_index = self
            .fridge
            .and_then(|id| fridges.iter().position(|fridge| fridge.uuid == id))
            .unwrap_or(0);
        let fridge = &fridges[fridge_index];

        let shelves = fridge.shelves_in_order();
        let shelf_index = (!shelves.is_empty()).then(|| {
            self.shelf
                .and_then(|id| shelves.iter().position(|shelf| shelf.uuid == id))
                .unwrap_or(0)
        });

        let drawers = fridge.drawers_in_order();
        let drawer_index = (!drawers.is_empty()).then(|| {
            self.drawer
                .and_then(|id| drawers.iter().position(|drawer| drawer.uuid == id))
                .unwrap_or(0)
        });

        let location = match (self.kind, shelf_index, drawer_index) {
            (LocationKind::Shelf, Some(index), _) => ItemLocation::Shelf(shelves[index].uuid),
            (LocationKind::Drawer, _, Some(index)) => ItemLocation::Drawer(drawers[index].uuid),
            _ => ItemLocation::Unassigned,
        };

        ResolvedSelection {
            fridge_index: Some(fridge_index),
            shelf_index,
            drawer_index,
            fridge: Some(fridge.uuid),
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LocationKind, LocationSelection};
    use crate::model::fridge::{Drawer, Fridge, FridgeType, Shelf};
    use crate::model::item::{FridgeItem, ItemLocation};
    use uuid::Uuid;

    fn fridge_with(shelves: &[(&str, i64)], drawers: &[(&str, i64)]) -> Fridge {
        let mut fridge = Fridge::new("Test", FridgeType::Standard);
        for (name, position) in shelves {
            fridge.shelves.push(Shelf::new(*name, *position));
        }
        for (name, position) in drawers {
            fridge.drawers.push(Drawer::new(*name, *position));
        }
        fridge
    }

    #[test]
    fn resolve_without_fridges_is_unassigned() {
        let selection = LocationSelection::shelf(Uuid::new_v4(), Uuid::new_v4());
        let resolved = selection.resolve(&[]);
        assert_eq!(resolved.fridge_index, None);
        assert_eq!(resolved.location, ItemLocation::Unassigned);
    }

    #[test]
    fn stale_ids_clamp_to_first_entries() {
        let fridges = vec![fridge_with(&[("Bottom", 2), ("Top", 1)], &[])];
        let selection = LocationSelection::shelf(Uuid::new_v4(), Uuid::new_v4());

        let resolved = selection.resolve(&fridges);
        assert_eq!(resolved.fridge_index, Some(0));
        assert_eq!(resolved.shelf_index, Some(0));
        assert_eq!(resolved.drawer_index, None);
        let top = fridges[0].shelves[1].uuid;
        assert_eq!(resolved.location, ItemLocation::Shelf(top));
    }

    #[test]
    fn drawer_kind_without_drawers_resolves_unassigned() {
        let fridges = vec![fridge_with(&[("Top", 1)], &[])];
        let selection = LocationSelection {
            fridge: Some(fridges[0].uuid),
            kind: LocationKind::Drawer,
            shelf: None,
            drawer: None,
        };
        let resolved = selection.resolve(&fridges);
        assert_eq!(resolved.location, ItemLocation::Unassigned);
        assert_eq!(resolved.fridge, Some(fridges[0].uuid));
    }

    #[test]
    fn initial_for_finds_owning_fridge_of_drawer() {
        let first = fridge_with(&[("Top", 1)], &[]);
        let second = fridge_with(&[], &[("Crisper", 1)]);
        let drawer_id = second.drawers[0].uuid;
        let mut item = FridgeItem::new("Carrots", 0);
        item.assign_drawer(drawer_id);

        let fridges = vec![first, second];
        let selection = LocationSelection::initial_for(&item, &fridges);
        assert_eq!(selection.fridge, Some(fridges[1].uuid));
        assert_eq!(selection.kind, LocationKind::Drawer);

        let resolved = selection.resolve(&fridges);
        assert_eq!(resolved.fridge_index, Some(1));
        assert_eq!(resolved.drawer_index, Some(0));
        assert_eq!(resolved.location, ItemLocation::Drawer(drawer_id));
    }

    #[test]
    fn parse_location_kind_is_case_insensitive() {
        assert_eq!(LocationKind::parse(" Shelf "), Some(LocationKind::Shelf));
        assert_eq!(LocationKind::parse("DRAWER"), Some(LocationKind::Drawer));
        assert_eq!(LocationKind::parse("basket"), None);
    }
}
