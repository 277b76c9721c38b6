//! Consistent in-memory snapshot of fridges and items.
//!
//! # Responsibility
//! - Own the fridge/item collections a view is computed from.
//! - Resolve shelf/drawer references through an id-indexed lookup.
//!
//! # Invariants
//! - A reference resolves only when a fridge in this snapshot owns the
//!   shelf/drawer; anything else resolves to `Unassigned`.
//! - Resolution returns live entities, so renamed locations show immediately.

use crate::model::fridge::{Drawer, DrawerId, Fridge, FridgeId, Shelf, ShelfId};
use crate::model::item::{FridgeItem, ItemLocation};
use std::collections::HashMap;

/// Result of resolving an item's location reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedLocation<'a> {
    Shelf { fridge: &'a Fridge, shelf: &'a Shelf },
    Drawer { fridge: &'a Fridge, drawer: &'a Drawer },
    Unassigned,
}

impl<'a> ResolvedLocation<'a> {
    /// Human-readable location, e.g. `Shelf: Top`.
    pub fn display(&self) -> String {
        match self {
            Self::Shelf { shelf, .. } => format!("Shelf: {}", shelf.name),
            Self::Drawer { drawer, .. } => format!("Drawer: {}", drawer.name),
            Self::Unassigned => "Unassigned".to_string(),
        }
    }

    pub fn fridge(&self) -> Option<&'a Fridge> {
        match *self {
            Self::Shelf { fridge, .. } | Self::Drawer { fridge, .. } => Some(fridge),
            Self::Unassigned => None,
        }
    }
}

/// Position of a location inside `InventorySnapshot::fridges`.
#[derive(Debug, Clone, Copy)]
struct Slot {
    fridge: usize,
    entry: usize,
}

#[derive(Debug, Default)]
struct LocationIndex {
    fridges: HashMap<FridgeId, usize>,
    shelves: HashMap<ShelfId, Slot>,
    drawers: HashMap<DrawerId, Slot>,
}

impl LocationIndex {
    fn build(fridges: &[Fridge]) -> Self {
        let mut index = Self::default();
        for (fridge_pos, fridge) in fridges.iter().enumerate() {
            index.fridges.entry(fridge.uuid).or_insert(fridge_pos);
            for (entry, shelf) in fridge.shelves.iter().enumerate() {
                index.shelves.entry(shelf.uuid).or_insert(Slot {
                    fridge: fridge_pos,
                    entry,
                });
            }
            for (entry, drawer) in fridge.drawers.iter().enumerate() {
                index.drawers.entry(drawer.uuid).or_insert(Slot {
                    fridge: fridge_pos,
                    entry,
                });
            }
        }
        index
    }
}

/// Fridges and items as loaded at one point in time.
#[derive(Debug)]
pub struct InventorySnapshot {
    fridges: Vec<Fridge>,
    items: Vec<FridgeItem>,
    index: LocationIndex,
}

impl InventorySnapshot {
    /// Builds a snapshot; fridge order is preserved as given.
    pub fn new(fridges: Vec<Fridge>, items: Vec<FridgeItem>) -> Self {
        let index = LocationIndex::build(&fridges);
        Self {
            fridges,
            items,
            index,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn fridges(&self) -> &[Fridge] {
        &self.fridges
    }

    pub fn items(&self) -> &[FridgeItem] {
        &self.items
    }

    pub fn fridge(&self, id: FridgeId) -> Option<&Fridge> {
        self.index
            .fridges
            .get(&id)
            .map(|&position| &self.fridges[position])
    }

    /// Resolves an item's shelf/drawer reference against live fridges.
    pub fn resolve_location(&self, item: &FridgeItem) -> ResolvedLocation<'_> {
        match item.location {
            ItemLocation::Shelf(id) => match self.index.shelves.get(&id) {
                Some(slot) => {
                    let fridge = &self.fridges[slot.fridge];
                    ResolvedLocation::Shelf {
                        fridge,
                        shelf: &fridge.shelves[slot.entry],
                    }
                }
                None => ResolvedLocation::Unassigned,
            },
            ItemLocation::Drawer(id) => match self.index.drawers.get(&id) {
                Some(slot) => {
                    let fridge = &self.fridges[slot.fridge];
                    ResolvedLocation::Drawer {
                        fridge,
                        drawer: &fridge.drawers[slot.entry],
                    }
                }
                None => ResolvedLocation::Unassigned,
            },
            ItemLocation::Unassigned => ResolvedLocation::Unassigned,
        }
    }

    /// `Shelf: <name>`, `Drawer: <name>` or `Unassigned`.
    pub fn location_display(&self, item: &FridgeItem) -> String {
        self.resolve_location(item).display()
    }

    /// Fridge an item is grouped under.
    ///
    /// A resolvable shelf/drawer decides; otherwise the item's home fridge
    /// does, provided it still exists.
    pub fn owning_fridge(&self, item: &FridgeItem) -> Option<&Fridge> {
        self.resolve_location(item)
            .fridge()
            .or_else(|| item.fridge_uuid.and_then(|id| self.fridge(id)))
    }

    /// Whether the item has no resolvable shelf/drawer reference.
    pub fn is_unassigned(&self, item: &FridgeItem) -> bool {
        matches!(self.resolve_location(item), ResolvedLocation::Unassigned)
    }
}
