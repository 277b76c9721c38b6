//! Grouped fridge → shelf/drawer/unassigned sections.
//!
//! # Invariants
//! - Fridges appear in snapshot order; shelves then drawers in `position`
//!   order; the "Unassigned" section always comes last.
//! - Items inside a section are sorted by expiration date, furthest first.
//! - No empty section and no fridge without sections is ever emitted.

use super::expiration::is_expiring_within_two_days;
use super::snapshot::{InventorySnapshot, ResolvedLocation};
use crate::model::fridge::{Drawer, Fridge, Shelf};
use crate::model::item::FridgeItem;

/// Header label of the section holding items without a valid location.
pub const UNASSIGNED_SECTION_LABEL: &str = "Unassigned";

/// Filter applied before grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemFilter {
    /// Keep only items expiring within two days of `now`.
    pub urgent_only: bool,
    /// Reference time in epoch ms.
    pub now: i64,
}

impl ItemFilter {
    pub fn all(now: i64) -> Self {
        Self {
            urgent_only: false,
            now,
        }
    }

    pub fn urgent(now: i64) -> Self {
        Self {
            urgent_only: true,
            now,
        }
    }

    pub fn matches(&self, item: &FridgeItem) -> bool {
        !self.urgent_only || is_expiring_within_two_days(item, self.now)
    }
}

/// Section header inside one fridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionHeader<'a> {
    Shelf(&'a Shelf),
    Drawer(&'a Drawer),
    Unassigned,
}

impl SectionHeader<'_> {
    pub fn label(&self) -> &str {
        match self {
            Self::Shelf(shelf) => shelf.name.as_str(),
            Self::Drawer(drawer) => drawer.name.as_str(),
            Self::Unassigned => UNASSIGNED_SECTION_LABEL,
        }
    }
}

/// Non-empty, sorted list of items under one header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSection<'a> {
    pub header: SectionHeader<'a>,
    pub items: Vec<&'a FridgeItem>,
}

/// One fridge and its non-empty sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FridgeSections<'a> {
    pub fridge: &'a Fridge,
    pub sections: Vec<ItemSection<'a>>,
}

impl<'a> FridgeSections<'a> {
    /// All items across sections, in section order.
    pub fn items(&self) -> impl Iterator<Item = &'a FridgeItem> + '_ {
        self.sections
            .iter()
            .flat_map(|section| section.items.iter().copied())
    }
}

impl InventorySnapshot {
    /// Groups items per fridge into shelf, drawer and unassigned sections.
    pub fn grouped_sections(&self, filter: ItemFilter) -> Vec<FridgeSections<'_>> {
        self.fridges()
            .iter()
            .filter_map(|fridge| {
                let sections = self.fridge_sections(fridge, filter);
                if sections.is_empty() {
                    None
                } else {
                    Some(FridgeSections { fridge, sections })
                }
            })
            .collect()
    }

    /// Items without a valid shelf/drawer reference, across all fridges.
    pub fn orphaned_items(&self, filter: ItemFilter) -> Vec<&FridgeItem> {
        let mut items = self
            .items()
            .iter()
            .filter(|item| self.is_unassigned(item) && filter.matches(item))
            .collect::<Vec<_>>();
        sort_by_expiration(&mut items);
        items
    }

    /// All items passing the filter, sorted like section contents.
    pub fn filtered_items(&self, filter: ItemFilter) -> Vec<&FridgeItem> {
        let mut items = self
            .items()
            .iter()
            .filter(|item| filter.matches(item))
            .collect::<Vec<_>>();
        sort_by_expiration(&mut items);
        items
    }

    fn fridge_sections<'a>(
        &'a self,
        fridge: &'a Fridge,
        filter: ItemFilter,
    ) -> Vec<ItemSection<'a>> {
        let members = self
            .items()
            .iter()
            .filter(|item| filter.matches(item))
            .filter(|item| {
                self.owning_fridge(item)
                    .is_some_and(|owner| owner.uuid == fridge.uuid)
            })
            .map(|item| (item, self.resolve_location(item)))
            .collect::<Vec<_>>();

        let mut sections = Vec::new();
        for shelf in fridge.shelves_in_order() {
            let items = members
                .iter()
                .filter(|(_, location)| {
                    matches!(location, ResolvedLocation::Shelf { shelf: s, .. } if s.uuid == shelf.uuid)
                })
                .map(|(item, _)| *item)
                .collect();
            push_section(&mut sections, SectionHeader::Shelf(shelf), items);
        }
        for drawer in fridge.drawers_in_order() {
            let items = members
                .iter()
                .filter(|(_, location)| {
                    matches!(location, ResolvedLocation::Drawer { drawer: d, .. } if d.uuid == drawer.uuid)
                })
                .map(|(item, _)| *item)
                .collect();
            push_section(&mut sections, SectionHeader::Drawer(drawer), items);
        }
        let unassigned = members
            .iter()
            .filter(|(_, location)| matches!(location, ResolvedLocation::Unassigned))
            .map(|(item, _)| *item)
            .collect();
        push_section(&mut sections, SectionHeader::Unassigned, unassigned);

        sections
    }
}

fn push_section<'a>(
    sections: &mut Vec<ItemSection<'a>>,
    header: SectionHeader<'a>,
    mut items: Vec<&'a FridgeItem>,
) {
    if items.is_empty() {
        return;
    }
    sort_by_expiration(&mut items);
    sections.push(ItemSection { header, items });
}

/// Furthest expiration first; stable for equal dates.
fn sort_by_expiration(items: &mut [&FridgeItem]) {
    items.sort_by(|a, b| b.expiration_date.cmp(&a.expiration_date));
}
