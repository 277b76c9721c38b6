//! Derived, read-only views over an inventory snapshot.
//!
//! # Responsibility
//! - Resolve item locations against live fridge data.
//! - Classify expiration urgency.
//! - Build fridge → shelf/drawer/unassigned groupings and the text summary.
//!
//! # Invariants
//! - Every function here is pure and total: dangling references, empty
//!   collections and zero fridges degrade to "Unassigned" or empty output.
//! - Views are recomputed from the snapshot on every call; nothing is cached
//!   across snapshots.

pub mod expiration;
pub mod sections;
pub mod snapshot;
pub mod summary;

pub use expiration::{expiration_status, is_expiring_within_two_days, ExpirationStatus};
pub use sections::{
    FridgeSections, ItemFilter, ItemSection, SectionHeader, UNASSIGNED_SECTION_LABEL,
};
pub use snapshot::{InventorySnapshot, ResolvedLocation};
pub use summary::{format_date, format_timestamp, NO_MATCHING_ITEMS_MESSAGE};
