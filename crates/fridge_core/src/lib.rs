//! Core domain logic for FridgeManager.
//! This crate is the single source of truth for inventory invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::fridge::{Drawer, DrawerId, Fridge, FridgeId, FridgeType, Shelf, ShelfId};
pub use model::item::{FridgeItem, ItemId, ItemLocation};
pub use model::settings::AppSettings;
pub use model::{now_epoch_ms, ModelValidationError, MILLIS_PER_DAY};
pub use repo::fridge_repo::{FridgeRepository, SqliteFridgeRepository};
pub use repo::item_repo::{ItemRepository, SqliteItemRepository};
pub use repo::settings_repo::{SettingsRepository, SqliteSettingsRepository};
pub use repo::{RepoError, RepoResult};
pub use service::fridge_service::{FridgeService, FridgeSetup};
pub use service::item_service::{ItemDraft, ItemService};
pub use service::selection::{LocationKind, LocationSelection, ResolvedSelection};
pub use service::{ServiceError, ServiceResult};
pub use view::{
    expiration_status, is_expiring_within_two_days, ExpirationStatus, FridgeSections,
    InventorySnapshot, ItemFilter, ItemSection, ResolvedLocation, SectionHeader,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
