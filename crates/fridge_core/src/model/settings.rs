//! User preference record.
//!
//! # Responsibility
//! - Hold the explicit settings object passed into use-case services.
//!
//! # Invariants
//! - `default_fridge_id` may point at a fridge that no longer exists; readers
//!   must check existence before relying on it.

use super::fridge::FridgeId;
use serde::{Deserialize, Serialize};

/// Preference key for the default fridge id (UUID string).
pub const DEFAULT_FRIDGE_ID_KEY: &str = "defaultFridgeId";
/// Preference key for the first-run wizard flag (`true`/`false`).
pub const HAS_COMPLETED_WIZARD_KEY: &str = "hasCompletedWizard";

/// App-level preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Fridge preselected by the add-item form.
    pub default_fridge_id: Option<FridgeId>,
    /// Whether the setup wizard has been completed at least once.
    pub has_completed_wizard: bool,
}

impl AppSettings {
    /// Whether the first-run wizard should be presented.
    pub fn should_show_wizard(&self) -> bool {
        !self.has_completed_wizard
    }
}
