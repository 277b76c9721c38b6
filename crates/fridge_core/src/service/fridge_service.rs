//! Fridge setup wizard and settings use-case service.
//!
//! # Responsibility
//! - Batch-create a fridge with generated shelves/drawers.
//! - Edit, delete and list fridges; manage the default fridge preference.
//!
//! # Invariants
//! - Shelf count is clamped to `1..=12`, drawer count to `0..=12`.
//! - Reconciling counts keeps existing locations (ids, names) and only adds
//!   or removes entries at the highest positions.
//! - Deleting the default fridge clears the preference; deleting all fridges
//!   also resets the wizard flag.
//! - A preference write that follows a committed fridge write never fails the
//!   call; it is logged with `warn!` instead.

use super::{normalize_name, ServiceError, ServiceResult};
use crate::model::fridge::{Drawer, Fridge, FridgeId, FridgeType, Shelf};
use crate::model::settings::AppSettings;
use crate::repo::fridge_repo::FridgeRepository;
use crate::repo::settings_repo::SettingsRepository;
use crate::repo::RepoError;
use log::{info, warn};

pub const MIN_SHELVES: u32 = 1;
pub const MAX_SHELVES: u32 = 12;
pub const MAX_DRAWERS: u32 = 12;
pub const DEFAULT_SHELF_COUNT: u32 = 3;
pub const DEFAULT_FRIDGE_NAME: &str = "My Fridge";

/// Wizard form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FridgeSetup {
    pub name: String,
    pub kind: FridgeType,
    pub shelf_count: u32,
    pub drawer_count: u32,
}

impl Default for FridgeSetup {
    fn default() -> Self {
        Self {
            name: DEFAULT_FRIDGE_NAME.to_string(),
            kind: FridgeType::Standard,
            shelf_count: DEFAULT_SHELF_COUNT,
            drawer_count: 0,
        }
    }
}

impl FridgeSetup {
    /// Prefills the form from an existing fridge (edit mode).
    pub fn from_fridge(fridge: &Fridge) -> Self {
        Self {
            name: fridge.name.clone(),
            kind: fridge.kind.clone(),
            shelf_count: u32::try_from(fridge.shelves.len()).unwrap_or(MAX_SHELVES),
            drawer_count: u32::try_from(fridge.drawers.len()).unwrap_or(MAX_DRAWERS),
        }
    }

    fn clamped_shelf_count(&self) -> usize {
        self.shelf_count.clamp(MIN_SHELVES, MAX_SHELVES) as usize
    }

    fn clamped_drawer_count(&self) -> usize {
        self.drawer_count.min(MAX_DRAWERS) as usize
    }
}

/// Wizard/settings service facade.
pub struct FridgeService<F: FridgeRepository, S: SettingsRepository> {
    fridges: F,
    settings: S,
}

impl<F: FridgeRepository, S: SettingsRepository> FridgeService<F, S> {
    pub fn new(fridges: F, settings: S) -> Self {
        Self { fridges, settings }
    }

    /// Creates a fridge with `Shelf N` / `Drawer N` locations.
    ///
    /// Marks the first-run wizard as completed.
    pub fn create_fridge(&self, setup: &FridgeSetup) -> ServiceResult<Fridge> {
        let name = normalize_name(setup.name.as_str())?;
        let mut fridge = Fridge::new(name, setup.kind.clone());
        reconcile_shelves(&mut fridge.shelves, setup.clamped_shelf_count());
        reconcile_drawers(&mut fridge.drawers, setup.clamped_drawer_count());

        self.fridges.create_fridge(&fridge)?;
        self.follow_up_settings("fridge_create", |settings| {
            !std::mem::replace(&mut settings.has_completed_wizard, true)
        });

        info!(
            "event=fridge_create module=service status=ok fridge_id={} shelves={} drawers={}",
            fridge.uuid,
            fridge.shelves.len(),
            fridge.drawers.len()
        );
        Ok(fridge)
    }

    /// Applies wizard edits to an existing fridge.
    pub fn update_fridge(&self, id: FridgeId, setup: &FridgeSetup) -> ServiceResult<Fridge> {
        let name = normalize_name(setup.name.as_str())?;
        let mut fridge = self.get_fridge(id)?;
        fridge.name = name;
        fridge.kind = setup.kind.clone();
        reconcile_shelves(&mut fridge.shelves, setup.clamped_shelf_count());
        reconcile_drawers(&mut fridge.drawers, setup.clamped_drawer_count());

        self.fridges
            .update_fridge(&fridge)
            .map_err(|err| not_found_as_fridge(err, id))?;

        info!(
            "event=fridge_update module=service status=ok fridge_id={} shelves={} drawers={}",
            fridge.uuid,
            fridge.shelves.len(),
            fridge.drawers.len()
        );
        Ok(fridge)
    }

    pub fn get_fridge(&self, id: FridgeId) -> ServiceResult<Fridge> {
        self.fridges
            .get_fridge(id)?
            .ok_or(ServiceError::FridgeNotFound(id))
    }

    /// Fridges in creation order, locations in position order.
    pub fn list_fridges(&self) -> ServiceResult<Vec<Fridge>> {
        Ok(self.fridges.list_fridges()?)
    }

    /// Deletes one fridge; item references to its locations become dangling.
    pub fn delete_fridge(&self, id: FridgeId) -> ServiceResult<()> {
        self.fridges
            .delete_fridge(id)
            .map_err(|err| not_found_as_fridge(err, id))?;

        self.follow_up_settings("fridge_delete", |settings| {
            if settings.default_fridge_id != Some(id) {
                return false;
            }
            settings.default_fridge_id = None;
            true
        });

        info!("event=fridge_delete module=service status=ok fridge_id={id}");
        Ok(())
    }

    /// Deletes every fridge and resets first-run state.
    pub fn delete_all_fridges(&self) -> ServiceResult<usize> {
        let removed = self.fridges.delete_all_fridges()?;
        self.follow_up_settings("fridge_delete_all", |settings| {
            *settings = AppSettings::default();
            true
        });

        info!("event=fridge_delete_all module=service status=ok removed={removed}");
        Ok(removed)
    }

    /// Stores the fridge preselected by the add-item form.
    pub fn set_default_fridge(&self, id: FridgeId) -> ServiceResult<()> {
        self.get_fridge(id)?;
        let mut settings = self.settings.load_settings()?;
        settings.default_fridge_id = Some(id);
        self.settings.save_settings(&settings)?;
        Ok(())
    }

    pub fn settings(&self) -> ServiceResult<AppSettings> {
        Ok(self.settings.load_settings()?)
    }

    /// Applies `change` to stored preferences and saves them when it returns
    /// `true`. Failures are logged, not returned.
    fn follow_up_settings(&self, op: &str, change: impl FnOnce(&mut AppSettings) -> bool) {
        let result = self.settings.load_settings().and_then(|mut settings| {
            if change(&mut settings) {
                self.settings.save_settings(&settings)
            } else {
                Ok(())
            }
        });
        if let Err(err) = result {
            warn!("event=settings_sync module=service status=error op={op} error={err}");
        }
    }
}

fn not_found_as_fridge(err: RepoError, id: FridgeId) -> ServiceError {
    match err {
        RepoError::NotFound(_) => ServiceError::FridgeNotFound(id),
        other => ServiceError::Repo(other),
    }
}

/// Grows or shrinks shelves to `count`, keeping the lowest positions.
fn reconcile_shelves(shelves: &mut Vec<Shelf>, count: usize) {
    shelves.sort_by_key(|shelf| shelf.position);
    shelves.truncate(count);
    while shelves.len() < count {
        let next = shelves.last().map_or(1, |shelf| shelf.position + 1);
        let label = shelves.len() + 1;
        shelves.push(Shelf::new(format!("Shelf {label}"), next));
    }
}

/// Grows or shrinks drawers to `count`, keeping the lowest positions.
fn reconcile_drawers(drawers: &mut Vec<Drawer>, count: usize) {
    drawers.sort_by_key(|drawer| drawer.position);
    drawers.truncate(count);
    while drawers.len() < count {
        let next = drawers.last().map_or(1, |drawer| drawer.position + 1);
        let label = drawers.len() + 1;
        drawers.push(Drawer::new(format!("Drawer {label}"), next));
    }
}
