//! Fridge, shelf and drawer domain model.
//!
//! # Responsibility
//! - Define the fridge aggregate and its owned storage locations.
//! - Provide position-ordered views over shelves and drawers.
//!
//! # Invariants
//! - Shelves and drawers are owned by exactly one fridge (composition).
//! - Display order inside a fridge is `position ASC`, stable for ties.

use super::{now_epoch_ms, ModelValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type FridgeId = Uuid;
pub type ShelfId = Uuid;
pub type DrawerId = Uuid;

/// Fridge category shown in the setup wizard picker.
///
/// Serialized as its display label so new labels can be stored without a
/// schema change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FridgeType {
    Standard,
    Mini,
    DoubleDoor,
    Smart,
    /// Free-form label not known to this build.
    Other(String),
}

impl FridgeType {
    /// Built-in types in wizard picker order.
    pub const ALL_STANDARD: [FridgeType; 4] = [
        FridgeType::Standard,
        FridgeType::Mini,
        FridgeType::DoubleDoor,
        FridgeType::Smart,
    ];

    pub fn label(&self) -> &str {
        match self {
            Self::Standard => "Standard",
            Self::Mini => "Mini",
            Self::DoubleDoor => "Double Door",
            Self::Smart => "Smart",
            Self::Other(label) => label.as_str(),
        }
    }

    /// Parses a display label. Blank input falls back to `Standard`.
    pub fn from_label(value: &str) -> Self {
        match value.trim() {
            "" | "Standard" => Self::Standard,
            "Mini" => Self::Mini,
            "Double Door" => Self::DoubleDoor,
            "Smart" => Self::Smart,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Default for FridgeType {
    fn default() -> Self {
        Self::Standard
    }
}

impl Display for FridgeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for FridgeType {
    fn from(value: String) -> Self {
        Self::from_label(value.as_str())
    }
}

impl From<FridgeType> for String {
    fn from(value: FridgeType) -> Self {
        value.label().to_string()
    }
}

/// Named shelf inside one fridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shelf {
    pub uuid: ShelfId,
    pub name: String,
    /// Display order within the owning fridge.
    pub position: i64,
}

impl Shelf {
    pub fn new(name: impl Into<String>, position: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            position,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_slot(self.uuid, self.position)
    }
}

/// Named drawer inside one fridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawer {
    pub uuid: DrawerId,
    pub name: String,
    /// Display order within the owning fridge.
    pub position: i64,
}

impl Drawer {
    pub fn new(name: impl Into<String>, position: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            position,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_slot(self.uuid, self.position)
    }
}

/// A modeled physical refrigerator and the locations it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fridge {
    pub uuid: FridgeId,
    pub name: String,
    /// Serialized as `type` to match the preference/export naming.
    #[serde(rename = "type")]
    pub kind: FridgeType,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub shelves: Vec<Shelf>,
    pub drawers: Vec<Drawer>,
}

impl Fridge {
    /// Creates an empty fridge with a generated id and current timestamp.
    pub fn new(name: impl Into<String>, kind: FridgeType) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            kind,
            created_at: now_epoch_ms(),
            shelves: Vec::new(),
            drawers: Vec::new(),
        }
    }

    /// Creates a fridge with a caller-provided id.
    ///
    /// # Errors
    /// - Returns `NilUuid` when `uuid` is nil.
    pub fn with_id(
        uuid: FridgeId,
        name: impl Into<String>,
        kind: FridgeType,
        created_at: i64,
    ) -> Result<Self, ModelValidationError> {
        if uuid.is_nil() {
            return Err(ModelValidationError::NilUuid);
        }
        Ok(Self {
            uuid,
            name: name.into(),
            kind,
            created_at,
            shelves: Vec::new(),
            drawers: Vec::new(),
        })
    }

    /// Validates the fridge and every owned location.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.uuid.is_nil() {
            return Err(ModelValidationError::NilUuid);
        }
        for shelf in &self.shelves {
            shelf.validate()?;
        }
        for drawer in &self.drawers {
            drawer.validate()?;
        }
        Ok(())
    }

    /// Shelves sorted by `position`, stable for equal positions.
    pub fn shelves_in_order(&self) -> Vec<&Shelf> {
        let mut shelves = self.shelves.iter().collect::<Vec<_>>();
        shelves.sort_by_key(|shelf| shelf.position);
        shelves
    }

    /// Drawers sorted by `position`, stable for equal positions.
    pub fn drawers_in_order(&self) -> Vec<&Drawer> {
        let mut drawers = self.drawers.iter().collect::<Vec<_>>();
        drawers.sort_by_key(|drawer| drawer.position);
        drawers
    }

    pub fn shelf(&self, id: ShelfId) -> Option<&Shelf> {
        self.shelves.iter().find(|shelf| shelf.uuid == id)
    }

    pub fn drawer(&self, id: DrawerId) -> Option<&Drawer> {
        self.drawers.iter().find(|drawer| drawer.uuid == id)
    }
}

fn validate_slot(uuid: Uuid, position: i64) -> Result<(), ModelValidationError> {
    if uuid.is_nil() {
        return Err(ModelValidationError::NilUuid);
    }
    if position < 0 {
        return Err(ModelValidationError::NegativePosition(position));
    }
    Ok(())
}
