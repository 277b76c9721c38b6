//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into wizard, settings and item-form flows.
//! - Keep UI/FFI layers decoupled from storage details.
//!
//! # Invariants
//! - Blank fridge/item names are rejected before any write.
//! - Preferences are passed in through a `SettingsRepository`, never read from
//!   ambient global state.

pub mod fridge_service;
pub mod item_service;
pub mod selection;

use crate::model::fridge::FridgeId;
use crate::model::item::ItemId;
use crate::model::ModelValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from fridge and item use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Name is blank after trim.
    InvalidName,
    /// Target fridge does not exist.
    FridgeNotFound(FridgeId),
    /// Target item does not exist.
    ItemNotFound(ItemId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "Invalid Input: name must not be blank"),
            Self::FridgeNotFound(id) => write!(f, "fridge not found: {id}"),
            Self::ItemNotFound(id) => write!(f, "item not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ModelValidationError> for ServiceError {
    fn from(value: ModelValidationError) -> Self {
        Self::Repo(RepoError::Validation(value))
    }
}

fn normalize_name(value: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidName);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{normalize_name, ServiceError};
    use crate::model::ModelValidationError;
    use crate::repo::RepoError;

    #[test]
    fn model_validation_maps_to_repo_validation() {
        let err = ServiceError::from(ModelValidationError::NilUuid);
        assert!(matches!(
            err,
            ServiceError::Repo(RepoError::Validation(ModelValidationError::NilUuid))
        ));
    }

    #[test]
    fn names_are_trimmed_and_blank_rejected() {
        assert_eq!(normalize_name("  Milk ").unwrap(), "Milk");
        assert!(matches!(normalize_name(" \t "), Err(ServiceError::InvalidName)));
    }
}
