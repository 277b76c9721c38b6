//! Fridge inventory domain model.
//!
//! # Responsibility
//! - Define the canonical fridge/shelf/drawer/item records used by core logic.
//! - Keep location references id-based so dangling references stay harmless.
//!
//! # Invariants
//! - Every entity is identified by a stable, non-nil UUID.
//! - An item is located on a shelf, in a drawer, or nowhere; never both.
//! - Timestamps are Unix epoch milliseconds (UTC).

pub mod fridge;
pub mod item;
pub mod settings;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Milliseconds in one day, used for expiration thresholds and form defaults.
pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Returns current wall clock time as Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Validation errors raised by model constructors and persistence guards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Entity id is the nil UUID.
    NilUuid,
    /// Location reference points at the nil UUID.
    NilLocationId,
    /// Shelf/drawer position is negative.
    NegativePosition(i64),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "uuid must not be nil"),
            Self::NilLocationId => write!(f, "location id must not be nil"),
            Self::NegativePosition(value) => {
                write!(f, "position must be >= 0, got {value}")
            }
        }
    }
}

impl Error for ModelValidationError {}
