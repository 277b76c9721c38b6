//! Expiration urgency classification.
//!
//! Buckets overlap, so classification is evaluated in fixed precedence:
//! expired long ago, expired, expires within a day, within two days, later.
//! Day thresholds are inclusive (`<=`); only the "already expired" check is
//! strict (`<`).

use crate::model::item::FridgeItem;
use crate::model::MILLIS_PER_DAY;
use serde::{Deserialize, Serialize};

/// Days after which an expired item is rendered with a filled background.
const LONG_EXPIRED_DAYS: i64 = 3;
/// Window used by the "urgent only" filter.
const URGENT_WINDOW_DAYS: i64 = 2;

/// Urgency bucket for one item, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpirationStatus {
    /// Expired three or more days ago.
    ExpiredLong,
    /// Expired, but less than three days ago.
    ExpiredRecent,
    /// Expires within one day.
    ExpiresTomorrow,
    /// Expires within two days.
    ExpiresSoon,
    /// Expires later than two days from now.
    ExpiresLater,
}

impl ExpirationStatus {
    /// Classifies an expiration timestamp relative to `now` (both epoch ms).
    pub fn classify(expiration_date: i64, now: i64) -> Self {
        if expiration_date <= now.saturating_sub(LONG_EXPIRED_DAYS * MILLIS_PER_DAY) {
            Self::ExpiredLong
        } else if expiration_date < now {
            Self::ExpiredRecent
        } else if expiration_date <= now.saturating_add(MILLIS_PER_DAY) {
            Self::ExpiresTomorrow
        } else if expiration_date <= now.saturating_add(URGENT_WINDOW_DAYS * MILLIS_PER_DAY) {
            Self::ExpiresSoon
        } else {
            Self::ExpiresLater
        }
    }

    /// Symbol name rendered next to the item.
    pub fn icon(self) -> &'static str {
        match self {
            Self::ExpiredLong => "xmark.octagon.fill",
            Self::ExpiredRecent => "exclamationmark.triangle.fill",
            Self::ExpiresTomorrow => "exclamationmark.circle.fill",
            Self::ExpiresSoon => "clock.fill",
            Self::ExpiresLater => "checkmark.circle",
        }
    }

    /// 4 for the most severe bucket down to 0 for the least.
    pub fn severity(self) -> u8 {
        match self {
            Self::ExpiredLong => 4,
            Self::ExpiredRecent => 3,
            Self::ExpiresTomorrow => 2,
            Self::ExpiresSoon => 1,
            Self::ExpiresLater => 0,
        }
    }

    /// Whether the row is rendered with a filled background.
    pub fn has_background(self) -> bool {
        matches!(self, Self::ExpiredLong)
    }

    /// Stable wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExpiredLong => "expired_long",
            Self::ExpiredRecent => "expired_recent",
            Self::ExpiresTomorrow => "expires_tomorrow",
            Self::ExpiresSoon => "expires_soon",
            Self::ExpiresLater => "expires_later",
        }
    }
}

pub fn expiration_status(item: &FridgeItem, now: i64) -> ExpirationStatus {
    ExpirationStatus::classify(item.expiration_date, now)
}

/// Sole predicate behind the "urgent items only" filter.
pub fn is_expiring_within_two_days(item: &FridgeItem, now: i64) -> bool {
    item.expiration_date <= now.saturating_add(URGENT_WINDOW_DAYS * MILLIS_PER_DAY)
}
