//! Plain-text inventory summary for share/mail export.
//!
//! Layout per fridge:
//!
//! ```text
//! Fridge: <name>
//!   <section>:
//!     - <item> | <location> | Expires: <YYYY-MM-DD> | Added: <YYYY-MM-DD HH:MM>
//! ```
//!
//! Fridges are separated by one blank line. Dates are rendered in UTC.

use super::sections::ItemFilter;
use super::snapshot::InventorySnapshot;
use crate::model::item::FridgeItem;
use chrono::{DateTime, Utc};

/// Returned when no item passes the active filter.
pub const NO_MATCHING_ITEMS_MESSAGE: &str = "No items match the current filter.";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

impl InventorySnapshot {
    /// Renders the grouped view, or a flat fallback list when grouping yields
    /// no sections.
    pub fn compose_summary(&self, filter: ItemFilter) -> String {
        let groups = self.grouped_sections(filter);

        if groups.is_empty() {
            let items = self.filtered_items(filter);
            if items.is_empty() {
                return NO_MATCHING_ITEMS_MESSAGE.to_string();
            }
            let mut out = String::new();
            for item in items {
                out.push_str(&format!("- {}\n", self.summary_line(item)));
            }
            return out;
        }

        let mut out = String::new();
        for (position, group) in groups.iter().enumerate() {
            if position > 0 {
                out.push('\n');
            }
            out.push_str(&format!("Fridge: {}\n", group.fridge.name));
            for section in &group.sections {
                out.push_str(&format!("  {}:\n", section.header.label()));
                for item in &section.items {
                    out.push_str(&format!("    - {}\n", self.summary_line(item)));
                }
            }
        }
        out
    }

    /// `<name> | <location> | Expires: <date> | Added: <timestamp>`.
    pub fn summary_line(&self, item: &FridgeItem) -> String {
        format!(
            "{} | {} | Expires: {} | Added: {}",
            item.display_name(),
            self.location_display(item),
            format_epoch_ms(item.expiration_date, DATE_FORMAT),
            format_epoch_ms(item.created_at, TIMESTAMP_FORMAT),
        )
    }
}

/// Formats epoch milliseconds in UTC, falling back to the raw value when it
/// is outside chrono's representable range.
pub fn format_epoch_ms(epoch_ms: i64, format: &str) -> String {
    match DateTime::<Utc>::from_timestamp_millis(epoch_ms) {
        Some(value) => value.format(format).to_string(),
        None => epoch_ms.to_string(),
    }
}

/// Calendar date (`YYYY-MM-DD`, UTC) used for expiration dates.
pub fn format_date(epoch_ms: i64) -> String {
    format_epoch_ms(epoch_ms, DATE_FORMAT)
}

/// Date and minute (`YYYY-MM-DD HH:MM`, UTC) used for added timestamps.
pub fn format_timestamp(epoch_ms: i64) -> String {
    format_epoch_ms(epoch_ms, TIMESTAMP_FORMAT)
}
