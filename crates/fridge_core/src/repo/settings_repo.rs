//! Preference repository backed by the `preferences` key/value table.
//!
//! # Invariants
//! - Missing keys read as defaults.
//! - Malformed values degrade to defaults with a warning instead of failing
//!   the caller.

use super::{ensure_connection_ready, RepoResult};
use crate::model::settings::{AppSettings, DEFAULT_FRIDGE_ID_KEY, HAS_COMPLETED_WIZARD_KEY};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use uuid::Uuid;

/// Repository interface for app preferences.
pub trait SettingsRepository {
    fn load_settings(&self) -> RepoResult<AppSettings>;
    fn save_settings(&self, settings: &AppSettings) -> RepoResult<()>;
}

/// SQLite-backed preference repository.
pub struct SqliteSettingsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettingsRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["preferences"])?;
        Ok(Self { conn })
    }

    fn read_value(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }
}

impl SettingsRepository for SqliteSettingsRepository<'_> {
    fn load_settings(&self) -> RepoResult<AppSettings> {
        let default_fridge_id = match self.read_value(DEFAULT_FRIDGE_ID_KEY)? {
            Some(raw) => match Uuid::parse_str(raw.trim()) {
                Ok(id) if !id.is_nil() => Some(id),
                _ => {
                    warn!(
                        "event=settings_load module=repo status=degraded key={} reason=invalid_uuid",
                        DEFAULT_FRIDGE_ID_KEY
                    );
                    None
                }
            },
            None => None,
        };

        let has_completed_wizard = match self.read_value(HAS_COMPLETED_WIZARD_KEY)?.as_deref() {
            Some("true") | Some("1") => true,
            Some("false") | Some("0") | None => false,
            Some(_) => {
                warn!(
                    "event=settings_load module=repo status=degraded key={} reason=invalid_bool",
                    HAS_COMPLETED_WIZARD_KEY
                );
                false
            }
        };

        Ok(AppSettings {
            default_fridge_id,
            has_completed_wizard,
        })
    }

    fn save_settings(&self, settings: &AppSettings) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        match settings.default_fridge_id {
            Some(id) => {
                tx.execute(
                    "INSERT INTO preferences (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
                    params![DEFAULT_FRIDGE_ID_KEY, id.to_string()],
                )?;
            }
            None => {
                tx.execute(
                    "DELETE FROM preferences WHERE key = ?1;",
                    [DEFAULT_FRIDGE_ID_KEY],
                )?;
            }
        }
        tx.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![
                HAS_COMPLETED_WIZARD_KEY,
                if settings.has_completed_wizard { "true" } else { "false" },
            ],
        )?;
        tx.commit()?;
        Ok(())
    }
}
