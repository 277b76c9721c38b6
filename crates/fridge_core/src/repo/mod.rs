//! Persistence gateway for fridges, items and preferences.
//!
//! # Responsibility
//! - One trait per aggregate, each backed by a `Sqlite*Repository` over a
//!   borrowed connection.
//! - Keep SQL out of the service layer.
//!
//! # Invariants
//! - Models are validated before any row is written.
//! - Missing targets surface as `NotFound`, never as a silent no-op.
//! - Malformed rows surface as `InvalidData`.

pub mod fridge_repo;
pub mod item_repo;
pub mod settings_repo;

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::ModelValidationError;
use rusqlite::Connection;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Db(DbError),
    NotFound(Uuid),
    /// A stored row does not decode into a model.
    InvalidData(String),
    /// The connection skipped `db::open_db*`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_)
            | Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Rejects connections that were not opened through `db::open_db*`.
fn ensure_connection_ready(conn: &Connection, tables: &[&'static str]) -> RepoResult<()> {
    let latest = latest_version();
    let found = schema_version(conn)?;
    if found != latest {
        return Err(RepoError::UninitializedConnection {
            expected_version: latest,
            actual_version: found,
        });
    }

    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table';")?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<HashSet<_>, _>>()?;
    match tables.iter().find(|table| !present.contains(**table)) {
        Some(table) => Err(RepoError::MissingRequiredTable(*table)),
        None => Ok(()),
    }
}

fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

fn parse_optional_uuid(value: Option<String>, column: &str) -> RepoResult<Option<Uuid>> {
    match value {
        Some(text) => parse_uuid(&text, column).map(Some),
        None => Ok(None),
    }
}
