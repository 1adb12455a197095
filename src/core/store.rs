//! The record store: durable persistence and retrieval of project records.
//!
//! A [`ProjectStore`] is an explicitly owned handle, constructed once at
//! process start and passed into every interaction handler. There is no
//! ambient global connection.
//!
//! The store is deliberately lenient: it performs no validation on insert
//! (see [`crate::core::project::ProjectDraft::validate`] for the caller-side
//! boundary) and its only anticipated failure is the backing storage being
//! unreachable, which surfaces unmodified.

use crate::core::db;
use crate::core::error;
use crate::core::project::{Project, ProjectDraft};
use crate::core::schemas;
use clap::ValueEnum;
use rusqlite::{Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Row ordering for [`ProjectStore::fetch_all`].
///
/// Which order the dashboard wants has changed over time, so the store
/// takes it as an explicit parameter instead of baking one in.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum FetchOrder {
    /// Ascending id, oldest record first.
    Insertion,
    /// Descending id, most recent record first.
    NewestFirst,
}

pub struct ProjectStore {
    conn: Connection,
}

impl ProjectStore {
    /// Open (or create) the registry database at `db_path`.
    ///
    /// Applies the standard connection pragmas (WAL, busy timeout,
    /// foreign keys). The schema is not touched here; call
    /// [`ProjectStore::initialize`] once per process start.
    pub fn open(db_path: &Path) -> Result<Self, error::RegistryError> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                error::RegistryError::DatabaseInitializationError(format!(
                    "cannot create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        let conn = db::db_connect(&db_path.to_string_lossy())?;
        Ok(Self { conn })
    }

    /// Ensure the backing relation exists with the current schema.
    ///
    /// Idempotent: safe to call on every process start. Existing rows are
    /// never touched. Versioned through `meta.schema_version` so future
    /// schema evolution stays a no-op on already-current databases.
    pub fn initialize(&self) -> Result<(), error::RegistryError> {
        self.conn.execute(schemas::REGISTRY_DB_SCHEMA_META, [])?;

        let current: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'schema_version'",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(error::RegistryError::RusqliteError)?;

        let current_version: u32 = current
            .as_deref()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(0);

        if current_version >= schemas::REGISTRY_SCHEMA_VERSION {
            return Ok(());
        }

        self.conn.execute(schemas::REGISTRY_DB_SCHEMA_PROJECTS, [])?;
        self.conn
            .execute(schemas::REGISTRY_DB_SCHEMA_INDEX_LOCATION, [])?;
        self.conn.execute(
            "INSERT OR REPLACE INTO meta(key, value) VALUES('schema_version', ?1)",
            rusqlite::params![schemas::REGISTRY_SCHEMA_VERSION.to_string()],
        )?;

        Ok(())
    }

    /// Append one record, assigning it the next id.
    ///
    /// No validation happens here. The write is committed before this
    /// returns; callers that need the assigned id re-fetch.
    pub fn insert(&self, draft: &ProjectDraft) -> Result<(), error::RegistryError> {
        self.conn.execute(
            "INSERT INTO proyectos(name, power_kw, location, owner) VALUES(?1, ?2, ?3, ?4)",
            rusqlite::params![draft.name, draft.power_kw, draft.location, draft.owner],
        )?;
        Ok(())
    }

    /// Return every stored record. An empty registry yields an empty vec.
    pub fn fetch_all(&self, order: FetchOrder) -> Result<Vec<Project>, error::RegistryError> {
        let query = match order {
            FetchOrder::Insertion => {
                "SELECT id, name, power_kw, location, owner FROM proyectos ORDER BY id ASC"
            }
            FetchOrder::NewestFirst => {
                "SELECT id, name, power_kw, location, owner FROM proyectos ORDER BY id DESC"
            }
        };

        let mut stmt = self.conn.prepare(query)?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(Project {
                id: row.get(0)?,
                name: row.get(1)?,
                power_kw: row.get(2)?,
                location: row.get(3)?,
                owner: row.get(4)?,
            });
        }
        Ok(out)
    }

    /// Number of stored records. The bulk-import emptiness gate sits on this.
    pub fn count(&self) -> Result<u64, error::RegistryError> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM proyectos", [], |row| row.get(0))?;
        Ok(n as u64)
    }
}

/// Sum of `power_kw` grouped by `location`, over whatever rows the caller
/// fetched. Pure function of its input.
pub fn aggregate_by_location(rows: &[Project]) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for row in rows {
        *totals.entry(row.location.clone()).or_insert(0.0) += row.power_kw;
    }
    totals
}
