//! Database schema definitions for the registry.
//!
//! One SQLite database holds the whole system: the `proyectos` relation
//! (the sole persisted entity) plus a `meta` table used for idempotent
//! schema versioning.

pub const REGISTRY_DB_NAME: &str = "solreg.db";

pub const REGISTRY_SCHEMA_VERSION: u32 = 1;

pub const REGISTRY_DB_SCHEMA_META: &str = "
    CREATE TABLE IF NOT EXISTS meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )
";

// AUTOINCREMENT keeps ids strictly increasing for the lifetime of the
// file, even across out-of-band administrative row removal.
pub const REGISTRY_DB_SCHEMA_PROJECTS: &str = "
    CREATE TABLE IF NOT EXISTS proyectos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        power_kw REAL NOT NULL,
        location TEXT NOT NULL,
        owner TEXT NOT NULL DEFAULT ''
    )
";

pub const REGISTRY_DB_SCHEMA_INDEX_LOCATION: &str =
    "CREATE INDEX IF NOT EXISTS idx_proyectos_location ON proyectos(location)";
