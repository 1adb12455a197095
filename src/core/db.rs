use crate::core::error;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub fn db_connect(db_path: &str) -> Result<Connection, error::RegistryError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))
        .map_err(error::RegistryError::RusqliteError)?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
        .map_err(error::RegistryError::RusqliteError)?;
    conn.execute("PRAGMA foreign_keys=ON;", [])
        .map_err(error::RegistryError::RusqliteError)?;
    Ok(conn)
}

pub fn registry_db_path(root: &Path) -> PathBuf {
    root.join(crate::core::schemas::REGISTRY_DB_NAME)
}
