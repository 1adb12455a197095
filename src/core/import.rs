//! One-shot spreadsheet migration into an empty registry.
//!
//! The import reads a CSV export once, maps its columns onto the record
//! shape through an explicit [`ColumnMap`], and appends each row through
//! the store's normal insert contract. It runs only when the registry is
//! currently empty; a non-empty registry makes the import a documented
//! skip, not an error. An unmapped required column is an explicit failure
//! that names the headers actually found.

use crate::core::error;
use crate::core::project::ProjectDraft;
use crate::core::store::ProjectStore;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maps canonical record fields to the source file's column headers.
///
/// Header matching is case-insensitive and ignores surrounding whitespace.
/// `owner` is the one optional mapping: when it is `None`, imported rows
/// get an empty owner; when it names a header, that header must exist.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ColumnMap {
    pub name: String,
    pub power_kw: String,
    pub location: String,
    pub owner: Option<String>,
}

impl Default for ColumnMap {
    /// Headers of the spreadsheet the registry was originally migrated from.
    fn default() -> Self {
        Self {
            name: "Nombre".to_string(),
            power_kw: "Potencia (kW)".to_string(),
            location: "Ubicacion".to_string(),
            owner: Some("Cliente".to_string()),
        }
    }
}

/// Result of an import attempt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The registry already held records; nothing was read or written.
    SkippedNotEmpty,
    /// All source rows were appended.
    Imported { rows: usize },
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

fn find_column(
    headers: &csv::StringRecord,
    wanted: &str,
) -> Option<usize> {
    let wanted = normalize_header(wanted);
    headers
        .iter()
        .position(|h| normalize_header(h) == wanted)
}

fn require_column(
    headers: &csv::StringRecord,
    wanted: &str,
) -> Result<usize, error::RegistryError> {
    find_column(headers, wanted).ok_or_else(|| {
        let found: Vec<&str> = headers.iter().map(str::trim).collect();
        error::RegistryError::ImportError(format!(
            "required column '{}' not found; columns present: [{}]",
            wanted,
            found.join(", ")
        ))
    })
}

/// Migrate `path` into the registry if, and only if, it is empty.
///
/// Rows are appended via the store's lenient insert; the import does not
/// re-apply the draft validity rules, so rows land exactly as exported.
pub fn import_csv(
    store: &ProjectStore,
    path: &Path,
    map: &ColumnMap,
) -> Result<ImportOutcome, error::RegistryError> {
    if store.count()? > 0 {
        return Ok(ImportOutcome::SkippedNotEmpty);
    }

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let name_idx = require_column(&headers, &map.name)?;
    let power_idx = require_column(&headers, &map.power_kw)?;
    let location_idx = require_column(&headers, &map.location)?;
    let owner_idx = match &map.owner {
        Some(header) => Some(require_column(&headers, header)?),
        None => None,
    };

    let mut rows = 0usize;
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();

        let power_raw = cell(power_idx);
        let power_kw: f64 = power_raw.parse().map_err(|_| {
            error::RegistryError::ImportError(format!(
                "row {}: cannot parse power_kw value '{}'",
                line + 1,
                power_raw
            ))
        })?;

        let draft = ProjectDraft {
            name: cell(name_idx),
            power_kw,
            location: cell(location_idx),
            owner: owner_idx.map(cell).unwrap_or_default(),
        };
        store.insert(&draft)?;
        rows += 1;
    }

    Ok(ImportOutcome::Imported { rows })
}
