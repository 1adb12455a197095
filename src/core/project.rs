//! Record types for the project registry.
//!
//! The store persists whatever it is handed; validity rules live in
//! [`ProjectDraft::validate`] so the caller/store split is an explicit,
//! typed boundary instead of caller discipline.

use crate::core::error;
use serde::{Deserialize, Serialize};

/// One persisted row of the `proyectos` relation.
///
/// `id` is assigned by the store on insert and never changes. Rows are
/// never updated or deleted by the application; the registry is an
/// append-only log of projects.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub power_kw: f64,
    pub location: String,
    pub owner: String,
}

/// The pre-insert shape of a record: everything except the store-assigned id.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProjectDraft {
    pub name: String,
    pub power_kw: f64,
    pub location: String,
    pub owner: String,
}

impl ProjectDraft {
    /// Check the validity rules a record should satisfy before insert.
    ///
    /// The store itself never rejects a draft; a caller that skips this
    /// step gets its garbage durably stored. The error message names
    /// every violated rule, not just the first.
    pub fn validate(&self) -> Result<(), error::RegistryError> {
        let mut problems = Vec::new();
        if self.name.trim().is_empty() {
            problems.push("name must not be empty".to_string());
        }
        // `!(x > 0)` also rejects NaN.
        if !(self.power_kw > 0.0) {
            problems.push(format!(
                "power_kw must be greater than zero (got {})",
                self.power_kw
            ));
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(error::RegistryError::ValidationError(problems.join("; ")))
        }
    }
}
