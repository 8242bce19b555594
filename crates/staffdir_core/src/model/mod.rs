//! Domain records for the employee/project directory.
//!
//! # Responsibility
//! - Define the canonical Employee and Project shapes used by store and services.
//! - Name the entity kinds that not-found errors refer to.
//!
//! # Invariants
//! - Ids are allocated by the store and never reused.
//! - Relationships are expressed by id (`Employee::project_id`), never by
//!   embedded records.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub mod employee;
pub mod project;

/// Store-allocated employee identifier.
pub type EmployeeId = i64;

/// Store-allocated project identifier.
pub type ProjectId = i64;

/// Record kind owned by the entity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Employee,
    Project,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::Project => "Project",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
