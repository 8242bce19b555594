//! Employee domain model.
//!
//! # Responsibility
//! - Define the stored employee record and its editable draft.
//! - Validate the required contact fields before they reach the store.
//!
//! # Invariants
//! - `first_name`, `last_name` and `email` are non-empty. Their content is
//!   stored as given.
//! - `project_id` is changed only by the assignment path.

use crate::model::{EmployeeId, ProjectId};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stored employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// `None` means the employee is not assigned to any project.
    pub project_id: Option<ProjectId>,
}

impl Employee {
    /// Builds a stored record from a draft and a store-allocated id.
    ///
    /// New employees always start unassigned.
    pub fn from_draft(id: EmployeeId, draft: &EmployeeDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            project_id: None,
        }
    }

    /// Overwrites the editable fields from `patch`, keeping id and assignment.
    pub fn apply_patch(&mut self, patch: &EmployeeDraft) {
        self.first_name = patch.first_name.clone();
        self.last_name = patch.last_name.clone();
        self.email = patch.email.clone();
    }

    /// Returns the editable fields of this record.
    pub fn draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.project_id.is_some()
    }
}

/// Editable employee fields.
///
/// Used both as the `create` input and as the full-replacement `update` patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl EmployeeDraft {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Validates required fields.
    ///
    /// # Errors
    /// - Returns the first failing field in declaration order.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        require_non_empty("firstName", &self.first_name)?;
        require_non_empty("lastName", &self.last_name)?;
        require_non_empty("email", &self.email)
    }
}

/// Validation failure for one employee field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeValidationError {
    /// External (camelCase) field name.
    pub field: &'static str,
    pub reason: &'static str,
}

impl EmployeeValidationError {
    fn new(field: &'static str, reason: &'static str) -> Self {
        Self { field, reason }
    }
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid employee field `{}`: {}", self.field, self.reason)
    }
}

impl Error for EmployeeValidationError {}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), EmployeeValidationError> {
    if value.is_empty() {
        return Err(EmployeeValidationError::new(field, "must not be empty"));
    }
    Ok(())
}
