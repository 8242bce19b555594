//! Entity store contracts and implementations.
//!
//! # Responsibility
//! - Own storage of Employee and Project records keyed by id.
//! - Isolate backend details (locks, SQL) from directory services.
//!
//! # Invariants
//! - Lookups on unknown ids return `StoreError::NotFound`, never defaults.
//! - Allocated ids are unique and never reused, even after deletion.
//! - Scans return records ordered by ascending id.
//! - Every write replaces a whole record atomically.

use crate::db::DbError;
use crate::model::employee::{Employee, EmployeeDraft};
use crate::model::project::{Project, ProjectDraft};
use crate::model::{EmployeeId, EntityKind, ProjectId};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub mod memory_store;
pub mod sqlite_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-level error shared by all entity store backends.
#[derive(Debug)]
pub enum StoreError {
    /// No record of `kind` has this id.
    NotFound { kind: EntityKind, id: i64 },
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// A writer panicked while holding the named lock.
    LockPoisoned(&'static str),
    /// Persisted data cannot be converted into a valid record.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
}

impl StoreError {
    pub fn not_found(kind: EntityKind, id: i64) -> Self {
        Self::NotFound { kind, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found with id: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::LockPoisoned(name) => write!(f, "entity store lock `{name}` is poisoned"),
            Self::InvalidData(message) => write!(f, "invalid persisted record: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "entity store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "entity store requires table `{table}`")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract consumed by the directory services.
///
/// `insert_*` allocates a fresh id; `save_*` writes the record under its own
/// id, inserting it when absent. `update_employee` only overwrites a record
/// that still exists and fails with `NotFound(Employee)` otherwise.
pub trait EntityStore: Send + Sync {
    fn get_employee(&self, id: EmployeeId) -> StoreResult<Employee>;
    fn list_employees(&self) -> StoreResult<Vec<Employee>>;
    fn insert_employee(&self, draft: &EmployeeDraft) -> StoreResult<Employee>;
    fn save_employee(&self, employee: &Employee) -> StoreResult<Employee>;
    fn update_employee(&self, employee: &Employee) -> StoreResult<Employee>;
    fn delete_employee(&self, id: EmployeeId) -> StoreResult<()>;
    /// Live reverse lookup: employees whose `project_id` equals `project_id`.
    fn find_employees_by_project(&self, project_id: ProjectId) -> StoreResult<Vec<Employee>>;

    fn get_project(&self, id: ProjectId) -> StoreResult<Project>;
    fn list_projects(&self) -> StoreResult<Vec<Project>>;
    fn insert_project(&self, draft: &ProjectDraft) -> StoreResult<Project>;
    fn save_project(&self, project: &Project) -> StoreResult<Project>;
}

macro_rules! forward_entity_store {
    () => {
        fn get_employee(&self, id: EmployeeId) -> StoreResult<Employee> {
            (**self).get_employee(id)
        }
        fn list_employees(&self) -> StoreResult<Vec<Employee>> {
            (**self).list_employees()
        }
        fn insert_employee(&self, draft: &EmployeeDraft) -> StoreResult<Employee> {
            (**self).insert_employee(draft)
        }
        fn save_employee(&self, employee: &Employee) -> StoreResult<Employee> {
            (**self).save_employee(employee)
        }
        fn update_employee(&self, employee: &Employee) -> StoreResult<Employee> {
            (**self).update_employee(employee)
        }
        fn delete_employee(&self, id: EmployeeId) -> StoreResult<()> {
            (**self).delete_employee(id)
        }
        fn find_employees_by_project(&self, project_id: ProjectId) -> StoreResult<Vec<Employee>> {
            (**self).find_employees_by_project(project_id)
        }
        fn get_project(&self, id: ProjectId) -> StoreResult<Project> {
            (**self).get_project(id)
        }
        fn list_projects(&self) -> StoreResult<Vec<Project>> {
            (**self).list_projects()
        }
        fn insert_project(&self, draft: &ProjectDraft) -> StoreResult<Project> {
            (**self).insert_project(draft)
        }
        fn save_project(&self, project: &Project) -> StoreResult<Project> {
            (**self).save_project(project)
        }
    };
}

impl<S: EntityStore + ?Sized> EntityStore for &S {
    forward_entity_store!();
}

impl<S: EntityStore + ?Sized> EntityStore for Arc<S> {
    forward_entity_store!();
}

impl<S: EntityStore + ?Sized> EntityStore for Box<S> {
    forward_entity_store!();
}
