//! Employee/project directory core.
//! This crate owns the relationship invariants between employees and projects.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{open_store, CoreConfig, StorageBackend};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::employee::{Employee, EmployeeDraft, EmployeeValidationError};
pub use model::project::{Project, ProjectDraft};
pub use model::{EmployeeId, EntityKind, ProjectId};
pub use repo::memory_store::InMemoryEntityStore;
pub use repo::sqlite_store::SqliteEntityStore;
pub use repo::{EntityStore, StoreError, StoreResult};
pub use service::employee_service::EmployeeService;
pub use service::error::{DirectoryError, DirectoryResult};
pub use service::project_service::ProjectService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
