//! Directory use-case services.
//!
//! # Responsibility
//! - Orchestrate entity store calls into Employee and Project use-cases.
//! - Keep callers decoupled from storage backends.
//!
//! # Invariants
//! - Services hold no record copies between calls; every operation re-fetches.
//! - Not-found conditions are always surfaced as `DirectoryError::NotFound`.

pub mod employee_service;
pub mod error;
pub mod project_service;
