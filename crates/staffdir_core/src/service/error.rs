//! Error surface shared by the directory services.

use crate::model::employee::EmployeeValidationError;
use crate::model::EntityKind;
use crate::repo::StoreError;
use log::{error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Failure kinds observable by directory service callers.
#[derive(Debug)]
pub enum DirectoryError {
    /// Referenced id has no record of `kind`. Maps to "404" at a boundary.
    NotFound { kind: EntityKind, id: i64 },
    /// Required employee field failed validation.
    Validation(EmployeeValidationError),
    /// Opaque storage failure; never retried by the core.
    Store(StoreError),
}

impl DirectoryError {
    pub fn not_found(kind: EntityKind, id: i64) -> Self {
        Self::NotFound { kind, id }
    }

    /// Returns `(kind, id)` for not-found errors.
    pub fn missing_entity(&self) -> Option<(EntityKind, i64)> {
        match self {
            Self::NotFound { kind, id } => Some((*kind, *id)),
            _ => None,
        }
    }
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found with id: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "entity store failure: {err}"),
        }
    }
}

impl Error for DirectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for DirectoryError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound { kind, id } => Self::NotFound { kind, id },
            other => Self::Store(other),
        }
    }
}

impl From<EmployeeValidationError> for DirectoryError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Emits one diagnostic event for a failed service operation.
///
/// Caller-recoverable failures log at `warn`; storage failures at `error`.
pub(crate) fn log_failure(event: &str, err: &DirectoryError) {
    match err {
        DirectoryError::NotFound { kind, id } => warn!(
            "event={event} module=service status=not_found kind={kind} id={id}"
        ),
        DirectoryError::Validation(err) => warn!(
            "event={event} module=service status=invalid field={}",
            err.field
        ),
        DirectoryError::Store(err) => error!(
            "event={event} module=service status=error error_code=store_failure error={err}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::DirectoryError;
    use crate::model::EntityKind;
    use crate::repo::StoreError;
    use std::error::Error;

    #[test]
    fn store_not_found_is_lifted_to_directory_not_found() {
        let err: DirectoryError = StoreError::not_found(EntityKind::Project, 4).into();
        assert_eq!(err.missing_entity(), Some((EntityKind::Project, 4)));
        assert_eq!(err.to_string(), "Project not found with id: 4");
        assert!(err.source().is_none());
    }

    #[test]
    fn other_store_errors_stay_opaque() {
        let err: DirectoryError = StoreError::LockPoisoned("memory_store.tables").into();
        assert!(matches!(err, DirectoryError::Store(_)));
        assert!(err.missing_entity().is_none());
        assert!(err.source().is_some());
    }
}
