//! Employee directory use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points over Employee records.
//! - Validate editable fields before they reach the store.
//!
//! # Invariants
//! - `update` overwrites only `first_name`, `last_name` and `email`.
//! - `update` and `delete` confirm existence first and propagate `NotFound`
//!   unchanged.
//! - `update` never recreates an employee deleted while it was in flight.
//! - Deleting an employee never cascades; project membership is a live lookup.

use crate::model::employee::{Employee, EmployeeDraft};
use crate::model::EmployeeId;
use crate::repo::EntityStore;
use crate::service::error::{log_failure, DirectoryResult};
use log::info;

/// Employee directory facade over an entity store.
pub struct EmployeeService<S: EntityStore> {
    store: S,
}

impl<S: EntityStore> EmployeeService<S> {
    /// Creates a service using the provided store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates and stores a new, unassigned employee.
    ///
    /// Not idempotent: every successful call allocates a new id.
    pub fn create(&self, draft: &EmployeeDraft) -> DirectoryResult<Employee> {
        let result = self.create_inner(draft);
        match &result {
            Ok(employee) => info!(
                "event=employee_create module=service status=ok employee_id={}",
                employee.id
            ),
            Err(err) => log_failure("employee_create", err),
        }
        result
    }

    /// Returns every stored employee ordered by id.
    pub fn get_all(&self) -> DirectoryResult<Vec<Employee>> {
        self.store.list_employees().map_err(|err| {
            let err = err.into();
            log_failure("employee_list", &err);
            err
        })
    }

    /// Gets one employee or fails with `NotFound(Employee, id)`.
    pub fn get_by_id(&self, id: EmployeeId) -> DirectoryResult<Employee> {
        self.store.get_employee(id).map_err(|err| {
            let err = err.into();
            log_failure("employee_get", &err);
            err
        })
    }

    /// Replaces the editable fields of an existing employee.
    ///
    /// `project_id` is carried over from the stored record untouched. Fails
    /// with `NotFound(Employee, id)` when the record is deleted before the
    /// write lands.
    pub fn update(&self, id: EmployeeId, patch: &EmployeeDraft) -> DirectoryResult<Employee> {
        let result = self.update_inner(id, patch);
        match &result {
            Ok(_) => info!("event=employee_update module=service status=ok employee_id={id}"),
            Err(err) => log_failure("employee_update", err),
        }
        result
    }

    /// Removes an existing employee.
    pub fn delete(&self, id: EmployeeId) -> DirectoryResult<()> {
        let result = self.delete_inner(id);
        match &result {
            Ok(()) => info!("event=employee_delete module=service status=ok employee_id={id}"),
            Err(err) => log_failure("employee_delete", err),
        }
        result
    }

    fn create_inner(&self, draft: &EmployeeDraft) -> DirectoryResult<Employee> {
        draft.validate()?;
        Ok(self.store.insert_employee(draft)?)
    }

    fn update_inner(&self, id: EmployeeId, patch: &EmployeeDraft) -> DirectoryResult<Employee> {
        let mut existing = self.store.get_employee(id)?;
        patch.validate()?;

        existing.apply_patch(patch);
        Ok(self.store.update_employee(&existing)?)
    }

    fn delete_inner(&self, id: EmployeeId) -> DirectoryResult<()> {
        self.store.get_employee(id)?;
        Ok(self.store.delete_employee(id)?)
    }
}
