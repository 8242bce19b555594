//! Project directory use-case service.
//!
//! # Responsibility
//! - Provide create/read APIs over Project records.
//! - Maintain the employee-to-project relationship through `assign` and
//!   `unassign`.
//!
//! # Invariants
//! - `assign` resolves the employee first, then the project, on every call.
//! - `assign` writes only the employee record; the project is read-only there.
//! - An employee's `project_id`, when set through this service, references an
//!   existing project.
//! - Project membership is derived live from employee records; no counters or
//!   member lists are stored on the project.
//! - Assignment writes never recreate an employee deleted in the meantime.

use crate::model::employee::Employee;
use crate::model::project::{Project, ProjectDraft};
use crate::model::{EmployeeId, ProjectId};
use crate::repo::EntityStore;
use crate::service::error::{log_failure, DirectoryResult};
use log::info;

/// Project directory facade over an entity store.
pub struct ProjectService<S: EntityStore> {
    store: S,
}

impl<S: EntityStore> ProjectService<S> {
    /// Creates a service using the provided store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stores a new project and returns it with its allocated id.
    pub fn create(&self, draft: &ProjectDraft) -> DirectoryResult<Project> {
        let result: DirectoryResult<Project> =
            self.store.insert_project(draft).map_err(Into::into);
        match &result {
            Ok(project) => info!(
                "event=project_create module=service status=ok project_id={}",
                project.id
            ),
            Err(err) => log_failure("project_create", err),
        }
        result
    }

    /// Gets one project or fails with `NotFound(Project, id)`.
    pub fn get_by_id(&self, id: ProjectId) -> DirectoryResult<Project> {
        self.store.get_project(id).map_err(|err| {
            let err = err.into();
            log_failure("project_get", &err);
            err
        })
    }

    /// Returns every stored project ordered by id.
    pub fn get_all(&self) -> DirectoryResult<Vec<Project>> {
        self.store.list_projects().map_err(|err| {
            let err = err.into();
            log_failure("project_list", &err);
            err
        })
    }

    /// Lists the employees currently assigned to `project_id`.
    ///
    /// # Errors
    /// - `NotFound(Project, project_id)` when the project does not exist, even
    ///   if no employee references it.
    pub fn employees_by_project(&self, project_id: ProjectId) -> DirectoryResult<Vec<Employee>> {
        let result = self.employees_by_project_inner(project_id);
        if let Err(err) = &result {
            log_failure("project_members", err);
        }
        result
    }

    /// Assigns an employee to a project, moving it off any prior project.
    ///
    /// Returns the target project unchanged.
    ///
    /// # Errors
    /// - `NotFound(Employee, employee_id)` when the employee does not exist or
    ///   is deleted before the assignment is written.
    /// - `NotFound(Project, project_id)` when the project does not exist; the
    ///   employee record is left untouched.
    pub fn assign(
        &self,
        project_id: ProjectId,
        employee_id: EmployeeId,
    ) -> DirectoryResult<Project> {
        let result = self.assign_inner(project_id, employee_id);
        match &result {
            Ok(_) => info!(
                "event=project_assign module=service status=ok project_id={project_id} employee_id={employee_id}"
            ),
            Err(err) => log_failure("project_assign", err),
        }
        result
    }

    /// Clears an employee's project assignment and returns the updated record.
    ///
    /// Unassigning an already unassigned employee is a no-op success.
    pub fn unassign(&self, employee_id: EmployeeId) -> DirectoryResult<Employee> {
        let result = self.unassign_inner(employee_id);
        match &result {
            Ok(_) => info!(
                "event=project_unassign module=service status=ok employee_id={employee_id}"
            ),
            Err(err) => log_failure("project_unassign", err),
        }
        result
    }

    fn employees_by_project_inner(&self, project_id: ProjectId) -> DirectoryResult<Vec<Employee>> {
        self.store.get_project(project_id)?;
        Ok(self.store.find_employees_by_project(project_id)?)
    }

    fn assign_inner(
        &self,
        project_id: ProjectId,
        employee_id: EmployeeId,
    ) -> DirectoryResult<Project> {
        let mut employee = self.store.get_employee(employee_id)?;
        let project = self.store.get_project(project_id)?;

        employee.project_id = Some(project.id);
        self.store.update_employee(&employee)?;
        Ok(project)
    }

    fn unassign_inner(&self, employee_id: EmployeeId) -> DirectoryResult<Employee> {
        let mut employee = self.store.get_employee(employee_id)?;
        if employee.project_id.take().is_none() {
            return Ok(employee);
        }
        Ok(self.store.update_employee(&employee)?)
    }
}
