//! In-memory entity store.
//!
//! # Responsibility
//! - Keep Employee and Project tables in process memory behind one lock.
//! - Allocate ids from monotonic per-kind counters.
//!
//! # Invariants
//! - Writers hold the write lock for the whole record replacement, so readers
//!   never observe a half-written record.
//! - Counters only move forward; a deleted id is never handed out again.
//! - `update_employee` never recreates a deleted employee.
//! - An employee may only reference a project present in the same store.

use super::{EntityStore, StoreError, StoreResult};
use crate::model::employee::{Employee, EmployeeDraft};
use crate::model::project::{Project, ProjectDraft};
use crate::model::{EmployeeId, EntityKind, ProjectId};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

const FIRST_ID: i64 = 1;

#[derive(Debug)]
struct Tables {
    employees: BTreeMap<EmployeeId, Employee>,
    projects: BTreeMap<ProjectId, Project>,
    next_employee_id: EmployeeId,
    next_project_id: ProjectId,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            employees: BTreeMap::new(),
            projects: BTreeMap::new(),
            next_employee_id: FIRST_ID,
            next_project_id: FIRST_ID,
        }
    }
}

impl Tables {
    fn ensure_project_reference(&self, project_id: Option<ProjectId>) -> StoreResult<()> {
        match project_id {
            Some(id) if !self.projects.contains_key(&id) => {
                Err(StoreError::not_found(EntityKind::Project, id))
            }
            _ => Ok(()),
        }
    }
}

fn next_id_after(id: i64) -> StoreResult<i64> {
    id.checked_add(1)
        .ok_or_else(|| StoreError::InvalidData(format!("id {id} leaves no room for new ids")))
}

/// Process-local store backed by ordered maps.
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    tables: RwLock<Tables>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::LockPoisoned("memory_store.tables"))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::LockPoisoned("memory_store.tables"))
    }
}

impl EntityStore for InMemoryEntityStore {
    fn get_employee(&self, id: EmployeeId) -> StoreResult<Employee> {
        self.read()?
            .employees
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Employee, id))
    }

    fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        Ok(self.read()?.employees.values().cloned().collect())
    }

    fn insert_employee(&self, draft: &EmployeeDraft) -> StoreResult<Employee> {
        let mut tables = self.write()?;
        let id = tables.next_employee_id;
        tables.next_employee_id += 1;

        let employee = Employee::from_draft(id, draft);
        tables.employees.insert(id, employee.clone());
        Ok(employee)
    }

    fn save_employee(&self, employee: &Employee) -> StoreResult<Employee> {
        let mut tables = self.write()?;
        tables.ensure_project_reference(employee.project_id)?;

        if employee.id >= tables.next_employee_id {
            tables.next_employee_id = next_id_after(employee.id)?;
        }
        tables.employees.insert(employee.id, employee.clone());
        Ok(employee.clone())
    }

    fn update_employee(&self, employee: &Employee) -> StoreResult<Employee> {
        let mut tables = self.write()?;
        tables.ensure_project_reference(employee.project_id)?;

        let stored = tables
            .employees
            .get_mut(&employee.id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Employee, employee.id))?;
        *stored = employee.clone();
        Ok(employee.clone())
    }

    fn delete_employee(&self, id: EmployeeId) -> StoreResult<()> {
        match self.write()?.employees.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::not_found(EntityKind::Employee, id)),
        }
    }

    fn find_employees_by_project(&self, project_id: ProjectId) -> StoreResult<Vec<Employee>> {
        Ok(self
            .read()?
            .employees
            .values()
            .filter(|employee| employee.project_id == Some(project_id))
            .cloned()
            .collect())
    }

    fn get_project(&self, id: ProjectId) -> StoreResult<Project> {
        self.read()?
            .projects
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Project, id))
    }

    fn list_projects(&self) -> StoreResult<Vec<Project>> {
        Ok(self.read()?.projects.values().cloned().collect())
    }

    fn insert_project(&self, draft: &ProjectDraft) -> StoreResult<Project> {
        let mut tables = self.write()?;
        let id = tables.next_project_id;
        tables.next_project_id += 1;

        let project = Project::from_draft(id, draft);
        tables.projects.insert(id, project.clone());
        Ok(project)
    }

    fn save_project(&self, project: &Project) -> StoreResult<Project> {
        let mut tables = self.write()?;
        if project.id >= tables.next_project_id {
            tables.next_project_id = next_id_after(project.id)?;
        }
        tables.projects.insert(project.id, project.clone());
        Ok(project.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryEntityStore;
    use crate::model::employee::{Employee, EmployeeDraft};
    use crate::model::project::{Project, ProjectDraft};
    use crate::model::EntityKind;
    use crate::repo::{EntityStore, StoreError};

    fn draft(first: &str) -> EmployeeDraft {
        EmployeeDraft::new(first, "Doe", format!("{}@x.com", first.to_lowercase()))
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let store = InMemoryEntityStore::new();
        let first = store.insert_employee(&draft("Jo")).unwrap();
        store.delete_employee(first.id).unwrap();

        let second = store.insert_employee(&draft("Ann")).unwrap();
        assert_ne!(first.id, second.id);
        assert!(second.id > first.id);
    }

    #[test]
    fn save_with_explicit_id_advances_counter() {
        let store = InMemoryEntityStore::new();
        let mut employee = store.insert_employee(&draft("Jo")).unwrap();
        employee.id = 40;
        store.save_employee(&employee).unwrap();

        let next = store.insert_employee(&draft("Ann")).unwrap();
        assert_eq!(next.id, 41);
    }

    #[test]
    fn save_rejects_dangling_project_reference() {
        let store = InMemoryEntityStore::new();
        let mut employee = store.insert_employee(&draft("Jo")).unwrap();
        employee.project_id = Some(99);

        let err = store.save_employee(&employee).unwrap_err();
        assert!(matches!(
            err,
            StoreError::NotFound {
                kind: EntityKind::Project,
                id: 99
            }
        ));
        assert_eq!(store.get_employee(employee.id).unwrap().project_id, None);
    }

    #[test]
    fn update_does_not_recreate_deleted_employee() {
        let store = InMemoryEntityStore::new();
        let mut employee = store.insert_employee(&draft("Jo")).unwrap();
        store.delete_employee(employee.id).unwrap();

        employee.first_name = "Joanna".to_string();
        let err = store.update_employee(&employee).unwrap_err();
        assert!(matches!(
            err,
            StoreError::NotFound {
                kind: EntityKind::Employee,
                ..
            }
        ));
        assert!(store.get_employee(employee.id).unwrap_err().is_not_found());
    }

    #[test]
    fn save_with_max_id_reports_invalid_data() {
        let store = InMemoryEntityStore::new();
        let mut employee = store.insert_employee(&draft("Jo")).unwrap();
        employee.id = i64::MAX;
        assert!(matches!(
            store.save_employee(&employee),
            Err(StoreError::InvalidData(_))
        ));

        let project = Project {
            id: i64::MAX,
            name: "Alpha".to_string(),
            description: None,
        };
        assert!(matches!(
            store.save_project(&project),
            Err(StoreError::InvalidData(_))
        ));
    }

    #[test]
    fn unknown_ids_report_not_found() {
        let store = InMemoryEntityStore::new();
        assert!(store.get_employee(1).unwrap_err().is_not_found());
        assert!(store.get_project(1).unwrap_err().is_not_found());
        assert!(store.delete_employee(1).unwrap_err().is_not_found());
        let ghost = Employee::from_draft(1, &draft("Jo"));
        assert!(store.update_employee(&ghost).unwrap_err().is_not_found());
    }

    #[test]
    fn find_by_project_filters_live_records() {
        let store = InMemoryEntityStore::new();
        let alpha = store.insert_project(&ProjectDraft::new("Alpha")).unwrap();
        let mut jo = store.insert_employee(&draft("Jo")).unwrap();
        store.insert_employee(&draft("Ann")).unwrap();

        jo.project_id = Some(alpha.id);
        store.save_employee(&jo).unwrap();

        let members = store.find_employees_by_project(alpha.id).unwrap();
        assert_eq!(members, vec![jo]);
    }
}
