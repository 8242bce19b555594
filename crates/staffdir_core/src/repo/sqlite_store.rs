//! SQLite-backed entity store.
//!
//! # Responsibility
//! - Persist Employee and Project records in the migrated `employees` and
//!   `projects` tables.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - The connection is owned behind a mutex; each operation runs while holding
//!   it, so writes to the same record are serialized.
//! - `AUTOINCREMENT` keys guarantee deleted ids are never reissued.
//! - `update_employee` never creates a row; a concurrently deleted employee
//!   stays deleted.

use super::{EntityStore, StoreError, StoreResult};
use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{open_db, open_db_in_memory};
use crate::model::employee::{Employee, EmployeeDraft};
use crate::model::project::{Project, ProjectDraft};
use crate::model::{EmployeeId, EntityKind, ProjectId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    email,
    project_id
FROM employees";

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    name,
    description
FROM projects";

const REQUIRED_TABLES: [&str; 2] = ["projects", "employees"];

/// Entity store over one migrated SQLite connection.
#[derive(Debug)]
pub struct SqliteEntityStore {
    conn: Mutex<Connection>,
}

impl SqliteEntityStore {
    /// Wraps an already-migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` is not the latest migration.
    /// - `MissingRequiredTable` when a directory table is absent.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens (creating if needed) a database file and wraps it.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a private in-memory database and wraps it.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::LockPoisoned("sqlite_store.conn"))
    }
}

impl EntityStore for SqliteEntityStore {
    fn get_employee(&self, id: EmployeeId) -> StoreResult<Employee> {
        let conn = self.conn()?;
        let employee = conn
            .query_row(
                &format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_employee_row,
            )
            .optional()?;
        employee.ok_or_else(|| StoreError::not_found(EntityKind::Employee, id))
    }

    fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY id ASC;"))?;
        let employees = stmt
            .query_map([], parse_employee_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(employees)
    }

    fn insert_employee(&self, draft: &EmployeeDraft) -> StoreResult<Employee> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO employees (first_name, last_name, email, project_id)
             VALUES (?1, ?2, ?3, NULL);",
            params![
                draft.first_name.as_str(),
                draft.last_name.as_str(),
                draft.email.as_str()
            ],
        )?;
        Ok(Employee::from_draft(conn.last_insert_rowid(), draft))
    }

    fn save_employee(&self, employee: &Employee) -> StoreResult<Employee> {
        let conn = self.conn()?;
        ensure_project_reference(&conn, employee.project_id)?;

        conn.execute(
            "INSERT INTO employees (id, first_name, last_name, email, project_id)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                email = excluded.email,
                project_id = excluded.project_id;",
            params![
                employee.id,
                employee.first_name.as_str(),
                employee.last_name.as_str(),
                employee.email.as_str(),
                employee.project_id,
            ],
        )?;
        Ok(employee.clone())
    }

    fn update_employee(&self, employee: &Employee) -> StoreResult<Employee> {
        let conn = self.conn()?;
        ensure_project_reference(&conn, employee.project_id)?;

        let changed = conn.execute(
            "UPDATE employees
             SET first_name = ?2, last_name = ?3, email = ?4, project_id = ?5
             WHERE id = ?1;",
            params![
                employee.id,
                employee.first_name.as_str(),
                employee.last_name.as_str(),
                employee.email.as_str(),
                employee.project_id,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found(EntityKind::Employee, employee.id));
        }
        Ok(employee.clone())
    }

    fn delete_employee(&self, id: EmployeeId) -> StoreResult<()> {
        let changed = self
            .conn()?
            .execute("DELETE FROM employees WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(StoreError::not_found(EntityKind::Employee, id));
        }
        Ok(())
    }

    fn find_employees_by_project(&self, project_id: ProjectId) -> StoreResult<Vec<Employee>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "{EMPLOYEE_SELECT_SQL} WHERE project_id = ?1 ORDER BY id ASC;"
        ))?;
        let employees = stmt
            .query_map([project_id], parse_employee_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(employees)
    }

    fn get_project(&self, id: ProjectId) -> StoreResult<Project> {
        let conn = self.conn()?;
        let project = conn
            .query_row(
                &format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_project_row,
            )
            .optional()?;
        project.ok_or_else(|| StoreError::not_found(EntityKind::Project, id))
    }

    fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY id ASC;"))?;
        let projects = stmt
            .query_map([], parse_project_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(projects)
    }

    fn insert_project(&self, draft: &ProjectDraft) -> StoreResult<Project> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO projects (name, description) VALUES (?1, ?2);",
            params![draft.name.as_str(), draft.description.as_deref()],
        )?;
        Ok(Project::from_draft(conn.last_insert_rowid(), draft))
    }

    fn save_project(&self, project: &Project) -> StoreResult<Project> {
        self.conn()?.execute(
            "INSERT INTO projects (id, name, description)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description;",
            params![
                project.id,
                project.name.as_str(),
                project.description.as_deref()
            ],
        )?;
        Ok(project.clone())
    }
}

fn ensure_project_reference(conn: &Connection, project_id: Option<ProjectId>) -> StoreResult<()> {
    let Some(project_id) = project_id else {
        return Ok(());
    };
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?1);",
        [project_id],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(StoreError::not_found(EntityKind::Project, project_id));
    }
    Ok(())
}

fn parse_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        project_id: row.get("project_id")?,
    })
}

fn parse_project_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(StoreError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
