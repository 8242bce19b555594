//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `staffdir_core` wiring against the configured store backend.
//! - Walk one create/assign/delete cycle and print each observable result.

use staffdir_core::{
    core_version, CoreConfig, DirectoryError, EmployeeDraft, EmployeeService, EntityStore,
    ProjectDraft, ProjectService,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CoreConfig::from_env();
    if let Err(err) = config.init_logging() {
        eprintln!("staffdir logging disabled: {err}");
    }

    println!("staffdir_core version={}", core_version());
    let store = match config.open_store() {
        Ok(store) => store,
        Err(err) => {
            eprintln!("staffdir store unavailable: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run_smoke(store.as_ref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("staffdir smoke failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_smoke(store: &dyn EntityStore) -> Result<(), DirectoryError> {
    let projects = ProjectService::new(store);
    let employees = EmployeeService::new(store);

    let project = projects.create(&ProjectDraft::new("Alpha"))?;
    println!("project created id={} name={}", project.id, project.name);

    let employee = employees.create(&EmployeeDraft::new("Jo", "Doe", "jo@x.com"))?;
    println!("employee created id={} assigned={}", employee.id, employee.is_assigned());

    projects.assign(project.id, employee.id)?;
    let members = projects.employees_by_project(project.id)?;
    println!("project {} members={}", project.id, members.len());

    employees.delete(employee.id)?;
    let members = projects.employees_by_project(project.id)?;
    println!("project {} members after delete={}", project.id, members.len());

    if let Err(err) = employees.get_by_id(employee.id) {
        println!("employee {} lookup after delete: {err}", employee.id);
    }
    Ok(())
}
