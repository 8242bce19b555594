use staffdir_core::{
    EmployeeDraft, EmployeeService, EntityStore, InMemoryEntityStore, ProjectDraft,
    ProjectService, SqliteEntityStore,
};
use std::sync::Arc;
use std::thread;

const ROUNDS: usize = 50;

fn race_assignments<S: EntityStore + 'static>(store: Arc<S>) {
    let projects = ProjectService::new(Arc::clone(&store));
    let employees = EmployeeService::new(Arc::clone(&store));
    let alpha = projects.create(&ProjectDraft::new("Alpha")).unwrap();
    let beta = projects.create(&ProjectDraft::new("Beta")).unwrap();
    let jo = employees
        .create(&EmployeeDraft::new("Jo", "Doe", "jo@x.com"))
        .unwrap();

    let workers: Vec<_> = [alpha.id, beta.id]
        .into_iter()
        .map(|target| {
            let service = ProjectService::new(Arc::clone(&store));
            let employee_id = jo.id;
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    service.assign(target, employee_id).unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let stored = employees.get_by_id(jo.id).unwrap();
    assert_eq!(stored.draft(), jo.draft());
    let winner = stored.project_id.expect("employee must stay assigned");
    assert!(winner == alpha.id || winner == beta.id);

    let alpha_members = projects.employees_by_project(alpha.id).unwrap().len();
    let beta_members = projects.employees_by_project(beta.id).unwrap().len();
    assert_eq!(alpha_members + beta_members, 1);
}

#[test]
fn concurrent_assigns_leave_one_consistent_record_in_memory() {
    race_assignments(Arc::new(InMemoryEntityStore::new()));
}

#[test]
fn concurrent_assigns_leave_one_consistent_record_in_sqlite() {
    race_assignments(Arc::new(SqliteEntityStore::open_in_memory().unwrap()));
}
