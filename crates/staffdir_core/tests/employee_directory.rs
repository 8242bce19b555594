use staffdir_core::{
    DirectoryError, EmployeeDraft, EmployeeService, EntityKind, EntityStore, InMemoryEntityStore,
    ProjectDraft, ProjectService, SqliteEntityStore,
};

fn with_each_store(check: impl Fn(&dyn EntityStore)) {
    check(&InMemoryEntityStore::new());
    check(&SqliteEntityStore::open_in_memory().unwrap());
}

fn jo() -> EmployeeDraft {
    EmployeeDraft::new("Jo", "Doe", "jo@x.com")
}

fn assert_employee_not_found(err: DirectoryError, expected_id: i64) {
    assert_eq!(
        err.missing_entity(),
        Some((EntityKind::Employee, expected_id)),
        "unexpected error: {err}"
    );
}

#[test]
fn create_then_get_returns_input_plus_allocated_id() {
    with_each_store(|store| {
        let service = EmployeeService::new(store);

        let created = service.create(&jo()).unwrap();
        let loaded = service.get_by_id(created.id).unwrap();

        assert_eq!(loaded, created);
        assert_eq!(loaded.draft(), jo());
        assert_eq!(loaded.project_id, None);
    });
}

#[test]
fn create_allocates_distinct_ids_for_identical_input() {
    with_each_store(|store| {
        let service = EmployeeService::new(store);

        let first = service.create(&jo()).unwrap();
        let second = service.create(&jo()).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(service.get_all().unwrap().len(), 2);
    });
}

#[test]
fn get_all_lists_records_in_id_order() {
    with_each_store(|store| {
        let service = EmployeeService::new(store);
        let ann = service
            .create(&EmployeeDraft::new("Ann", "Lee", "ann@x.com"))
            .unwrap();
        let bob = service
            .create(&EmployeeDraft::new("Bob", "Ray", "bob@x.com"))
            .unwrap();

        let ids: Vec<_> = service.get_all().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![ann.id, bob.id]);
    });
}

#[test]
fn get_unknown_id_fails_with_not_found() {
    with_each_store(|store| {
        let service = EmployeeService::new(store);
        assert_employee_not_found(service.get_by_id(404).unwrap_err(), 404);
    });
}

#[test]
fn update_replaces_editable_fields_and_keeps_assignment() {
    with_each_store(|store| {
        let employees = EmployeeService::new(store);
        let projects = ProjectService::new(store);
        let project = projects.create(&ProjectDraft::new("Alpha")).unwrap();
        let created = employees.create(&jo()).unwrap();
        projects.assign(project.id, created.id).unwrap();

        let patch = EmployeeDraft::new("Joanna", "Doe-Smith", "joanna@x.com");
        let updated = employees.update(created.id, &patch).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.draft(), patch);
        assert_eq!(updated.project_id, Some(project.id));
        assert_eq!(employees.get_by_id(created.id).unwrap(), updated);
    });
}

#[test]
fn update_unknown_id_fails_with_not_found_before_validation() {
    with_each_store(|store| {
        let service = EmployeeService::new(store);
        let err = service
            .update(9, &EmployeeDraft::new("", "", ""))
            .unwrap_err();
        assert_employee_not_found(err, 9);
    });
}

#[test]
fn create_with_empty_field_reports_field_name() {
    with_each_store(|store| {
        let service = EmployeeService::new(store);
        let err = service
            .create(&EmployeeDraft::new("Jo", "Doe", ""))
            .unwrap_err();
        match err {
            DirectoryError::Validation(validation) => {
                assert_eq!(validation.field, "email");
                assert_eq!(validation.reason, "must not be empty");
            }
            other => panic!("unexpected error: {other}"),
        }
    });
}

#[test]
fn create_and_update_accept_any_non_empty_text() {
    with_each_store(|store| {
        let service = EmployeeService::new(store);
        let created = service
            .create(&EmployeeDraft::new("Jo", "Doe", "jo.doe"))
            .unwrap();
        assert_eq!(created.email, "jo.doe");

        let patch = EmployeeDraft::new(" ", "Doe", "admin");
        let updated = service.update(created.id, &patch).unwrap();
        assert_eq!(updated.draft(), patch);
        assert_eq!(service.get_all().unwrap(), vec![updated]);
    });
}

#[test]
fn delete_then_get_fails_with_not_found() {
    with_each_store(|store| {
        let service = EmployeeService::new(store);
        let created = service.create(&jo()).unwrap();

        service.delete(created.id).unwrap();

        assert_employee_not_found(service.get_by_id(created.id).unwrap_err(), created.id);
        assert_employee_not_found(service.delete(created.id).unwrap_err(), created.id);
    });
}
