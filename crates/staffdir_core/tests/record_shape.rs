use serde_json::json;
use staffdir_core::{Employee, EmployeeDraft, Project, ProjectDraft};

#[test]
fn employee_serializes_with_external_field_names() {
    let mut employee = Employee::from_draft(1, &EmployeeDraft::new("Jo", "Doe", "jo@x.com"));
    employee.project_id = Some(2);

    assert_eq!(
        serde_json::to_value(&employee).unwrap(),
        json!({
            "id": 1,
            "firstName": "Jo",
            "lastName": "Doe",
            "email": "jo@x.com",
            "projectId": 2
        })
    );
}

#[test]
fn drafts_deserialize_from_external_payloads() {
    let employee: EmployeeDraft = serde_json::from_value(json!({
        "firstName": "Jo",
        "lastName": "Doe",
        "email": "jo@x.com"
    }))
    .unwrap();
    assert_eq!(employee, EmployeeDraft::new("Jo", "Doe", "jo@x.com"));

    let project: ProjectDraft = serde_json::from_value(json!({ "name": "Alpha" })).unwrap();
    assert_eq!(project, ProjectDraft::new("Alpha"));
}

#[test]
fn unassigned_employee_serializes_null_project() {
    let employee = Employee::from_draft(3, &EmployeeDraft::new("Ann", "Lee", "ann@x.com"));
    let value = serde_json::to_value(&employee).unwrap();
    assert!(value["projectId"].is_null());

    let project = Project::from_draft(1, &ProjectDraft::new("Alpha"));
    assert_eq!(
        serde_json::to_value(&project).unwrap(),
        json!({ "id": 1, "name": "Alpha", "description": null })
    );
}
