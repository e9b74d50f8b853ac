//! Integration tests for employee CRUD.
//!
//! These tests require a running API connected to a database with the
//! helpdesk schema and its triggers installed.

use helpdesk_integration_tests::{client, employees_url, existing_department, unique_email};
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn create_employee(email: &str) -> Value {
    let resp = client()
        .post(employees_url("/"))
        .json(&json!({
            "first_name": "Integration",
            "last_name": "Tester",
            "email": email,
            "department_id": existing_department(),
            "is_it_staff": true,
        }))
        .send()
        .await
        .expect("Failed to create employee");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse employee")
}

#[tokio::test]
#[ignore = "Requires running helpdesk API and database"]
async fn test_create_employee_echoes_input() {
    let email = unique_email();
    let employee = create_employee(&email).await;

    assert_eq!(employee["firstName"], "Integration");
    assert_eq!(employee["lastName"], "Tester");
    assert_eq!(employee["email"], email.as_str());
    assert_eq!(employee["departmentId"], json!(existing_department()));
    assert_eq!(employee["isItStaff"], true);
    assert!(employee["id"].is_i64());
}

#[tokio::test]
#[ignore = "Requires running helpdesk API and database"]
async fn test_created_employee_can_be_read() {
    let employee = create_employee(&unique_email()).await;
    let id = &employee["id"];

    let resp = client()
        .get(employees_url(&format!("/{id}")))
        .send()
        .await
        .expect("Failed to get employee");

    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = resp.json().await.expect("Failed to parse employee");
    assert_eq!(fetched, employee);
}

#[tokio::test]
#[ignore = "Requires running helpdesk API and database"]
async fn test_unknown_employee_is_not_found() {
    let resp = client()
        .get(employees_url("/2147483647"))
        .send()
        .await
        .expect("Failed to get employee");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse body");
    assert_eq!(body["message"], "Employee not found");
}

#[tokio::test]
#[ignore = "Requires running helpdesk API and database"]
async fn test_update_unknown_employee_is_not_found_before_validation() {
    let resp = client()
        .put(employees_url("/2147483647"))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to update employee");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running helpdesk API and database"]
async fn test_update_employee() {
    let employee = create_employee(&unique_email()).await;
    let id = &employee["id"];
    let email = unique_email();

    let resp = client()
        .put(employees_url(&format!("/{id}")))
        .json(&json!({
            "first_name": "Renamed",
            "last_name": "Tester",
            "email": email,
            "department_id": existing_department(),
            "is_it_staff": 0,
        }))
        .send()
        .await
        .expect("Failed to update employee");

    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.expect("Failed to parse employee");
    assert_eq!(updated["firstName"], "Renamed");
    assert_eq!(updated["email"], email.as_str());
    assert_eq!(updated["isItStaff"], false);
}

#[tokio::test]
#[ignore = "Requires running helpdesk API and database"]
async fn test_delete_is_blocked_and_row_survives() {
    let employee = create_employee(&unique_email()).await;
    let id = &employee["id"];

    let resp = client()
        .delete(employees_url(&format!("/{id}")))
        .send()
        .await
        .expect("Failed to delete employee");

    assert!(
        resp.status() == StatusCode::FORBIDDEN || resp.status() == StatusCode::CONFLICT,
        "unexpected status {}",
        resp.status()
    );

    let resp = client()
        .get(employees_url(&format!("/{id}")))
        .send()
        .await
        .expect("Failed to get employee");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running helpdesk API and database"]
async fn test_list_contains_created_employee() {
    let employee = create_employee(&unique_email()).await;

    let resp = client()
        .get(employees_url("/"))
        .send()
        .await
        .expect("Failed to list employees");

    assert_eq!(resp.status(), StatusCode::OK);
    let employees: Vec<Value> = resp.json().await.expect("Failed to parse list");
    assert!(employees.iter().any(|e| e["id"] == employee["id"]));
}
