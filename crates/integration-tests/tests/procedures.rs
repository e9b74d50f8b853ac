//! Integration tests for trigger- and procedure-backed endpoints.
//!
//! These tests require a running API connected to a database with the
//! helpdesk triggers and stored procedures installed.

use helpdesk_integration_tests::{base_url, client, database, employees_url, missing_department};
use reqwest::StatusCode;
use serde_json::{Value, json};
use sqlx::MySqlPool;

async fn equipment_type_count(pool: &MySqlPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM equipment_types")
        .fetch_one(pool)
        .await
        .expect("Failed to count equipment types")
}

#[tokio::test]
#[ignore = "Requires running helpdesk API and database"]
async fn test_health() {
    let resp = client()
        .get(format!("{}/health/ready", base_url()))
        .send()
        .await
        .expect("Failed to call readiness");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running helpdesk API and database"]
async fn test_specialization_for_missing_department_conflicts() {
    let resp = client()
        .post(employees_url("/specializations/"))
        .json(&json!({
            "name": "Network Security",
            "department_id": missing_department(),
        }))
        .send()
        .await
        .expect("Failed to create specialization");

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = resp.json().await.expect("Failed to parse body");
    let message = body["message"].as_str().expect("message is a string");
    assert!(message.starts_with("Integrity error (department): "));
    assert!(message.len() > "Integrity error (department): ".len());
}

#[tokio::test]
#[ignore = "Requires running helpdesk API and database"]
async fn test_batch_insert_reports_database_row_count() {
    let pool = database().await;
    let before = equipment_type_count(&pool).await;

    let resp = client()
        .post(employees_url("/equipment_types/batch_insert"))
        .send()
        .await
        .expect("Failed to batch insert");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to parse body");
    let rows = body["rowsInserted"].as_i64().expect("rowsInserted is an integer");
    let message = body["message"].as_str().expect("message is a string");

    let after = equipment_type_count(&pool).await;
    assert_eq!(after - before, rows);

    if rows == 0 {
        assert_eq!(message, "No new equipment types inserted");
    } else {
        assert_eq!(
            message,
            format!(
                "Inserted {rows} new equipment types (Noname 4 to Noname {})",
                4 + rows - 1
            )
        );
    }
}

#[tokio::test]
#[ignore = "Requires running helpdesk API and database"]
async fn test_equipment_report_shape() {
    let resp = client()
        .get(employees_url("/equipment_by_type_report"))
        .send()
        .await
        .expect("Failed to get report");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse body");

    if let Some(entries) = body.as_array() {
        for entry in entries {
            assert!(entry["equipmentType"].is_string());
            assert!(entry["totalCount"].is_i64());
            assert!(entry["inUseCount"].is_i64());
            let models = entry["models"].as_array().expect("models is an array");
            assert!(models.iter().all(|m| {
                m.as_str().is_some_and(|m| !m.is_empty() && m.trim() == m)
            }));
        }
    } else {
        assert_eq!(body["message"], "Equipment report is empty");
    }
}

#[tokio::test]
#[ignore = "Requires running helpdesk API and database"]
async fn test_ticket_priority_stats_are_numbers() {
    let resp = client()
        .get(employees_url("/ticket_priority_stats"))
        .send()
        .await
        .expect("Failed to get stats");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse body");
    for key in ["maxPriority", "minPriority", "sumPriority", "avgPriority"] {
        assert!(body[key].is_f64(), "{key} should be a float");
    }
}

#[tokio::test]
#[ignore = "Requires running helpdesk API and database"]
async fn test_equipment_type_logs_is_array() {
    let resp = client()
        .get(employees_url("/equipment_types/logs"))
        .send()
        .await
        .expect("Failed to get logs");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse body");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore = "Requires running helpdesk API and database"]
async fn test_unknown_ticket_assignment_is_not_found() {
    let resp = client()
        .post(employees_url("/ticket_assignments/"))
        .json(&json!({
            "assignee_first_name": "Nobody",
            "assignee_last_name": "Anywhere",
            "ticket_title": "No such ticket 7f3c",
        }))
        .send()
        .await
        .expect("Failed to assign ticket");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running helpdesk API and database"]
async fn test_missing_fields_are_rejected() {
    let resp = client()
        .post(employees_url("/"))
        .json(&json!({ "first_name": "Only" }))
        .send()
        .await
        .expect("Failed to create employee");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
