//! Read-only report handlers.

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use helpdesk_core::{DepartmentId, TicketId};
use serde_json::json;

use super::extract::ApiPath;
use crate::error::{AppError, Result};
use crate::models::{DepartmentEmployee, PriorityStats, TicketAssignment};
use crate::services::{EmployeeService, EquipmentService, TicketService};
use crate::state::AppState;

/// Build the reports router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/employees/departments/{department_id}",
            get(employees_by_department),
        )
        .route(
            "/api/employees/tickets/{ticket_id}/assignments",
            get(assignments_for_ticket),
        )
        .route("/api/employees/equipment_by_type_report", get(equipment_report))
        .route("/api/employees/ticket_priority_stats", get(ticket_priority_stats))
}

/// Employees of a department, ordered by last name.
///
/// # Errors
///
/// Returns 404 when the department has no employees.
pub async fn employees_by_department(
    State(state): State<AppState>,
    ApiPath(department_id): ApiPath<DepartmentId>,
) -> Result<Json<Vec<DepartmentEmployee>>> {
    let employees = EmployeeService::new(state.pool())
        .in_department(department_id)
        .await?;

    if employees.is_empty() {
        return Err(AppError::NotFound(format!(
            "No employees found for Department ID {department_id}"
        )));
    }
    Ok(Json(employees))
}

/// Assignments of a ticket, newest first.
///
/// # Errors
///
/// Returns 404 when the ticket has no assignments.
pub async fn assignments_for_ticket(
    State(state): State<AppState>,
    ApiPath(ticket_id): ApiPath<TicketId>,
) -> Result<Json<Vec<TicketAssignment>>> {
    let assignments = TicketService::new(state.pool()).assignments(ticket_id).await?;

    if assignments.is_empty() {
        return Err(AppError::NotFound(format!(
            "No assignments found for Ticket ID {ticket_id}"
        )));
    }
    Ok(Json(assignments))
}

/// Equipment grouped by type.
///
/// An empty report is still a 200, with a message instead of an array.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn equipment_report(State(state): State<AppState>) -> Result<Response> {
    let report = EquipmentService::new(state.pool()).report().await?;

    if report.is_empty() {
        return Ok(Json(json!({ "message": "Equipment report is empty" })).into_response());
    }
    Ok(Json(report).into_response())
}

/// Ticket priority statistics.
///
/// # Errors
///
/// Returns 500 when the procedure fails or returns no row.
pub async fn ticket_priority_stats(State(state): State<AppState>) -> Result<Json<PriorityStats>> {
    TicketService::new(state.pool())
        .priority_stats()
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::Internal("sp_report_ticket_priority_stats returned no rows".to_string())
        })
}
