//! Handlers backed by triggers and stored procedures.
//!
//! Each write here is checked by the schema rather than by this service; the
//! handlers only map the database's verdict to a status code.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
};
use helpdesk_core::{DepartmentId, EquipmentTypeId};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue, json};

use super::extract::{ApiJson, ApiPath, ApiQuery, require_fields};
use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::models::NewSpecialization;
use crate::services::equipment::DEFAULT_BATCH_START_ID;
use crate::services::{EquipmentService, SpecializationService, TicketService};
use crate::state::AppState;

/// Build the procedures router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/employees/specializations", post(create_specialization))
        .route("/api/employees/specializations/", post(create_specialization))
        .route("/api/employees/equipment_types", post(create_equipment_type))
        .route("/api/employees/equipment_types/", post(create_equipment_type))
        .route("/api/employees/ticket_assignments", post(assign_ticket))
        .route("/api/employees/ticket_assignments/", post(assign_ticket))
        .route(
            "/api/employees/equipment_types/batch_insert",
            post(batch_insert_equipment_types),
        )
        .route("/api/employees/equipment/split_log", post(split_equipment_log))
        .route(
            "/api/employees/equipment_types/{type_id}",
            delete(delete_equipment_type),
        )
        .route("/api/employees/equipment_types/logs", get(equipment_type_logs))
}

type Created = (StatusCode, Json<JsonValue>);

fn created(body: JsonValue) -> Created {
    (StatusCode::CREATED, Json(body))
}

// =============================================================================
// Specializations
// =============================================================================

/// Body of a specialization create request.
#[derive(Debug, Deserialize)]
pub struct SpecializationRequest {
    pub name: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub required_certifications: Option<String>,
}

/// Create an IT specialization.
///
/// # Errors
///
/// Returns 400 without a name, 409 when the department trigger rejects the
/// row, and 500 for other failures.
pub async fn create_specialization(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SpecializationRequest>,
) -> Result<Created> {
    let Some(name) = body.name else {
        return Err(AppError::BadRequest("Missing required fields: name".to_string()));
    };
    let specialization = NewSpecialization {
        department_id: body.department_id,
        name,
        required_certifications: body.required_certifications,
    };

    let id = match SpecializationService::new(state.pool())
        .create(&specialization)
        .await
    {
        Ok(id) => id,
        Err(
            RepositoryError::TriggerRejected { message }
            | RepositoryError::IntegrityViolation { message },
        ) => {
            return Err(AppError::Conflict(format!(
                "Integrity error (department): {message}"
            )));
        }
        Err(err) => return Err(err.into()),
    };

    let id = id.ok_or_else(|| AppError::Internal("specialization insert returned no id".to_string()))?;
    Ok(created(json!({
        "message": "Specialization created",
        "id": id,
    })))
}

// =============================================================================
// Equipment types
// =============================================================================

/// Body of an equipment-type create request.
#[derive(Debug, Deserialize)]
pub struct EquipmentTypeRequest {
    pub name: Option<String>,
}

/// Create an equipment type through `sp_insert_equipment_type`.
///
/// # Errors
///
/// Returns 400 for a missing or empty name, 409 when the database rejects
/// the name, and 500 when the procedure yields no id.
pub async fn create_equipment_type(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<EquipmentTypeRequest>,
) -> Result<Created> {
    let Some(name) = body.name.filter(|name| !name.is_empty()) else {
        return Err(AppError::BadRequest("Missing required field: name".to_string()));
    };

    let id = EquipmentService::new(state.pool())
        .create_type(&name)
        .await?
        .ok_or_else(|| {
            AppError::Internal(format!("sp_insert_equipment_type returned no id for {name:?}"))
        })?;

    Ok(created(json!({
        "message": format!("Equipment type \"{name}\" created"),
        "id": id,
    })))
}

/// Query of the batch insert.
#[derive(Debug, Deserialize)]
pub struct BatchInsertParams {
    pub start_id: Option<i32>,
}

/// Insert placeholder equipment types through `sp_batch_insert_equipment_types`.
///
/// # Errors
///
/// Returns 500 when the procedure fails or reports no row count.
pub async fn batch_insert_equipment_types(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<BatchInsertParams>,
) -> Result<Created> {
    let start_id = params.start_id.unwrap_or(DEFAULT_BATCH_START_ID);

    let outcome = EquipmentService::new(state.pool())
        .batch_insert(start_id)
        .await?
        .ok_or_else(|| {
            AppError::Internal("sp_batch_insert_equipment_types reported no row count".to_string())
        })?;

    tracing::info!(start_id, rows_inserted = outcome.rows_inserted, "Equipment types inserted");

    Ok(created(json!({
        "message": outcome.message(),
        "rowsInserted": outcome.rows_inserted,
    })))
}

/// Delete an equipment type.
///
/// # Errors
///
/// Returns 409 when the cardinality trigger refuses the deletion, 404 for an
/// unknown type, and 500 for other failures.
pub async fn delete_equipment_type(
    State(state): State<AppState>,
    ApiPath(type_id): ApiPath<EquipmentTypeId>,
) -> Result<StatusCode> {
    match EquipmentService::new(state.pool()).delete_type(type_id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(AppError::NotFound("Equipment type not found".to_string())),
        Err(
            RepositoryError::TriggerRejected { message }
            | RepositoryError::IntegrityViolation { message },
        ) => Err(AppError::Conflict(format!("Operation forbidden: {message}"))),
        Err(err) => Err(err.into()),
    }
}

/// Equipment-type deletion audit log, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn equipment_type_logs(
    State(state): State<AppState>,
) -> Result<Json<Vec<Map<String, JsonValue>>>> {
    let logs = EquipmentService::new(state.pool()).deletion_logs().await?;
    Ok(Json(logs))
}

/// Split the equipment log through `sp_split_equipment_log`.
///
/// # Errors
///
/// Returns 500 when the procedure fails or reports no row count.
pub async fn split_equipment_log(State(state): State<AppState>) -> Result<Created> {
    let outcome = EquipmentService::new(state.pool()).split_log().await?;

    let Some(rows_moved) = outcome.rows_moved else {
        return Err(AppError::Internal(
            "sp_split_equipment_log reported no row count".to_string(),
        ));
    };

    Ok(created(json!({
        "message": format!("Split {rows_moved} equipment log rows"),
        "rowsMoved": rows_moved,
        "createdTables": outcome.new_tables,
    })))
}

// =============================================================================
// Ticket assignments
// =============================================================================

/// Body of a ticket assignment request.
#[derive(Debug, Deserialize)]
pub struct TicketAssignmentRequest {
    pub assignee_first_name: Option<String>,
    pub assignee_last_name: Option<String>,
    pub ticket_title: Option<String>,
    pub role: Option<String>,
}

/// Assign an employee to a ticket through `sp_assign_ticket_by_names`.
///
/// # Errors
///
/// Returns 400 for missing fields, 404 when the employee or the ticket cannot
/// be found, and 500 for other failures.
pub async fn assign_ticket(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<TicketAssignmentRequest>,
) -> Result<Created> {
    require_fields(&[
        ("assignee_first_name", body.assignee_first_name.is_some()),
        ("assignee_last_name", body.assignee_last_name.is_some()),
        ("ticket_title", body.ticket_title.is_some()),
    ])?;
    let (Some(first_name), Some(last_name), Some(title)) = (
        body.assignee_first_name.as_deref(),
        body.assignee_last_name.as_deref(),
        body.ticket_title.as_deref(),
    ) else {
        return Err(AppError::BadRequest(
            "Missing required fields: assignee_first_name, assignee_last_name, ticket_title"
                .to_string(),
        ));
    };

    let result = TicketService::new(state.pool())
        .assign(first_name, last_name, title, body.role.as_deref())
        .await;

    match result {
        Ok(Some(assignment_id)) => Ok(created(json!({
            "message": "Ticket assignment created",
            "assignment_id": assignment_id,
        }))),
        Ok(None) | Err(RepositoryError::TriggerRejected { .. }) => Err(AppError::NotFound(
            "Assignment failed: no assignee or ticket matches the given names".to_string(),
        )),
        Err(err) => Err(err.into()),
    }
}
