//! Employee CRUD handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use helpdesk_core::{DepartmentId, EmployeeId};
use serde::Deserialize;

use super::extract::{ApiJson, ApiPath, require_fields};
use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::models::{EmployeeDto, NewEmployee};
use crate::services::EmployeeService;
use crate::state::AppState;

/// Build the employee CRUD router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/employees", get(list_employees).post(create_employee))
        .route("/api/employees/", get(list_employees).post(create_employee))
        .route(
            "/api/employees/{employee_id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}

/// `is_it_staff` as clients send it: a JSON boolean or a 0/1 integer.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum StaffFlag {
    Bool(bool),
    Int(i64),
}

impl From<StaffFlag> for bool {
    fn from(flag: StaffFlag) -> Self {
        match flag {
            StaffFlag::Bool(value) => value,
            StaffFlag::Int(value) => value != 0,
        }
    }
}

/// Body of employee create and update requests.
#[derive(Debug, Deserialize)]
pub struct EmployeeRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub is_it_staff: Option<StaffFlag>,
}

impl EmployeeRequest {
    /// Check the create fields; `is_it_staff` defaults to `false`.
    fn into_new_employee(self) -> Result<NewEmployee> {
        require_fields(&[
            ("first_name", self.first_name.is_some()),
            ("last_name", self.last_name.is_some()),
            ("email", self.email.is_some()),
            ("department_id", self.department_id.is_some()),
        ])?;
        self.build()
    }

    /// Check the update fields; every column must be given.
    fn into_replacement(self) -> Result<NewEmployee> {
        require_fields(&[
            ("first_name", self.first_name.is_some()),
            ("last_name", self.last_name.is_some()),
            ("email", self.email.is_some()),
            ("department_id", self.department_id.is_some()),
            ("is_it_staff", self.is_it_staff.is_some()),
        ])?;
        self.build()
    }

    fn build(self) -> Result<NewEmployee> {
        match (self.first_name, self.last_name, self.email, self.department_id) {
            (Some(first_name), Some(last_name), Some(email), Some(department_id)) => {
                Ok(NewEmployee {
                    first_name,
                    last_name,
                    email,
                    department_id,
                    is_it_staff: self.is_it_staff.is_some_and(bool::from),
                })
            }
            _ => Err(AppError::BadRequest(
                "Missing required fields: first_name, last_name, email, department_id".to_string(),
            )),
        }
    }
}

/// List every employee.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<EmployeeDto>>> {
    let employees = EmployeeService::new(state.pool()).list().await?;
    Ok(Json(employees))
}

/// Create an employee and return it as stored.
///
/// # Errors
///
/// Returns 400 for missing fields, 409 when the database rejects the row,
/// and 500 for other failures.
pub async fn create_employee(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<EmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeDto>)> {
    let employee = body.into_new_employee()?;

    let created = EmployeeService::new(state.pool())
        .create(&employee)
        .await?
        .ok_or_else(|| AppError::Internal("created employee could not be read back".to_string()))?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Get one employee.
///
/// # Errors
///
/// Returns 404 if the employee does not exist.
pub async fn get_employee(
    State(state): State<AppState>,
    ApiPath(employee_id): ApiPath<EmployeeId>,
) -> Result<Json<EmployeeDto>> {
    EmployeeService::new(state.pool())
        .get(employee_id)
        .await?
        .map(Json)
        .ok_or_else(employee_not_found)
}

/// Replace every writable field of an employee.
///
/// Existence is checked before the body, so an unknown id is a 404 even
/// when the body is incomplete.
///
/// # Errors
///
/// Returns 404 for an unknown employee, 400 for missing fields, 409 when the
/// database rejects the values, and 500 when nothing was updated.
pub async fn update_employee(
    State(state): State<AppState>,
    ApiPath(employee_id): ApiPath<EmployeeId>,
    body: std::result::Result<ApiJson<EmployeeRequest>, AppError>,
) -> Result<Json<EmployeeDto>> {
    let service = EmployeeService::new(state.pool());

    if service.get(employee_id).await?.is_none() {
        return Err(employee_not_found());
    }

    let ApiJson(body) = body?;
    let employee = body.into_replacement()?;

    service
        .update(employee_id, &employee)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::Internal("Update failed".to_string()))
}

/// Delete an employee.
///
/// The schema normally forbids this, so the usual answer is 403 with the
/// trigger's message.
///
/// # Errors
///
/// Returns 403 when the deletion trigger fires, 409 when the row is still
/// referenced or survives the delete, 404 for an unknown employee, and 500
/// for other failures.
pub async fn delete_employee(
    State(state): State<AppState>,
    ApiPath(employee_id): ApiPath<EmployeeId>,
) -> Result<StatusCode> {
    let service = EmployeeService::new(state.pool());

    match service.delete(employee_id).await {
        Ok(true) => {
            tracing::warn!(%employee_id, "Employee deleted; the deletion trigger did not fire");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => {
            if service.get(employee_id).await?.is_some() {
                Err(AppError::Conflict(
                    "Deletion blocked (the employee is still referenced)".to_string(),
                ))
            } else {
                Err(employee_not_found())
            }
        }
        Err(RepositoryError::TriggerRejected { message }) => {
            Err(AppError::Forbidden(format!("Operation forbidden: {message}")))
        }
        Err(RepositoryError::IntegrityViolation { message }) => {
            Err(AppError::Conflict(format!("Deletion blocked: {message}")))
        }
        Err(err) => Err(err.into()),
    }
}

fn employee_not_found() -> AppError {
    AppError::NotFound("Employee not found".to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> EmployeeRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_create_defaults_it_staff_to_false() {
        let employee = request(serde_json::json!({
            "first_name": "Olena",
            "last_name": "Kovalenko",
            "email": "olena@helpdesk.test",
            "department_id": 2
        }))
        .into_new_employee()
        .unwrap();

        assert_eq!(employee.department_id, DepartmentId::new(2));
        assert!(!employee.is_it_staff);
    }

    #[test]
    fn test_create_lists_missing_fields() {
        let err = request(serde_json::json!({ "first_name": "Olena" }))
            .into_new_employee()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Bad request: Missing required fields: last_name, email, department_id"
        );
    }

    #[test]
    fn test_update_requires_it_staff() {
        let err = request(serde_json::json!({
            "first_name": "Olena",
            "last_name": "Kovalenko",
            "email": "olena@helpdesk.test",
            "department_id": 2
        }))
        .into_replacement()
        .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(m) if m.ends_with("is_it_staff")));
    }

    #[test]
    fn test_staff_flag_accepts_bool_and_int() {
        let flag: StaffFlag = serde_json::from_str("true").unwrap();
        assert!(bool::from(flag));
        let flag: StaffFlag = serde_json::from_str("0").unwrap();
        assert!(!bool::from(flag));
        let flag: StaffFlag = serde_json::from_str("1").unwrap();
        assert!(bool::from(flag));
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        let result =
            serde_json::from_value::<EmployeeRequest>(serde_json::json!({ "department_id": "two" }));
        assert!(result.is_err());
    }
}
