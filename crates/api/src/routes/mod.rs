//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                                         - Liveness
//! GET    /health/ready                                   - Database readiness
//!
//! # Employees
//! GET    /api/employees/                                 - List employees
//! POST   /api/employees/                                 - Create employee
//! GET    /api/employees/{employee_id}                    - Employee detail
//! PUT    /api/employees/{employee_id}                    - Replace employee
//! DELETE /api/employees/{employee_id}                    - Delete employee (trigger-guarded)
//!
//! # Reports
//! GET    /api/employees/departments/{department_id}      - Employees of a department
//! GET    /api/employees/tickets/{ticket_id}/assignments  - Assignments of a ticket
//! GET    /api/employees/equipment_by_type_report         - Equipment grouped by type
//! GET    /api/employees/ticket_priority_stats            - Ticket priority statistics
//!
//! # Triggers and stored procedures
//! POST   /api/employees/specializations/                 - Create specialization
//! POST   /api/employees/equipment_types/                 - Create equipment type
//! POST   /api/employees/ticket_assignments/              - Assign ticket by names
//! POST   /api/employees/equipment_types/batch_insert     - Insert placeholder types
//! POST   /api/employees/equipment/split_log              - Split equipment log
//! DELETE /api/employees/equipment_types/{type_id}        - Delete equipment type
//! GET    /api/employees/equipment_types/logs             - Type deletion log
//! ```
//!
//! Paths declared with a trailing slash also answer without it.

pub mod employees;
pub mod extract;
pub mod health;
pub mod procedures;
pub mod reports;

use axum::Router;

use crate::state::AppState;

/// Build the complete router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(employees::router())
        .merge(reports::router())
        .merge(procedures::router())
}
