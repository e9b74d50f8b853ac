//! Ticket assignment and priority statistics rows.

use chrono::NaiveDateTime;
use helpdesk_core::AssignmentId;
use serde::Serialize;

use crate::db::values::Numeric;

/// Role used when an assignment request does not name one.
pub const DEFAULT_ASSIGNMENT_ROLE: &str = "resolver";

/// Row of the assignments-for-ticket report (serialized as stored).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct TicketAssignment {
    pub assignment_id: AssignmentId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Option<String>,
    pub assigned_at: Option<NaiveDateTime>,
}

/// Arguments of `sp_assign_ticket_by_names`.
///
/// The procedure resolves the assignee and the ticket by name server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicketAssignment {
    pub assignee_first_name: String,
    pub assignee_last_name: String,
    pub ticket_title: String,
    pub role: String,
}

/// Single row produced by `sp_report_ticket_priority_stats`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PriorityStatsRow {
    pub column_name: Option<String>,
    pub table_name: Option<String>,
    pub max_priority: Option<Numeric>,
    pub min_priority: Option<Numeric>,
    pub sum_priority: Option<Numeric>,
    pub avg_priority: Option<Numeric>,
}

/// Ticket priority statistics as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityStats {
    pub column_name: Option<String>,
    pub table_name: Option<String>,
    pub max_priority: f64,
    pub min_priority: f64,
    pub sum_priority: f64,
    pub avg_priority: f64,
}
