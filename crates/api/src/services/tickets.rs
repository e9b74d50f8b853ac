//! Ticket service: assignments and priority statistics.

use helpdesk_core::{AssignmentId, TicketId};
use sqlx::MySqlPool;
use tracing::instrument;

use crate::db::values::Numeric;
use crate::db::{RepositoryError, TicketRepository};
use crate::models::ticket::DEFAULT_ASSIGNMENT_ROLE;
use crate::models::{NewTicketAssignment, PriorityStats, PriorityStatsRow, TicketAssignment};

/// Ticket operations on top of [`TicketRepository`].
pub struct TicketService<'a> {
    tickets: TicketRepository<'a>,
}

impl<'a> TicketService<'a> {
    /// Create a new ticket service.
    #[must_use]
    pub const fn new(pool: &'a MySqlPool) -> Self {
        Self {
            tickets: TicketRepository::new(pool),
        }
    }

    /// Assignments of a ticket, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    #[instrument(skip(self))]
    pub async fn assignments(
        &self,
        ticket_id: TicketId,
    ) -> Result<Vec<TicketAssignment>, RepositoryError> {
        self.tickets.assignments_for_ticket(ticket_id).await
    }

    /// Assign an employee to a ticket by the employee's name and the ticket title.
    ///
    /// `role` defaults to [`DEFAULT_ASSIGNMENT_ROLE`]. Returns `None` when the
    /// employee or the ticket cannot be resolved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the procedure fails.
    #[instrument(skip(self))]
    pub async fn assign(
        &self,
        assignee_first_name: &str,
        assignee_last_name: &str,
        ticket_title: &str,
        role: Option<&str>,
    ) -> Result<Option<AssignmentId>, RepositoryError> {
        let assignment = NewTicketAssignment {
            assignee_first_name: assignee_first_name.to_string(),
            assignee_last_name: assignee_last_name.to_string(),
            ticket_title: ticket_title.to_string(),
            role: role.unwrap_or(DEFAULT_ASSIGNMENT_ROLE).to_string(),
        };
        self.tickets.assign_by_names(&assignment).await
    }

    /// Ticket priority statistics.
    ///
    /// Returns `None` when the procedure produces no row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if a statistic is `NULL` or
    /// not numeric, and other `RepositoryError`s for failures.
    #[instrument(skip(self))]
    pub async fn priority_stats(&self) -> Result<Option<PriorityStats>, RepositoryError> {
        self.tickets
            .priority_stats()
            .await?
            .map(priority_stats_from_row)
            .transpose()
    }
}

/// Convert the procedure row, widening every statistic to `f64`.
///
/// # Errors
///
/// Returns `RepositoryError::DataCorruption` if a statistic is missing.
pub fn priority_stats_from_row(row: PriorityStatsRow) -> Result<PriorityStats, RepositoryError> {
    Ok(PriorityStats {
        max_priority: stat(row.max_priority, "max_priority")?,
        min_priority: stat(row.min_priority, "min_priority")?,
        sum_priority: stat(row.sum_priority, "sum_priority")?,
        avg_priority: stat(row.avg_priority, "avg_priority")?,
        column_name: row.column_name,
        table_name: row.table_name,
    })
}

fn stat(value: Option<Numeric>, column: &str) -> Result<f64, RepositoryError> {
    value
        .and_then(Numeric::to_f64)
        .ok_or_else(|| RepositoryError::DataCorruption(format!("{column} is not a number")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn row() -> PriorityStatsRow {
        PriorityStatsRow {
            column_name: Some("priority".to_string()),
            table_name: Some("tickets".to_string()),
            max_priority: Some(Numeric::Int(5)),
            min_priority: Some(Numeric::Int(1)),
            sum_priority: Some(Numeric::Decimal(Decimal::new(42, 0))),
            avg_priority: Some(Numeric::Decimal(Decimal::new(28, 1))),
        }
    }

    #[test]
    fn test_stats_are_widened_to_float() {
        let stats = priority_stats_from_row(row()).unwrap();

        assert!((stats.max_priority - 5.0).abs() < f64::EPSILON);
        assert!((stats.min_priority - 1.0).abs() < f64::EPSILON);
        assert!((stats.sum_priority - 42.0).abs() < f64::EPSILON);
        assert!((stats.avg_priority - 2.8).abs() < 1e-9);
        assert_eq!(stats.table_name.as_deref(), Some("tickets"));
    }

    #[test]
    fn test_null_statistic_is_corruption() {
        let result = priority_stats_from_row(PriorityStatsRow {
            avg_priority: None,
            ..row()
        });
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let json = serde_json::to_value(priority_stats_from_row(row()).unwrap()).unwrap();
        assert_eq!(json["columnName"], "priority");
        assert_eq!(json["tableName"], "tickets");
        assert_eq!(json["maxPriority"], 5.0);
        assert_eq!(json["sumPriority"], 42.0);
    }
}
