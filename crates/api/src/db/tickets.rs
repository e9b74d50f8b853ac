//! Ticket assignment repository.

use helpdesk_core::{AssignmentId, TicketId};
use sqlx::MySqlPool;
use tracing::instrument;

use super::{RepositoryError, numeric_to_i32, read_session_variable};
use crate::models::{NewTicketAssignment, PriorityStatsRow, TicketAssignment};

/// Repository for `ticket_assignments` and ticket procedures.
pub struct TicketRepository<'a> {
    pool: &'a MySqlPool,
}

impl<'a> TicketRepository<'a> {
    /// Create a new ticket repository.
    #[must_use]
    pub const fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// List the assignments of a ticket, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn assignments_for_ticket(
        &self,
        ticket_id: TicketId,
    ) -> Result<Vec<TicketAssignment>, RepositoryError> {
        let rows = sqlx::query_as::<_, TicketAssignment>(
            r"
            SELECT ta.assignment_id, e.first_name, e.last_name, e.email,
                   ta.role, ta.assigned_at
            FROM ticket_assignments ta
            JOIN employees e ON ta.assignee_id = e.employee_id
            WHERE ta.ticket_id = ?
            ORDER BY ta.assigned_at DESC
            ",
        )
        .bind(ticket_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Assign an employee to a ticket via `sp_assign_ticket_by_names`.
    ///
    /// Returns `None` when the procedure leaves `@assignment_id` unset, which
    /// it does when the assignee or the ticket cannot be found.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::TriggerRejected` if the procedure signals,
    /// `RepositoryError::DataCorruption` if the output is not a valid id, and
    /// `RepositoryError::Database` for other failures.
    #[instrument(skip(self, assignment), fields(ticket_title = %assignment.ticket_title))]
    pub async fn assign_by_names(
        &self,
        assignment: &NewTicketAssignment,
    ) -> Result<Option<AssignmentId>, RepositoryError> {
        // The OUT variable is session-scoped, so CALL and SELECT share the transaction's connection
        let mut tx = self.pool.begin().await?;

        sqlx::query("CALL sp_assign_ticket_by_names(?, ?, ?, ?, @assignment_id)")
            .bind(&assignment.assignee_first_name)
            .bind(&assignment.assignee_last_name)
            .bind(&assignment.ticket_title)
            .bind(&assignment.role)
            .execute(&mut *tx)
            .await?;

        let assignment_id = read_session_variable(&mut tx, "@assignment_id").await?;

        tx.commit().await?;

        assignment_id
            .map(|value| numeric_to_i32(value, "assignment id").map(AssignmentId::new))
            .transpose()
    }

    /// Run `sp_report_ticket_priority_stats` and return its single row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the call fails.
    #[instrument(skip(self))]
    pub async fn priority_stats(&self) -> Result<Option<PriorityStatsRow>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let rows = sqlx::query_as::<_, PriorityStatsRow>("CALL sp_report_ticket_priority_stats()")
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(rows.into_iter().next())
    }
}
