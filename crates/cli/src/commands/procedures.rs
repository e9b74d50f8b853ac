//! Stored procedure commands.
//!
//! # Usage
//!
//! ```bash
//! helpdesk-cli procedures batch-insert --start-id 4
//! helpdesk-cli procedures split-log
//! helpdesk-cli procedures priority-stats
//! ```

use helpdesk_api::services::{EquipmentService, TicketService};
use serde_json::json;

use super::{CommandError, connect, print_json};

/// Run `sp_batch_insert_equipment_types` from `start_id`.
///
/// # Errors
///
/// Returns an error if the connection or the procedure fails.
pub async fn batch_insert(start_id: i32) -> Result<(), CommandError> {
    let pool = connect().await?;

    let outcome = EquipmentService::new(&pool)
        .batch_insert(start_id)
        .await?
        .ok_or(CommandError::NoResult("sp_batch_insert_equipment_types"))?;

    tracing::info!("{}", outcome.message());
    print_json(&json!({
        "startId": outcome.start_id,
        "rowsInserted": outcome.rows_inserted,
    }))
}

/// Run `sp_split_equipment_log` and list the resulting tables.
///
/// # Errors
///
/// Returns an error if the connection or the procedure fails.
pub async fn split_log() -> Result<(), CommandError> {
    let pool = connect().await?;

    let outcome = EquipmentService::new(&pool).split_log().await?;
    let rows_moved = outcome
        .rows_moved
        .ok_or(CommandError::NoResult("sp_split_equipment_log"))?;

    tracing::info!(rows_moved, tables = outcome.new_tables.len(), "Equipment log split");
    print_json(&json!({
        "rowsMoved": rows_moved,
        "createdTables": outcome.new_tables,
    }))
}

/// Print `sp_report_ticket_priority_stats`.
///
/// # Errors
///
/// Returns an error if the connection or the procedure fails.
pub async fn priority_stats() -> Result<(), CommandError> {
    let pool = connect().await?;

    let stats = TicketService::new(&pool)
        .priority_stats()
        .await?
        .ok_or(CommandError::NoResult("sp_report_ticket_priority_stats"))?;

    print_json(&stats)
}
