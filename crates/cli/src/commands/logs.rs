//! Audit log commands.

use helpdesk_api::services::EquipmentService;

use super::{CommandError, connect, print_json};

/// Print the equipment-type deletion log, newest first.
///
/// # Errors
///
/// Returns an error if the connection or the query fails.
pub async fn deletions() -> Result<(), CommandError> {
    let pool = connect().await?;

    let logs = EquipmentService::new(&pool).deletion_logs().await?;
    tracing::info!(entries = logs.len(), "Deletion log read");

    print_json(&logs)
}
