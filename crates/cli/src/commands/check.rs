//! Connectivity check.
//!
//! Verifies that the database answers and that the stored procedures the API
//! calls are installed in the current schema.

use sqlx::Row;

use super::{CommandError, connect};

/// Procedures the API calls by name.
pub const REQUIRED_PROCEDURES: [&str; 5] = [
    "sp_assign_ticket_by_names",
    "sp_batch_insert_equipment_types",
    "sp_insert_equipment_type",
    "sp_report_ticket_priority_stats",
    "sp_split_equipment_log",
];

/// Run the check.
///
/// Missing procedures are reported as warnings; the corresponding endpoints
/// will answer 500 until they are installed.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    sqlx::query("SELECT 1").fetch_one(&pool).await?;
    tracing::info!("Database reachable");

    let rows = sqlx::query(
        r"
        SELECT CAST(routine_name AS CHAR) AS routine_name
        FROM information_schema.routines
        WHERE routine_schema = DATABASE() AND routine_type = 'PROCEDURE'
        ",
    )
    .fetch_all(&pool)
    .await?;
    let installed = rows
        .iter()
        .map(|row| row.try_get::<String, _>("routine_name"))
        .collect::<Result<Vec<_>, _>>()?;

    let missing = missing_procedures(&installed);
    if missing.is_empty() {
        tracing::info!("All {} procedures installed", REQUIRED_PROCEDURES.len());
    } else {
        for name in &missing {
            tracing::warn!(procedure = *name, "Stored procedure missing");
        }
    }

    Ok(())
}

fn missing_procedures(installed: &[String]) -> Vec<&'static str> {
    REQUIRED_PROCEDURES
        .into_iter()
        .filter(|required| {
            !installed
                .iter()
                .any(|name| name.eq_ignore_ascii_case(required))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_procedures() {
        let installed = vec![
            "sp_insert_equipment_type".to_string(),
            "SP_SPLIT_EQUIPMENT_LOG".to_string(),
        ];
        assert_eq!(
            missing_procedures(&installed),
            vec![
                "sp_assign_ticket_by_names",
                "sp_batch_insert_equipment_types",
                "sp_report_ticket_priority_stats",
            ]
        );
    }

    #[test]
    fn test_nothing_missing() {
        let installed: Vec<String> = REQUIRED_PROCEDURES.iter().map(ToString::to_string).collect();
        assert!(missing_procedures(&installed).is_empty());
    }
}
