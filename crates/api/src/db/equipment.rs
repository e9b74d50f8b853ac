//! Equipment and equipment-type repository.
//!
//! Deleting a type is guarded by a cardinality trigger and logged by the
//! database into `equipment_type_deletion_log`.

use helpdesk_core::EquipmentTypeId;
use serde_json::{Map, Value as JsonValue};
use sqlx::{MySqlPool, Row};
use tracing::instrument;

use super::values::row_to_json;
use super::{RepositoryError, numeric_to_i32, numeric_to_i64, read_session_variable};
use crate::models::{EquipmentTypeCount, SplitLogOutcome};

/// Repository for `equipment`, `equipment_types` and the equipment procedures.
pub struct EquipmentRepository<'a> {
    pool: &'a MySqlPool,
}

impl<'a> EquipmentRepository<'a> {
    /// Create a new equipment repository.
    #[must_use]
    pub const fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// Count equipment per type, busiest type first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn count_by_type(&self) -> Result<Vec<EquipmentTypeCount>, RepositoryError> {
        let rows = sqlx::query_as::<_, EquipmentTypeCount>(
            r"
            SELECT et.name AS type_name,
                   COUNT(e.equipment_id) AS total_count,
                   SUM(CASE WHEN e.status = 'in_use' THEN 1 ELSE 0 END) AS in_use_count,
                   GROUP_CONCAT(e.model SEPARATOR ', ') AS models_used
            FROM equipment_types et
            JOIN equipment e ON et.equipment_type_id = e.equipment_type_id
            GROUP BY et.name
            ORDER BY total_count DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Create an equipment type via `sp_insert_equipment_type`.
    ///
    /// Returns `None` when the procedure leaves `@new_id` unset (for example
    /// on a duplicate name).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::TriggerRejected` or `RepositoryError::IntegrityViolation`
    /// if the insert is rejected, and `RepositoryError::Database` for other failures.
    #[instrument(skip(self))]
    pub async fn create_type(&self, name: &str) -> Result<Option<EquipmentTypeId>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("CALL sp_insert_equipment_type(?, @new_id)")
            .bind(name)
            .execute(&mut *tx)
            .await?;
        let new_id = read_session_variable(&mut tx, "@new_id").await?;

        tx.commit().await?;

        new_id
            .map(|value| numeric_to_i32(value, "equipment type id").map(EquipmentTypeId::new))
            .transpose()
    }

    /// Insert placeholder types via `sp_batch_insert_equipment_types`.
    ///
    /// Returns the number of rows the procedure reports in `@rows_inserted`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the call fails.
    #[instrument(skip(self))]
    pub async fn batch_insert_types(&self, start_id: i32) -> Result<Option<i64>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("CALL sp_batch_insert_equipment_types(?, @rows_inserted)")
            .bind(start_id)
            .execute(&mut *tx)
            .await?;
        let rows = read_session_variable(&mut tx, "@rows_inserted").await?;

        tx.commit().await?;

        rows.map(|value| numeric_to_i64(value, "inserted row count"))
            .transpose()
    }

    /// Delete an equipment type.
    ///
    /// Returns `true` if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::TriggerRejected` when the cardinality trigger
    /// refuses the deletion, and `RepositoryError::Database` for other failures.
    #[instrument(skip(self))]
    pub async fn delete_type(&self, id: EquipmentTypeId) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM equipment_types WHERE equipment_type_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    /// Read the equipment-type deletion audit log, newest first.
    ///
    /// The log is owned by the database, so rows are returned with whatever
    /// columns it has.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn deletion_logs(&self) -> Result<Vec<Map<String, JsonValue>>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM equipment_type_deletion_log ORDER BY log_id DESC")
            .fetch_all(self.pool)
            .await?;

        rows.iter()
            .map(|row| row_to_json(row).map_err(RepositoryError::from))
            .collect()
    }

    /// Split the equipment log into per-group tables via `sp_split_equipment_log`.
    ///
    /// The procedure creates `equipment_log_*` tables; their names are read
    /// back once the call has committed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the call fails.
    #[instrument(skip(self))]
    pub async fn split_log(&self) -> Result<SplitLogOutcome, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("CALL sp_split_equipment_log(@rows_moved)")
            .execute(&mut *tx)
            .await?;
        let rows_moved = read_session_variable(&mut tx, "@rows_moved")
            .await?
            .map(|value| numeric_to_i64(value, "moved row count"))
            .transpose()?;

        tx.commit().await?;

        let tables = sqlx::query(
            r"
            SELECT CAST(table_name AS CHAR) AS table_name
            FROM information_schema.tables
            WHERE table_schema = DATABASE()
              AND table_name LIKE 'equipment\_log\_%'
            ORDER BY table_name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let new_tables = tables
            .iter()
            .map(|row| row.try_get::<String, _>("table_name"))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SplitLogOutcome {
            rows_moved,
            new_tables,
        })
    }
}
