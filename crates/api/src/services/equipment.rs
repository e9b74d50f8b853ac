//! Equipment service: the by-type report and the equipment-type procedures.

use helpdesk_core::EquipmentTypeId;
use serde_json::{Map, Value as JsonValue};
use sqlx::MySqlPool;
use tracing::instrument;

use crate::db::values::Numeric;
use crate::db::{EquipmentRepository, RepositoryError};
use crate::models::{EquipmentTypeCount, EquipmentTypeReport, SplitLogOutcome};

/// First placeholder number used by the batch insert when none is given.
pub const DEFAULT_BATCH_START_ID: i32 = 4;

/// Result of a batch insert of placeholder equipment types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchInsertOutcome {
    pub start_id: i32,
    pub rows_inserted: i64,
}

impl BatchInsertOutcome {
    /// Human-readable summary naming the inserted placeholder range.
    #[must_use]
    pub fn message(&self) -> String {
        if self.rows_inserted <= 0 {
            return "No new equipment types inserted".to_string();
        }
        let start = i64::from(self.start_id);
        format!(
            "Inserted {} new equipment types (Noname {} to Noname {})",
            self.rows_inserted,
            start,
            start + self.rows_inserted - 1
        )
    }
}

/// Equipment operations on top of [`EquipmentRepository`].
pub struct EquipmentService<'a> {
    equipment: EquipmentRepository<'a>,
}

impl<'a> EquipmentService<'a> {
    /// Create a new equipment service.
    #[must_use]
    pub const fn new(pool: &'a MySqlPool) -> Self {
        Self {
            equipment: EquipmentRepository::new(pool),
        }
    }

    /// Equipment counts and models per type, busiest type first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    #[instrument(skip(self))]
    pub async fn report(&self) -> Result<Vec<EquipmentTypeReport>, RepositoryError> {
        let rows = self.equipment.count_by_type().await?;
        group_equipment_by_type(rows)
    }

    /// Create an equipment type through its stored procedure.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the procedure fails.
    #[instrument(skip(self))]
    pub async fn create_type(&self, name: &str) -> Result<Option<EquipmentTypeId>, RepositoryError> {
        self.equipment.create_type(name).await
    }

    /// Insert placeholder equipment types starting at `start_id`.
    ///
    /// Returns `None` when the procedure does not report a row count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the procedure fails.
    #[instrument(skip(self))]
    pub async fn batch_insert(
        &self,
        start_id: i32,
    ) -> Result<Option<BatchInsertOutcome>, RepositoryError> {
        let rows = self.equipment.batch_insert_types(start_id).await?;
        Ok(rows.map(|rows_inserted| BatchInsertOutcome {
            start_id,
            rows_inserted,
        }))
    }

    /// Delete an equipment type. Returns `true` if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::TriggerRejected` when the cardinality trigger
    /// blocks the delete, and other `RepositoryError`s for failures.
    #[instrument(skip(self))]
    pub async fn delete_type(&self, id: EquipmentTypeId) -> Result<bool, RepositoryError> {
        self.equipment.delete_type(id).await
    }

    /// Equipment-type deletion audit rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    #[instrument(skip(self))]
    pub async fn deletion_logs(&self) -> Result<Vec<Map<String, JsonValue>>, RepositoryError> {
        self.equipment.deletion_logs().await
    }

    /// Split the equipment log into per-group tables.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the procedure fails.
    #[instrument(skip(self))]
    pub async fn split_log(&self) -> Result<SplitLogOutcome, RepositoryError> {
        self.equipment.split_log().await
    }
}

/// Turn flat report rows into API entries, keeping row order.
///
/// # Errors
///
/// Returns `RepositoryError::DataCorruption` if a count is missing or not an
/// integer. Both columns aggregate an inner join, so neither can be NULL.
pub fn group_equipment_by_type(
    rows: Vec<EquipmentTypeCount>,
) -> Result<Vec<EquipmentTypeReport>, RepositoryError> {
    rows.into_iter()
        .map(|row| {
            Ok(EquipmentTypeReport {
                total_count: count(row.total_count, "total_count", &row.type_name)?,
                in_use_count: count(row.in_use_count, "in_use_count", &row.type_name)?,
                models: row.models_used.as_deref().map(split_models).unwrap_or_default(),
                equipment_type: row.type_name,
            })
        })
        .collect()
}

fn count(value: Option<Numeric>, column: &str, type_name: &str) -> Result<i64, RepositoryError> {
    value.and_then(Numeric::to_i64).ok_or_else(|| {
        RepositoryError::DataCorruption(format!("{column} for {type_name} is not an integer"))
    })
}

fn split_models(models: &str) -> Vec<String> {
    models
        .split(',')
        .map(str::trim)
        .filter(|model| !model.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn row(name: &str, total: i64, in_use: Decimal, models: Option<&str>) -> EquipmentTypeCount {
        EquipmentTypeCount {
            type_name: name.to_string(),
            total_count: Some(Numeric::Int(total)),
            in_use_count: Some(Numeric::Decimal(in_use)),
            models_used: models.map(String::from),
        }
    }

    #[test]
    fn test_group_splits_and_trims_models() {
        let report = group_equipment_by_type(vec![row(
            "Laptop",
            3,
            Decimal::new(2, 0),
            Some("ThinkPad X1, MacBook Air ,  Latitude 7440"),
        )])
        .unwrap();

        assert_eq!(
            report,
            vec![EquipmentTypeReport {
                equipment_type: "Laptop".to_string(),
                total_count: 3,
                in_use_count: 2,
                models: vec![
                    "ThinkPad X1".to_string(),
                    "MacBook Air".to_string(),
                    "Latitude 7440".to_string(),
                ],
            }]
        );
    }

    #[test]
    fn test_group_drops_empty_models() {
        let report =
            group_equipment_by_type(vec![row("Monitor", 2, Decimal::ZERO, Some("Dell U2720, , "))])
                .unwrap();
        assert_eq!(report[0].models, vec!["Dell U2720".to_string()]);
    }

    #[test]
    fn test_group_missing_models_is_empty() {
        let report = group_equipment_by_type(vec![row("Printer", 1, Decimal::ONE, None)]).unwrap();
        assert!(report[0].models.is_empty());
    }

    #[test]
    fn test_group_keeps_row_order() {
        let report = group_equipment_by_type(vec![
            row("Laptop", 5, Decimal::new(4, 0), Some("A")),
            row("Phone", 2, Decimal::ONE, Some("B")),
        ])
        .unwrap();
        let names: Vec<_> = report.iter().map(|r| r.equipment_type.as_str()).collect();
        assert_eq!(names, ["Laptop", "Phone"]);
    }

    #[test]
    fn test_group_null_total_is_data_corruption() {
        let err = group_equipment_by_type(vec![EquipmentTypeCount {
            type_name: "Dock".to_string(),
            total_count: None,
            in_use_count: Some(Numeric::Int(0)),
            models_used: Some(String::new()),
        }])
        .unwrap_err();
        assert!(
            matches!(err, RepositoryError::DataCorruption(ref msg) if msg.contains("total_count"))
        );
    }

    #[test]
    fn test_group_out_of_range_in_use_is_data_corruption() {
        let err = group_equipment_by_type(vec![EquipmentTypeCount {
            type_name: "Dock".to_string(),
            total_count: Some(Numeric::Int(1)),
            in_use_count: Some(Numeric::UInt(u64::MAX)),
            models_used: None,
        }])
        .unwrap_err();
        assert!(
            matches!(err, RepositoryError::DataCorruption(ref msg) if msg.contains("in_use_count"))
        );
    }

    #[test]
    fn test_group_empty_models_string_is_empty() {
        let report =
            group_equipment_by_type(vec![row("Dock", 1, Decimal::ZERO, Some(""))]).unwrap();
        assert!(report[0].models.is_empty());
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report =
            group_equipment_by_type(vec![row("Laptop", 1, Decimal::ONE, Some("X"))]).unwrap();
        let json = serde_json::to_value(&report[0]).unwrap();
        assert_eq!(json["equipmentType"], "Laptop");
        assert_eq!(json["totalCount"], 1);
        assert_eq!(json["inUseCount"], 1);
        assert_eq!(json["models"][0], "X");
    }

    #[test]
    fn test_batch_message_names_range() {
        let outcome = BatchInsertOutcome {
            start_id: 4,
            rows_inserted: 10,
        };
        assert_eq!(
            outcome.message(),
            "Inserted 10 new equipment types (Noname 4 to Noname 13)"
        );
    }

    #[test]
    fn test_batch_message_when_nothing_inserted() {
        let outcome = BatchInsertOutcome {
            start_id: 4,
            rows_inserted: 0,
        };
        assert_eq!(outcome.message(), "No new equipment types inserted");
    }
}
