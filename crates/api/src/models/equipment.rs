//! Equipment report rows and DTOs.

use serde::Serialize;

use crate::db::values::Numeric;

/// Flat row of the equipment-by-type report.
///
/// `models_used` is a `GROUP_CONCAT` of every model of the type, separated
/// by `", "`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct EquipmentTypeCount {
    pub type_name: String,
    pub total_count: Option<Numeric>,
    pub in_use_count: Option<Numeric>,
    pub models_used: Option<String>,
}

/// Equipment report entry as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentTypeReport {
    pub equipment_type: String,
    pub total_count: i64,
    pub in_use_count: i64,
    pub models: Vec<String>,
}

/// Result of `sp_split_equipment_log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLogOutcome {
    /// Rows the procedure reports as moved; `None` when it left the output unset.
    pub rows_moved: Option<i64>,
    /// `equipment_log_%` tables present after the split.
    pub new_tables: Vec<String>,
}
