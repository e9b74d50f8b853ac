//! Decoding for columns whose SQL type is decided by the database.
//!
//! Aggregates (`SUM` over `CASE` yields `DECIMAL`, `COUNT` yields `BIGINT`),
//! session variables read back after `CALL`, and `SELECT *` over audit tables
//! do not have a fixed column type, so they are decoded by inspecting the
//! type the server reports.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Number, Value as JsonValue};
use sqlx::error::BoxDynError;
use sqlx::mysql::{MySqlRow, MySqlTypeInfo, MySqlValueRef};
use sqlx::{Column, Decode, MySql, Row, Type, TypeInfo, ValueRef};

/// A numeric value of whichever SQL type the server chose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    UInt(u64),
    Decimal(Decimal),
    Float(f64),
}

impl Numeric {
    /// Convert to `f64`. Returns `None` for decimals outside the `f64` range.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Report values, not money
    pub fn to_f64(self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(v as f64),
            Self::UInt(v) => Some(v as f64),
            Self::Decimal(v) => v.to_f64(),
            Self::Float(v) => Some(v),
        }
    }

    /// Convert to `i64`, truncating any fractional part.
    ///
    /// Returns `None` when the value does not fit.
    #[must_use]
    pub fn to_i64(self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(v),
            Self::UInt(v) => i64::try_from(v).ok(),
            Self::Decimal(v) => v.trunc().to_i64(),
            Self::Float(v) => Decimal::from_f64_retain(v).and_then(|d| d.trunc().to_i64()),
        }
    }

    fn to_json(self) -> JsonValue {
        match self {
            Self::Int(v) => JsonValue::from(v),
            Self::UInt(v) => JsonValue::from(v),
            other => other
                .to_f64()
                .and_then(Number::from_f64)
                .map_or(JsonValue::Null, JsonValue::Number),
        }
    }
}

/// Broad family of a server-reported column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Bool,
    SignedInt,
    UnsignedInt,
    Decimal,
    Float,
    Text,
    DateTime,
    Timestamp,
    Date,
    Time,
    Other,
}

fn family(ty: &MySqlTypeInfo) -> Family {
    let name = ty.name();
    match name {
        "BOOLEAN" => Family::Bool,
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => Family::SignedInt,
        _ if name.ends_with(" UNSIGNED") => Family::UnsignedInt,
        "DECIMAL" => Family::Decimal,
        "FLOAT" | "DOUBLE" => Family::Float,
        "CHAR" | "VARCHAR" | "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" | "ENUM" | "SET" => {
            Family::Text
        }
        "DATETIME" => Family::DateTime,
        "TIMESTAMP" => Family::Timestamp,
        "DATE" => Family::Date,
        "TIME" => Family::Time,
        _ => Family::Other,
    }
}

impl Type<MySql> for Numeric {
    fn type_info() -> MySqlTypeInfo {
        <Decimal as Type<MySql>>::type_info()
    }

    fn compatible(ty: &MySqlTypeInfo) -> bool {
        matches!(
            family(ty),
            Family::Bool
                | Family::SignedInt
                | Family::UnsignedInt
                | Family::Decimal
                | Family::Float
                | Family::Text
        )
    }
}

impl<'r> Decode<'r, MySql> for Numeric {
    fn decode(value: MySqlValueRef<'r>) -> Result<Self, BoxDynError> {
        let ty = value.type_info().into_owned();
        match family(&ty) {
            Family::Bool => Ok(Self::Int(i64::from(<bool as Decode<MySql>>::decode(value)?))),
            Family::SignedInt => Ok(Self::Int(<i64 as Decode<MySql>>::decode(value)?)),
            Family::UnsignedInt => Ok(Self::UInt(<u64 as Decode<MySql>>::decode(value)?)),
            Family::Float if ty.name() == "FLOAT" => Ok(Self::Float(f64::from(
                <f32 as Decode<MySql>>::decode(value)?,
            ))),
            Family::Float => Ok(Self::Float(<f64 as Decode<MySql>>::decode(value)?)),
            // Session variables assigned from string expressions come back as text
            Family::Decimal | Family::Text => {
                let text = <&str as Decode<MySql>>::decode(value)?;
                Ok(Self::Decimal(text.trim().parse::<Decimal>()?))
            }
            _ => Err(format!("column type {} is not numeric", ty.name()).into()),
        }
    }
}

/// Read column `index` as a nullable number.
///
/// # Errors
///
/// Returns `sqlx::Error` if the column is missing or not numeric.
pub fn read_numeric(row: &MySqlRow, index: usize) -> Result<Option<Numeric>, sqlx::Error> {
    row.try_get::<Option<Numeric>, _>(index)
}

/// Convert a whole row to a JSON object keyed by column name.
///
/// # Errors
///
/// Returns `sqlx::Error` if a column cannot be decoded.
pub fn row_to_json(row: &MySqlRow) -> Result<Map<String, JsonValue>, sqlx::Error> {
    let mut object = Map::with_capacity(row.columns().len());
    for column in row.columns() {
        let value = column_to_json(row, column.ordinal())?;
        object.insert(column.name().to_string(), value);
    }
    Ok(object)
}

fn column_to_json(row: &MySqlRow, index: usize) -> Result<JsonValue, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(JsonValue::Null);
    }
    let ty = raw.type_info().into_owned();

    let value = match family(&ty) {
        Family::Bool => JsonValue::Bool(row.try_get::<bool, _>(index)?),
        Family::SignedInt | Family::UnsignedInt | Family::Decimal | Family::Float => {
            row.try_get::<Numeric, _>(index)?.to_json()
        }
        Family::Text => JsonValue::String(row.try_get::<String, _>(index)?),
        Family::DateTime => {
            JsonValue::String(row.try_get::<NaiveDateTime, _>(index)?.to_string())
        }
        Family::Timestamp => {
            JsonValue::String(row.try_get::<DateTime<Utc>, _>(index)?.to_rfc3339())
        }
        Family::Date => JsonValue::String(row.try_get::<NaiveDate, _>(index)?.to_string()),
        Family::Time => JsonValue::String(row.try_get::<NaiveTime, _>(index)?.to_string()),
        Family::Other => {
            let bytes = row.try_get_unchecked::<Vec<u8>, _>(index)?;
            JsonValue::String(String::from_utf8_lossy(&bytes).into_owned())
        }
    };
    Ok(value)
}
