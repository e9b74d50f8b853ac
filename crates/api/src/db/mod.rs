//! Database operations for the helpdesk `MySQL` schema.
//!
//! ## Tables
//!
//! - `employees` - Staff records, deletions blocked by a trigger
//! - `departments` - Referenced by employees and specializations
//! - `IT_Specialization` - Insert validated by a department trigger
//! - `equipment`, `equipment_types` - Inventory, type deletion guarded by a cardinality trigger
//! - `equipment_type_deletion_log` - Audit rows written by the database on type deletion
//! - `ticket_assignments` - Employee/ticket links
//!
//! ## Stored procedures
//!
//! - `sp_insert_equipment_type(name, OUT new_id)`
//! - `sp_assign_ticket_by_names(first, last, title, role, OUT assignment_id)`
//! - `sp_batch_insert_equipment_types(start_id, OUT rows_inserted)`
//! - `sp_report_ticket_priority_stats()`
//! - `sp_split_equipment_log(OUT rows_moved)`
//!
//! Triggers and procedures are owned by the schema; this module only knows
//! their call signatures and the SQLSTATE they raise.

pub mod employees;
pub mod equipment;
pub mod specializations;
pub mod tickets;
pub mod values;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{MySqlConnection, MySqlPool};
use thiserror::Error;

pub use employees::EmployeeRepository;
pub use equipment::EquipmentRepository;
pub use specializations::SpecializationRepository;
pub use tickets::TicketRepository;

/// Prefix our triggers put in front of their `MESSAGE_TEXT`.
pub const TRIGGER_ERROR_MARKER: &str = "SQL Trigger Error:";

/// SQLSTATE raised by `SIGNAL` in triggers and procedures.
const SIGNAL_SQLSTATE: &str = "45000";

/// SQLSTATE class for integrity constraint violations.
const INTEGRITY_SQLSTATE_CLASS: &str = "23";

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A trigger or procedure aborted the statement with `SIGNAL`.
    #[error("rejected by trigger: {message}")]
    TriggerRejected { message: String },

    /// Foreign key, unique or not-null constraint violation.
    #[error("integrity violation: {message}")]
    IntegrityViolation { message: String },

    /// Any other database error from sqlx.
    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// Data in the database is corrupted or has an unexpected shape.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// How a driver error should be treated by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorClass {
    Trigger,
    Integrity,
    Other,
}

fn classify(sqlstate: Option<&str>, message: &str) -> ErrorClass {
    match sqlstate {
        Some(SIGNAL_SQLSTATE) => ErrorClass::Trigger,
        // Triggers may signal a custom SQLSTATE but still tag their message
        _ if message.contains(TRIGGER_ERROR_MARKER) => ErrorClass::Trigger,
        Some(state) if state.starts_with(INTEGRITY_SQLSTATE_CLASS) => ErrorClass::Integrity,
        _ => ErrorClass::Other,
    }
}

/// Strip the trigger marker (and anything before it) from a trigger message.
#[must_use]
pub fn clean_trigger_message(message: &str) -> String {
    message
        .split_once(TRIGGER_ERROR_MARKER)
        .map_or(message, |(_, rest)| rest)
        .trim()
        .to_string()
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let message = db_err.message();
            match classify(db_err.code().as_deref(), message) {
                ErrorClass::Trigger => {
                    return Self::TriggerRejected {
                        message: clean_trigger_message(message),
                    };
                }
                ErrorClass::Integrity => {
                    return Self::IntegrityViolation {
                        message: message.trim().to_string(),
                    };
                }
                ErrorClass::Other => {}
            }
        }
        Self::Database(err)
    }
}

/// Read a session variable set by a procedure's `OUT` parameter.
///
/// Must run on the same connection as the `CALL`.
async fn read_session_variable(
    conn: &mut MySqlConnection,
    variable: &'static str,
) -> Result<Option<values::Numeric>, RepositoryError> {
    let row = sqlx::query(&format!("SELECT {variable}"))
        .fetch_one(conn)
        .await?;
    Ok(values::read_numeric(&row, 0)?)
}

fn numeric_to_i64(value: values::Numeric, what: &str) -> Result<i64, RepositoryError> {
    value
        .to_i64()
        .ok_or_else(|| RepositoryError::DataCorruption(format!("invalid {what}: {value:?}")))
}

fn numeric_to_i32(value: values::Numeric, what: &str) -> Result<i32, RepositoryError> {
    let wide = numeric_to_i64(value, what)?;
    i32::try_from(wide)
        .map_err(|_| RepositoryError::DataCorruption(format!("{what} out of range: {wide}")))
}

/// Create a `MySQL` connection pool.
///
/// The pool is the single database handle threaded through the application
/// state; every repository call checks out one connection for its duration.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<MySqlPool, sqlx::Error> {
    pool_options(max_connections)
        .connect(database_url.expose_secret())
        .await
}

/// Create a pool that does not connect until first use.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL cannot be parsed.
pub fn create_lazy_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<MySqlPool, sqlx::Error> {
    pool_options(max_connections).connect_lazy(database_url.expose_secret())
}

fn pool_options(max_connections: u32) -> MySqlPoolOptions {
    MySqlPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(0)
        .acquire_timeout(Duration::from_secs(10))
}
