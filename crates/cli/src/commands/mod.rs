//! CLI command implementations.

pub mod check;
pub mod logs;
pub mod procedures;

use std::io::Write;

use helpdesk_api::config::{ApiConfig, ConfigError};
use helpdesk_api::db::{self, RepositoryError};
use serde::Serialize;
use sqlx::MySqlPool;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// A repository call failed.
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// A procedure left its output unset.
    #[error("{0} did not report a result")]
    NoResult(&'static str),

    /// Output could not be written.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Connect using the API's configuration.
async fn connect() -> Result<MySqlPool, CommandError> {
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    tracing::info!("Connecting to helpdesk database...");
    let pool = db::create_pool(&config.database_url, 1).await?;
    Ok(pool)
}

/// Write a value to stdout as pretty JSON.
fn print_json<T: Serialize>(value: &T) -> Result<(), CommandError> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
