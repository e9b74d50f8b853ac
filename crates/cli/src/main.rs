//! Helpdesk CLI - operator tools for the helpdesk database.
//!
//! # Usage
//!
//! ```bash
//! # Insert placeholder equipment types starting at "Noname 4"
//! helpdesk-cli procedures batch-insert --start-id 4
//!
//! # Split the equipment log into per-group tables
//! helpdesk-cli procedures split-log
//!
//! # Print ticket priority statistics as JSON
//! helpdesk-cli procedures priority-stats
//!
//! # Print the equipment-type deletion log as JSON
//! helpdesk-cli logs deletions
//!
//! # Verify connectivity and the stored procedures the API relies on
//! helpdesk-cli check
//! ```
//!
//! Reads the same `HELPDESK_DATABASE_URL` (or `DATABASE_URL`) as the API.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "helpdesk-cli")]
#[command(author, version, about = "Helpdesk database tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run stored procedures
    Procedures {
        #[command(subcommand)]
        action: ProcedureAction,
    },
    /// Read database audit logs
    Logs {
        #[command(subcommand)]
        log: LogTarget,
    },
    /// Check database connectivity and required procedures
    Check,
}

#[derive(Subcommand)]
enum ProcedureAction {
    /// Insert placeholder equipment types
    BatchInsert {
        /// Number of the first "Noname N" type
        #[arg(short, long, default_value_t = 4)]
        start_id: i32,
    },
    /// Split the equipment log into per-group tables
    SplitLog,
    /// Print ticket priority statistics
    PriorityStats,
}

#[derive(Subcommand)]
enum LogTarget {
    /// Equipment-type deletion log, newest first
    Deletions,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Procedures { action } => match action {
            ProcedureAction::BatchInsert { start_id } => {
                commands::procedures::batch_insert(start_id).await?;
            }
            ProcedureAction::SplitLog => commands::procedures::split_log().await?,
            ProcedureAction::PriorityStats => commands::procedures::priority_stats().await?,
        },
        Commands::Logs { log } => match log {
            LogTarget::Deletions => commands::logs::deletions().await?,
        },
        Commands::Check => commands::check::run().await?,
    }
    Ok(())
}
