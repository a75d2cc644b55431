//! Outflow CLI - Expense summaries for bank statement exports
//!
//! Usage:
//!   outflow serve --statement data/statement.csv   Start web server
//!   outflow report --file CSV --granularity week   Summarize offline
//!   outflow show --file CSV                        Print normalized table
//!   outflow dashboard --granularity day            Chart a running server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Serve {
            port,
            host,
            statement,
            delimiter,
            allowed_origins,
        } => commands::cmd_serve(&host, port, &statement, delimiter, &allowed_origins).await,
        Commands::Report {
            file,
            granularity,
            delimiter,
            json,
        } => commands::cmd_report(&file, delimiter, granularity, json),
        Commands::Show { file, delimiter } => commands::cmd_show(&file, delimiter),
        Commands::Dashboard { granularity, width } => {
            commands::cmd_dashboard(granularity, width).await
        }
    }
}
