//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use outflow_core::Granularity;

/// Outflow - Summarize where your money goes
#[derive(Parser)]
#[command(name = "outflow")]
#[command(about = "Expense summaries for bank statement exports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Statement export read on every request
        #[arg(
            short,
            long,
            env = "OUTFLOW_STATEMENT",
            default_value = outflow_server::DEFAULT_STATEMENT_PATH
        )]
        statement: PathBuf,

        /// Field delimiter of the statement (e.g. ',', ';', 'tab'); with a
        /// non-comma delimiter amounts use a decimal comma
        #[arg(long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,

        /// Comma-separated CORS origins allowed to call the API
        #[arg(long, env = "OUTFLOW_ALLOWED_ORIGINS", default_value = "")]
        allowed_origins: String,
    },

    /// Summarize a statement without starting the server
    Report {
        /// Statement CSV file
        #[arg(short, long)]
        file: PathBuf,

        /// Grouping: day, week, month, category
        #[arg(short, long, default_value = "day", value_parser = parse_granularity)]
        granularity: Granularity,

        /// Field delimiter of the statement
        #[arg(long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the normalized statement table as JSON
    Show {
        /// Statement CSV file
        #[arg(short, long)]
        file: PathBuf,

        /// Field delimiter of the statement
        #[arg(long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,
    },

    /// Chart expenses fetched from a running server
    ///
    /// Endpoints come from USER_BEHAVIOR_URL and the DAILY_EXPENSES,
    /// WEEKLY_EXPENSES, MONTHLY_EXPENSES, CATEGORY_EXPENSES variables
    /// (a .env file is loaded if present).
    Dashboard {
        /// Grouping: day, week, month, category
        #[arg(short, long, default_value = "day", value_parser = parse_granularity)]
        granularity: Granularity,

        /// Maximum bar width in characters
        #[arg(long, default_value = "50")]
        width: usize,
    },
}

pub fn parse_granularity(s: &str) -> Result<Granularity, String> {
    s.parse()
}

/// Parse a single-byte delimiter; accepts `tab` and `\t` for tabs
pub fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(format!("Delimiter must be a single ASCII character, got {:?}", s)),
        },
    }
}
