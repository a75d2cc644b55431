//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `dashboard` - Chart expenses fetched from a running server
//! - `reports` - Offline statement summaries and the normalized table
//! - `serve` - Web server command

pub mod dashboard;
pub mod reports;
pub mod serve;

// Re-export command functions for main.rs
pub use dashboard::*;
pub use reports::*;
pub use serve::*;

use std::path::Path;

use anyhow::{Context, Result};
use outflow_core::{load_statement_with, LoadOptions, Statement};

/// Load a statement file, attaching the path to any error
pub fn open_statement(path: &Path, delimiter: u8) -> Result<Statement> {
    load_statement_with(path, LoadOptions { delimiter })
        .with_context(|| format!("Failed to load statement {}", path.display()))
}
