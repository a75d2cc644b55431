//! Outflow Core Library
//!
//! Expense-aggregation engine for personal bank statement exports:
//! - Date normalization (`YYYYMMDD` -> `YYYY/MM/DD`)
//! - Statement loading with blank-cell fill
//! - Expense classification
//! - Daily, weekly, monthly, and per-category aggregation
//! - Dashboard client and settings

pub mod aggregate;
pub mod classify;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod models;
pub mod settings;
pub mod statement;

pub use aggregate::{aggregate, aggregate_by, round_total, ExpenseBuckets};
pub use classify::{expenses, is_expense};
pub use dashboard::{render_chart, DashboardClient, ExpenseSeries};
pub use dates::{normalize_date, parse_compact_date, parse_normalized_date};
pub use error::{Error, Result};
pub use models::{Cell, Granularity, NormalizedRecord, Statement, Status};
pub use settings::DashboardSettings;
pub use statement::{load_statement, load_statement_with, read_statement, LoadOptions};
