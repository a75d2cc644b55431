//! Report command implementations

use std::path::Path;

use anyhow::Result;
use outflow_core::{aggregate, ExpenseBuckets, Granularity};

use super::open_statement;

/// Column header for a granularity's bucket keys
fn key_label(granularity: Granularity) -> &'static str {
    match granularity {
        Granularity::Day => "Date",
        Granularity::Week => "Week",
        Granularity::Month => "Month",
        Granularity::Category => "Category",
    }
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Render buckets as a text table with a total row
pub fn format_report(buckets: &ExpenseBuckets, granularity: Granularity) -> String {
    let mut lines = vec![
        String::new(),
        format!("📊 {}", granularity.title()),
        "   ─────────────────────────────────────────".to_string(),
    ];

    if buckets.is_empty() {
        lines.push("   No expenses found.".to_string());
        return lines.join("\n");
    }

    lines.push(format!("   {:20} │ {:>14}", key_label(granularity), "Amount"));
    lines.push("   ─────────────────────┼───────────────".to_string());

    for (key, amount) in buckets {
        lines.push(format!("   {:20} │ {:>14.3}", truncate(key, 20), amount));
    }

    let total: f64 = buckets.values().sum();
    lines.push("   ─────────────────────┼───────────────".to_string());
    lines.push(format!("   {:20} │ {:>14.3}", "Total", total));

    lines.join("\n")
}

pub fn cmd_report(file: &Path, delimiter: u8, granularity: Granularity, json: bool) -> Result<()> {
    let statement = open_statement(file, delimiter)?;
    let buckets = aggregate(&statement.records, granularity);

    if json {
        println!("{}", serde_json::to_string_pretty(&buckets)?);
    } else {
        println!("{}", format_report(&buckets, granularity));
    }

    Ok(())
}

pub fn cmd_show(file: &Path, delimiter: u8) -> Result<()> {
    let statement = open_statement(file, delimiter)?;
    println!("{}", serde_json::to_string_pretty(&statement.records)?);
    Ok(())
}
