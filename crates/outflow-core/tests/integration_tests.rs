//! Integration tests for outflow-core
//!
//! These tests exercise the full load → classify → aggregate workflow
//! against statements written to disk.

use std::io::Write;

use outflow_core::{
    aggregate, load_statement, load_statement_with, Error, Granularity, LoadOptions,
};
use tempfile::NamedTempFile;

/// A month of activity bracketed by account open/close markers
///
/// - one row with a blank category
/// - one incoming salary payment
/// - OPEN/CLOSE rows carrying negative amounts that must be ignored
fn sample_statement() -> &'static str {
    r#"DATE (YYYY/MM/DD),AMOUNT,STATUS,CATEGORY,DESCRIPTION
20230501,-50,OPEN,Fees,Account opening fee
20230508,-12.5,PAID,Groceries,Corner shop
20230508,-7.25,PAID,Transport,Bus pass top-up
20230511,-10,PAID,Groceries,Supermarket
20230511,-5,PAID,,Vending machine
20230511,1500,RECEIVED,Salary,Payroll
20230514,-3.3335,PAID,Transport,Metro
20230528,-42,PAID,Utilities,Electricity
20230601,-8,PAID,Groceries,Bakery
20230630,-20,CLOSE,Fees,Closing fee
"#
}

fn write_statement(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write statement");
    file
}

#[test]
fn test_load_preserves_rows_and_order() {
    let file = write_statement(sample_statement());
    let statement = load_statement(file.path()).expect("Failed to load statement");

    assert_eq!(statement.len(), 10);
    assert_eq!(statement.headers.len(), 5);

    let dates: Vec<String> = statement.records.iter().map(|r| r.display_date()).collect();
    assert_eq!(dates.first().map(String::as_str), Some("2023/05/01"));
    assert_eq!(dates.last().map(String::as_str), Some("2023/06/30"));
}

#[test]
fn test_daily_workflow() {
    let file = write_statement(sample_statement());
    let statement = load_statement(file.path()).unwrap();

    let daily = aggregate(&statement.records, Granularity::Day);

    assert_eq!(daily.len(), 5);
    assert_eq!(daily["2023/05/08"], 19.75);
    assert_eq!(daily["2023/05/11"], 15.0);
    // 3.3335 sits on a midpoint and rounds to even
    assert_eq!(daily["2023/05/14"], 3.334);
    assert_eq!(daily["2023/05/28"], 42.0);
    assert_eq!(daily["2023/06/01"], 8.0);
    assert!(!daily.contains_key("2023/05/01"));
    assert!(!daily.contains_key("2023/06/30"));
}

#[test]
fn test_weekly_workflow() {
    let file = write_statement(sample_statement());
    let statement = load_statement(file.path()).unwrap();

    let weekly = aggregate(&statement.records, Granularity::Week);

    // Monday 2023/05/08 through Sunday 2023/05/14 is ISO week 19
    assert_eq!(weekly["2023-W19"], 38.084);
    assert_eq!(weekly["2023-W21"], 42.0);
    assert_eq!(weekly["2023-W22"], 8.0);
    assert_eq!(weekly.len(), 3);
}

#[test]
fn test_monthly_workflow() {
    let file = write_statement(sample_statement());
    let statement = load_statement(file.path()).unwrap();

    let monthly = aggregate(&statement.records, Granularity::Month);

    assert_eq!(monthly.len(), 2);
    assert_eq!(monthly["2023/05"], 80.084);
    assert_eq!(monthly["2023/06"], 8.0);
}

#[test]
fn test_category_workflow() {
    let file = write_statement(sample_statement());
    let statement = load_statement(file.path()).unwrap();

    let by_category = aggregate(&statement.records, Granularity::Category);

    assert_eq!(by_category.len(), 3);
    assert_eq!(by_category["Groceries"], 30.5);
    assert_eq!(by_category["Transport"], 10.584);
    assert_eq!(by_category["Utilities"], 42.0);
    // Fees only appear on OPEN/CLOSE rows, Salary is income
    assert!(!by_category.contains_key("Fees"));
    assert!(!by_category.contains_key("Salary"));
    // The blank category is neither "" nor the zero fill value
    assert!(!by_category.contains_key(""));
    assert!(!by_category.contains_key("0"));
}

#[test]
fn test_table_view_keeps_zero_fill() {
    let file = write_statement(sample_statement());
    let statement = load_statement(file.path()).unwrap();

    let rows = serde_json::to_value(&statement.records).unwrap();
    let vending = &rows[4];
    assert_eq!(vending["DATE (YYYY/MM/DD)"], "2023/05/11");
    assert_eq!(vending["AMOUNT"], -5);
    assert_eq!(vending["CATEGORY"], 0);
    assert_eq!(vending["DESCRIPTION"], "Vending machine");
}

#[test]
fn test_one_bad_date_fails_everything() {
    let contents = "DATE,AMOUNT,STATUS\n20230511,-1,PAID\n2023511,-2,PAID\n20230512,-3,PAID\n";
    let file = write_statement(contents);

    let err = load_statement(file.path()).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
}

#[test]
fn test_tab_delimited_statement() {
    let contents = "DATE\tAMOUNT\tSTATUS\tCATEGORY\n20230511\t-2.5\tPAID\tFood\n";
    let file = write_statement(contents);

    let statement = load_statement_with(file.path(), LoadOptions { delimiter: b'\t' }).unwrap();
    let by_category = aggregate(&statement.records, Granularity::Category);
    assert_eq!(by_category["Food"], 2.5);
}

#[test]
fn test_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_statement(&dir.path().join("statement.csv")).unwrap_err();
    assert!(matches!(err, Error::SourceUnavailable { .. }));
    assert!(err.to_string().contains("statement.csv"));
}
