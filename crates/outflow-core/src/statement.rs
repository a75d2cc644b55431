//! Bank statement loader
//!
//! Reads a delimited statement export whose first column is a `YYYYMMDD`
//! date and which carries at least `AMOUNT` and `STATUS` columns. Every blank
//! cell is filled with zero before the date column is normalized.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use tracing::debug;

use crate::dates::{format_date, parse_compact_date};
use crate::error::{Error, Result};
use crate::models::{Cell, NormalizedRecord, Statement, Status};

pub const AMOUNT_COLUMN: &str = "AMOUNT";
pub const STATUS_COLUMN: &str = "STATUS";
pub const CATEGORY_COLUMN: &str = "CATEGORY";

/// Markers treated as missing values, alongside empty cells
const MISSING_MARKERS: &[&str] = &[
    "NaN", "nan", "-NaN", "-nan", "NA", "N/A", "n/a", "<NA>", "#N/A", "NULL", "null", "None",
];

/// Options for reading a statement
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl LoadOptions {
    /// Amounts use a decimal comma unless commas delimit fields
    pub fn decimal_comma(&self) -> bool {
        self.delimiter != b','
    }
}

/// Column positions resolved from the header row
struct Columns {
    amount: usize,
    status: usize,
    category: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        Ok(Self {
            amount: find(AMOUNT_COLUMN).ok_or_else(|| Error::MissingColumn(AMOUNT_COLUMN.into()))?,
            status: find(STATUS_COLUMN).ok_or_else(|| Error::MissingColumn(STATUS_COLUMN.into()))?,
            category: find(CATEGORY_COLUMN),
        })
    }
}

/// Load a statement from a file with default options
pub fn load_statement(path: &Path) -> Result<Statement> {
    load_statement_with(path, LoadOptions::default())
}

/// Load a statement from a file
pub fn load_statement_with(path: &Path, options: LoadOptions) -> Result<Statement> {
    let file = File::open(path).map_err(|source| Error::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    read_statement(file, options).map_err(|e| match e {
        // Read failures after open are still an unavailable source
        Error::Csv(err) if err.is_io_error() => {
            let source = match err.into_kind() {
                csv::ErrorKind::Io(source) => source,
                kind => std::io::Error::other(format!("{:?}", kind)),
            };
            Error::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            }
        }
        other => other,
    })
}

/// Read a statement from any reader
///
/// Fails as a whole on the first malformed date; rows are returned in
/// source order.
pub fn read_statement<R: Read>(reader: R, options: LoadOptions) -> Result<Statement> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(Error::InvalidData("statement has no header row".into()));
    }
    let columns = Columns::resolve(&headers)?;

    let mut records = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        // Header is line 1
        let line = index + 2;
        let record = result?;

        if record.len() > headers.len() {
            return Err(Error::InvalidData(format!(
                "line {}: expected {} fields, found {}",
                line,
                headers.len(),
                record.len()
            )));
        }

        records.push(normalize_row(&headers, &columns, &record, line, options)?);
    }

    debug!(
        "Loaded {} statement rows ({} columns)",
        records.len(),
        headers.len()
    );

    Ok(Statement {
        headers: headers.iter().map(str::to_string).collect(),
        records,
    })
}

/// A raw field, or None when blank or a missing marker
fn present(record: &StringRecord, index: usize) -> Option<&str> {
    record
        .get(index)
        .map(str::trim)
        .filter(|s| !s.is_empty() && !MISSING_MARKERS.contains(s))
}

fn normalize_row(
    headers: &StringRecord,
    columns: &Columns,
    record: &StringRecord,
    line: usize,
    options: LoadOptions,
) -> Result<NormalizedRecord> {
    // Blank dates are filled with zero like any other cell, which then fails
    let raw_date = present(record, 0).unwrap_or("0");
    let date = parse_compact_date(raw_date).map_err(|e| match e {
        Error::Format(msg) => Error::Format(format!("line {}: {}", line, msg)),
        other => other,
    })?;

    let amount = match present(record, columns.amount) {
        Some(raw) => parse_amount(raw, options.decimal_comma()).map_err(|e| match e {
            Error::InvalidData(msg) => Error::InvalidData(format!("line {}: {}", line, msg)),
            other => other,
        })?,
        None => Decimal::ZERO,
    };

    let status = Status::from(present(record, columns.status).unwrap_or("0"));
    let category = columns
        .category
        .and_then(|i| present(record, i))
        .map(str::to_string);

    let fields = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let cell = if i == 0 {
                Cell::Text(format_date(date))
            } else {
                present(record, i).map(Cell::parse).unwrap_or(Cell::FILL)
            };
            (header.to_string(), cell)
        })
        .collect();

    Ok(NormalizedRecord {
        date,
        amount,
        status,
        category,
        fields,
    })
}

/// Largest accepted amount magnitude (1e20)
///
/// Keeps every bucket sum far inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0x6310_0000, 0x6BC7_5E2D, 0x5, false, 0);

/// Parse an amount string, handling currency symbols and separators
///
/// Commas are thousands separators only in valid group positions
/// (`1,234,567.89`). With `decimal_comma` set, a single comma is the decimal
/// mark and dots may group thousands (`1.234,56`). Any other comma is an error.
pub fn parse_amount(s: &str, decimal_comma: bool) -> Result<Decimal> {
    let invalid = || Error::InvalidData(format!("Unable to parse amount: {}", s));

    let cleaned: String = s
        .trim()
        .replace(['$', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    let (sign, body) = match cleaned.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", cleaned.as_str()),
    };

    let body = if body.contains(',') {
        normalize_separators(body, decimal_comma).ok_or_else(invalid)?
    } else {
        body.to_string()
    };
    let number = format!("{}{}", sign, body);

    let amount = Decimal::from_str(&number)
        .or_else(|_| Decimal::from_scientific(&number))
        .map_err(|_| invalid())?;

    if amount.abs() > MAX_AMOUNT {
        return Err(Error::InvalidData(format!("Amount out of range: {}", s)));
    }
    Ok(amount)
}

/// Rewrite a comma-bearing unsigned amount into plain `digits[.digits]`
fn normalize_separators(body: &str, decimal_comma: bool) -> Option<String> {
    if decimal_comma {
        if let Some(plain) = decimal_comma_form(body) {
            return Some(plain);
        }
    }

    let (int_part, frac) = match body.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (body, None),
    };
    if !is_grouped(int_part, ',') {
        return None;
    }

    let digits = int_part.replace(',', "");
    match frac {
        Some(frac) if all_digits(frac) => Some(format!("{}.{}", digits, frac)),
        Some(_) => None,
        None => Some(digits),
    }
}

/// `12,50` or `1.234,56` -> `12.50` / `1234.56`
fn decimal_comma_form(body: &str) -> Option<String> {
    let (int_part, frac) = body.split_once(',')?;
    if !all_digits(frac) {
        return None;
    }

    let int_ok = if int_part.contains('.') {
        is_grouped(int_part, '.')
    } else {
        all_digits(int_part)
    };
    int_ok.then(|| format!("{}.{}", int_part.replace('.', ""), frac))
}

/// 1-3 leading digits followed by groups of exactly three, split by `sep`
fn is_grouped(int_part: &str, sep: char) -> bool {
    let mut groups = int_part.split(sep);
    let lead_ok = groups
        .next()
        .is_some_and(|lead| (1..=3).contains(&lead.len()) && all_digits(lead));
    lead_ok && groups.all(|g| g.len() == 3 && all_digits(g))
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
