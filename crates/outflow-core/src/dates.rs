//! Statement date normalization
//!
//! Bank exports carry dates as compact `YYYYMMDD` numerals. Everything
//! downstream works with the slash-separated `YYYY/MM/DD` form.

use std::fmt::Display;

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Display format for normalized dates
pub const NORMALIZED_FORMAT: &str = "%Y/%m/%d";

/// Parse a compact `YYYYMMDD` value into a calendar date.
///
/// Accepts anything whose decimal representation is exactly eight ASCII
/// digits, so both `20230511` and `"20230511"` work.
pub fn parse_compact_date<T: Display>(value: T) -> Result<NaiveDate> {
    let raw = value.to_string();
    let s = raw.trim();

    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::Format(format!(
            "expected 8-digit YYYYMMDD, got {:?}",
            raw
        )));
    }

    // Slicing is safe: all eight bytes are ASCII digits
    let year: i32 = s[..4]
        .parse()
        .map_err(|_| Error::Format(format!("bad year in {}", s)))?;
    let month: u32 = s[4..6]
        .parse()
        .map_err(|_| Error::Format(format!("bad month in {}", s)))?;
    let day: u32 = s[6..]
        .parse()
        .map_err(|_| Error::Format(format!("bad day in {}", s)))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| Error::Format(format!("{} is not a calendar date", s)))
}

/// Normalize a compact `YYYYMMDD` value to `YYYY/MM/DD`
pub fn normalize_date<T: Display>(value: T) -> Result<String> {
    parse_compact_date(value).map(format_date)
}

/// Render a date in the normalized `YYYY/MM/DD` form
pub fn format_date(date: NaiveDate) -> String {
    date.format(NORMALIZED_FORMAT).to_string()
}

/// Parse a normalized `YYYY/MM/DD` string back into a date
pub fn parse_normalized_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), NORMALIZED_FORMAT)
        .map_err(|e| Error::Format(format!("{:?} is not YYYY/MM/DD: {}", s, e)))
}
