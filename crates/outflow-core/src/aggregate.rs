//! Expense aggregation
//!
//! One aggregation path for every granularity: expense records are keyed by
//! a small set of pure key functions, `abs(amount)` is accumulated per key,
//! and each final sum is rounded half-to-even at three decimals.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::classify::expenses;
use crate::dates::format_date;
use crate::models::{Granularity, NormalizedRecord};

/// Decimal places kept in bucket totals
pub const BUCKET_DECIMALS: u32 = 3;

/// Bucket key -> non-negative total. Buckets without expenses are absent.
pub type ExpenseBuckets = BTreeMap<String, f64>;

/// Derives a bucket key from a record, or None to leave it out of the view
pub type KeyFn = fn(&NormalizedRecord) -> Option<String>;

/// `YYYY/MM/DD`
fn day_key(record: &NormalizedRecord) -> Option<String> {
    Some(format_date(record.date))
}

/// ISO 8601 week, Monday-anchored: `YYYY-Www`
///
/// The year is the ISO week-year, so 2024/12/30 falls in `2025-W01`.
fn week_key(record: &NormalizedRecord) -> Option<String> {
    let week = record.date.iso_week();
    Some(format!("{}-W{:02}", week.year(), week.week()))
}

/// `YYYY/MM`
fn month_key(record: &NormalizedRecord) -> Option<String> {
    Some(record.date.format("%Y/%m").to_string())
}

/// Category label; uncategorized records are dropped from this view
fn category_key(record: &NormalizedRecord) -> Option<String> {
    record
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

impl Granularity {
    /// Key function for this granularity
    pub fn key_fn(&self) -> KeyFn {
        match self {
            Self::Day => day_key,
            Self::Week => week_key,
            Self::Month => month_key,
            Self::Category => category_key,
        }
    }
}

/// Sum expense magnitudes per bucket for the given granularity
pub fn aggregate(records: &[NormalizedRecord], granularity: Granularity) -> ExpenseBuckets {
    let buckets = aggregate_by(records, granularity.key_fn());
    debug!(
        granularity = granularity.as_str(),
        records = records.len(),
        buckets = buckets.len(),
        "Aggregated expenses"
    );
    buckets
}

/// Sum expense magnitudes per bucket using an arbitrary key function
pub fn aggregate_by<F>(records: &[NormalizedRecord], key_fn: F) -> ExpenseBuckets
where
    F: Fn(&NormalizedRecord) -> Option<String>,
{
    let mut sums: BTreeMap<String, Decimal> = BTreeMap::new();

    for record in expenses(records) {
        if let Some(key) = key_fn(record) {
            let total = sums.entry(key).or_default();
            *total = total.saturating_add(record.amount.abs());
        }
    }

    sums.into_iter()
        .map(|(key, total)| (key, round_total(total)))
        .collect()
}

/// Round a bucket total to three decimals, ties to even
pub fn round_total(total: Decimal) -> f64 {
    total
        .round_dp_with_strategy(BUCKET_DECIMALS, RoundingStrategy::MidpointNearestEven)
        .to_f64()
        .unwrap_or_default()
}
