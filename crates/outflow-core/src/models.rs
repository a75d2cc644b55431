//! Domain models for Outflow

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::dates::format_date;

/// Lifecycle status of a statement row
///
/// `OPEN` and `CLOSE` mark account lifecycle events. Every other value is a
/// transactional status and is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Open,
    Close,
    Other(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "OPEN",
            Self::Close => "CLOSE",
            Self::Other(s) => s.as_str(),
        }
    }

    /// Account open/close markers rather than cash flow
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::Open | Self::Close)
    }
}

impl From<&str> for Status {
    fn from(s: &str) -> Self {
        // Exact match: a lowercase "open" is an ordinary status
        match s.trim() {
            "OPEN" => Self::Open,
            "CLOSE" => Self::Close,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single typed table cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// The value written into blank cells
    pub const FILL: Cell = Cell::Integer(0);

    /// Type a raw CSV field: integers, then finite floats, then text
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(i) = raw.parse::<i64>() {
            return Self::Integer(i);
        }
        match raw.parse::<f64>() {
            Ok(f) if f.is_finite() => Self::Float(f),
            _ => Self::Text(raw.to_string()),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One statement row after loading: date normalized, blanks filled
///
/// Serializes as a JSON object of every source column in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub date: NaiveDate,
    /// Signed amount, negative = money leaving the account
    pub amount: Decimal,
    pub status: Status,
    /// None when the category column is absent or the cell was blank
    pub category: Option<String>,
    /// Full row as displayed by the table view
    pub fields: Vec<(String, Cell)>,
}

impl NormalizedRecord {
    /// Build a record with the canonical DATE/AMOUNT/STATUS/CATEGORY columns
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        status: impl Into<Status>,
        category: Option<&str>,
    ) -> Self {
        let status = status.into();
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let fields = vec![
            ("DATE".to_string(), Cell::Text(format_date(date))),
            (
                "AMOUNT".to_string(),
                Cell::Float(amount.to_f64().unwrap_or_default()),
            ),
            ("STATUS".to_string(), Cell::Text(status.as_str().to_string())),
            (
                "CATEGORY".to_string(),
                category.clone().map(Cell::Text).unwrap_or(Cell::FILL),
            ),
        ];

        Self {
            date,
            amount,
            status,
            category,
            fields,
        }
    }

    /// The date in `YYYY/MM/DD` form
    pub fn display_date(&self) -> String {
        format_date(self.date)
    }
}

impl Serialize for NormalizedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (column, cell) in &self.fields {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}

/// A loaded statement table
#[derive(Debug, Clone, Default)]
pub struct Statement {
    pub headers: Vec<String>,
    pub records: Vec<NormalizedRecord>,
}

impl Statement {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Grouping dimension for expense summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Category,
}

impl Granularity {
    pub const ALL: [Granularity; 4] = [Self::Day, Self::Week, Self::Month, Self::Category];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Category => "category",
        }
    }

    /// Human-readable chart title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Day => "Daily Expenses",
            Self::Week => "Weekly Expenses",
            Self::Month => "Monthly Expenses",
            Self::Category => "Expenses per Category",
        }
    }

    /// Whether bucket keys are calendar periods
    pub fn is_temporal(&self) -> bool {
        !matches!(self, Self::Category)
    }
}

impl std::str::FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "daily" => Ok(Self::Day),
            "week" | "weekly" => Ok(Self::Week),
            "month" | "monthly" => Ok(Self::Month),
            "category" | "categories" => Ok(Self::Category),
            _ => Err(format!(
                "Unknown granularity: {} (valid: day, week, month, category)",
                s
            )),
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
