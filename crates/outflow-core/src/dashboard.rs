//! Dashboard client
//!
//! Fetches expense summaries from a running Outflow server and renders them
//! as a terminal bar chart.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Duration;

use tracing::debug;

use crate::dates::parse_normalized_date;
use crate::error::Result;
use crate::models::Granularity;
use crate::settings::DashboardSettings;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Ordered (key, amount) points for one granularity
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSeries {
    pub granularity: Granularity,
    pub points: Vec<(String, f64)>,
}

impl ExpenseSeries {
    /// Build a series from an endpoint response body
    ///
    /// Calendar keys are kept in chronological order; category keys are
    /// ordered by amount, largest first. Daily keys must be `YYYY/MM/DD`.
    pub fn from_buckets(granularity: Granularity, buckets: BTreeMap<String, f64>) -> Result<Self> {
        if granularity == Granularity::Day {
            for key in buckets.keys() {
                parse_normalized_date(key)?;
            }
        }

        // Zero-padded calendar keys already sort chronologically
        let mut points: Vec<(String, f64)> = buckets.into_iter().collect();
        if !granularity.is_temporal() {
            points.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        }

        Ok(Self {
            granularity,
            points,
        })
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|(_, v)| v).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// HTTP client for the expense endpoints
pub struct DashboardClient {
    http: reqwest::Client,
    settings: DashboardSettings,
}

impl DashboardClient {
    pub fn new(settings: DashboardSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, settings })
    }

    /// Fetch and order the summary for one granularity
    pub async fn fetch(&self, granularity: Granularity) -> Result<ExpenseSeries> {
        let url = self.settings.endpoint_url(granularity);
        debug!("Fetching {} from {}", granularity, url);

        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let buckets: BTreeMap<String, f64> = serde_json::from_str(&body)?;
        ExpenseSeries::from_buckets(granularity, buckets)
    }
}

/// Render a series as a titled horizontal bar chart
pub fn render_chart(series: &ExpenseSeries, width: usize) -> String {
    let mut out = String::new();
    let title = series.granularity.title();
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.len()));

    if series.is_empty() {
        let _ = writeln!(out, "(no expenses)");
        return out;
    }

    let label_width = series
        .points
        .iter()
        .map(|(k, _)| k.chars().count())
        .max()
        .unwrap_or(0);
    let max = series
        .points
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0_f64, f64::max);

    for (key, amount) in &series.points {
        let bar_len = if max > 0.0 {
            ((amount / max) * width as f64).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "{:<label_width$}  {:>12.3}  {}",
            key,
            amount,
            "█".repeat(bar_len),
        );
    }

    let _ = writeln!(out, "{:<label_width$}  {:>12.3}", "Total", series.total());
    out
}
