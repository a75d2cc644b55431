//! Dashboard command implementation

use anyhow::{Context, Result};
use outflow_core::{render_chart, DashboardClient, DashboardSettings, Granularity};
use tracing::info;

pub async fn cmd_dashboard(granularity: Granularity, width: usize) -> Result<()> {
    let settings = DashboardSettings::from_env().context("Failed to read dashboard settings")?;
    let url = settings.endpoint_url(granularity);
    info!("Fetching {} expenses from {}", granularity, url);

    let client = DashboardClient::new(settings)?;
    let series = client
        .fetch(granularity)
        .await
        .with_context(|| format!("Failed to fetch {}", url))?;

    println!();
    print!("{}", render_chart(&series, width));

    Ok(())
}
