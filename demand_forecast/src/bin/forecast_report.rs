//! # forecast_report
//!
//! Fetch reservations, forecast daily occupancy and print the report as JSON.

use anyhow::{bail, Context};
use chrono::{Duration, Local};
use clap::Parser;
use demand_forecast::synthetic::generate_reservations;
use demand_forecast::{
    AppConfig, CsvFileSource, ForecastPipeline, ForecastReport, ForecastService,
    HttpReservationSource, InMemorySource, JsonFileSource,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "forecast_report")]
#[command(about = "Daily occupancy forecast from reservation history", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reservation export to read instead of the reservation store (JSON or CSV)
    #[arg(short, long, conflicts_with = "demo")]
    input: Option<PathBuf>,

    /// Forecast a synthetic 90-day history
    #[arg(long)]
    demo: bool,

    /// Number of days to forecast, overrides the configuration
    #[arg(long)]
    horizon: Option<usize>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => AppConfig::default(),
    }
    .with_env_overrides()
    .context("applying environment overrides")?;

    if let Some(horizon) = cli.horizon {
        config.forecast.horizon_days = horizon;
    }

    let pipeline =
        ForecastPipeline::new(config.forecast.clone()).context("invalid forecast settings")?;

    let report = if cli.demo {
        let start = Local::now().date_naive() - Duration::days(90);
        let records = generate_reservations(start, 90, 6.0, 7).context("generating demo history")?;
        info!(records = records.len(), "running on synthetic history");
        ForecastService::new(InMemorySource::new(records), pipeline).forecast().await
    } else if let Some(path) = &cli.input {
        run_on_file(&pipeline, path)?
    } else {
        let source = HttpReservationSource::new(&config.backend).context("building HTTP client")?;
        info!(url = source.url(), "fetching from reservation store");
        ForecastService::new(source, pipeline).forecast().await
    };

    info!(status = ?report.status, model = ?report.model, "forecast finished");

    let output = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", output);

    Ok(())
}

fn run_on_file(pipeline: &ForecastPipeline, path: &Path) -> anyhow::Result<ForecastReport> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let report = match extension.as_deref() {
        Some("json") => pipeline.run_from_source(&JsonFileSource::new(path)),
        Some("csv") => pipeline.run_from_source(&CsvFileSource::new(path)),
        _ => bail!("unsupported input {}: expected a .json or .csv file", path.display()),
    };

    Ok(report)
}
