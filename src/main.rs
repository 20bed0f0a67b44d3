//! tickercast - single-ticker price dashboard with a one-step-ahead estimate.
//!
//! # Usage
//! ```sh
//! tickercast --ticker VALE3.SA --start 2020-01-01
//! tickercast --interactive
//! ```
//!
//! # Environment Variables
//! - `DATA_PROVIDER` - `yahoo`, `csv` or `mock` (default: yahoo)
//! - `MODEL_PATH` - Model artifact (default: modelo_random_forest.json)
//! - `OBSERVABILITY_ENABLED` - Print a metrics snapshot after each run (default: true)

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tickercast::application::ForecastPipeline;
use tickercast::application::ml::SmartCoreModelLoader;
use tickercast::config::{Config, DataProvider};
use tickercast::domain::forecast::PipelineInput;
use tickercast::infrastructure::ServiceFactory;
use tickercast::infrastructure::observability::{Metrics, MetricsReporter};
use tickercast::interfaces::{InputDefaults, TerminalPresenter, parse_interaction};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

const CHART_WIDTH: usize = 60;

#[derive(Parser, Debug)]
#[command(author, version, about = "Stock price dashboard with a closing-price estimate", long_about = None)]
struct Args {
    /// Ticker symbol (defaults to the first configured ticker)
    #[arg(short, long)]
    ticker: Option<String>,

    /// Start date (YYYY-MM-DD, default: ten years ago)
    #[arg(short, long)]
    start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD, exclusive, default: today)
    #[arg(short, long)]
    end: Option<NaiveDate>,

    /// Date the estimate is labelled with (default: five days from today)
    #[arg(short, long)]
    future_date: Option<NaiveDate>,

    /// Model artifact path (overrides MODEL_PATH)
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Market data provider (overrides DATA_PROVIDER)
    #[arg(short, long)]
    provider: Option<DataProvider>,

    /// Read one selection per line from stdin
    #[arg(short, long, default_value_t = false)]
    interactive: bool,
}

struct Dashboard {
    pipeline: ForecastPipeline,
    presenter: TerminalPresenter,
    reporter: Option<MetricsReporter>,
}

impl Dashboard {
    async fn interact(&self, input: PipelineInput) -> Result<()> {
        let report = self.pipeline.run(input).await;
        self.presenter
            .render(&mut std::io::stdout().lock(), &report)
            .context("Failed to write report")?;
        if let Some(reporter) = &self.reporter {
            reporter.report();
        }
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let args = Args::parse();

    info!("tickercast {} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(provider) = args.provider {
        config.data_provider = provider;
    }
    if let Some(model) = &args.model {
        config.model_path = model.clone();
    }
    info!(
        "Configuration loaded: Provider={:?}, Model={}, Tickers={:?}",
        config.data_provider,
        config.model_path.display(),
        config.tickers
    );

    let metrics = Metrics::new().context("Failed to create metrics registry")?;
    let pipeline = ForecastPipeline::new(
        ServiceFactory::create_market_data_service(&config),
        Arc::new(SmartCoreModelLoader),
        config.model_path.clone(),
        metrics.clone(),
    );
    let dashboard = Dashboard {
        pipeline,
        presenter: TerminalPresenter::new(config.currency_label.clone(), CHART_WIDTH),
        reporter: config
            .observability_enabled
            .then(|| MetricsReporter::new(metrics)),
    };

    let defaults = InputDefaults::for_today(config.default_ticker(), Local::now().date_naive());

    if !args.interactive {
        let input = PipelineInput {
            ticker: Some(args.ticker.unwrap_or(defaults.ticker)),
            start: Some(args.start.unwrap_or(defaults.start)),
            end: Some(args.end.unwrap_or(defaults.end)),
            future_date: Some(args.future_date.unwrap_or(defaults.future_date)),
        };
        return dashboard.interact(input).await;
    }

    println!("Tickers: {}", config.tickers.join(", "));
    println!("Enter: TICKER [START [END [FUTURE]]] (dates YYYY-MM-DD, '-' for none, 'quit' to exit)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let trimmed = line.trim();
        if matches!(trimmed, "quit" | "exit") {
            break;
        }
        if let Err(e) = dashboard.interact(parse_interaction(trimmed, &defaults)).await {
            warn!("Interaction failed: {:#}", e);
        }
    }

    info!("tickercast stopped.");
    Ok(())
}
