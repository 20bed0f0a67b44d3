//! Configuration module for tickercast.
//!
//! Structured configuration loading from environment variables, organized by
//! concern: market data provider, model artifact, and observability.

mod model_config;
mod observability_config;
mod provider_config;

pub use model_config::{DEFAULT_CURRENCY_LABEL, DEFAULT_MODEL_PATH, ModelEnvConfig};
pub use observability_config::ObservabilityEnvConfig;
pub use provider_config::{
    DEFAULT_CSV_DATA_DIR, DEFAULT_YAHOO_BASE_URL, DataProvider, ProviderEnvConfig,
};

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Tickers offered by the reference deployment.
pub const DEFAULT_TICKERS: [&str; 4] = ["PETR4.SA", "BBAS3.SA", "VALE3.SA", "COGN3.SA"];

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    // Provider (from ProviderEnvConfig)
    pub data_provider: DataProvider,
    pub yahoo_base_url: String,
    pub provider_timeout: Duration,
    pub csv_data_dir: PathBuf,

    // Model (from ModelEnvConfig)
    pub model_path: PathBuf,
    pub currency_label: String,

    /// Tickers offered to the user. The first one is the default selection.
    pub tickers: Vec<String>,

    // Observability (from ObservabilityEnvConfig)
    pub observability_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let provider =
            ProviderEnvConfig::from_lookup(&lookup).context("Failed to load provider config")?;
        let model = ModelEnvConfig::from_lookup(&lookup);
        let observability = ObservabilityEnvConfig::from_lookup(&lookup);
        let tickers = parse_tickers(lookup("TICKERS").as_deref());

        Ok(Self {
            data_provider: provider.provider,
            yahoo_base_url: provider.yahoo_base_url,
            provider_timeout: provider.timeout,
            csv_data_dir: provider.csv_data_dir,

            model_path: model.model_path,
            currency_label: model.currency_label,

            tickers,

            observability_enabled: observability.enabled,
        })
    }

    pub fn default_ticker(&self) -> &str {
        self.tickers
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_TICKERS[0])
    }
}

fn parse_tickers(raw: Option<&str>) -> Vec<String> {
    let parsed: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect();

    if parsed.is_empty() {
        DEFAULT_TICKERS.iter().map(|t| t.to_string()).collect()
    } else {
        parsed
    }
}
