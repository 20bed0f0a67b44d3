//! Market data provider configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_CSV_DATA_DIR: &str = "data/market";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Source of daily history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataProvider {
    Yahoo,
    Csv,
    Mock,
}

impl FromStr for DataProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yahoo" => Ok(DataProvider::Yahoo),
            "csv" => Ok(DataProvider::Csv),
            "mock" => Ok(DataProvider::Mock),
            _ => anyhow::bail!(
                "Invalid DATA_PROVIDER: {}. Must be 'yahoo', 'csv', or 'mock'",
                s
            ),
        }
    }
}

/// Provider environment configuration
#[derive(Debug, Clone)]
pub struct ProviderEnvConfig {
    pub provider: DataProvider,
    pub yahoo_base_url: String,
    pub timeout: Duration,
    pub csv_data_dir: PathBuf,
}

impl ProviderEnvConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let provider = lookup("DATA_PROVIDER")
            .map(|v| DataProvider::from_str(&v))
            .transpose()?
            .unwrap_or(DataProvider::Yahoo);

        let timeout_secs = match lookup("PROVIDER_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid PROVIDER_TIMEOUT_SECS: {}", v))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            provider,
            yahoo_base_url: lookup("YAHOO_BASE_URL")
                .unwrap_or_else(|| DEFAULT_YAHOO_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
            csv_data_dir: lookup("CSV_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_DATA_DIR)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_provider_defaults() {
        let config = ProviderEnvConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.provider, DataProvider::Yahoo);
        assert_eq!(config.yahoo_base_url, DEFAULT_YAHOO_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.csv_data_dir, PathBuf::from("data/market"));
    }

    #[test]
    fn test_provider_overrides() {
        let config = ProviderEnvConfig::from_lookup(lookup_from(&[
            ("DATA_PROVIDER", "CSV"),
            ("PROVIDER_TIMEOUT_SECS", "5"),
            ("CSV_DATA_DIR", "/tmp/quotes"),
        ]))
        .unwrap();
        assert_eq!(config.provider, DataProvider::Csv);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.csv_data_dir, PathBuf::from("/tmp/quotes"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(ProviderEnvConfig::from_lookup(lookup_from(&[("DATA_PROVIDER", "bloomberg")])).is_err());
        assert!(
            ProviderEnvConfig::from_lookup(lookup_from(&[("PROVIDER_TIMEOUT_SECS", "soon")]))
                .is_err()
        );
    }
}
