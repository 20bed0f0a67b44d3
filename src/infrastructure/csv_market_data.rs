use crate::domain::errors::MarketDataError;
use crate::domain::market::{Observation, ObservationSeries};
use crate::domain::ports::MarketDataService;
use crate::domain::validation::StrictObservationValidator;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
struct CsvRecord {
    date: NaiveDate,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    volume: Decimal,
}

/// Offline provider backed by `{dir}/{TICKER}.csv` exports.
///
/// Expected header: `date,open,high,low,close,volume`. A ticker without a
/// file has no data.
pub struct CsvMarketDataService {
    data_dir: PathBuf,
}

impl CsvMarketDataService {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn file_for(&self, ticker: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", ticker.to_uppercase()))
    }

    fn invalid(ticker: &str, reason: impl ToString) -> MarketDataError {
        MarketDataError::InvalidData {
            symbol: ticker.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl MarketDataService for CsvMarketDataService {
    async fn get_daily_history(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ObservationSeries, MarketDataError> {
        let path = self.file_for(ticker);
        if !path.exists() {
            warn!("CsvMarketDataService: no file {:?} for {}", path, ticker);
            return Ok(ObservationSeries::empty(ticker));
        }

        let mut reader = csv::Reader::from_path(&path).map_err(|e| Self::invalid(ticker, e))?;

        let mut rows = Vec::new();
        for record in reader.deserialize::<CsvRecord>() {
            let record = record.map_err(|e| Self::invalid(ticker, e))?;
            if record.date < start || record.date >= end {
                continue;
            }
            rows.push(Observation::new(
                record.date,
                record.open,
                record.high,
                record.low,
                record.close,
                record.volume,
            ));
        }
        debug!(
            "CsvMarketDataService: {} rows in range from {:?}",
            rows.len(),
            path
        );

        let series =
            ObservationSeries::new(ticker, StrictObservationValidator::retain_valid(ticker, rows));
        info!(
            "CsvMarketDataService: {} daily rows for {} ({}..{})",
            series.len(),
            ticker,
            start,
            end
        );
        Ok(series)
    }

    fn provider_name(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "tickercast_csv_{}_{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).expect("Failed to create test temp dir");
        dir
    }

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    #[tokio::test]
    async fn test_reads_rows_within_range() {
        let dir = test_dir("range");
        std::fs::write(
            dir.join("PETR4.SA.csv"),
            "date,open,high,low,close,volume\n\
             2024-01-03,36.1,36.9,35.8,36.5,1000\n\
             2024-01-02,35.0,36.2,34.9,36.0,1200\n\
             2024-01-04,36.5,37.0,36.0,36.8,900\n\
             2024-01-05,36.8,37.5,36.5,37.1,950\n",
        )
        .unwrap();

        let service = CsvMarketDataService::new(dir.clone());
        let series = service
            .get_daily_history("petr4.sa", d(1, 2), d(1, 5))
            .await
            .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.first_date(), Some(d(1, 2)));
        assert_eq!(series.last_date(), Some(d(1, 4)));
        assert_eq!(series.observations()[1].close, dec!(36.5));

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let service = CsvMarketDataService::new(test_dir("missing"));
        let series = service
            .get_daily_history("XXXX.SA", d(1, 1), d(12, 31))
            .await
            .unwrap();
        assert!(series.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_row_is_invalid_data() {
        let dir = test_dir("malformed");
        std::fs::write(
            dir.join("VALE3.SA.csv"),
            "date,open,high,low,close,volume\n2024-01-02,abc,1,1,1,1\n",
        )
        .unwrap();

        let service = CsvMarketDataService::new(dir.clone());
        let result = service.get_daily_history("VALE3.SA", d(1, 1), d(2, 1)).await;
        assert!(matches!(result, Err(MarketDataError::InvalidData { .. })));

        std::fs::remove_dir_all(dir).ok();
    }
}
