use crate::domain::errors::MarketDataError;
use crate::domain::market::ObservationSeries;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Source of daily OHLCV history.
///
/// An unknown symbol or a range without trading days yields an empty series;
/// only transport or provider faults are errors.
#[async_trait]
pub trait MarketDataService: Send + Sync {
    async fn get_daily_history(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ObservationSeries, MarketDataError>;

    fn provider_name(&self) -> &str;
}
