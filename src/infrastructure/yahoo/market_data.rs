use super::common::{YahooChartResponse, YahooChartResult, YahooIndicators};
use crate::domain::errors::MarketDataError;
use crate::domain::market::{Observation, ObservationSeries};
use crate::domain::ports::MarketDataService;
use crate::domain::validation::StrictObservationValidator;
use crate::infrastructure::core::HttpClientFactory;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const PROVIDER: &str = "Yahoo Finance";

/// Daily history from the Yahoo Finance chart endpoint.
pub struct YahooMarketDataService {
    client: Client,
    base_url: String,
}

impl YahooMarketDataService {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            client: HttpClientFactory::create_client(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn chart_url(&self, ticker: &str) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, ticker)
    }

    fn request_failed(reason: impl ToString) -> MarketDataError {
        MarketDataError::RequestFailed {
            provider: PROVIDER.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl MarketDataService for YahooMarketDataService {
    async fn get_daily_history(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ObservationSeries, MarketDataError> {
        if end <= start {
            debug!(
                "YahooMarketDataService: empty range {}..{} for {}",
                start, end, ticker
            );
            return Ok(ObservationSeries::empty(ticker));
        }

        // period2 is exclusive: the end date itself is not fetched.
        let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let period2 = end.and_time(NaiveTime::MIN).and_utc().timestamp();
        let url = self.chart_url(ticker);

        debug!(
            "YahooMarketDataService: GET {} period1={} period2={}",
            url, period1, period2
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()
            .await
            .map_err(Self::request_failed)?;

        let status = response.status();
        let body = response.text().await.map_err(Self::request_failed)?;

        let observations = parse_chart_body(ticker, status.as_u16(), &body)?;
        let valid = StrictObservationValidator::retain_valid(ticker, observations);
        let series = ObservationSeries::new(ticker, valid);

        info!(
            "YahooMarketDataService: {} daily rows for {} ({}..{})",
            series.len(),
            ticker,
            start,
            end
        );
        Ok(series)
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}

/// Decodes a chart response body into observations.
///
/// Provider "no data" errors become an empty result; other non-success
/// answers are `Api` errors.
pub fn parse_chart_body(
    ticker: &str,
    status: u16,
    body: &str,
) -> Result<Vec<Observation>, MarketDataError> {
    let parsed: Result<YahooChartResponse, _> = serde_json::from_str(body);

    let chart = match parsed {
        Ok(resp) => resp.chart,
        Err(e) => {
            if (200..300).contains(&status) {
                error!(
                    "YahooMarketDataService: unreadable payload for {}: {}",
                    ticker, e
                );
                return Err(MarketDataError::InvalidData {
                    symbol: ticker.to_string(),
                    reason: e.to_string(),
                });
            }
            return Err(MarketDataError::Api {
                provider: PROVIDER.to_string(),
                status,
                body: body.chars().take(200).collect(),
            });
        }
    };

    if let Some(api_error) = chart.error {
        if api_error.is_no_data() {
            warn!(
                "YahooMarketDataService: no data for {} ({}: {})",
                ticker, api_error.code, api_error.description
            );
            return Ok(Vec::new());
        }
        return Err(MarketDataError::Api {
            provider: PROVIDER.to_string(),
            status,
            body: format!("{}: {}", api_error.code, api_error.description),
        });
    }

    let Some(result) = chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };

    Ok(rows_from_result(ticker, result))
}

/// Zips the column arrays into rows, skipping any row with a missing field.
///
/// When an adjusted close is present, open/high/low/close are scaled by
/// `adjclose / close` so the series is split and dividend adjusted. Volume
/// is left as traded.
fn rows_from_result(ticker: &str, result: YahooChartResult) -> Vec<Observation> {
    let offset = result.meta.as_ref().and_then(|m| m.gmtoffset).unwrap_or(0);
    let YahooIndicators { quote, adjclose } = result.indicators;
    let quote = quote.into_iter().next().unwrap_or_default();
    let adjclose = adjclose.into_iter().next().unwrap_or_default();

    let mut rows = Vec::with_capacity(result.timestamp.len());
    let mut skipped = 0usize;

    for (i, ts) in result.timestamp.iter().enumerate() {
        let field = |col: &[Option<f64>]| col.get(i).copied().flatten();
        let values = (
            field(&quote.open),
            field(&quote.high),
            field(&quote.low),
            field(&quote.close),
            field(&quote.volume),
        );

        let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = values else {
            skipped += 1;
            continue;
        };

        let ratio = match field(&adjclose.adjclose) {
            Some(adj) if close > 0.0 && adj.is_finite() => adj / close,
            _ => 1.0,
        };
        let (open, high, low, close) = (open * ratio, high * ratio, low * ratio, close * ratio);

        let Some(date) = DateTime::from_timestamp(ts + offset, 0).map(|dt| dt.date_naive()) else {
            skipped += 1;
            continue;
        };

        let decimals = (
            Decimal::from_f64(open),
            Decimal::from_f64(high),
            Decimal::from_f64(low),
            Decimal::from_f64(close),
            Decimal::from_f64(volume),
        );
        let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = decimals else {
            skipped += 1;
            continue;
        };

        rows.push(Observation::new(date, open, high, low, close, volume));
    }

    if skipped > 0 {
        debug!(
            "YahooMarketDataService: skipped {} incomplete rows for {}",
            skipped, ticker
        );
    }
    rows
}
