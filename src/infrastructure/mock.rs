use crate::domain::errors::MarketDataError;
use crate::domain::market::{Observation, ObservationSeries};
use crate::domain::ports::MarketDataService;
use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, error};

#[derive(Clone)]
enum MockEntry {
    Rows(Vec<Observation>),
    Failure(String),
}

/// In-memory market data keyed by ticker.
///
/// Unknown tickers return an empty series. Ranges follow the live provider:
/// `start` inclusive, `end` exclusive.
#[derive(Clone, Default)]
pub struct MockMarketDataService {
    entries: Arc<RwLock<HashMap<String, MockEntry>>>,
    fetches: Arc<AtomicUsize>,
}

impl MockMarketDataService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the reference tickers with a deterministic daily walk so the
    /// demo mode has something to chart.
    pub fn with_demo_data(until: NaiveDate) -> Self {
        let service = Self::new();
        let from = until - Duration::days(3 * 365);
        for (ticker, base) in [
            ("PETR4.SA", 28.0),
            ("BBAS3.SA", 24.0),
            ("VALE3.SA", 62.0),
            ("COGN3.SA", 2.5),
        ] {
            service.insert(ticker, demo_walk(from, until, base));
        }
        service
    }

    pub fn insert(&self, ticker: &str, rows: Vec<Observation>) {
        self.write_entries()
            .insert(ticker.to_uppercase(), MockEntry::Rows(rows));
    }

    /// Makes every fetch for `ticker` fail with a provider error.
    pub fn fail_with(&self, ticker: &str, reason: &str) {
        self.write_entries()
            .insert(ticker.to_uppercase(), MockEntry::Failure(reason.to_string()));
    }

    /// Number of fetches served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }

    fn write_entries(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, MockEntry>> {
        match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                error!("MockMarketDataService: entries lock poisoned during write, recovering");
                poisoned.into_inner()
            }
        }
    }
}

#[async_trait]
impl MarketDataService for MockMarketDataService {
    async fn get_daily_history(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ObservationSeries, MarketDataError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);

        let entry = {
            let entries = match self.entries.read() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            entries.get(&ticker.to_uppercase()).cloned()
        };

        match entry {
            None => Ok(ObservationSeries::empty(ticker)),
            Some(MockEntry::Failure(reason)) => Err(MarketDataError::RequestFailed {
                provider: self.provider_name().to_string(),
                reason,
            }),
            Some(MockEntry::Rows(rows)) => {
                let in_range: Vec<Observation> = rows
                    .into_iter()
                    .filter(|o| o.date >= start && o.date < end)
                    .collect();
                debug!(
                    "MockMarketDataService: {} rows for {} in {}..{}",
                    in_range.len(),
                    ticker,
                    start,
                    end
                );
                Ok(ObservationSeries::new(ticker, in_range))
            }
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

/// Weekday-only pseudo price path, reproducible for a given range and base.
fn demo_walk(from: NaiveDate, until: NaiveDate, base: f64) -> Vec<Observation> {
    let mut rows = Vec::new();
    let mut price = base;
    let mut date = from;
    let mut step: u64 = 0;

    while date < until {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            step += 1;
            // Deterministic oscillation
            let drift = ((step as f64) * 0.37).sin() * 0.012 + ((step as f64) * 0.05).cos() * 0.004;
            let open = price;
            let close = (price * (1.0 + drift)).max(0.01);
            let high = open.max(close) * 1.006;
            let low = open.min(close) * 0.994;
            let volume = 1_000_000.0 + ((step * 7919) % 500_000) as f64;

            let to_dec = |v: f64| {
                Decimal::from_f64(v)
                    .map(|d| d.round_dp(2))
                    .unwrap_or(Decimal::ZERO)
            };
            rows.push(Observation::new(
                date,
                to_dec(open),
                to_dec(high),
                to_dec(low),
                to_dec(close),
                Decimal::from(volume as i64),
            ));
            price = close;
        }
        date += Duration::days(1);
    }

    rows
}
