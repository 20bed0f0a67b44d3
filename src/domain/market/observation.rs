use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// One trading day of OHLCV data for a single ticker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl Observation {
    pub fn new(
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn close_f64(&self) -> f64 {
        self.close.to_f64().unwrap_or(0.0)
    }

    pub fn volume_f64(&self) -> f64 {
        self.volume.to_f64().unwrap_or(0.0)
    }
}

/// Chronologically ordered daily observations for one ticker.
///
/// Dates are strictly increasing: construction sorts the rows and collapses
/// duplicate dates, keeping the row that arrived last for that date
/// (providers occasionally repeat the current session as a second row).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservationSeries {
    ticker: String,
    observations: Vec<Observation>,
}

impl ObservationSeries {
    pub fn new(ticker: impl Into<String>, mut observations: Vec<Observation>) -> Self {
        // Stable sort keeps arrival order among equal dates, so the last one wins below.
        observations.sort_by_key(|o| o.date);

        let mut ordered: Vec<Observation> = Vec::with_capacity(observations.len());
        for obs in observations {
            match ordered.last_mut() {
                Some(last) if last.date == obs.date => *last = obs,
                _ => ordered.push(obs),
            }
        }

        Self {
            ticker: ticker.into(),
            observations: ordered,
        }
    }

    pub fn empty(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            observations: Vec::new(),
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    /// Close column for charting.
    pub fn closes(&self) -> Vec<(NaiveDate, f64)> {
        self.observations
            .iter()
            .map(|o| (o.date, o.close_f64()))
            .collect()
    }

    /// Volume column for charting.
    pub fn volumes(&self) -> Vec<(NaiveDate, f64)> {
        self.observations
            .iter()
            .map(|o| (o.date, o.volume_f64()))
            .collect()
    }
}
