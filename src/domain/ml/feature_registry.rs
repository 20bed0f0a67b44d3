use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of model input columns.
pub const FEATURE_COUNT: usize = 6;

/// Ordered list of feature names.
/// This order MUST match the column order the model artifact was trained on.
/// Any change here is a breaking change for persisted models.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "open",
    "high",
    "low",
    "volume",
    "price_change",
    "sma_10",
];

/// Features derived from one observation after the SMA warm-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
    pub price_change: f64,
    pub sma_10: f64,
}

impl FeatureRow {
    /// Model input vector in `FEATURE_NAMES` order.
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.open,
            self.high,
            self.low,
            self.volume,
            self.price_change,
            self.sma_10,
        ]
    }
}

/// Standardized feature rows, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<[f64; FEATURE_COUNT]>,
}

impl FeatureMatrix {
    pub fn new(rows: Vec<[f64; FEATURE_COUNT]>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[[f64; FEATURE_COUNT]] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Most recent row, the only one fed to the model.
    pub fn last_row(&self) -> Option<&[f64; FEATURE_COUNT]> {
        self.rows.last()
    }

    pub fn column(&self, index: usize) -> Vec<f64> {
        self.rows.iter().map(|r| r[index]).collect()
    }
}
