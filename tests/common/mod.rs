#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::path::{Path, PathBuf};
use tickercast::application::ml::ForestModel;
use tickercast::domain::market::Observation;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .try_init();
}

/// Fresh per-test directory under the system temp dir.
pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "tickercast_it_{}_{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("Failed to create test temp dir");
    dir
}

pub fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap() + Duration::days(offset)
}

/// `n` daily rows with a gentle upward drift.
pub fn trending_observations(n: usize) -> Vec<Observation> {
    (0..n)
        .map(|i| {
            let close = 20.0 + i as f64 * 0.1 + (i % 4) as f64 * 0.05;
            let open = close - 0.2 - (i % 3) as f64 * 0.1;
            Observation::new(
                day(i as i64),
                Decimal::from_f64(open).unwrap().round_dp(2),
                Decimal::from_f64(close + 0.3).unwrap().round_dp(2),
                Decimal::from_f64(open - 0.3).unwrap().round_dp(2),
                Decimal::from_f64(close).unwrap().round_dp(2),
                Decimal::from(1_000_000 + (i as i64 % 9) * 10_000),
            )
        })
        .collect()
}

/// Fits a small forest over standardized-looking inputs and writes it as JSON.
pub fn write_model(path: &Path) {
    let x: Vec<Vec<f64>> = (0..60)
        .map(|i| {
            let t = i as f64 / 15.0 - 2.0;
            vec![t, t + 0.05, t - 0.05, ((i % 7) as f64 - 3.0) / 3.0, t * 0.3, t * 0.95]
        })
        .collect();
    let y: Vec<f64> = (0..60).map(|i| 20.0 + i as f64 * 0.1).collect();

    let matrix = DenseMatrix::from_2d_vec(&x).unwrap();
    let params = RandomForestRegressorParameters::default()
        .with_n_trees(12)
        .with_max_depth(5)
        .with_min_samples_split(2);
    let model: ForestModel = RandomForestRegressor::fit(&matrix, &y, params).unwrap();

    let file = std::fs::File::create(path).unwrap();
    serde_json::to_writer(file, &model).unwrap();
}
