use crate::domain::ml::{FEATURE_COUNT, FEATURE_NAMES, FeatureMatrix, FeatureRow};
use statrs::statistics::Statistics;
use tracing::{debug, warn};

/// Per-column fitted parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub mean: f64,
    pub std_dev: f64,
}

/// Standardizes each feature column to zero mean and unit variance.
///
/// The statistics are fitted on the very rows being transformed, including
/// the row that is later fed to the model. A column with zero variance is
/// emitted as all zeros.
#[derive(Debug, Default)]
pub struct StandardScaler {
    stats: Option<[ColumnStats; FEATURE_COUNT]>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Population mean and standard deviation per column.
    pub fn fit(&mut self, rows: &[[f64; FEATURE_COUNT]]) {
        if rows.is_empty() {
            self.stats = None;
            return;
        }

        let mut stats = [ColumnStats {
            mean: 0.0,
            std_dev: 0.0,
        }; FEATURE_COUNT];

        for (col, slot) in stats.iter_mut().enumerate() {
            let values: Vec<f64> = rows.iter().map(|r| r[col]).collect();
            let mean = values.iter().mean();
            let std_dev = values.iter().population_std_dev();
            // Rounding noise on a constant column is not variance.
            let floor = 10.0 * f64::EPSILON * mean.abs().max(1.0);
            *slot = ColumnStats {
                mean,
                std_dev: if std_dev > floor { std_dev } else { 0.0 },
            };
        }

        self.stats = Some(stats);
    }

    pub fn transform(&self, rows: &[[f64; FEATURE_COUNT]]) -> FeatureMatrix {
        let Some(stats) = &self.stats else {
            return FeatureMatrix::default();
        };

        let scaled = rows
            .iter()
            .map(|row| {
                let mut out = [0.0; FEATURE_COUNT];
                for (col, value) in row.iter().enumerate() {
                    let ColumnStats { mean, std_dev } = stats[col];
                    out[col] = if std_dev > 0.0 && std_dev.is_finite() {
                        (value - mean) / std_dev
                    } else {
                        0.0
                    };
                }
                out
            })
            .collect();

        FeatureMatrix::new(scaled)
    }

    pub fn fit_transform(&mut self, rows: &[[f64; FEATURE_COUNT]]) -> FeatureMatrix {
        self.fit(rows);
        self.transform(rows)
    }

    pub fn stats(&self) -> Option<&[ColumnStats; FEATURE_COUNT]> {
        self.stats.as_ref()
    }
}

/// Fits a fresh scaler on `rows` and returns the standardized matrix.
pub fn scale(rows: &[FeatureRow]) -> FeatureMatrix {
    let raw: Vec<[f64; FEATURE_COUNT]> = rows.iter().map(FeatureRow::to_vector).collect();

    let mut scaler = StandardScaler::new();
    let matrix = scaler.fit_transform(&raw);

    if let Some(stats) = scaler.stats() {
        for (name, s) in FEATURE_NAMES.iter().zip(stats.iter()) {
            if s.std_dev == 0.0 {
                warn!("Scaler: column '{}' has zero variance, emitting zeros", name);
            }
        }
        debug!("Scaler: fitted on {} rows", raw.len());
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(i: usize, open: f64, volume: f64) -> FeatureRow {
        FeatureRow {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(i as i64),
            open,
            high: open + 1.5 + (i % 4) as f64,
            low: open - 0.5 - (i % 3) as f64,
            volume,
            price_change: ((i * 13) % 7) as f64 - 3.0,
            sma_10: open * 0.98 + (i % 5) as f64,
        }
    }

    fn population_std(values: &[f64]) -> f64 {
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
    }

    #[test]
    fn test_scaled_columns_have_zero_mean_unit_std() {
        let rows: Vec<FeatureRow> = (0..30)
            .map(|i| row(i, 20.0 + (i as f64 * 0.7).sin() * 3.0, 1e6 + (i * i) as f64 * 1e3))
            .collect();

        let matrix = scale(&rows);
        assert_eq!(matrix.len(), rows.len());

        for col in 0..FEATURE_COUNT {
            let values = matrix.column(col);
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            assert!(mean.abs() < 1e-9, "column {} mean {}", col, mean);
            assert!(
                (population_std(&values) - 1.0).abs() < 1e-9,
                "column {} std",
                col
            );
        }
    }

    #[test]
    fn test_zero_variance_column_emits_zeros() {
        let rows: Vec<FeatureRow> = (0..12).map(|i| row(i, 10.0 + i as f64, 5_000.0)).collect();

        let matrix = scale(&rows);
        // volume is column 3 and constant
        assert!(matrix.column(3).iter().all(|v| *v == 0.0));
        assert!(matrix.column(0).iter().any(|v| *v != 0.0));
    }

    #[test]
    fn test_single_row_scales_to_zeros() {
        let matrix = scale(&[row(0, 12.0, 100.0)]);
        assert_eq!(matrix.last_row(), Some(&[0.0; FEATURE_COUNT]));
    }

    #[test]
    fn test_empty_input() {
        assert!(scale(&[]).is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let rows: Vec<FeatureRow> = (0..5).map(|i| row(i, 10.0 + i as f64, 100.0 * i as f64)).collect();
        let matrix = scale(&rows);
        let opens = matrix.column(0);
        assert!(opens.windows(2).all(|w| w[0] < w[1]));
    }
}
