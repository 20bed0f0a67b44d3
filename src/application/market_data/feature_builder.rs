use crate::domain::market::ObservationSeries;
use crate::domain::ml::FeatureRow;
use rust_decimal::prelude::ToPrimitive;
use ta::Next;
use ta::indicators::SimpleMovingAverage;
use tracing::{debug, error};

/// Trailing window of the close-price moving average.
pub const SMA_WINDOW: usize = 10;

/// Leading rows consumed before the first usable feature row.
///
/// A plain rolling mean would only leave rows 0..=8 undefined and keep row 9.
/// Dropping ten rows instead makes an 11-row series yield exactly one row
/// (closes 10..=20 give `sma_10 = 15.5`). The scaler therefore sees one row
/// fewer than a rolling-mean-then-drop-NaN pipeline would give it.
pub const WARMUP_ROWS: usize = SMA_WINDOW;

/// Smallest series that yields at least one feature row.
pub const MIN_HISTORY: usize = WARMUP_ROWS + 1;

/// Derives model features from a daily series.
///
/// `price_change` is `close - open`; `sma_10` is the mean close over the
/// current row and the nine before it. The first `WARMUP_ROWS` rows are
/// dropped, so a series shorter than `MIN_HISTORY` yields nothing.
pub fn build_features(series: &ObservationSeries) -> Vec<FeatureRow> {
    let observations = series.observations();
    if observations.len() < MIN_HISTORY {
        debug!(
            "FeatureBuilder: {} has {} observations (< {}), no features",
            series.ticker(),
            observations.len(),
            MIN_HISTORY
        );
        return Vec::new();
    }

    let Ok(mut sma) = SimpleMovingAverage::new(SMA_WINDOW) else {
        error!("FeatureBuilder: invalid SMA window {}", SMA_WINDOW);
        return Vec::new();
    };

    let mut rows = Vec::with_capacity(observations.len() - WARMUP_ROWS);
    for (i, obs) in observations.iter().enumerate() {
        let sma_10 = sma.next(obs.close_f64());
        if i < WARMUP_ROWS {
            continue;
        }

        rows.push(FeatureRow {
            date: obs.date,
            open: obs.open.to_f64().unwrap_or(0.0),
            high: obs.high.to_f64().unwrap_or(0.0),
            low: obs.low.to_f64().unwrap_or(0.0),
            volume: obs.volume_f64(),
            price_change: (obs.close - obs.open).to_f64().unwrap_or(0.0),
            sma_10,
        });
    }

    debug!(
        "FeatureBuilder: {} -> {} feature rows from {} observations",
        series.ticker(),
        rows.len(),
        observations.len()
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::Observation;
    use chrono::{Duration, NaiveDate};
    use rust_decimal::Decimal;
    use rust_decimal::prelude::FromPrimitive;

    fn series_from_closes(closes: &[f64]) -> ObservationSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let observations = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let close = Decimal::from_f64(c).unwrap();
                let open = close - Decimal::ONE;
                Observation::new(
                    start + Duration::days(i as i64),
                    open,
                    close + Decimal::ONE,
                    open - Decimal::ONE,
                    close,
                    Decimal::from(1_000 + i as i64),
                )
            })
            .collect();
        ObservationSeries::new("TEST", observations)
    }

    #[test]
    fn test_short_series_yields_no_features() {
        for len in 0..MIN_HISTORY {
            let closes: Vec<f64> = (0..len).map(|i| 10.0 + i as f64).collect();
            assert!(
                build_features(&series_from_closes(&closes)).is_empty(),
                "len {} should be empty",
                len
            );
        }
    }

    #[test]
    fn test_eleven_rows_single_feature_row() {
        let closes: Vec<f64> = (10..=20).map(|c| c as f64).collect();
        let rows = build_features(&series_from_closes(&closes));

        assert_eq!(rows.len(), 1);
        let row = rows[0];
        assert_eq!(row.price_change, 1.0);
        assert!((row.sma_10 - 15.5).abs() < 1e-9);
        assert_eq!(row.open, 19.0);
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 1, 11).unwrap());
    }

    #[test]
    fn test_sma_matches_trailing_window_mean() {
        let closes: Vec<f64> = (0..40)
            .map(|i| 30.0 + ((i * 7) % 11) as f64 * 0.37 - (i % 3) as f64)
            .collect();
        let rows = build_features(&series_from_closes(&closes));

        assert_eq!(rows.len(), closes.len() - WARMUP_ROWS);
        for (k, row) in rows.iter().enumerate() {
            let i = k + WARMUP_ROWS;
            let expected = closes[i + 1 - SMA_WINDOW..=i].iter().sum::<f64>() / SMA_WINDOW as f64;
            assert!(
                (row.sma_10 - expected).abs() < 1e-9,
                "row {}: {} vs {}",
                i,
                row.sma_10,
                expected
            );
        }
    }

    #[test]
    fn test_price_change_is_close_minus_open() {
        let closes: Vec<f64> = (0..15).map(|i| 5.25 + i as f64).collect();
        let rows = build_features(&series_from_closes(&closes));
        assert!(rows.iter().all(|r| (r.price_change - 1.0).abs() < 1e-12));
        assert_eq!(rows.last().map(|r| r.volume), Some(1_014.0));
    }
}
