mod common;

use common::{day, temp_dir, trending_observations, write_model};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tickercast::application::ForecastPipeline;
use tickercast::application::market_data::{MIN_HISTORY, build_features, scale};
use tickercast::application::ml::SmartCoreModelLoader;
use tickercast::domain::forecast::PipelineInput;
use tickercast::domain::market::{Observation, ObservationSeries};
use tickercast::infrastructure::CsvMarketDataService;
use tickercast::infrastructure::observability::Metrics;

#[test]
fn test_closes_ten_to_twenty_leave_one_row() {
    let rows: Vec<Observation> = (10..=20)
        .enumerate()
        .map(|(i, close)| {
            let close = Decimal::from(close);
            Observation::new(
                day(i as i64),
                close - dec!(1),
                close + dec!(1),
                close - dec!(2),
                close,
                dec!(5000),
            )
        })
        .collect();
    let series = ObservationSeries::new("PETR4.SA", rows);
    assert_eq!(series.len(), MIN_HISTORY);

    let features = build_features(&series);
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].date, day(10));
    assert_eq!(features[0].price_change, 1.0);
    assert!((features[0].sma_10 - 15.5).abs() < 1e-12);

    // A single row has zero variance in every column.
    let matrix = scale(&features);
    assert_eq!(matrix.last_row(), Some(&[0.0; 6]));
}

#[test]
fn test_scaled_columns_are_standardized() {
    let series = ObservationSeries::new("VALE3.SA", trending_observations(120));
    let features = build_features(&series);
    assert_eq!(features.len(), 120 - 10);

    let matrix = scale(&features);
    assert_eq!(matrix.len(), features.len());
    for col in 0..6 {
        let values = matrix.column(col);
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        assert!(mean.abs() < 1e-9, "column {} mean {}", col, mean);
        assert!((var.sqrt() - 1.0).abs() < 1e-9, "column {} std {}", col, var.sqrt());
    }
}

#[test]
fn test_csv_provider_feeds_the_pipeline() {
    tokio_test::block_on(async {
        let dir = temp_dir("csv_flow");
        let mut body = String::from("date,open,high,low,close,volume\n");
        for o in trending_observations(50) {
            body.push_str(&format!(
                "{},{},{},{},{},{}\n",
                o.date, o.open, o.high, o.low, o.close, o.volume
            ));
        }
        std::fs::write(dir.join("ITUB4.SA.csv"), body).unwrap();
        let model_path = dir.join("model.json");
        write_model(&model_path);

        let pipeline = ForecastPipeline::new(
            Arc::new(CsvMarketDataService::new(dir.clone())),
            Arc::new(SmartCoreModelLoader),
            model_path,
            Metrics::new().unwrap(),
        );

        let report = pipeline
            .run(PipelineInput {
                ticker: Some("ITUB4.SA".to_string()),
                start: Some(day(0)),
                end: Some(day(40)),
                future_date: None,
            })
            .await;

        let prediction = report.prediction().expect("csv-backed run should predict");
        assert_eq!(prediction.label_date, day(40));
        assert_eq!(report.series.as_ref().map(|s| s.len()), Some(40));

        std::fs::remove_dir_all(dir).ok();
    });
}
