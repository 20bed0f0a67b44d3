//! Prometheus metrics definitions for Tickercast
//!
//! All metrics use the `tickercast_` prefix and are read-only.

use prometheus::{
    CounterVec, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
    core::{AtomicF64, GenericGaugeVec},
};
use std::sync::Arc;

/// Terminal outcomes a pipeline run can record.
pub const OUTCOMES: &[&str] = &[
    "predicted",
    "input_incomplete",
    "no_data_for_range",
    "insufficient_history",
    "artifact_not_found",
    "artifact_corrupt",
    "provider_failure",
    "prediction_failed",
];

/// Prometheus metrics for the forecast pipeline
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// Pipeline runs by terminal outcome
    pub pipeline_runs_total: CounterVec,
    /// Wall time per pipeline stage
    pub stage_latency_seconds: HistogramVec,
    /// Observations returned by the last fetch per ticker
    pub observations_fetched: GenericGaugeVec<AtomicF64>,
    /// Last predicted close per ticker
    pub last_prediction: GenericGaugeVec<AtomicF64>,
}

impl Metrics {
    /// Create a new Metrics instance with all gauges and counters registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let pipeline_runs_total = CounterVec::new(
            Opts::new(
                "tickercast_pipeline_runs_total",
                "Pipeline runs by terminal outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(pipeline_runs_total.clone()))?;

        let stage_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "tickercast_stage_latency_seconds",
                "Pipeline stage latency in seconds",
            )
            .buckets(vec![
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["stage"],
        )?;
        registry.register(Box::new(stage_latency_seconds.clone()))?;

        let observations_fetched = GaugeVec::new(
            Opts::new(
                "tickercast_observations_fetched",
                "Observations returned by the last fetch",
            ),
            &["ticker"],
        )?;
        registry.register(Box::new(observations_fetched.clone()))?;

        let last_prediction = GaugeVec::new(
            Opts::new("tickercast_last_prediction", "Last predicted close price"),
            &["ticker"],
        )?;
        registry.register(Box::new(last_prediction.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            pipeline_runs_total,
            stage_latency_seconds,
            observations_fetched,
            last_prediction,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    /// Increment the run counter for one outcome
    pub fn inc_runs(&self, outcome: &str) {
        self.pipeline_runs_total.with_label_values(&[outcome]).inc();
    }

    pub fn runs(&self, outcome: &str) -> u64 {
        self.pipeline_runs_total.with_label_values(&[outcome]).get() as u64
    }

    /// Only the latest ticker is kept so the label set stays bounded.
    pub fn set_observations(&self, ticker: &str, count: usize) {
        self.observations_fetched.reset();
        self.observations_fetched
            .with_label_values(&[ticker])
            .set(count as f64);
    }

    /// Only the latest ticker is kept so the label set stays bounded.
    pub fn set_last_prediction(&self, ticker: &str, value: f64) {
        self.last_prediction.reset();
        self.last_prediction.with_label_values(&[ticker]).set(value);
    }
}
