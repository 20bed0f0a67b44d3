//! Push-based metrics reporter for Tickercast
//!
//! Outputs a structured JSON snapshot to stdout after each pipeline run.
//! No HTTP server, no incoming connections.

use crate::infrastructure::observability::metrics::{Metrics, OUTCOMES};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Metrics snapshot for JSON output
#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub timestamp: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub runs_total: u64,
    pub runs_by_outcome: BTreeMap<String, u64>,
}

pub struct MetricsReporter {
    metrics: Metrics,
    start_time: Instant,
}

impl MetricsReporter {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            metrics,
            start_time: Instant::now(),
        }
    }

    pub fn collect_snapshot(&self) -> MetricsSnapshot {
        let runs_by_outcome: BTreeMap<String, u64> = OUTCOMES
            .iter()
            .map(|o| (o.to_string(), self.metrics.runs(o)))
            .filter(|(_, count)| *count > 0)
            .collect();

        MetricsSnapshot {
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            runs_total: runs_by_outcome.values().sum(),
            runs_by_outcome,
        }
    }

    /// Print one snapshot with the `METRICS_JSON:` prefix so logs can be filtered.
    pub fn report(&self) {
        let snapshot = self.collect_snapshot();
        match serde_json::to_string(&snapshot) {
            Ok(json) => {
                println!("METRICS_JSON:{}", json);
                info!(
                    "Pipeline runs: {} | Uptime: {}s",
                    snapshot.runs_total, snapshot.uptime_seconds
                );
            }
            Err(e) => warn!("Failed to serialize metrics: {}", e),
        }
        debug!("Prometheus exposition:\n{}", self.metrics.render());
    }
}
