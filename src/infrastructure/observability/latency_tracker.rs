use super::metrics::Metrics;
use prometheus::Histogram;
use std::time::Instant;
use tracing::debug;

/// RAII timer for one pipeline stage.
///
/// The elapsed time lands in `tickercast_stage_latency_seconds{stage}` when
/// the guard is dropped.
pub struct StageTimer {
    stage: &'static str,
    start: Instant,
    histogram: Histogram,
}

impl StageTimer {
    pub fn start(metrics: &Metrics, stage: &'static str) -> Self {
        Self {
            stage,
            start: Instant::now(),
            histogram: metrics.stage_latency_seconds.with_label_values(&[stage]),
        }
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        self.histogram.observe(elapsed.as_secs_f64());
        debug!("Stage {} took {:?}", self.stage, elapsed);
    }
}
