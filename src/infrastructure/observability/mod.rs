//! Push-based observability for Tickercast
//!
//! Metrics are kept in a Prometheus registry and pushed out as structured
//! JSON lines on stdout. Nothing here accepts incoming requests.

pub mod latency_tracker;
pub mod metrics;
pub mod reporter;

pub use latency_tracker::StageTimer;
pub use metrics::Metrics;
pub use reporter::MetricsReporter;
