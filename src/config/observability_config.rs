//! Observability configuration parsing from environment variables.

/// Observability environment configuration
#[derive(Debug, Clone)]
pub struct ObservabilityEnvConfig {
    /// Emit a `METRICS_JSON:` snapshot after each run.
    pub enabled: bool,
}

impl Default for ObservabilityEnvConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl ObservabilityEnvConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            enabled: lookup("OBSERVABILITY_ENABLED")
                .and_then(|v| v.trim().to_lowercase().parse::<bool>().ok())
                .unwrap_or(true),
        }
    }
}
