use std::path::PathBuf;
use thiserror::Error;

/// Errors related to market data retrieval
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("Request to {provider} failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Invalid market data for {symbol}: {reason}")]
    InvalidData { symbol: String, reason: String },
}

/// Errors related to the persisted regression model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model artifact not found at {}", path.display())]
    ArtifactNotFound { path: PathBuf },

    #[error("Model artifact at {} is unreadable: {reason}", path.display())]
    ArtifactCorrupt { path: PathBuf, reason: String },

    #[error("Inference failed: {reason}")]
    Inference { reason: String },
}

/// Terminal status of one pipeline run that did not produce a prediction.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Ticker or date range not selected")]
    InputIncomplete,

    #[error("No data for {ticker} in the selected range")]
    NoDataForRange { ticker: String },

    #[error("Insufficient history for {ticker}: {observations} observations, need at least {required}")]
    InsufficientHistory {
        ticker: String,
        observations: usize,
        required: usize,
    },

    #[error("Model artifact not found at {}", path.display())]
    ArtifactNotFound { path: PathBuf },

    #[error("Model artifact at {} is unreadable: {reason}", path.display())]
    ArtifactCorrupt { path: PathBuf, reason: String },

    #[error("Market data provider failure for {ticker}: {reason}")]
    ProviderFailure { ticker: String, reason: String },

    #[error("Prediction failed: {reason}")]
    PredictionFailed { reason: String },
}

impl PipelineError {
    /// Stable label used for metrics and structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::InputIncomplete => "input_incomplete",
            PipelineError::NoDataForRange { .. } => "no_data_for_range",
            PipelineError::InsufficientHistory { .. } => "insufficient_history",
            PipelineError::ArtifactNotFound { .. } => "artifact_not_found",
            PipelineError::ArtifactCorrupt { .. } => "artifact_corrupt",
            PipelineError::ProviderFailure { .. } => "provider_failure",
            PipelineError::PredictionFailed { .. } => "prediction_failed",
        }
    }
}

impl From<ModelError> for PipelineError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::ArtifactNotFound { path } => PipelineError::ArtifactNotFound { path },
            ModelError::ArtifactCorrupt { path, reason } => {
                PipelineError::ArtifactCorrupt { path, reason }
            }
            ModelError::Inference { reason } => PipelineError::PredictionFailed { reason },
        }
    }
}
