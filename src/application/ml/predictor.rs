use crate::domain::errors::ModelError;
use crate::domain::ml::FEATURE_COUNT;
use std::path::Path;

/// Interface for a loaded regression model
pub trait PricePredictor: Send + Sync {
    /// Predict the next closing price from one standardized feature row
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<f64, ModelError>;

    /// Get model name/type
    fn name(&self) -> &str;

    /// Get model version/id
    fn version(&self) -> &str;
}

/// Deserializes a persisted model into a predictor.
pub trait ModelLoader: Send + Sync {
    /// `ArtifactNotFound` when nothing exists at `path`, `ArtifactCorrupt`
    /// when the file cannot be read or decoded.
    fn load(&self, path: &Path) -> Result<Box<dyn PricePredictor>, ModelError>;
}
