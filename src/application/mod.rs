// Market data processing: feature derivation and scaling
pub mod market_data;

// Model loading and inference
pub mod ml;

// Request orchestration
pub mod pipeline;

pub use pipeline::ForecastPipeline;
