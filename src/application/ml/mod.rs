pub mod predictor;
pub mod smartcore_predictor;

pub use predictor::{ModelLoader, PricePredictor};
pub use smartcore_predictor::{ForestModel, SmartCoreModelLoader, SmartCorePredictor};
