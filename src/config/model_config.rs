//! Model artifact and display configuration.

use std::path::PathBuf;

pub const DEFAULT_MODEL_PATH: &str = "modelo_random_forest.json";
pub const DEFAULT_CURRENCY_LABEL: &str = "R$";

#[derive(Debug, Clone)]
pub struct ModelEnvConfig {
    pub model_path: PathBuf,
    pub currency_label: String,
}

impl Default for ModelEnvConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            currency_label: DEFAULT_CURRENCY_LABEL.to_string(),
        }
    }
}

impl ModelEnvConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            model_path: lookup("MODEL_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            currency_label: lookup("CURRENCY_LABEL").unwrap_or(defaults.currency_label),
        }
    }
}
