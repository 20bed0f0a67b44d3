use super::predictor::{ModelLoader, PricePredictor};
use crate::domain::errors::ModelError;
use crate::domain::ml::FEATURE_COUNT;
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::panic::AssertUnwindSafe;
use std::path::Path;
use tracing::{error, info};

/// Random forest regressor as persisted by the training scripts (serde_json).
pub type ForestModel = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

pub struct SmartCorePredictor {
    model: ForestModel,
}

impl SmartCorePredictor {
    pub fn from_model(model: ForestModel) -> Self {
        Self { model }
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::ArtifactNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ModelError::ArtifactNotFound {
                path: path.to_path_buf(),
            },
            _ => ModelError::ArtifactCorrupt {
                path: path.to_path_buf(),
                reason: format!("Failed to open model file: {}", e),
            },
        })?;

        let corrupt = |reason: String| {
            error!("Rejected ML model at {:?}: {}", path, reason);
            ModelError::ArtifactCorrupt {
                path: path.to_path_buf(),
                reason,
            }
        };

        let raw: serde_json::Value =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| corrupt(e.to_string()))?;
        check_fitted_forest(&raw).map_err(corrupt)?;
        let model: ForestModel =
            serde_json::from_value(raw).map_err(|e| corrupt(e.to_string()))?;

        let predictor = Self { model };
        predictor
            .predict(&[0.0; FEATURE_COUNT])
            .map_err(|e| corrupt(format!("trial prediction failed: {}", e)))?;

        info!("Successfully loaded ML model from {:?}", path);
        Ok(predictor)
    }
}

/// Structural checks smartcore skips on deserialization: an unfitted forest
/// decodes fine but panics on `predict`, and a forest trained on a wider
/// feature vector indexes past the end of the input row.
fn check_fitted_forest(raw: &serde_json::Value) -> Result<(), String> {
    let trees = raw
        .get("forest_regressor")
        .and_then(|f| f.get("trees"))
        .and_then(|t| t.as_array())
        .ok_or_else(|| "artifact holds no fitted forest".to_string())?;
    if trees.is_empty() {
        return Err("forest has no trees".to_string());
    }

    for (i, tree) in trees.iter().enumerate() {
        let nodes = tree
            .get("nodes")
            .and_then(|n| n.as_array())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| format!("tree {} has no nodes", i))?;

        for node in nodes {
            let feature = node
                .get("split_feature")
                .and_then(|f| f.as_u64())
                .ok_or_else(|| format!("tree {} has a node without split_feature", i))?;
            if feature >= FEATURE_COUNT as u64 {
                return Err(format!(
                    "tree {} splits on feature {}, model input has {} features",
                    i, feature, FEATURE_COUNT
                ));
            }
        }
    }
    Ok(())
}

impl PricePredictor for SmartCorePredictor {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<f64, ModelError> {
        let input_matrix =
            DenseMatrix::from_2d_vec(&vec![features.to_vec()]).map_err(|e| {
                ModelError::Inference {
                    reason: format!("Matrix creation failed: {}", e),
                }
            })?;

        let predictions = std::panic::catch_unwind(AssertUnwindSafe(|| {
            self.model.predict(&input_matrix)
        }))
        .map_err(|_| ModelError::Inference {
            reason: "Model panicked during prediction".to_string(),
        })?
        .map_err(|e| ModelError::Inference {
            reason: format!("Prediction failed: {}", e),
        })?;

        match predictions.first() {
            Some(pred) if pred.is_finite() => Ok(*pred),
            Some(pred) => Err(ModelError::Inference {
                reason: format!("Model returned non-finite value {}", pred),
            }),
            None => Err(ModelError::Inference {
                reason: "No prediction returned".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest"
    }

    fn version(&self) -> &str {
        "v1.0"
    }
}

/// Loads `SmartCorePredictor` artifacts from disk, read-only, on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct SmartCoreModelLoader;

impl ModelLoader for SmartCoreModelLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn PricePredictor>, ModelError> {
        Ok(Box::new(SmartCorePredictor::load(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartcore::ensemble::random_forest_regressor::RandomForestRegressorParameters;
    use std::path::PathBuf;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "tickercast_model_{}_{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).expect("Failed to create test temp dir");
        dir
    }

    fn fit_small_forest() -> ForestModel {
        let x: Vec<Vec<f64>> = (0..40)
            .map(|i| {
                let t = i as f64 / 10.0 - 2.0;
                vec![t, t + 0.1, t - 0.1, (i % 5) as f64 - 2.0, t * 0.5, t * 0.9]
            })
            .collect();
        let y: Vec<f64> = (0..40).map(|i| 30.0 + i as f64 * 0.25).collect();

        let matrix = DenseMatrix::from_2d_vec(&x).unwrap();
        let params = RandomForestRegressorParameters::default()
            .with_n_trees(10)
            .with_max_depth(4)
            .with_min_samples_split(2);
        RandomForestRegressor::fit(&matrix, &y, params).unwrap()
    }

    /// Forest whose only informative column is the last of `width`.
    fn fit_forest_on_last_column(width: usize) -> ForestModel {
        let x: Vec<Vec<f64>> = (0..40)
            .map(|i| {
                let mut row = vec![1.0; width];
                row[width - 1] = i as f64;
                row
            })
            .collect();
        let y: Vec<f64> = (0..40).map(|i| 10.0 + i as f64).collect();

        let matrix = DenseMatrix::from_2d_vec(&x).unwrap();
        let params = RandomForestRegressorParameters::default()
            .with_n_trees(5)
            .with_max_depth(3)
            .with_min_samples_split(2)
            .with_m(width);
        RandomForestRegressor::fit(&matrix, &y, params).unwrap()
    }

    fn write_json(dir: &Path, value: &impl serde::Serialize) -> PathBuf {
        let path = dir.join("model.json");
        let file = File::create(&path).unwrap();
        serde_json::to_writer(file, value).unwrap();
        path
    }

    #[test]
    fn test_unfitted_forest_is_corrupt() {
        let dir = test_dir("unfitted");

        for payload in [
            serde_json::json!({}),
            serde_json::json!({ "forest_regressor": null }),
            serde_json::json!({ "forest_regressor": { "trees": [], "samples": null } }),
        ] {
            let path = write_json(&dir, &payload);
            let result = SmartCoreModelLoader.load(&path);
            assert!(
                matches!(result, Err(ModelError::ArtifactCorrupt { .. })),
                "payload {} should be rejected",
                payload
            );
        }

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_wider_feature_forest_is_corrupt() {
        let dir = test_dir("wide");
        let path = write_json(&dir, &fit_forest_on_last_column(FEATURE_COUNT + 2));

        match SmartCoreModelLoader.load(&path) {
            Err(ModelError::ArtifactCorrupt { reason, .. }) => {
                assert!(reason.contains("feature"), "unexpected reason: {}", reason)
            }
            other => panic!("expected ArtifactCorrupt, got {:?}", other.err()),
        }

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_wider_forest_predict_does_not_panic() {
        let predictor = SmartCorePredictor::from_model(fit_forest_on_last_column(FEATURE_COUNT + 2));
        let result = predictor.predict(&[0.0; FEATURE_COUNT]);
        assert!(matches!(result, Err(ModelError::Inference { .. })));
    }

    #[test]
    fn test_missing_artifact() {
        let path = test_dir("missing").join("does_not_exist.json");
        let result = SmartCoreModelLoader.load(&path);
        assert!(matches!(result, Err(ModelError::ArtifactNotFound { .. })));
    }

    #[test]
    fn test_corrupt_artifact() {
        let dir = test_dir("corrupt");
        let path = dir.join("model.json");
        std::fs::write(&path, b"{\"not\": \"a forest\"}").unwrap();

        let result = SmartCoreModelLoader.load(&path);
        assert!(matches!(result, Err(ModelError::ArtifactCorrupt { .. })));

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_round_trip_prediction_is_deterministic() {
        let dir = test_dir("roundtrip");
        let path = dir.join("model.json");
        let model = fit_small_forest();
        let file = File::create(&path).unwrap();
        serde_json::to_writer(file, &model).unwrap();

        let in_memory = SmartCorePredictor::from_model(model);
        let loaded = SmartCoreModelLoader.load(&path).unwrap();

        let features = [0.3, 0.4, 0.2, 1.0, 0.15, 0.27];
        let a = loaded.predict(&features).unwrap();
        let b = loaded.predict(&features).unwrap();
        assert_eq!(a, b);
        assert!((a - in_memory.predict(&features).unwrap()).abs() < 1e-9);
        assert!(a >= 30.0 && a <= 40.0);

        std::fs::remove_dir_all(dir).ok();
    }
}
