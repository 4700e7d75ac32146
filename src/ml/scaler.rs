use crate::error::{AppError, Result};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pre-fit normalization applied to the raw feature vector
pub trait FeatureScaler: Send + Sync {
    /// Number of features the scaler was fit on
    fn n_features(&self) -> usize;

    /// Scale a single feature vector
    fn transform(&self, features: ArrayView1<f64>) -> Result<Array1<f64>>;
}

/// On-disk form of a fitted standard scaler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifact {
    /// Per-feature mean
    pub mean: Vec<f64>,

    /// Per-feature standard deviation
    pub scale: Vec<f64>,
}

/// Standardization: `(x - mean) / scale`
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    /// Build from fitted parameters. A zero scale is treated as one.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        if mean.is_empty() {
            return Err(AppError::Validation(
                "scaler must have at least one feature".to_string(),
            ));
        }
        if mean.len() != scale.len() {
            return Err(AppError::Validation(format!(
                "scaler mean has {} entries but scale has {}",
                mean.len(),
                scale.len()
            )));
        }
        if mean.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err(AppError::Validation(
                "scaler parameters must be finite".to_string(),
            ));
        }

        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect::<Vec<_>>();

        Ok(Self {
            mean: Array1::from(mean),
            scale: Array1::from(scale),
        })
    }

    pub fn from_artifact(artifact: ScalerArtifact) -> Result<Self> {
        Self::new(artifact.mean, artifact.scale)
    }

    /// Load a scaler artifact from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| AppError::Artifact {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let artifact: ScalerArtifact =
            serde_json::from_str(&raw).map_err(|e| AppError::Artifact {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Self::from_artifact(artifact).map_err(|e| AppError::Artifact {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl FeatureScaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, features: ArrayView1<f64>) -> Result<Array1<f64>> {
        if features.len() != self.mean.len() {
            return Err(AppError::ModelInput {
                expected: self.mean.len(),
                actual: features.len(),
            });
        }

        Ok((&features - &self.mean) / &self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_standardizes() {
        let scaler = StandardScaler::new(vec![10.0, 0.0, 5.0], vec![2.0, 1.0, 0.5]).unwrap();
        let scaled = scaler.transform(array![14.0, -3.0, 5.0].view()).unwrap();
        assert_eq!(scaled, array![2.0, -3.0, 0.0]);
    }

    #[test]
    fn test_zero_scale_treated_as_one() {
        let scaler = StandardScaler::new(vec![1.0, 1.0], vec![0.0, 2.0]).unwrap();
        let scaled = scaler.transform(array![1.0, 5.0].view()).unwrap();
        assert_eq!(scaled, array![0.0, 2.0]);
    }

    #[test]
    fn test_length_mismatch_is_model_input_error() {
        let scaler = StandardScaler::new(vec![0.0; 54], vec![1.0; 54]).unwrap();
        let short = Array1::<f64>::zeros(50);

        match scaler.transform(short.view()) {
            Err(AppError::ModelInput { expected, actual }) => {
                assert_eq!(expected, 54);
                assert_eq!(actual, 50);
            }
            other => panic!("expected ModelInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_inconsistent_parameters() {
        assert!(StandardScaler::new(vec![0.0; 3], vec![1.0; 2]).is_err());
        assert!(StandardScaler::new(vec![], vec![]).is_err());
        assert!(StandardScaler::new(vec![f64::NAN], vec![1.0]).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaler.json");
        std::fs::write(&path, r#"{"mean": [1.0, 2.0], "scale": [1.0, 4.0]}"#).unwrap();

        let scaler = StandardScaler::load(&path).unwrap();
        assert_eq!(scaler.n_features(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = StandardScaler::load(Path::new("/nonexistent/scaler.json")).unwrap_err();
        assert_eq!(err.error_code(), "ARTIFACT_ERROR");
    }
}
