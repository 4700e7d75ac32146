use crate::config::ModelsConfig;
use crate::error::Result;
use crate::ml::classifier::{CoverClassifier, RandomForestClassifier};
use crate::ml::features::{FeatureAssembler, FEATURE_COUNT};
use crate::ml::scaler::{FeatureScaler, StandardScaler};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

/// The pre-fit scaler and classifier, shared read-only by every request
#[derive(Clone)]
pub struct ModelArtifacts {
    pub scaler: Arc<dyn FeatureScaler>,
    pub classifier: Arc<dyn CoverClassifier>,
}

impl ModelArtifacts {
    pub fn new(scaler: Arc<dyn FeatureScaler>, classifier: Arc<dyn CoverClassifier>) -> Self {
        Self { scaler, classifier }
    }

    /// Load both artifacts from the configured paths.
    ///
    /// Fails if either file is missing or malformed; the service cannot
    /// predict without them.
    pub fn load(config: &ModelsConfig) -> Result<Self> {
        let scaler = StandardScaler::load(&config.scaler_path)?;
        info!(
            path = %config.scaler_path.display(),
            n_features = scaler.n_features(),
            "Loaded feature scaler"
        );

        let classifier = RandomForestClassifier::load(&config.classifier_path)?;
        info!(
            path = %config.classifier_path.display(),
            n_features = classifier.n_features(),
            n_trees = classifier.n_trees(),
            classes = ?classifier.classes(),
            "Loaded cover type classifier"
        );

        let artifacts = Self::new(Arc::new(scaler), Arc::new(classifier));
        artifacts.check_widths();
        Ok(artifacts)
    }

    /// Warn when either artifact was fit on a vector other than the assembled one.
    /// Requests will fail with a model input or prediction error in that case.
    pub fn check_widths(&self) -> bool {
        let scaler = width_mismatch(self.scaler.n_features());
        let classifier = width_mismatch(self.classifier.n_features());

        for (artifact, mismatch) in [("scaler", &scaler), ("classifier", &classifier)] {
            if let Some(detail) = mismatch {
                warn!(
                    artifact,
                    expected = FEATURE_COUNT,
                    detail = %detail,
                    "Model artifact does not match the assembled feature width"
                );
            }
        }

        scaler.is_none() && classifier.is_none()
    }
}

/// Describe how an artifact fit on `width` columns differs from the assembled vector
pub fn width_mismatch(width: usize) -> Option<String> {
    let names = FeatureAssembler::feature_names();

    match width.cmp(&FEATURE_COUNT) {
        Ordering::Equal => None,
        Ordering::Less => Some(format!(
            "fit on {} columns, missing {} through {}",
            width,
            names[width],
            names[FEATURE_COUNT - 1]
        )),
        Ordering::Greater => Some(format!(
            "fit on {} columns, {} more than {}",
            width,
            width - FEATURE_COUNT,
            names[FEATURE_COUNT - 1]
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::classifier::{ForestArtifact, TreeArtifact};
    use crate::ml::scaler::ScalerArtifact;
    use std::path::Path;

    fn write_artifacts(dir: &Path, width: usize) -> ModelsConfig {
        let scaler = ScalerArtifact {
            mean: vec![0.0; width],
            scale: vec![1.0; width],
        };
        let forest = ForestArtifact {
            classes: vec![1, 2],
            n_features: width,
            trees: vec![TreeArtifact {
                children_left: vec![-1],
                children_right: vec![-1],
                feature: vec![-2],
                threshold: vec![-2.0],
                value: vec![vec![1.0, 0.0]],
            }],
        };

        let config = ModelsConfig {
            classifier_path: dir.join("forest_cover_model.json"),
            scaler_path: dir.join("scaler.json"),
        };
        std::fs::write(&config.scaler_path, serde_json::to_string(&scaler).unwrap()).unwrap();
        std::fs::write(
            &config.classifier_path,
            serde_json::to_string(&forest).unwrap(),
        )
        .unwrap();
        config
    }

    #[test]
    fn test_load_consistent_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_artifacts(dir.path(), FEATURE_COUNT);

        let artifacts = ModelArtifacts::load(&config).unwrap();
        assert!(artifacts.check_widths());
    }

    #[test]
    fn test_width_mismatch_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_artifacts(dir.path(), 50);

        let artifacts = ModelArtifacts::load(&config).unwrap();
        assert!(!artifacts.check_widths());
    }

    #[test]
    fn test_width_mismatch_names_columns() {
        assert_eq!(width_mismatch(FEATURE_COUNT), None);
        assert_eq!(
            width_mismatch(50).unwrap(),
            "fit on 50 columns, missing Soil_Type37 through Soil_Type40"
        );
        assert_eq!(
            width_mismatch(0).unwrap(),
            "fit on 0 columns, missing Elevation through Soil_Type40"
        );
        assert_eq!(
            width_mismatch(56).unwrap(),
            "fit on 56 columns, 2 more than Soil_Type40"
        );
    }

    #[test]
    fn test_missing_artifacts_fail() {
        let dir = tempfile::tempdir().unwrap();
        let config = ModelsConfig {
            classifier_path: dir.path().join("missing_model.json"),
            scaler_path: dir.path().join("missing_scaler.json"),
        };

        let err = ModelArtifacts::load(&config).err().unwrap();
        assert_eq!(err.error_code(), "ARTIFACT_ERROR");
    }
}
