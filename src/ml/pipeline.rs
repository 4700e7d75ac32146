use crate::error::Result;
use crate::ml::artifacts::ModelArtifacts;
use crate::ml::features::{FeatureAssembler, FeatureVector};
use crate::models::{CoverType, HistoryRecord, PredictionHistory, TerrainInput};
use serde::Serialize;
use tracing::{debug, error, info};

/// Result of a successful prediction
#[derive(Debug, Clone, Serialize)]
pub struct PredictionOutcome {
    pub class: u8,
    pub cover_type: CoverType,
    pub record: HistoryRecord,
}

/// Scale → classify → label, then record the result in the session history.
///
/// Single attempt per call: any failure is returned as-is and the history is
/// left untouched.
#[derive(Clone)]
pub struct PredictionPipeline {
    assembler: FeatureAssembler,
    artifacts: ModelArtifacts,
}

impl PredictionPipeline {
    pub fn new(artifacts: ModelArtifacts) -> Self {
        Self {
            assembler: FeatureAssembler::new(),
            artifacts,
        }
    }

    pub fn assemble(&self, input: &TerrainInput) -> FeatureVector {
        self.assembler.assemble(input)
    }

    /// Scale and classify a raw feature vector
    pub fn classify(&self, features: &FeatureVector) -> Result<CoverType> {
        let scaled = self.artifacts.scaler.transform(features.view())?;
        let class = self.artifacts.classifier.predict(scaled.view())?;
        debug!(class, "Classifier output");

        CoverType::from_class(class)
    }

    /// Assemble, classify and append a history record
    pub fn predict(
        &self,
        input: &TerrainInput,
        history: &mut PredictionHistory,
    ) -> Result<PredictionOutcome> {
        let features = self.assemble(input);

        let cover_type = self.classify(&features).map_err(|e| {
            error!(
                error_code = e.error_code(),
                message = %e,
                "Prediction failed"
            );
            e
        })?;

        let record = HistoryRecord::new(input, cover_type);
        history.append(record.clone());

        info!(
            class = cover_type.class(),
            label = cover_type.label(),
            history_len = history.len(),
            "Predicted forest cover type"
        );

        Ok(PredictionOutcome {
            class: cover_type.class(),
            cover_type,
            record,
        })
    }
}
