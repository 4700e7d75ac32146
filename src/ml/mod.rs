/// Feature assembly and cover type classification
///
/// This module provides:
/// - One-hot feature vector assembly in the fixed model column order
/// - Standard scaling with a pre-fit scaler
/// - Random forest inference over pre-fit trees
/// - The scale → classify → label pipeline that feeds session history

pub mod artifacts;
pub mod classifier;
pub mod features;
pub mod pipeline;
pub mod scaler;

pub use artifacts::ModelArtifacts;
pub use classifier::{CoverClassifier, ForestArtifact, RandomForestClassifier, TreeArtifact};
pub use features::{one_hot, FeatureAssembler, FeatureVector, FEATURE_COUNT, SOIL_TYPES, WILDERNESS_AREAS};
pub use pipeline::{PredictionOutcome, PredictionPipeline};
pub use scaler::{FeatureScaler, ScalerArtifact, StandardScaler};
