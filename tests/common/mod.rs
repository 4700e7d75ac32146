//! Shared fixtures for integration tests
//!
//! Writes a small scaler and random forest to a temp directory. The forest
//! routes on scaled elevation first, then on the first soil indicator:
//! - elevation <= 2000 → Ponderosa Pine (3)
//! - elevation > 2000, soil type 0 → Spruce/Fir (1)
//! - elevation > 2000, any other soil → Lodgepole Pine (2)

#![allow(dead_code)]

use axum::Router;
use forest_cover_predictor::{
    api::{build_router, AppState},
    config::{Config, ModelsConfig, ProgressConfig},
    ml::{ForestArtifact, ModelArtifacts, ScalerArtifact, TreeArtifact, FEATURE_COUNT},
};
use std::path::Path;

/// Index of the first soil indicator in the feature vector
pub const SOIL_TYPE_1: i64 = 14;

pub fn scaler_artifact() -> ScalerArtifact {
    let mut mean = vec![0.0; FEATURE_COUNT];
    let mut scale = vec![1.0; FEATURE_COUNT];
    mean[0] = 2000.0;
    scale[0] = 500.0;
    ScalerArtifact { mean, scale }
}

fn leaf(class_index: usize, n_classes: usize) -> Vec<f64> {
    let mut row = vec![0.0; n_classes];
    row[class_index] = 5.0;
    row
}

pub fn forest_artifact(classes: Vec<i64>) -> ForestArtifact {
    let n = classes.len();
    let pick = |i: usize| i.min(n - 1);

    ForestArtifact {
        n_features: FEATURE_COUNT,
        trees: vec![TreeArtifact {
            children_left: vec![1, -1, 3, -1, -1],
            children_right: vec![2, -1, 4, -1, -1],
            feature: vec![0, -2, SOIL_TYPE_1, -2, -2],
            threshold: vec![0.0, -2.0, 0.5, -2.0, -2.0],
            value: vec![
                vec![1.0; n],
                leaf(pick(2), n),
                vec![1.0; n],
                leaf(pick(1), n),
                leaf(pick(0), n),
            ],
        }],
        classes,
    }
}

pub fn standard_classes() -> Vec<i64> {
    (1..=7).collect()
}

/// Write both artifacts and return their locations
pub fn write_artifacts(dir: &Path, classes: Vec<i64>) -> ModelsConfig {
    let models = ModelsConfig {
        classifier_path: dir.join("forest_cover_model.json"),
        scaler_path: dir.join("scaler.json"),
    };

    std::fs::write(
        &models.scaler_path,
        serde_json::to_string(&scaler_artifact()).unwrap(),
    )
    .unwrap();
    std::fs::write(
        &models.classifier_path,
        serde_json::to_string(&forest_artifact(classes)).unwrap(),
    )
    .unwrap();

    models
}

pub fn test_config(dir: &Path, classes: Vec<i64>) -> Config {
    let mut config = Config::default();
    config.models = write_artifacts(dir, classes);
    config.progress = ProgressConfig::disabled();
    config.server.static_dir = dir.join("static");
    config
}

pub fn test_app(dir: &Path) -> Router {
    test_app_with_classes(dir, standard_classes())
}

pub fn test_app_with_classes(dir: &Path, classes: Vec<i64>) -> Router {
    app_from_config(&test_config(dir, classes))
}

pub fn app_from_config(config: &Config) -> Router {
    let artifacts = ModelArtifacts::load(&config.models).unwrap();
    build_router(AppState::from_config(config, artifacts))
}

/// The reference scenario as a JSON request body
pub fn reference_input_json() -> serde_json::Value {
    serde_json::json!({
        "elevation": 2500,
        "aspect": 90,
        "slope": 15,
        "horizontal_distance_to_hydrology": 120,
        "vertical_distance_to_hydrology": 50,
        "horizontal_distance_to_roadways": 300,
        "hillshade_9am": 200,
        "hillshade_noon": 220,
        "hillshade_3pm": 180,
        "horizontal_distance_to_fire_points": 250,
        "wilderness_area": 0,
        "soil_type": 0
    })
}
