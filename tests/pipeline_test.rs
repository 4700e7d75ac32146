/// Integration tests for the assemble → scale → classify → record pipeline
///
/// These tests load real artifact files from disk and verify:
/// - The reference feature vector layout
/// - Labels for each branch of the fixture forest
/// - History bookkeeping and CSV export
/// - Unknown classes surface as errors

mod common;

use forest_cover_predictor::{
    error::AppError,
    export::HistoryExporter,
    ml::{FeatureAssembler, ModelArtifacts, PredictionPipeline, FEATURE_COUNT},
    models::{CoverType, PredictionHistory, TerrainInput},
};

fn load_pipeline(classes: Vec<i64>) -> (PredictionPipeline, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let models = common::write_artifacts(dir.path(), classes);
    let artifacts = ModelArtifacts::load(&models).unwrap();
    (PredictionPipeline::new(artifacts), dir)
}

#[test]
fn test_reference_scenario() {
    let (pipeline, _dir) = load_pipeline(common::standard_classes());
    let input = TerrainInput {
        elevation: 2500,
        aspect: 90,
        slope: 15,
        horizontal_distance_to_hydrology: 120,
        vertical_distance_to_hydrology: 50,
        horizontal_distance_to_roadways: 300,
        hillshade_9am: 200,
        hillshade_noon: 220,
        hillshade_3pm: 180,
        horizontal_distance_to_fire_points: 250,
        wilderness_area: 0,
        soil_type: 0,
    };

    let features = FeatureAssembler::new().assemble(&input);
    assert_eq!(features.len(), FEATURE_COUNT);
    assert_eq!(
        &features.as_slice()[..15],
        &[2500.0, 90.0, 15.0, 120.0, 50.0, 300.0, 200.0, 220.0, 180.0, 250.0, 1.0, 0.0, 0.0, 0.0, 1.0]
    );
    assert!(features.as_slice()[15..].iter().all(|&v| v == 0.0));

    let mut history = PredictionHistory::new();
    let outcome = pipeline.predict(&input, &mut history).unwrap();

    assert_eq!(outcome.cover_type, CoverType::SpruceFir);
    assert_eq!(outcome.class, 1);
    assert_eq!(history.len(), 1);

    let record = history.latest().unwrap();
    assert_eq!(record.prediction, outcome.cover_type);
    assert_eq!(record.elevation, 2500);
    assert_eq!(record.slope, 15);
    assert_eq!(record.aspect, 90);
    assert_eq!(record.wilderness, 0);
    assert_eq!(record.soil_type, 0);
}

#[test]
fn test_fixture_forest_branches() {
    let (pipeline, _dir) = load_pipeline(common::standard_classes());
    let mut history = PredictionHistory::new();

    let cases = [
        (1500, 0, CoverType::PonderosaPine),
        (2000, 12, CoverType::PonderosaPine),
        (2500, 3, CoverType::LodgepolePine),
        (3800, 0, CoverType::SpruceFir),
    ];

    for (elevation, soil_type, expected) in cases {
        let input = TerrainInput {
            elevation,
            soil_type,
            ..Default::default()
        };
        let outcome = pipeline.predict(&input, &mut history).unwrap();
        assert_eq!(outcome.cover_type, expected, "elevation {}", elevation);
    }

    assert_eq!(history.len(), cases.len());
}

#[test]
fn test_history_export_after_predictions() {
    let (pipeline, _dir) = load_pipeline(common::standard_classes());
    let mut history = PredictionHistory::new();

    for elevation in [1800, 2600] {
        let input = TerrainInput {
            elevation,
            ..Default::default()
        };
        pipeline.predict(&input, &mut history).unwrap();
    }

    let csv = HistoryExporter::to_csv(&history);
    assert_eq!(
        csv,
        "Elevation,Slope,Aspect,Wilderness,Soil Type,Prediction\n\
         2600,15,90,0,0,Spruce/Fir\n\
         1800,15,90,0,0,Ponderosa Pine\n"
    );

    history.clear();
    assert_eq!(
        HistoryExporter::to_csv(&history),
        "Elevation,Slope,Aspect,Wilderness,Soil Type,Prediction\n"
    );
}

#[test]
fn test_unknown_class_from_artifact() {
    let (pipeline, _dir) = load_pipeline(vec![8]);
    let mut history = PredictionHistory::new();

    let err = pipeline
        .predict(&TerrainInput::default(), &mut history)
        .unwrap_err();

    assert!(matches!(err, AppError::UnknownClass(8)));
    assert!(history.is_empty());
}
