use crate::models::TerrainInput;
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Number of continuous terrain measurements
pub const CONTINUOUS_FEATURES: usize = 10;

/// Number of wilderness area designations
pub const WILDERNESS_AREAS: usize = 4;

/// Number of soil types
pub const SOIL_TYPES: usize = 40;

/// Width of the assembled feature vector
pub const FEATURE_COUNT: usize = CONTINUOUS_FEATURES + WILDERNESS_AREAS + SOIL_TYPES;

/// Column names of the continuous block, in model order
pub const CONTINUOUS_FEATURE_NAMES: [&str; CONTINUOUS_FEATURES] = [
    "Elevation",
    "Aspect",
    "Slope",
    "Horizontal_Distance_To_Hydrology",
    "Vertical_Distance_To_Hydrology",
    "Horizontal_Distance_To_Roadways",
    "Hillshade_9am",
    "Hillshade_Noon",
    "Hillshade_3pm",
    "Horizontal_Distance_To_Fire_Points",
];

/// Raw (unscaled) model input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(&self.values[..])
    }
}

/// One-hot encode `index` over `width` slots.
///
/// An index outside `0..width` yields all zeros; callers validate ranges first.
pub fn one_hot(index: usize, width: usize) -> Vec<f64> {
    (0..width)
        .map(|i| if i == index { 1.0 } else { 0.0 })
        .collect()
}

/// Builds the fixed-order feature vector the scaler and classifier were fit on:
/// the ten continuous measurements, then wilderness one-hot (4), then soil one-hot (40).
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureAssembler;

impl FeatureAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Assemble a validated input into its feature vector
    pub fn assemble(&self, input: &TerrainInput) -> FeatureVector {
        debug_assert!((input.wilderness_area as usize) < WILDERNESS_AREAS);
        debug_assert!((input.soil_type as usize) < SOIL_TYPES);

        let mut values = Vec::with_capacity(FEATURE_COUNT);
        values.extend_from_slice(&input.continuous());
        values.extend(one_hot(input.wilderness_area as usize, WILDERNESS_AREAS));
        values.extend(one_hot(input.soil_type as usize, SOIL_TYPES));

        FeatureVector::from_vec(values)
    }

    /// Column names matching [`FeatureAssembler::assemble`] output
    pub fn feature_names() -> Vec<String> {
        CONTINUOUS_FEATURE_NAMES
            .iter()
            .map(|name| name.to_string())
            .chain((1..=WILDERNESS_AREAS).map(|i| format!("Wilderness_Area{}", i)))
            .chain((1..=SOIL_TYPES).map(|i| format!("Soil_Type{}", i)))
            .collect()
    }
}
