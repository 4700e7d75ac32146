use serde::{Deserialize, Serialize};
use validator::Validate;

/// Vertical distance to hydrology may be negative (below the water table)
pub const VERTICAL_DISTANCE_RANGE: (i32, i32) = (-500, 500);

/// Terrain and environmental measurements entered on the form.
///
/// The bounds here are the ones the form widgets enforce; everything
/// downstream of `validate()` assumes they hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TerrainInput {
    /// Elevation (m)
    #[validate(range(min = 0, max = 4000))]
    pub elevation: i32,

    /// Aspect (degrees azimuth)
    #[validate(range(min = 0, max = 360))]
    pub aspect: i32,

    /// Slope (degrees)
    #[validate(range(min = 0, max = 90))]
    pub slope: i32,

    #[validate(range(min = 0, max = 10000))]
    pub horizontal_distance_to_hydrology: i32,

    #[validate(range(min = -500, max = 500))]
    pub vertical_distance_to_hydrology: i32,

    #[validate(range(min = 0, max = 10000))]
    pub horizontal_distance_to_roadways: i32,

    #[validate(range(min = 0, max = 255))]
    pub hillshade_9am: i32,

    #[validate(range(min = 0, max = 255))]
    pub hillshade_noon: i32,

    #[validate(range(min = 0, max = 255))]
    pub hillshade_3pm: i32,

    #[validate(range(min = 0, max = 10000))]
    pub horizontal_distance_to_fire_points: i32,

    /// Wilderness area designation (0-3)
    #[validate(range(min = 0, max = 3))]
    pub wilderness_area: u8,

    /// Soil type (0-39)
    #[validate(range(min = 0, max = 39))]
    pub soil_type: u8,
}

impl Default for TerrainInput {
    fn default() -> Self {
        Self {
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
        }
    }
}

impl TerrainInput {
    /// Continuous measurements in model column order
    pub fn continuous(&self) -> [f64; 10] {
        [
            self.elevation as f64,
            self.aspect as f64,
            self.slope as f64,
            self.horizontal_distance_to_hydrology as f64,
            self.vertical_distance_to_hydrology as f64,
            self.horizontal_distance_to_roadways as f64,
            self.hillshade_9am as f64,
            self.hillshade_noon as f64,
            self.hillshade_3pm as f64,
            self.horizontal_distance_to_fire_points as f64,
        ]
    }
}
