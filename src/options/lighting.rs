use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Sun, garden-light and sky settings for day and night.
pub struct LightingOptions {
    /// Sun intensity when the scene is first built.
    #[schemars(title = "Sun", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub sun_intensity: f32,
    /// Sun intensity restored when switching to day.
    #[schemars(title = "Day Sun", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub day_sun_intensity: f32,
    /// Residual sun intensity at night.
    #[schemars(title = "Night Sun", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub night_sun_intensity: f32,
    /// Garden light intensity at night (they are off during the day).
    #[schemars(title = "Garden Lights", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub garden_light_intensity: f32,
    /// Garden light falloff distance.
    #[schemars(skip)]
    pub garden_light_distance: f32,
    /// Daytime sky color (linear RGB).
    #[schemars(skip)]
    pub day_background: [f32; 3],
    /// Nighttime sky color (linear RGB).
    #[schemars(skip)]
    pub night_background: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            sun_intensity: 0.95,
            day_sun_intensity: 1.0,
            night_sun_intensity: 0.05,
            garden_light_intensity: 1.0,
            garden_light_distance: 35.0,
            // CSS "skyblue"
            day_background: [0.529, 0.808, 0.922],
            night_background: [0.0, 0.0, 0.0],
        }
    }
}
