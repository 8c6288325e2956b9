use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Scene assembly parameters.
pub struct SceneOptions {
    /// Seed for choosing tree texture variants.
    pub texture_seed: u64,
    /// Scripted orbit applied once after the controller is created.
    pub opening_rotate_left: f64,
    /// Scripted tilt applied once after the controller is created.
    pub opening_rotate_up: f64,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            texture_seed: 7,
            opening_rotate_left: 0.15,
            opening_rotate_up: 0.075,
        }
    }
}
