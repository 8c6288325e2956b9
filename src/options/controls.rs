use std::f64::consts::FRAC_PI_2;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What a mouse button does when pressed on the surface.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum MouseAction {
    /// Drag tilts the camera.
    Rotate,
    /// Drag moves the camera towards or away from the target.
    Dolly,
    /// The button is ignored.
    None,
}

/// Mouse button assignments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct MouseBindings {
    /// Action for the primary button.
    pub left: MouseAction,
}

impl Default for MouseBindings {
    fn default() -> Self {
        Self {
            left: MouseAction::Rotate,
        }
    }
}

/// Physical key names (winit `KeyCode` debug format) the controller
/// responds to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct ControlKeys {
    /// Orbit left.
    pub left: String,
    /// Zoom in.
    pub up: String,
    /// Orbit right.
    pub right: String,
    /// Zoom out.
    pub bottom: String,
}

impl Default for ControlKeys {
    fn default() -> Self {
        Self {
            left: "ArrowLeft".into(),
            up: "ArrowUp".into(),
            right: "ArrowRight".into(),
            bottom: "ArrowDown".into(),
        }
    }
}

/// Orbit-controller tunables.
///
/// The controller reads these fresh on every call, so they may be edited
/// between frames. Ranges are not validated: `min_* <= max_*` and a
/// positive distance range are the caller's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ControlOptions {
    /// Master switch for all input handling.
    pub enabled: bool,
    /// Point the camera orbits around.
    pub target: [f64; 3],
    /// Closest allowed distance to the target.
    #[schemars(skip)]
    pub min_distance: f64,
    /// Farthest allowed distance to the target.
    #[schemars(skip)]
    pub max_distance: f64,
    /// Lower polar limit in radians (0 = looking straight down).
    #[schemars(title = "Min Polar Angle", range(min = 0.0, max = 3.14159), extend("step" = 0.01))]
    pub min_polar_angle: f64,
    /// Upper polar limit in radians.
    #[schemars(title = "Max Polar Angle", range(min = 0.0, max = 3.14159), extend("step" = 0.01))]
    pub max_polar_angle: f64,
    /// Lower azimuth limit in radians. Unbounded by default.
    #[schemars(skip)]
    pub min_azimuth_angle: f64,
    /// Upper azimuth limit in radians. Unbounded by default.
    #[schemars(skip)]
    pub max_azimuth_angle: f64,
    /// Allow wheel and drag dollying.
    pub enable_zoom: bool,
    /// Exponent applied to the 0.95 per-step zoom factor.
    #[schemars(title = "Zoom Speed", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub zoom_speed: f64,
    /// Allow drag rotation.
    pub enable_rotate: bool,
    /// Radians per key press, and the drag sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub rotate_speed: f64,
    /// Allow arrow-key orbit and zoom.
    pub enable_keys: bool,
    /// Allow target panning.
    pub enable_pan: bool,
    /// Key assignments.
    #[schemars(skip)]
    pub keys: ControlKeys,
    /// Mouse button assignments.
    #[schemars(skip)]
    pub mouse_buttons: MouseBindings,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            target: [0.0; 3],
            min_distance: 0.0,
            max_distance: f64::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: FRAC_PI_2,
            min_azimuth_angle: f64::NEG_INFINITY,
            max_azimuth_angle: f64::INFINITY,
            enable_zoom: false,
            zoom_speed: 1.0,
            enable_rotate: true,
            rotate_speed: 0.1,
            enable_keys: true,
            enable_pan: false,
            keys: ControlKeys::default(),
            mouse_buttons: MouseBindings::default(),
        }
    }
}

impl ControlOptions {
    /// Per-step dolly factor derived from [`zoom_speed`](Self::zoom_speed).
    /// Repeated steps compound geometrically.
    #[must_use]
    pub fn zoom_scale(&self) -> f64 {
        0.95_f64.powf(self.zoom_speed)
    }
}
