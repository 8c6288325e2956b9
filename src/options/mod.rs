//! Centralized camera/control/scene options with TOML preset support.
//!
//! All tweakable settings (camera projection, orbit-control limits, lighting,
//! scene assembly, keybindings) are consolidated here. Options serialize
//! to/from TOML so a session can be started from a preset file.

mod camera;
mod controls;
mod keybindings;
mod lighting;
mod scene;

use std::path::Path;

pub use camera::CameraOptions;
pub use controls::{ControlKeys, ControlOptions, MouseAction, MouseBindings};
pub use keybindings::KeybindingOptions;
pub use lighting::LightingOptions;
pub use scene::SceneOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::FarmsteadError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[controls]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and starting pose.
    pub camera: CameraOptions,
    /// Orbit-controller limits, speeds and switches.
    pub controls: ControlOptions,
    /// Day/night lighting parameters.
    pub lighting: LightingOptions,
    /// Scene assembly parameters.
    pub scene: SceneOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the editable options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, FarmsteadError> {
        let content =
            std::fs::read_to_string(path).map_err(FarmsteadError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| FarmsteadError::OptionsParse(e.to_string()))?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), FarmsteadError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FarmsteadError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(FarmsteadError::Io)?;
        }
        std::fs::write(path, content).map_err(FarmsteadError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
