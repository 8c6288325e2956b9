use serde::{Deserialize, Serialize};

/// Application-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// day_time = "KeyD"
/// night_time = "KeyN"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Tear the scene down and stop the frame loop.
    Exit,
    /// Toggle continuous animation of the frame loop.
    ToggleAnimation,
    /// Switch to daytime lighting.
    DayTime,
    /// Switch to nighttime lighting.
    NightTime,
}
