/// Platform-agnostic input events.
///
/// These are fed into an [`OrbitController`](crate::camera::OrbitController)
/// (usually through [`FarmApp::handle_input`](crate::app::FarmApp::handle_input)),
/// which turns them into queued camera deltas.
///
/// # Example
///
/// ```
/// use farmstead::{InputEvent, MouseButton};
///
/// let down = InputEvent::PointerDown {
///     button: MouseButton::Left,
///     x: 100.0,
///     y: 200.0,
/// };
/// let key = InputEvent::KeyDown { key: "ArrowUp".into() };
/// assert_ne!(down, key);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button pressed over the surface.
    PointerDown {
        /// Which button went down.
        button: MouseButton,
        /// Horizontal position in pixels.
        x: f64,
        /// Vertical position in pixels.
        y: f64,
    },
    /// Cursor moved to absolute screen position.
    PointerMove {
        /// Horizontal position in pixels.
        x: f64,
        /// Vertical position in pixels.
        y: f64,
    },
    /// Mouse button released.
    PointerUp {
        /// Which button was released.
        button: MouseButton,
    },
    /// Scroll wheel. Negative scrolls away from the user (zoom in).
    Wheel {
        /// Scroll amount.
        delta: f64,
    },
    /// Key pressed.
    KeyDown {
        /// Physical key name in `winit::keyboard::KeyCode` debug format:
        /// `"ArrowUp"`, `"KeyD"`, `"Escape"`, etc.
        key: String,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}
