//! Input handling: event types, listener registration, and bindable
//! application actions.

/// Platform-agnostic input events.
pub mod event;
/// Keyboard actions handled by the application rather than the camera.
pub mod keyboard;
/// Listener registration on the surface that delivers events.
pub mod surface;

pub use event::{InputEvent, MouseButton};
pub use keyboard::KeyAction;
pub use surface::{InputSurface, Listener, ListenerSet, Viewport};
