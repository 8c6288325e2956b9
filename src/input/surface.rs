//! The surface that delivers input events.
//!
//! Controllers register and unregister interest per [`Listener`] kind; an
//! event only reaches a controller while its listener is attached. Drag
//! listeners (`PointerMove`, `PointerUp`) are attached only while a drag is
//! in progress, and disposing a controller detaches everything.

use super::event::InputEvent;

/// The kinds of input a controller can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    /// Button presses on the surface element.
    PointerDown,
    /// Cursor motion anywhere (active only while dragging).
    PointerMove,
    /// Button releases anywhere (active only while dragging).
    PointerUp,
    /// Scroll wheel on the surface element.
    Wheel,
    /// Key presses anywhere in the window.
    KeyDown,
}

impl Listener {
    /// Every listener kind.
    pub const ALL: [Self; 5] = [
        Self::PointerDown,
        Self::PointerMove,
        Self::PointerUp,
        Self::Wheel,
        Self::KeyDown,
    ];

    /// The listener an event is delivered through.
    #[must_use]
    pub fn for_event(event: &InputEvent) -> Self {
        match event {
            InputEvent::PointerDown { .. } => Self::PointerDown,
            InputEvent::PointerMove { .. } => Self::PointerMove,
            InputEvent::PointerUp { .. } => Self::PointerUp,
            InputEvent::Wheel { .. } => Self::Wheel,
            InputEvent::KeyDown { .. } => Self::KeyDown,
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Compact set of attached listener kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListenerSet(u8);

impl ListenerSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Add a listener kind. Returns `true` if it was not present.
    pub fn insert(&mut self, listener: Listener) -> bool {
        let added = !self.contains(listener);
        self.0 |= listener.bit();
        added
    }

    /// Remove a listener kind. Returns `true` if it was present.
    pub fn remove(&mut self, listener: Listener) -> bool {
        let present = self.contains(listener);
        self.0 &= !listener.bit();
        present
    }

    /// Whether `listener` is in the set.
    #[must_use]
    pub fn contains(self, listener: Listener) -> bool {
        self.0 & listener.bit() != 0
    }

    /// Whether no listener is attached.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// A DOM-like surface controllers register listeners on.
pub trait InputSurface {
    /// Start delivering events of this kind.
    fn attach(&mut self, listener: Listener);
    /// Stop delivering events of this kind.
    fn detach(&mut self, listener: Listener);
    /// Whether events of this kind are currently delivered.
    fn is_attached(&self, listener: Listener) -> bool;
    /// Height of the element in pixels, used to turn drags into angles.
    fn client_height(&self) -> f64;
    /// Give the surface keyboard focus. No-op by default.
    fn focus(&mut self) {}
}

/// A rectangular viewport that tracks its attached listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
    listeners: ListenerSet,
    focused: bool,
}

impl Viewport {
    /// Create a viewport of the given size in pixels (each side at least 1).
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            listeners: ListenerSet::EMPTY,
            focused: false,
        }
    }

    /// Update the size after a window resize.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Currently attached listeners.
    #[must_use]
    pub fn listeners(&self) -> ListenerSet {
        self.listeners
    }

    /// Whether [`InputSurface::focus`] has been called.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

impl InputSurface for Viewport {
    fn attach(&mut self, listener: Listener) {
        if self.listeners.insert(listener) {
            log::debug!("listener attached: {listener:?}");
        }
    }

    fn detach(&mut self, listener: Listener) {
        if self.listeners.remove(listener) {
            log::debug!("listener detached: {listener:?}");
        }
    }

    fn is_attached(&self, listener: Listener) -> bool {
        self.listeners.contains(listener)
    }

    fn client_height(&self) -> f64 {
        self.height
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listener_set_tracks_membership() {
        let mut set = ListenerSet::EMPTY;
        assert!(set.is_empty());
        assert!(set.insert(Listener::KeyDown));
        assert!(!set.insert(Listener::KeyDown));
        assert!(set.contains(Listener::KeyDown));
        assert!(!set.contains(Listener::PointerMove));
        assert!(set.remove(Listener::KeyDown));
        assert!(!set.remove(Listener::KeyDown));
        assert!(set.is_empty());
    }

    #[test]
    fn events_map_to_their_listener() {
        let ev = InputEvent::PointerUp {
            button: crate::input::MouseButton::Left,
        };
        assert_eq!(Listener::for_event(&ev), Listener::PointerUp);
        let ev = InputEvent::KeyDown { key: "KeyA".into() };
        assert_eq!(Listener::for_event(&ev), Listener::KeyDown);
    }

    #[test]
    fn viewport_never_reports_zero_height() {
        let mut viewport = Viewport::new(640.0, 0.0);
        assert_eq!(viewport.client_height(), 1.0);
        viewport.resize(1280.0, 720.0);
        assert_eq!(viewport.client_height(), 720.0);
        assert_eq!(viewport.width(), 1280.0);
    }
}
