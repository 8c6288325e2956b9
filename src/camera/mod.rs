//! Camera system for the farm scene.
//!
//! Provides a perspective camera, the spherical-coordinate helpers used to
//! orbit it, the `start`/`end`/`change` notification sink, and the orbit
//! controller that ties them to input.

/// Orbit-control state machine driving a camera around a target.
pub mod controller;
/// Core camera trait and perspective camera.
pub mod core;
/// Control notifications and their synchronous dispatcher.
pub mod events;
/// Spherical coordinates (radius, polar, azimuth).
pub mod spherical;

pub use controller::{ControlState, OrbitController};
pub use self::core::{OrbitCamera, PerspectiveCamera};
pub use events::{ControlEvent, EventDispatcher, ListenerId};
pub use spherical::Spherical;
