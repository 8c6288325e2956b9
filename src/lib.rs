// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive farm-scene demo built around an orbit camera controller.
//!
//! A perspective camera circles a fixed target point. Pointer drags tilt
//! it, arrow keys orbit and zoom, and a per-frame driver resolves the
//! queued deltas into a new camera pose. The surrounding scene (barn,
//! water tower, trees, garden lights, sun, moon and stars) is described
//! by parameters and can be flipped between day and night.
//!
//! # Key entry points
//!
//! - [`camera::OrbitController`] - the orbit-control state machine
//! - [`camera::PerspectiveCamera`] - the camera it drives
//! - [`input::InputEvent`] - platform-agnostic pointer, wheel and key events
//! - [`scene::Scene`] - the farm layout with its resource arena
//! - [`app::FarmApp`] - wires everything together and drives frames
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Frame model
//!
//! Everything runs on one thread. Input events queue rotation and zoom
//! deltas on the controller; [`app::FarmApp::frame`] calls
//! [`camera::OrbitController::update`] once per displayed frame, and pointer
//! drags additionally force an immediate update so dragging feels direct.
//! Observers learn about camera movement through
//! [`camera::ControlEvent::Change`] notifications, which only fire for
//! numerically significant motion.

pub mod app;
pub mod camera;
pub mod error;
pub mod input;
pub mod options;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use app::FarmApp;
pub use camera::{
    ControlEvent, ControlState, OrbitCamera, OrbitController,
    PerspectiveCamera, Spherical,
};
pub use error::FarmsteadError;
pub use input::{InputEvent, InputSurface, MouseButton, Viewport};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
