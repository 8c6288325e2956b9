//! Application driver: wires the camera, orbit controller and farm scene
//! together, handles the app-level keys and drives frames.
//!
//! Input flows through [`FarmApp::handle_input`]: app key bindings are
//! checked first, then the event is offered to the orbit controller.
//! [`FarmApp::frame`] resolves queued camera motion and reports whether a
//! redraw is due. [`FarmApp::exit`] tears down in a fixed order, the
//! controller before the scene, after which the app ignores everything.

use std::{cell::Cell, rc::Rc};

use crate::{
    camera::{ControlEvent, OrbitController, PerspectiveCamera},
    input::{InputEvent, KeyAction, Viewport},
    options::{ControlOptions, KeybindingOptions, Options},
    scene::Scene,
    util::frame_timing::FrameTiming,
};

/// The orbit controller while running, or what it handed back on exit.
#[derive(Debug)]
enum Rig {
    Orbiting(Box<OrbitController<PerspectiveCamera, Viewport>>),
    Parked {
        camera: PerspectiveCamera,
        viewport: Viewport,
    },
}

/// The farm demo.
#[derive(Debug)]
pub struct FarmApp {
    rig: Rig,
    scene: Scene,
    keybindings: KeybindingOptions,
    /// App-level key handling, removed on exit.
    keys_attached: bool,
    animating: bool,
    /// Set by the controller's change notification, cleared each frame.
    dirty: Rc<Cell<bool>>,
    timing: FrameTiming,
    exited: bool,
}

impl FarmApp {
    /// Build the camera, controller and farm scene for a surface of
    /// `width` x `height` pixels, then apply the opening orbit.
    #[must_use]
    pub fn new(options: &Options, (width, height): (u32, u32)) -> Self {
        let width = f64::from(width.max(1));
        let height = f64::from(height.max(1));

        let camera =
            PerspectiveCamera::from_options(&options.camera, width / height);
        let mut controller = OrbitController::new(
            camera,
            Viewport::new(width, height),
            options.controls.clone(),
        );

        let dirty = Rc::new(Cell::new(true));
        let sink = Rc::clone(&dirty);
        let _ = controller
            .add_event_listener(ControlEvent::Change, move |_| sink.set(true));

        controller.rotate_left(options.scene.opening_rotate_left);
        controller.rotate_up(options.scene.opening_rotate_up);
        let _ = controller.update();

        let scene = Scene::farm(&options.scene, &options.lighting);
        log::info!("farm app ready ({width}x{height})");

        Self {
            rig: Rig::Orbiting(Box::new(controller)),
            scene,
            keybindings: options.keybindings.clone(),
            keys_attached: true,
            animating: false,
            dirty,
            timing: FrameTiming::default(),
            exited: false,
        }
    }

    // -- Input --

    /// Feed one input event. Returns `true` when the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        if self.exited {
            return false;
        }

        let mut consumed = false;
        if let InputEvent::KeyDown { key } = event {
            if self.keys_attached {
                if let Some(action) = self.keybindings.lookup(key) {
                    if action == KeyAction::Exit {
                        self.exit();
                        return true;
                    }
                    self.apply_action(action);
                    consumed = true;
                }
            }
        }

        match &mut self.rig {
            Rig::Orbiting(controller) => {
                controller.handle_event(event) || consumed
            }
            Rig::Parked { .. } => consumed,
        }
    }

    fn apply_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::ToggleAnimation => {
                self.animating = !self.animating;
                log::info!(
                    "animation {}",
                    if self.animating { "on" } else { "off" }
                );
            }
            KeyAction::DayTime => {
                if self.scene.set_day_time() {
                    self.dirty.set(true);
                }
            }
            KeyAction::NightTime => {
                if self.scene.set_night_time() {
                    self.dirty.set(true);
                }
            }
            KeyAction::Exit => self.exit(),
        }
    }

    // -- Frame loop --

    /// Run one frame: resolve queued camera motion and tick the timer.
    /// Returns whether the scene should be redrawn.
    pub fn frame(&mut self) -> bool {
        let Rig::Orbiting(controller) = &mut self.rig else {
            return false;
        };
        let _ = controller.update();
        let _ = self.timing.end_frame();
        self.dirty.replace(false) || self.animating
    }

    /// Track a surface resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (w, h) = (f64::from(width), f64::from(height));
        match &mut self.rig {
            Rig::Orbiting(controller) => {
                controller.camera_mut().set_aspect(w, h);
                controller.surface_mut().resize(w, h);
            }
            Rig::Parked { camera, viewport } => {
                camera.set_aspect(w, h);
                viewport.resize(w, h);
            }
        }
        self.dirty.set(true);
    }

    /// Stop the app: drop the app key handling, dispose the controller so
    /// no further input reaches it, then release the scene. Later calls do
    /// nothing.
    pub fn exit(&mut self) {
        if self.exited {
            return;
        }
        self.keys_attached = false;

        let placeholder = Rig::Parked {
            camera: PerspectiveCamera::default(),
            viewport: Viewport::new(1.0, 1.0),
        };
        if let Rig::Orbiting(controller) =
            std::mem::replace(&mut self.rig, placeholder)
        {
            let (camera, viewport) = controller.dispose();
            self.rig = Rig::Parked { camera, viewport };
        }

        let released = self.scene.dispose();
        self.exited = true;
        log::info!("application exited, {released} resources released");
    }

    // -- Accessors --

    /// The camera, live or parked.
    #[must_use]
    pub fn camera(&self) -> &PerspectiveCamera {
        match &self.rig {
            Rig::Orbiting(controller) => controller.camera(),
            Rig::Parked { camera, .. } => camera,
        }
    }

    /// The orbit controller, until exit.
    #[must_use]
    pub fn controller(
        &self,
    ) -> Option<&OrbitController<PerspectiveCamera, Viewport>> {
        match &self.rig {
            Rig::Orbiting(controller) => Some(controller.as_ref()),
            Rig::Parked { .. } => None,
        }
    }

    /// Mutable orbit controller, until exit.
    pub fn controller_mut(
        &mut self,
    ) -> Option<&mut OrbitController<PerspectiveCamera, Viewport>> {
        match &mut self.rig {
            Rig::Orbiting(controller) => Some(controller.as_mut()),
            Rig::Parked { .. } => None,
        }
    }

    /// Controller tunables, until exit.
    #[must_use]
    pub fn controls(&self) -> Option<&ControlOptions> {
        self.controller().map(|c| &c.controls)
    }

    /// Mutable controller tunables, until exit. Changes apply on the next
    /// event or update.
    pub fn controls_mut(&mut self) -> Option<&mut ControlOptions> {
        self.controller_mut().map(|c| &mut c.controls)
    }

    /// The farm scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Whether continuous redraw is on.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Whether [`exit`](Self::exit) has run.
    #[must_use]
    pub fn has_exited(&self) -> bool {
        self.exited
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::input::MouseButton;
    use crate::scene::TimeOfDay;

    fn app() -> FarmApp {
        FarmApp::new(&Options::default(), (800, 600))
    }

    fn key(name: &str) -> InputEvent {
        InputEvent::KeyDown { key: name.into() }
    }

    #[test]
    fn opening_orbit_is_applied() {
        let app = app();
        let controller = app.controller().unwrap();
        assert!((controller.polar_angle() - (FRAC_PI_2 - 0.075)).abs() < 1e-9);
        assert!((controller.azimuthal_angle() + 0.15).abs() < 1e-9);
        assert!((controller.distance() - 100.0).abs() < 1e-9);
        assert!((app.camera().aspect - 800.0 / 600.0).abs() < 1e-12);
    }

    #[test]
    fn frames_redraw_only_after_change() {
        let mut app = app();
        assert!(app.frame());
        assert!(!app.frame());

        assert!(app.handle_input(&key("ArrowLeft")));
        assert!(app.frame());
        assert!(!app.frame());
    }

    #[test]
    fn animation_toggle_forces_redraw() {
        let mut app = app();
        let _ = app.frame();
        assert!(app.handle_input(&key("KeyA")));
        assert!(app.is_animating());
        assert!(app.frame());
        assert!(app.frame());
        let _ = app.handle_input(&key("KeyA"));
        assert!(!app.is_animating());
    }

    #[test]
    fn day_night_keys_switch_lighting() {
        let mut app = app();
        let _ = app.frame();

        assert!(app.handle_input(&key("KeyN")));
        assert_eq!(app.scene().time_of_day(), TimeOfDay::Night);
        assert!(app.frame());

        assert!(app.handle_input(&key("KeyN")));
        assert!(!app.frame());

        let _ = app.handle_input(&key("KeyD"));
        assert_eq!(app.scene().time_of_day(), TimeOfDay::Day);
    }

    #[test]
    fn escape_exits_in_order() {
        let mut app = app();
        assert!(app.handle_input(&key("Escape")));
        assert!(app.has_exited());
        assert!(app.controller().is_none());
        assert!(app.scene().is_disposed());
        assert_eq!(app.scene().arena().live(), 0);
        assert!(!app.frame());

        // exit is idempotent and the scene is not released twice
        app.exit();
        assert!(app.scene().is_disposed());
    }

    #[test]
    fn no_controller_activity_after_exit() {
        let mut app = app();
        let position = app.camera().position;

        app.exit();
        assert!(!app.handle_input(&key("ArrowUp")));
        assert!(!app.handle_input(&InputEvent::PointerDown {
            button: MouseButton::Left,
            x: 10.0,
            y: 10.0,
        }));
        assert!(!app.handle_input(&key("KeyN")));
        assert_eq!(app.scene().time_of_day(), TimeOfDay::Day);
        assert_eq!(app.camera().position, position);
    }

    #[test]
    fn controls_can_be_changed_at_runtime() {
        let mut app = app();
        let before = app.controller().unwrap().distance();
        app.controls_mut().unwrap().enable_keys = false;
        assert!(!app.handle_input(&key("ArrowUp")));
        assert_eq!(app.controller().unwrap().distance(), before);
    }

    #[test]
    fn resize_updates_camera_and_surface() {
        let mut app = app();
        let _ = app.frame();
        app.resize(1000, 500);
        assert_eq!(app.camera().aspect, 2.0);
        let controller = app.controller().unwrap();
        assert_eq!(controller.surface().height(), 500.0);
        assert!(app.frame());
    }
}
