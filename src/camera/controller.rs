//! Orbit controller: keeps a camera circling a target point.
//!
//! Input and scripted calls only *queue* rotation, zoom and pan deltas.
//! [`OrbitController::update`] resolves them once per frame: the camera
//! offset is converted to spherical coordinates in a Y-up working frame,
//! the deltas are applied and clamped, and the camera is moved back and
//! re-aimed at the target. A [`ControlEvent::Change`] fires only when the
//! resulting pose moved by more than a small epsilon.

use std::f64::consts::TAU;

use glam::{DQuat, DVec2, DVec3};

use super::core::OrbitCamera;
use super::events::{ControlEvent, EventDispatcher, ListenerId};
use super::spherical::Spherical;
use crate::input::{InputEvent, InputSurface, Listener, MouseButton};
use crate::options::{ControlOptions, MouseAction};

/// Threshold for squared displacement and the small-angle rotation measure.
const CHANGE_EPS: f64 = 1e-6;

/// Whether a pointer drag is in progress, and what it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlState {
    /// No drag.
    #[default]
    None,
    /// Dragging tilts the camera.
    Rotate,
    /// Dragging moves the camera along the view direction.
    Dolly,
}

/// Pending rotation queued since the last update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct SphericalDelta {
    theta: f64,
    phi: f64,
}

/// Camera step bound to one of the control keys.
#[derive(Debug, Clone, Copy)]
enum KeyStep {
    DollyOut,
    DollyIn,
    OrbitLeft,
    OrbitRight,
}

/// Start/end of the current drag in screen space.
#[derive(Debug, Clone, Copy, Default)]
struct DragTrack {
    start: DVec2,
    end: DVec2,
    delta: DVec2,
}

/// Orbit-control state machine.
///
/// Owns the camera it drives and the surface it listens on for as long as
/// it is registered; [`dispose`](Self::dispose) hands both back.
///
/// Preconditions (not checked): `min_polar_angle <= max_polar_angle`,
/// `min_azimuth_angle <= max_azimuth_angle`,
/// `0 <= min_distance <= max_distance`, and a camera positioned away from
/// the target.
pub struct OrbitController<C: OrbitCamera, S: InputSurface> {
    camera: C,
    surface: S,
    /// Tunables, read fresh on every call.
    pub controls: ControlOptions,
    /// Point the camera orbits around.
    pub target: DVec3,

    target0: DVec3,
    position0: DVec3,
    zoom0: f64,

    // camera.up → +Y, fixed for the controller's lifetime
    quat: DQuat,
    quat_inverse: DQuat,

    spherical: Spherical,
    spherical_delta: SphericalDelta,
    scale: f64,
    pan_offset: DVec3,

    last_position: DVec3,
    last_quaternion: DQuat,

    state: ControlState,
    rotate: DragTrack,
    dolly: DragTrack,

    events: EventDispatcher,
}

impl<C: OrbitCamera, S: InputSurface> OrbitController<C, S> {
    /// Take over `camera` and `surface`, register input listeners, and run
    /// one [`update`](Self::update) so the camera already agrees with the
    /// spherical state before the first frame.
    pub fn new(camera: C, surface: S, controls: ControlOptions) -> Self {
        let quat = DQuat::from_rotation_arc(camera.up().normalize(), DVec3::Y);
        let target = DVec3::from_array(controls.target);
        let position0 = camera.position();
        let zoom0 = camera.zoom();

        let mut controller = Self {
            camera,
            surface,
            controls,
            target,
            target0: target,
            position0,
            zoom0,
            quat,
            quat_inverse: quat.inverse(),
            spherical: Spherical::default(),
            spherical_delta: SphericalDelta::default(),
            scale: 1.0,
            pan_offset: DVec3::ZERO,
            last_position: DVec3::ZERO,
            last_quaternion: DQuat::IDENTITY,
            state: ControlState::None,
            rotate: DragTrack::default(),
            dolly: DragTrack::default(),
            events: EventDispatcher::new(),
        };

        controller.surface.attach(Listener::PointerDown);
        controller.surface.attach(Listener::Wheel);
        controller.surface.attach(Listener::KeyDown);

        let _ = controller.update();
        controller
    }

    // ── Accessors ──────────────────────────────────────────────────────

    /// The driven camera.
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Mutable access to the camera, e.g. to change its aspect ratio.
    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    /// The input surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, e.g. to resize it.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Current drag state.
    pub fn state(&self) -> ControlState {
        self.state
    }

    /// Polar angle resolved by the last update.
    pub fn polar_angle(&self) -> f64 {
        self.spherical.phi
    }

    /// Azimuthal angle resolved by the last update.
    pub fn azimuthal_angle(&self) -> f64 {
        self.spherical.theta
    }

    /// Distance to the target resolved by the last update.
    pub fn distance(&self) -> f64 {
        self.spherical.radius
    }

    /// Subscribe to start/end/change notifications.
    pub fn add_event_listener(
        &mut self,
        kind: ControlEvent,
        callback: impl FnMut(ControlEvent) + 'static,
    ) -> ListenerId {
        self.events.add_event_listener(kind, callback)
    }

    /// Unsubscribe a notification listener.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.events.remove_event_listener(id)
    }

    // ── Queued motion ──────────────────────────────────────────────────

    /// Queue an azimuthal rotation of `angle` radians.
    pub fn rotate_left(&mut self, angle: f64) {
        self.spherical_delta.theta -= angle;
    }

    /// Queue a polar rotation of `angle` radians.
    pub fn rotate_up(&mut self, angle: f64) {
        self.spherical_delta.phi -= angle;
    }

    /// Queue a dolly by dividing the zoom accumulator. `dolly_scale > 0`.
    pub fn dolly_in(&mut self, dolly_scale: f64) {
        self.scale /= dolly_scale;
    }

    /// Queue a dolly by multiplying the zoom accumulator. `dolly_scale > 0`.
    pub fn dolly_out(&mut self, dolly_scale: f64) {
        self.scale *= dolly_scale;
    }

    /// Queue a world-space move of the target. Ignored unless panning is
    /// enabled.
    pub fn pan(&mut self, offset: DVec3) {
        if self.controls.enable_pan {
            self.pan_offset += offset;
        }
    }

    // ── Resolution ─────────────────────────────────────────────────────

    /// Apply all queued deltas to the camera.
    ///
    /// Returns `true` (and dispatches [`ControlEvent::Change`]) when the
    /// zoom accumulator was in use or the camera moved or turned by more
    /// than a small epsilon since the last recorded change.
    pub fn update(&mut self) -> bool {
        let c = &self.controls;

        let mut offset = self.camera.position() - self.target;
        // rotate offset to "y-axis-is-up" space
        offset = self.quat * offset;

        self.spherical.set_from_vec3(offset);
        self.spherical.theta += self.spherical_delta.theta;
        self.spherical.phi += self.spherical_delta.phi;

        // max-then-min so an infinite bound never produces NaN
        self.spherical.theta = self
            .spherical
            .theta
            .min(c.max_azimuth_angle)
            .max(c.min_azimuth_angle);
        self.spherical.phi = self
            .spherical
            .phi
            .min(c.max_polar_angle)
            .max(c.min_polar_angle);
        self.spherical.make_safe();

        self.spherical.radius *= self.scale;
        self.spherical.radius = self
            .spherical
            .radius
            .min(c.max_distance)
            .max(c.min_distance);

        self.target += self.pan_offset;

        offset = self.quat_inverse * self.spherical.to_vec3();
        self.camera.set_position(self.target + offset);
        self.camera.look_at(self.target);

        let zoom_changed = self.scale != 1.0;
        self.spherical_delta = SphericalDelta::default();
        self.pan_offset = DVec3::ZERO;
        self.scale = 1.0;

        let position = self.camera.position();
        let orientation = self.camera.orientation();
        // small-angle approximation: cos(x/2) = 1 - x^2/8
        // q and -q are the same rotation, hence the abs
        let turned = 8.0 * (1.0 - self.last_quaternion.dot(orientation).abs());

        if zoom_changed
            || self.last_position.distance_squared(position) > CHANGE_EPS
            || turned > CHANGE_EPS
        {
            log::trace!(
                "camera changed: position={position:?} phi={:.4} theta={:.4}",
                self.spherical.phi,
                self.spherical.theta
            );
            self.events.dispatch(ControlEvent::Change);
            self.last_position = position;
            self.last_quaternion = orientation;
            return true;
        }

        false
    }

    /// Record the current target, camera position and zoom as the home
    /// state restored by [`reset`](Self::reset).
    pub fn save_state(&mut self) {
        self.target0 = self.target;
        self.position0 = self.camera.position();
        self.zoom0 = self.camera.zoom();
    }

    /// Restore the home state and end any drag in progress. A drag cut
    /// short here still dispatches its `End`.
    pub fn reset(&mut self) {
        self.target = self.target0;
        self.camera.set_position(self.position0);
        self.camera.set_zoom(self.zoom0);

        self.camera.update_projection_matrix();
        self.events.dispatch(ControlEvent::Change);

        let _ = self.update();

        if self.state != ControlState::None {
            log::debug!("drag end (reset)");
            self.events.dispatch(ControlEvent::End);
        }
        self.end_drag();
    }

    /// Detach every listener and hand back the camera and surface.
    ///
    /// Consuming the controller means no event can reach it afterwards.
    pub fn dispose(mut self) -> (C, S) {
        for listener in Listener::ALL {
            self.surface.detach(listener);
        }
        log::debug!("orbit controller disposed");
        (self.camera, self.surface)
    }

    // ── Input ──────────────────────────────────────────────────────────

    /// Feed one input event. Events whose listener is not attached on the
    /// surface are dropped.
    ///
    /// Returns `true` when the event was consumed and the host's default
    /// handling (scrolling, key repeat actions) should be suppressed.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        if !self.surface.is_attached(Listener::for_event(event)) {
            return false;
        }

        match event {
            InputEvent::PointerDown { button, x, y } => {
                self.on_pointer_down(*button, DVec2::new(*x, *y))
            }
            InputEvent::PointerMove { x, y } => {
                self.on_pointer_move(DVec2::new(*x, *y))
            }
            InputEvent::PointerUp { .. } => self.on_pointer_up(),
            InputEvent::Wheel { delta } => self.on_wheel(*delta),
            InputEvent::KeyDown { key } => self.on_key_down(key),
        }
    }

    fn on_pointer_down(&mut self, button: MouseButton, pos: DVec2) -> bool {
        if !self.controls.enabled {
            return false;
        }

        self.surface.focus();

        if button == MouseButton::Left {
            match self.controls.mouse_buttons.left {
                MouseAction::Rotate => {
                    if !self.controls.enable_rotate {
                        return true;
                    }
                    self.rotate.start = pos;
                    self.state = ControlState::Rotate;
                }
                MouseAction::Dolly => {
                    if !self.controls.enable_zoom {
                        return true;
                    }
                    self.dolly.start = pos;
                    self.state = ControlState::Dolly;
                }
                MouseAction::None => self.state = ControlState::None,
            }
        }

        if self.state != ControlState::None {
            self.surface.attach(Listener::PointerMove);
            self.surface.attach(Listener::PointerUp);
            log::debug!("drag start: {:?}", self.state);
            self.events.dispatch(ControlEvent::Start);
        }

        true
    }

    fn on_pointer_move(&mut self, pos: DVec2) -> bool {
        if !self.controls.enabled {
            return false;
        }

        match self.state {
            ControlState::Rotate => {
                if self.controls.enable_rotate {
                    self.drag_rotate(pos);
                }
            }
            ControlState::Dolly => {
                if self.controls.enable_zoom {
                    self.drag_dolly(pos);
                }
            }
            ControlState::None => {}
        }

        true
    }

    fn on_pointer_up(&mut self) -> bool {
        if !self.controls.enabled {
            return false;
        }

        self.end_drag();
        log::debug!("drag end");
        self.events.dispatch(ControlEvent::End);
        true
    }

    fn on_wheel(&mut self, delta: f64) -> bool {
        if !self.controls.enabled
            || !self.controls.enable_zoom
            || self.state == ControlState::Dolly
        {
            return false;
        }

        self.events.dispatch(ControlEvent::Start);
        let zoom_scale = self.controls.zoom_scale();
        if delta < 0.0 {
            self.dolly_out(zoom_scale);
        } else if delta > 0.0 {
            self.dolly_in(zoom_scale);
        }
        let _ = self.update();
        self.events.dispatch(ControlEvent::End);
        true
    }

    fn on_key_down(&mut self, key: &str) -> bool {
        if !self.controls.enabled || !self.controls.enable_keys {
            return false;
        }

        let keys = &self.controls.keys;
        let step = if key == keys.up {
            KeyStep::DollyOut
        } else if key == keys.bottom {
            KeyStep::DollyIn
        } else if key == keys.left {
            KeyStep::OrbitLeft
        } else if key == keys.right {
            KeyStep::OrbitRight
        } else {
            return false;
        };

        let zoom_scale = self.controls.zoom_scale();
        let rotate_speed = self.controls.rotate_speed;
        match step {
            KeyStep::DollyOut => self.dolly_out(zoom_scale),
            KeyStep::DollyIn => self.dolly_in(zoom_scale),
            KeyStep::OrbitLeft => self.rotate_left(rotate_speed),
            KeyStep::OrbitRight => self.rotate_left(-rotate_speed),
        }

        let _ = self.update();
        true
    }

    /// Vertical drag tilts the camera; horizontal motion is tracked but not
    /// mapped to an orbit in this configuration.
    fn drag_rotate(&mut self, pos: DVec2) {
        self.rotate.end = pos;
        self.rotate.delta =
            (self.rotate.end - self.rotate.start) * self.controls.rotate_speed;

        let height = self.surface.client_height().max(1.0);
        self.rotate_up(TAU * self.rotate.delta.y / height);

        self.rotate.start = self.rotate.end;
        let _ = self.update();
    }

    fn drag_dolly(&mut self, pos: DVec2) {
        self.dolly.end = pos;
        self.dolly.delta = self.dolly.end - self.dolly.start;

        let zoom_scale = self.controls.zoom_scale();
        if self.dolly.delta.y > 0.0 {
            self.dolly_in(zoom_scale);
        } else if self.dolly.delta.y < 0.0 {
            self.dolly_out(zoom_scale);
        }

        self.dolly.start = self.dolly.end;
        let _ = self.update();
    }

    fn end_drag(&mut self) {
        self.surface.detach(Listener::PointerMove);
        self.surface.detach(Listener::PointerUp);
        self.state = ControlState::None;
    }
}

impl<C, S> std::fmt::Debug for OrbitController<C, S>
where
    C: OrbitCamera + std::fmt::Debug,
    S: InputSurface + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrbitController")
            .field("camera", &self.camera)
            .field("surface", &self.surface)
            .field("target", &self.target)
            .field("spherical", &self.spherical)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::Cell,
        f64::consts::{FRAC_PI_2, PI},
        rc::Rc,
    };

    use super::*;
    use crate::camera::core::PerspectiveCamera;
    use crate::camera::spherical::EPS;
    use crate::input::Viewport;

    type Controller = OrbitController<PerspectiveCamera, Viewport>;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    fn assert_vec_close(a: DVec3, b: DVec3) {
        assert!((a - b).length() < 1e-9, "{a:?} != {b:?}");
    }

    fn camera_at(position: DVec3) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(35.0, 1.5, 0.1, 1_000_000.0);
        camera.position = position;
        camera
    }

    fn controller_with(controls: ControlOptions) -> Controller {
        OrbitController::new(
            camera_at(DVec3::new(0.0, 0.0, 100.0)),
            Viewport::new(800.0, 600.0),
            controls,
        )
    }

    fn controller() -> Controller {
        controller_with(ControlOptions::default())
    }

    fn counter(c: &mut Controller, kind: ControlEvent) -> Rc<Cell<u32>> {
        let hits = Rc::new(Cell::new(0));
        let sink = Rc::clone(&hits);
        let _ = c.add_event_listener(kind, move |_| sink.set(sink.get() + 1));
        hits
    }

    fn key(name: &str) -> InputEvent {
        InputEvent::KeyDown { key: name.into() }
    }

    fn press(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerDown {
            button: MouseButton::Left,
            x,
            y,
        }
    }

    #[test]
    fn construction_reads_initial_spherical_state() {
        let c = controller();
        assert_close(c.distance(), 100.0);
        assert_close(c.polar_angle(), FRAC_PI_2);
        assert_close(c.azimuthal_angle(), 0.0);
        assert_vec_close(c.camera().position, DVec3::new(0.0, 0.0, 100.0));
        assert_vec_close(c.camera().forward(), DVec3::NEG_Z);
    }

    #[test]
    fn construction_registers_listeners() {
        let c = controller();
        let surface = c.surface();
        assert!(surface.is_attached(Listener::PointerDown));
        assert!(surface.is_attached(Listener::KeyDown));
        assert!(surface.is_attached(Listener::Wheel));
        assert!(!surface.is_attached(Listener::PointerMove));
        assert!(!surface.is_attached(Listener::PointerUp));
    }

    #[test]
    fn opening_orbit_applies_requested_deltas() {
        let mut c = controller();
        let phi0 = c.polar_angle();
        let theta0 = c.azimuthal_angle();

        c.rotate_up(0.075);
        c.rotate_left(0.15);
        assert!(c.update());

        assert_close(c.polar_angle(), phi0 - 0.075);
        assert_close(c.azimuthal_angle(), theta0 - 0.15);
        assert_close(c.distance(), 100.0);
    }

    #[test]
    fn settled_update_is_silent() {
        let mut c = controller();
        let changes = counter(&mut c, ControlEvent::Change);

        c.rotate_left(0.2);
        assert!(c.update());
        assert!(!c.update());
        assert!(!c.update());
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn rotation_deltas_accumulate_linearly() {
        let mut split = controller();
        split.rotate_left(0.1);
        split.rotate_left(0.25);
        split.rotate_up(0.05);
        split.rotate_up(0.1);
        let _ = split.update();

        let mut single = controller();
        single.rotate_left(0.35);
        single.rotate_up(0.15);
        let _ = single.update();

        assert_vec_close(split.camera().position, single.camera().position);
    }

    #[test]
    fn dolly_composes_multiplicatively() {
        let mut split = controller();
        split.dolly_in(0.9);
        split.dolly_in(0.8);
        let _ = split.update();

        let mut single = controller();
        single.dolly_in(0.9 * 0.8);
        let _ = single.update();

        assert_close(split.distance(), single.distance());
        assert_close(single.distance(), 100.0 / 0.72);

        let mut out = controller();
        out.dolly_out(0.5);
        let _ = out.update();
        assert_close(out.distance(), 50.0);
    }

    #[test]
    fn update_clears_pending_deltas() {
        let mut c = controller_with(ControlOptions {
            enable_pan: true,
            ..ControlOptions::default()
        });
        c.rotate_left(1.0);
        c.rotate_up(-3.0);
        c.dolly_out(0.3);
        c.pan(DVec3::X);
        let _ = c.update();

        assert_eq!(c.spherical_delta, SphericalDelta::default());
        assert_eq!(c.scale, 1.0);
        assert_eq!(c.pan_offset, DVec3::ZERO);
    }

    #[test]
    fn polar_angle_stops_at_the_horizon() {
        let mut c = controller();
        c.rotate_up(-10.0);
        let _ = c.update();
        assert_close(c.polar_angle(), FRAC_PI_2);
        assert!(c.camera().position.y >= -1e-9);
    }

    #[test]
    fn polar_angle_never_reaches_the_pole() {
        let mut c = controller();
        c.rotate_up(10.0);
        let _ = c.update();
        assert!(c.polar_angle() > 0.0);
        assert_close(c.polar_angle(), EPS);
        assert!(c.camera().orientation.is_finite());

        let mut full = controller_with(ControlOptions {
            max_polar_angle: PI,
            ..ControlOptions::default()
        });
        full.rotate_up(-10.0);
        let _ = full.update();
        assert!(full.polar_angle() < PI);
    }

    #[test]
    fn azimuth_and_distance_limits_clamp() {
        let mut c = controller_with(ControlOptions {
            min_azimuth_angle: -0.1,
            max_azimuth_angle: 0.1,
            min_distance: 50.0,
            max_distance: 150.0,
            ..ControlOptions::default()
        });
        c.rotate_left(1.0);
        c.dolly_out(0.1);
        let _ = c.update();
        assert_close(c.azimuthal_angle(), -0.1);
        assert_close(c.distance(), 50.0);

        c.rotate_left(-5.0);
        c.dolly_in(0.1);
        let _ = c.update();
        assert_close(c.azimuthal_angle(), 0.1);
        assert_close(c.distance(), 150.0);
    }

    #[test]
    fn custom_up_vector_orbits_around_it() {
        let mut camera = camera_at(DVec3::new(100.0, 0.0, 0.0));
        camera.up = DVec3::Z;
        let mut c = OrbitController::new(
            camera,
            Viewport::new(800.0, 600.0),
            ControlOptions {
                max_polar_angle: PI,
                ..ControlOptions::default()
            },
        );
        assert_vec_close(c.camera().position, DVec3::new(100.0, 0.0, 0.0));

        c.rotate_left(0.5);
        assert!(c.update());
        let p = c.camera().position;
        assert!(p.z.abs() < 1e-9);
        assert_close(p.length(), 100.0);
        assert!((p - DVec3::new(100.0, 0.0, 0.0)).length() > 1.0);
    }

    #[test]
    fn pan_moves_target_only_when_enabled() {
        let mut locked = controller();
        locked.pan(DVec3::new(5.0, 0.0, 0.0));
        let _ = locked.update();
        assert_vec_close(locked.target, DVec3::ZERO);

        let mut c = controller_with(ControlOptions {
            enable_pan: true,
            ..ControlOptions::default()
        });
        c.pan(DVec3::new(5.0, 0.0, 0.0));
        assert!(c.update());
        assert_vec_close(c.target, DVec3::new(5.0, 0.0, 0.0));
        assert_vec_close(c.camera().position, DVec3::new(5.0, 0.0, 100.0));
    }

    #[test]
    fn reset_restores_saved_state() {
        let mut c = controller();
        c.rotate_left(0.4);
        c.rotate_up(0.2);
        c.dolly_out(0.8);
        let _ = c.update();
        c.save_state();
        let saved_position = c.camera().position;
        let saved_target = c.target;

        c.rotate_left(-1.0);
        c.dolly_in(0.5);
        let _ = c.update();
        assert!((c.camera().position - saved_position).length() > 1.0);

        let changes = counter(&mut c, ControlEvent::Change);
        c.reset();
        assert_vec_close(c.camera().position, saved_position);
        assert_vec_close(c.target, saved_target);
        assert_eq!(c.camera().zoom, 1.0);
        assert_eq!(c.state(), ControlState::None);
        assert!(changes.get() >= 1);
    }

    #[test]
    fn reset_without_save_returns_home() {
        let mut c = controller();
        c.rotate_left(2.0);
        let _ = c.update();
        c.reset();
        assert_vec_close(c.camera().position, DVec3::new(0.0, 0.0, 100.0));
    }

    #[test]
    fn reset_mid_drag_closes_the_drag() {
        let mut c = controller();
        let starts = counter(&mut c, ControlEvent::Start);
        let ends = counter(&mut c, ControlEvent::End);

        let _ = c.handle_event(&press(10.0, 10.0));
        assert_eq!(c.state(), ControlState::Rotate);
        c.reset();
        assert_eq!((starts.get(), ends.get()), (1, 1));
        assert_eq!(c.state(), ControlState::None);
        assert!(!c.surface().is_attached(Listener::PointerUp));

        // the release has nothing left to end
        assert!(!c.handle_event(&InputEvent::PointerUp {
            button: MouseButton::Left
        }));
        assert_eq!(ends.get(), 1);

        // resetting outside a drag sends no End
        c.reset();
        assert_eq!((starts.get(), ends.get()), (1, 1));
    }

    #[test]
    fn update_round_trips_with_tilted_up_and_offset_target() {
        let start = DVec3::new(40.0, 25.0, 60.0);
        let target = DVec3::new(5.0, -3.0, 2.0);
        let mut camera = camera_at(start);
        camera.up = DVec3::new(0.3, 0.2, 1.0);
        let mut c = OrbitController::new(
            camera,
            Viewport::new(800.0, 600.0),
            ControlOptions {
                target: target.to_array(),
                max_polar_angle: PI,
                ..ControlOptions::default()
            },
        );

        assert_vec_close(c.camera().position, start);
        let radius = c.distance();
        let phi = c.polar_angle();
        let theta = c.azimuthal_angle();
        assert_close(radius, (start - target).length());

        for _ in 0..5 {
            assert!(!c.update());
        }
        assert_close(c.distance(), radius);
        assert_close(c.polar_angle(), phi);
        assert_close(c.azimuthal_angle(), theta);
        assert_vec_close(c.camera().position, start);
    }

    #[test]
    fn zoom_against_distance_limit_still_reports_change() {
        let mut c = controller_with(ControlOptions {
            max_distance: 100.0,
            ..ControlOptions::default()
        });
        let position = c.camera().position;

        c.dolly_in(0.5);
        assert!(c.update());
        assert_close(c.distance(), 100.0);
        assert_vec_close(c.camera().position, position);
        assert!(!c.update());
    }

    #[test]
    fn arrow_keys_orbit_and_zoom() {
        let mut c = controller();

        assert!(c.handle_event(&key("ArrowLeft")));
        assert_close(c.azimuthal_angle(), -0.1);
        assert!(c.handle_event(&key("ArrowRight")));
        assert_close(c.azimuthal_angle(), 0.0);

        assert!(c.handle_event(&key("ArrowUp")));
        assert_close(c.distance(), 95.0);
        assert!(c.handle_event(&key("ArrowDown")));
        assert_close(c.distance(), 100.0);

        assert!(!c.handle_event(&key("KeyQ")));
    }

    #[test]
    fn keyboard_zoom_ignores_enable_zoom() {
        let mut c = controller();
        assert!(!c.controls.enable_zoom);
        assert!(c.handle_event(&key("ArrowUp")));
        assert!(c.distance() < 100.0);
    }

    #[test]
    fn keys_respect_enable_flags() {
        let mut c = controller_with(ControlOptions {
            enable_keys: false,
            ..ControlOptions::default()
        });
        assert!(!c.handle_event(&key("ArrowLeft")));
        assert_close(c.azimuthal_angle(), 0.0);

        c.controls.enable_keys = true;
        c.controls.enabled = false;
        assert!(!c.handle_event(&key("ArrowLeft")));
        assert_close(c.azimuthal_angle(), 0.0);
    }

    #[test]
    fn rebound_keys_are_honoured() {
        let mut c = controller();
        c.controls.keys.left = "KeyJ".into();
        assert!(!c.handle_event(&key("ArrowLeft")));
        assert!(c.handle_event(&key("KeyJ")));
        assert_close(c.azimuthal_angle(), -0.1);
    }

    #[test]
    fn wheel_zoom_requires_enable_zoom() {
        let mut c = controller();
        assert!(!c.handle_event(&InputEvent::Wheel { delta: -1.0 }));
        assert_close(c.distance(), 100.0);

        c.controls.enable_zoom = true;
        let starts = counter(&mut c, ControlEvent::Start);
        let ends = counter(&mut c, ControlEvent::End);
        assert!(c.handle_event(&InputEvent::Wheel { delta: -1.0 }));
        assert_close(c.distance(), 95.0);
        assert!(c.handle_event(&InputEvent::Wheel { delta: 1.0 }));
        assert_close(c.distance(), 100.0);
        assert_eq!((starts.get(), ends.get()), (2, 2));
    }

    #[test]
    fn drag_tilts_vertically_and_updates_immediately() {
        let mut c = controller();
        let starts = counter(&mut c, ControlEvent::Start);
        let changes = counter(&mut c, ControlEvent::Change);

        assert!(c.handle_event(&press(100.0, 100.0)));
        assert_eq!(c.state(), ControlState::Rotate);
        assert!(c.surface().is_attached(Listener::PointerMove));
        assert!(c.surface().is_attached(Listener::PointerUp));
        assert!(c.surface().is_focused());
        assert_eq!(starts.get(), 1);

        // 30px down at rotate_speed 0.1 on a 600px surface
        assert!(c.handle_event(&InputEvent::PointerMove { x: 100.0, y: 130.0 }));
        assert_close(c.polar_angle(), FRAC_PI_2 - TAU * 3.0 / 600.0);
        assert_eq!(changes.get(), 1);

        // Horizontal motion alone does not orbit
        let theta = c.azimuthal_angle();
        let _ = c.handle_event(&InputEvent::PointerMove { x: 400.0, y: 130.0 });
        assert_close(c.azimuthal_angle(), theta);
    }

    #[test]
    fn pointer_up_ends_the_drag() {
        let mut c = controller();
        let ends = counter(&mut c, ControlEvent::End);

        let _ = c.handle_event(&press(0.0, 0.0));
        assert!(c.handle_event(&InputEvent::PointerUp {
            button: MouseButton::Left
        }));
        assert_eq!(c.state(), ControlState::None);
        assert!(!c.surface().is_attached(Listener::PointerMove));
        assert!(!c.surface().is_attached(Listener::PointerUp));
        assert_eq!(ends.get(), 1);

        // Moves after release are not delivered
        let phi = c.polar_angle();
        assert!(!c.handle_event(&InputEvent::PointerMove { x: 0.0, y: 300.0 }));
        assert_close(c.polar_angle(), phi);
    }

    #[test]
    fn disabled_rotation_does_not_start_a_drag() {
        let mut c = controller_with(ControlOptions {
            enable_rotate: false,
            ..ControlOptions::default()
        });
        let starts = counter(&mut c, ControlEvent::Start);
        assert!(c.handle_event(&press(0.0, 0.0)));
        assert_eq!(c.state(), ControlState::None);
        assert!(!c.surface().is_attached(Listener::PointerMove));
        assert_eq!(starts.get(), 0);
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut c = controller();
        let _ = c.handle_event(&InputEvent::PointerDown {
            button: MouseButton::Right,
            x: 0.0,
            y: 0.0,
        });
        assert_eq!(c.state(), ControlState::None);
    }

    #[test]
    fn dolly_drag_moves_along_view_axis() {
        let mut controls = ControlOptions {
            enable_zoom: true,
            ..ControlOptions::default()
        };
        controls.mouse_buttons.left = MouseAction::Dolly;
        let mut c = controller_with(controls);

        let _ = c.handle_event(&press(0.0, 0.0));
        assert_eq!(c.state(), ControlState::Dolly);
        let _ = c.handle_event(&InputEvent::PointerMove { x: 0.0, y: 10.0 });
        assert_close(c.distance(), 100.0 / 0.95);
        let _ = c.handle_event(&InputEvent::PointerMove { x: 0.0, y: 0.0 });
        assert_close(c.distance(), 100.0);
    }

    #[test]
    fn dispose_detaches_everything() {
        let mut c = controller();
        let _ = c.handle_event(&press(0.0, 0.0));
        c.rotate_left(0.3);
        let _ = c.update();
        let position = c.camera().position;

        let (camera, surface) = c.dispose();
        assert!(surface.listeners().is_empty());
        assert_vec_close(camera.position, position);
    }
}
