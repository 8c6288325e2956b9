use glam::{DMat3, DMat4, DQuat, DVec3};

use crate::options::CameraOptions;

/// The camera surface an orbit controller drives.
///
/// Controllers never construct cameras; they read and write the pose
/// through this trait and ask for a projection refresh after zoom changes.
pub trait OrbitCamera {
    /// World-space eye position.
    fn position(&self) -> DVec3;
    /// Move the eye.
    fn set_position(&mut self, position: DVec3);
    /// Up direction. Treated as constant for a controller's lifetime.
    fn up(&self) -> DVec3;
    /// World-space orientation.
    fn orientation(&self) -> DQuat;
    /// Orient so the camera faces `target` with its current up vector.
    fn look_at(&mut self, target: DVec3);
    /// Current zoom factor (1 = no zoom).
    fn zoom(&self) -> f64;
    /// Set the zoom factor. Call
    /// [`update_projection_matrix`](Self::update_projection_matrix)
    /// afterwards.
    fn set_zoom(&mut self, zoom: f64);
    /// Recompute the cached projection.
    fn update_projection_matrix(&mut self);
}

/// Perspective camera defined by eye position, orientation, and projection
/// parameters. Looks down its local -Z axis.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Eye (camera) position in world space.
    pub position: DVec3,
    /// World-space orientation.
    pub orientation: DQuat,
    /// Up direction vector.
    pub up: DVec3,
    /// Vertical field of view in degrees.
    pub fovy: f64,
    /// Viewport aspect ratio (width / height).
    pub aspect: f64,
    /// Near clipping plane distance.
    pub znear: f64,
    /// Far clipping plane distance.
    pub zfar: f64,
    /// Zoom factor applied to the field of view.
    pub zoom: f64,
    projection: DMat4,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::from_options(&CameraOptions::default(), 1.0)
    }
}

impl PerspectiveCamera {
    /// Create a camera with the given projection parameters, placed at the
    /// origin with identity orientation.
    #[must_use]
    pub fn new(fovy: f64, aspect: f64, znear: f64, zfar: f64) -> Self {
        let mut camera = Self {
            position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
            up: DVec3::Y,
            fovy,
            aspect,
            znear,
            zfar,
            zoom: 1.0,
            projection: DMat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Build from configured options and a viewport aspect ratio.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f64) -> Self {
        let mut camera =
            Self::new(options.fovy, aspect, options.znear, options.zfar);
        camera.position = DVec3::from_array(options.position);
        camera.up = DVec3::from_array(options.up).normalize_or(DVec3::Y);
        camera
    }

    /// Vertical field of view in radians after zoom.
    #[must_use]
    pub fn effective_fovy(&self) -> f64 {
        let half = (self.fovy.to_radians() * 0.5).tan() / self.zoom;
        2.0 * half.atan()
    }

    /// World-to-view transform.
    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::from_rotation_translation(self.orientation, self.position)
            .inverse()
    }

    /// Cached projection (refresh with
    /// [`OrbitCamera::update_projection_matrix`]).
    #[must_use]
    pub fn projection_matrix(&self) -> DMat4 {
        self.projection
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> DMat4 {
        self.projection * self.view_matrix()
    }

    /// Unit viewing direction.
    #[must_use]
    pub fn forward(&self) -> DVec3 {
        self.orientation * DVec3::NEG_Z
    }

    /// Update the aspect ratio from viewport dimensions and refresh the
    /// projection.
    pub fn set_aspect(&mut self, width: f64, height: f64) {
        self.aspect = width / height.max(1.0);
        self.update_projection_matrix();
    }
}

impl OrbitCamera for PerspectiveCamera {
    fn position(&self) -> DVec3 {
        self.position
    }

    fn set_position(&mut self, position: DVec3) {
        self.position = position;
    }

    fn up(&self) -> DVec3 {
        self.up
    }

    fn orientation(&self) -> DQuat {
        self.orientation
    }

    fn look_at(&mut self, target: DVec3) {
        self.orientation = look_rotation(self.position, target, self.up);
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    fn update_projection_matrix(&mut self) {
        // perspective_rh uses the [0,1] depth range
        self.projection = DMat4::perspective_rh(
            self.effective_fovy(),
            self.aspect,
            self.znear,
            self.zfar,
        );
    }
}

/// Rotation whose +Z axis points from `target` back to `eye`, so the
/// rotated -Z looks at the target.
pub(crate) fn look_rotation(eye: DVec3, target: DVec3, up: DVec3) -> DQuat {
    let mut z = eye - target;
    if z.length_squared() == 0.0 {
        z.z = 1.0;
    }
    z = z.normalize();

    let mut x = up.cross(z);
    if x.length_squared() == 0.0 {
        // up and z are parallel; nudge z off the up axis
        if (up.z.abs() - 1.0).abs() < f64::EPSILON {
            z.x += 1e-4;
        } else {
            z.z += 1e-4;
        }
        z = z.normalize();
        x = up.cross(z);
    }
    x = x.normalize();
    let y = z.cross(x);

    DQuat::from_mat3(&DMat3::from_cols(x, y, z)).normalize()
}
