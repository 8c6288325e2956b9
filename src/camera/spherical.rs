use std::f64::consts::PI;

use glam::DVec3;

/// Margin kept between the polar angle and the poles.
pub const EPS: f64 = 1e-6;

/// A point in spherical coordinates around the origin, Y up.
///
/// `phi` is the polar angle measured down from +Y, `theta` the azimuth
/// around +Y measured from +Z towards +X.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Distance from the origin.
    pub radius: f64,
    /// Polar angle in radians, `0` at the zenith.
    pub phi: f64,
    /// Azimuthal angle in radians.
    pub theta: f64,
}

impl Default for Spherical {
    fn default() -> Self {
        Self {
            radius: 1.0,
            phi: 0.0,
            theta: 0.0,
        }
    }
}

impl Spherical {
    /// Create from explicit components.
    #[must_use]
    pub fn new(radius: f64, phi: f64, theta: f64) -> Self {
        Self { radius, phi, theta }
    }

    /// Convert a Cartesian offset. The zero vector maps to radius 0 with
    /// both angles 0.
    #[must_use]
    pub fn from_vec3(v: DVec3) -> Self {
        let mut s = Self::default();
        s.set_from_vec3(v);
        s
    }

    /// Overwrite all components from a Cartesian offset.
    pub fn set_from_vec3(&mut self, v: DVec3) {
        self.radius = v.length();
        if self.radius == 0.0 {
            self.theta = 0.0;
            self.phi = 0.0;
        } else {
            self.theta = v.x.atan2(v.z);
            self.phi = (v.y / self.radius).clamp(-1.0, 1.0).acos();
        }
    }

    /// Convert back to a Cartesian offset.
    #[must_use]
    pub fn to_vec3(&self) -> DVec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        DVec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Keep `phi` strictly away from the poles, where the azimuth is
    /// undefined.
    pub fn make_safe(&mut self) {
        self.phi = self.phi.clamp(EPS, PI - EPS);
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn axis_aligned_offsets() {
        let z = Spherical::from_vec3(DVec3::new(0.0, 0.0, 100.0));
        assert_close(z.radius, 100.0);
        assert_close(z.phi, FRAC_PI_2);
        assert_close(z.theta, 0.0);

        let x = Spherical::from_vec3(DVec3::X * 2.0);
        assert_close(x.theta, FRAC_PI_2);

        let up = Spherical::from_vec3(DVec3::Y * 3.0);
        assert_close(up.phi, 0.0);
    }

    #[test]
    fn zero_vector_has_zero_angles() {
        let s = Spherical::from_vec3(DVec3::ZERO);
        assert_eq!(s, Spherical::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn cartesian_round_trip() {
        for &(r, phi, theta) in &[
            (1.0, 0.3, -2.0),
            (100.0, FRAC_PI_2 - 0.075, -0.15),
            (7.5, 2.9, 3.0),
        ] {
            let s = Spherical::new(r, phi, theta);
            let back = Spherical::from_vec3(s.to_vec3());
            assert_close(back.radius, r);
            assert_close(back.phi, phi);
            assert_close(back.theta, theta);
        }
    }

    #[test]
    fn make_safe_moves_off_the_poles() {
        let mut top = Spherical::new(1.0, 0.0, 0.0);
        top.make_safe();
        assert!(top.phi > 0.0);
        assert_close(top.phi, EPS);

        let mut bottom = Spherical::new(1.0, PI, 0.0);
        bottom.make_safe();
        assert!(bottom.phi < PI);

        let mut mid = Spherical::new(1.0, 1.0, 0.0);
        mid.make_safe();
        assert_eq!(mid.phi, 1.0);
    }
}
