use std::f64::consts::TAU;

use nalgebra::Vector3;

use crate::math::geometry::{planar_angle, wrap_angle};

/// A circular orbit in the parent's xz-plane.
///
/// The angle is an absolute function of time: at time `t` (milliseconds) the
/// body sits at angle `t * angular_rate`, measured from +x towards +z. There is
/// no accumulated phase, so two orbits evaluated at the same timestamp always
/// agree no matter how many frames came before.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularOrbit {
    radius: f64,
    // radians per millisecond
    angular_rate: f64,
}

impl CircularOrbit {
    pub fn new(radius: f64, angular_rate: f64) -> Self {
        CircularOrbit {
            radius,
            angular_rate,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn angular_rate(&self) -> f64 {
        self.angular_rate
    }

    /// Time for one full revolution, in milliseconds. None if the body doesn't
    /// move.
    pub fn period(&self) -> Option<f64> {
        if self.angular_rate == 0.0 {
            None
        } else {
            Some(TAU / self.angular_rate.abs())
        }
    }

    /// Orbital angle at the given time, in [0, 2pi).
    pub fn angle_at(&self, time_millis: f64) -> f64 {
        wrap_angle(time_millis * self.angular_rate)
    }

    /// Offset from the parent at the given time.
    pub fn position_at(&self, time_millis: f64) -> Vector3<f64> {
        // No wrapping here; cos and sin do that for us, and wrapping first
        // would just add rounding error.
        let theta = time_millis * self.angular_rate;
        Vector3::new(self.radius * theta.cos(), 0.0, self.radius * theta.sin())
    }

    /// Offset used before the first frame runs: the radius along +x.
    pub fn initial_position(&self) -> Vector3<f64> {
        Vector3::x() * self.radius
    }

    /// Inverse of `position_at`, up to a whole number of revolutions.
    pub fn angle_of(&self, offset: &Vector3<f64>) -> f64 {
        planar_angle(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_position_on_circle() {
        let orbit = CircularOrbit::new(10.0, 0.001);
        for &t in &[0.0, 1.0, 1234.5, 1.0e6, 1_700_000_000_000.0, -5000.0] {
            let p = orbit.position_at(t);
            assert_relative_eq!(p.x * p.x + p.z * p.z, 100.0, max_relative = 1e-12);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn test_quarter_turns() {
        let orbit = CircularOrbit::new(2.0, 0.01);
        let quarter = std::f64::consts::FRAC_PI_2 / 0.01;

        assert_abs_diff_eq!(orbit.position_at(0.0), Vector3::new(2.0, 0.0, 0.0));
        assert_abs_diff_eq!(
            orbit.position_at(quarter),
            Vector3::new(0.0, 0.0, 2.0),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            orbit.position_at(2.0 * quarter),
            Vector3::new(-2.0, 0.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_angle_round_trip() {
        let orbit = CircularOrbit::new(10.0, 0.001);
        let t = 4321.0;
        assert_relative_eq!(orbit.angle_at(t), 4.321, max_relative = 1e-12);
        assert_relative_eq!(
            orbit.angle_of(&orbit.position_at(t)),
            orbit.angle_at(t),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_period() {
        assert_relative_eq!(CircularOrbit::new(10.0, 0.001).period().unwrap(), TAU * 1000.0);
        assert_relative_eq!(CircularOrbit::new(1.0, -0.5).period().unwrap(), TAU * 2.0);
        assert_eq!(CircularOrbit::new(1.0, 0.0).period(), None);
    }
}
