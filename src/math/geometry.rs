use nalgebra::{Point3, UnitQuaternion, Vector3};

use std::f64::consts::TAU;

pub fn directed_angle(u: &Vector3<f64>, v: &Vector3<f64>, up: &Vector3<f64>) -> f64 {
    // Returns the angle between u and v, measured as a positive angle around 'up'.
    let theta = u.angle(v);
    if u.cross(v).dot(up) >= 0.0 {
        theta
    } else {
        TAU - theta
    }
}

/// Angle of the xz-projection of v, measured from +x towards +z, in [0, 2pi).
/// Going from +x to +z is a positive turn around -y.
pub fn planar_angle(v: &Vector3<f64>) -> f64 {
    let flat = Vector3::new(v.x, 0.0, v.z);
    if flat.norm_squared() == 0.0 {
        return 0.0;
    }
    wrap_angle(directed_angle(&Vector3::x(), &flat, &-Vector3::y()))
}

/// Wraps an angle into [0, 2pi).
pub fn wrap_angle(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Point on a sphere around the origin, with y as the up axis.
/// theta is the azimuth measured from +z towards +x, phi is the polar angle
/// measured down from +y.
pub fn spherical_to_cartesian(radius: f32, theta: f32, phi: f32) -> Point3<f32> {
    Point3::new(
        radius * theta.sin() * phi.sin(),
        radius * phi.cos(),
        radius * theta.cos() * phi.sin(),
    )
}

/// Rotation from a pair of Euler angles applied in XYZ order (x first in the
/// matrix product, so the y rotation acts first on a vector).
pub fn euler_xy_rotation(angle_x: f32, angle_y: f32) -> UnitQuaternion<f32> {
    let rx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angle_x);
    let ry = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle_y);
    rx * ry
}
