use kiss3d::renderer::LineRenderer;

use nalgebra::{Point3, Vector3};

pub fn path_iter_parametric<F, S>(
    f: F,
    t_start: S,
    t_end: S,
    num_segments: usize,
) -> impl Iterator<Item = Point3<f32>>
where
    F: Fn(S) -> Point3<f32>,
    S: nalgebra::RealField + simba::scalar::SupersetOf<usize> + Copy,
{
    assert!(
        num_segments >= 1,
        "Must have at least one segment, num_segments was {}",
        num_segments
    );
    let convert = nalgebra::convert::<usize, S>;
    (0..=num_segments)
        .map(move |i| convert(i) / convert(num_segments))
        // u ranges from 0 to 1 (inclusive)
        .map(move |u| t_start + u * (t_end - t_start))
        .map(f)
}

/// Closed circle in the xz-plane, starting and ending on +x.
pub fn circle_xz(
    center: Point3<f32>,
    radius: f32,
    num_segments: usize,
) -> impl Iterator<Item = Point3<f32>> {
    let f = move |theta: f32| center + radius * Vector3::new(theta.cos(), 0.0, theta.sin());
    path_iter_parametric(f, 0.0, std::f32::consts::TAU, num_segments)
}

pub fn draw_path<I: Iterator<Item = Point3<f32>>>(
    line_renderer: &mut LineRenderer,
    points: I,
    color: &Point3<f32>,
) {
    let mut prev_pt = None;
    for pt in points {
        if let Some(prev_pt) = prev_pt {
            line_renderer.draw_line(prev_pt, pt, *color);
        }
        prev_pt = Some(pt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn test_parametric_endpoints() {
        let pts: Vec<_> = path_iter_parametric(|t: f32| Point3::new(t, 2.0 * t, 0.0), 1.0, 3.0, 4)
            .collect();
        assert_eq!(pts.len(), 5);
        assert_relative_eq!(pts[0], Point3::new(1.0, 2.0, 0.0));
        assert_relative_eq!(pts[2], Point3::new(2.0, 4.0, 0.0));
        assert_relative_eq!(pts[4], Point3::new(3.0, 6.0, 0.0));
    }

    #[test]
    fn test_circle_is_closed() {
        let center = Point3::new(1.0, 0.5, -2.0);
        let pts: Vec<_> = circle_xz(center, 2.0, 64).collect();
        assert_eq!(pts.len(), 65);
        assert_relative_eq!(pts[0], pts[64], epsilon = 1e-5);
        for pt in pts.iter() {
            assert_relative_eq!((pt - center).norm(), 2.0, epsilon = 1e-5);
            assert_relative_eq!(pt.y, 0.5);
        }
    }

    #[test]
    #[should_panic]
    fn test_needs_a_segment() {
        let _ = path_iter_parametric(|t: f32| Point3::new(t, t, t), 0.0, 1.0, 0).count();
    }
}
