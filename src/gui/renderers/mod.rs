use kiss3d::camera::Camera;
use kiss3d::renderer::{LineRenderer, Renderer};
use nalgebra::Point3;

use self::utils::{circle_xz, draw_path};

mod utils;

const ORBIT_SEGMENTS: usize = 128;

/// Everything drawn as lines: orbit paths and the reference grid. Lines are
/// queued each frame and flushed by the render pass.
pub struct CompoundRenderer {
    line_renderer: LineRenderer,
}

impl CompoundRenderer {
    pub fn new() -> Self {
        CompoundRenderer {
            line_renderer: LineRenderer::new(),
        }
    }

    /// Square grid in the orbital (xz) plane, centered on the origin.
    pub fn draw_grid(&mut self, num_squares: i32, square_size: f32) {
        let color = Point3::new(0.25, 0.25, 0.25);
        let max_coord = square_size * (num_squares as f32);
        for i in (-num_squares)..(num_squares + 1) {
            let coord = square_size * (i as f32);
            // along x
            self.line_renderer.draw_line(
                Point3::new(-max_coord, 0.0, coord),
                Point3::new(max_coord, 0.0, coord),
                color,
            );
            // along z
            self.line_renderer.draw_line(
                Point3::new(coord, 0.0, -max_coord),
                Point3::new(coord, 0.0, max_coord),
                color,
            );
        }
    }

    /// Circular orbit path around `center`, in world space.
    pub fn draw_orbit(&mut self, center: Point3<f32>, radius: f32, color: Point3<f32>) {
        draw_path(
            &mut self.line_renderer,
            circle_xz(center, radius, ORBIT_SEGMENTS),
            &color,
        );
    }
}

impl Renderer for CompoundRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        self.line_renderer.render(pass, camera);
    }
}
