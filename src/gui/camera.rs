use std::f32::consts::PI;

use kiss3d::camera::Camera;
use kiss3d::event::{Action, Key, MouseButton, WindowEvent};
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{
    Isometry3, Matrix4, Perspective3, Point3, Translation3, UnitQuaternion, Vector2, Vector3,
};

use crate::config::CameraConfig;
use crate::math::geometry::{euler_xy_rotation, spherical_to_cartesian};
use crate::model::CameraTilt;

const KEY_CAMERA_MOVE_UP: Key = Key::W;
const KEY_CAMERA_MOVE_DOWN: Key = Key::S;
const KEY_CAMERA_MOVE_LEFT: Key = Key::A;
const KEY_CAMERA_MOVE_RIGHT: Key = Key::D;
const KEY_CAMERA_ZOOM_IN: Key = Key::Equals;
const KEY_CAMERA_ZOOM_OUT: Key = Key::Minus;
const KEY_CAMERA_RESET: Key = Key::Home;

// Camera that orbits the origin, like ArcBall. Click-and-drag adjusts the
// azimuth and polar angle, scrolling zooms in and out. Unlike ArcBall, y is
// always up, the clip planes are fixed, and there's an extra "tilt" rotation
// applied in the camera's own frame on top of the orbit pose. The tilt is set
// from outside (mouse position) and the orbit never touches it, so the two
// compose instead of fighting over the orientation.
pub struct OrbitCamera {
    // -- position --
    theta: f32,  // azimuth, from +z towards +x
    phi: f32,    // polar angle, from +y
    radius: f32, // distance from origin
    initial: (f32, f32, f32),
    // -- orientation --
    tilt: UnitQuaternion<f32>,
    // -- perspective --
    width: u32,
    height: u32,
    fovy: f32,
    znear: f32,
    zfar: f32,
    // -- other --
    last_cursor_pos: Vector2<f32>,
    // -- knobs to fiddle with --
    drag_step: f32,
    key_step: f32,
    zoom_ratio: f32,
    phi_limit: f32,
    radius_limits: (f32, f32),
}

impl OrbitCamera {
    /// Starts on the +z axis, looking at the origin. The viewport size is
    /// fixed for the camera's lifetime.
    pub fn new(config: &CameraConfig, width: u32, height: u32) -> Self {
        let radius = nalgebra::clamp(config.distance, config.min_distance, config.max_distance);
        let (theta, phi) = (0.0, PI / 2.0);

        OrbitCamera {
            theta,
            phi,
            radius,
            initial: (theta, phi, radius),
            tilt: UnitQuaternion::identity(),
            width,
            height,
            fovy: config.fovy_degrees.to_radians(),
            znear: config.znear,
            zfar: config.zfar,
            last_cursor_pos: Vector2::zeros(),
            drag_step: config.drag_step,
            key_step: config.key_step,
            zoom_ratio: config.zoom_ratio,
            phi_limit: 0.001,
            radius_limits: (config.min_distance, config.max_distance),
        }
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(
            self.width as f32 / self.height as f32,
            self.fovy,
            self.znear,
            self.zfar,
        )
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn set_tilt(&mut self, tilt: &CameraTilt) {
        self.tilt = euler_xy_rotation(tilt.rotation_x as f32, tilt.rotation_y as f32);
    }

    pub fn rotate(&mut self, dtheta: f32, dphi: f32) {
        self.theta = (self.theta + dtheta) % (2.0 * PI);
        self.phi = nalgebra::clamp(self.phi + dphi, self.phi_limit, PI - self.phi_limit);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.radius = nalgebra::clamp(
            self.radius * factor,
            self.radius_limits.0,
            self.radius_limits.1,
        );
    }

    /// Back to the starting pose. The tilt isn't touched here; the
    /// controller clears it on the same key and the next sync pushes it in.
    pub fn reset(&mut self) {
        let (theta, phi, radius) = self.initial;
        self.theta = theta;
        self.phi = phi;
        self.radius = radius;
    }
}

impl Camera for OrbitCamera {
    fn handle_event(&mut self, canvas: &Canvas, event: &WindowEvent) {
        match *event {
            WindowEvent::CursorPos(x, y, _) => {
                let curr_pos = Vector2::new(x as f32, y as f32);

                if canvas.get_mouse_button(MouseButton::Button1) == Action::Press {
                    // Rotate the opposite direction as the mouse moves (drag right == camera glides
                    // left)
                    let dpos = curr_pos - self.last_cursor_pos;
                    self.rotate(-dpos.x * self.drag_step, -dpos.y * self.drag_step);
                }

                self.last_cursor_pos = curr_pos;
            }
            WindowEvent::Scroll(_, off, _) => {
                // scroll up == zoom in
                if off < 0.0 {
                    self.zoom(self.zoom_ratio);
                } else if off > 0.0 {
                    self.zoom(self.zoom_ratio.recip())
                }
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_UP, Action::Press, _) => {
                self.rotate(0.0, -self.key_step)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_DOWN, Action::Press, _) => {
                self.rotate(0.0, self.key_step)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_LEFT, Action::Press, _) => {
                self.rotate(-self.key_step, 0.0)
            }
            WindowEvent::Key(KEY_CAMERA_MOVE_RIGHT, Action::Press, _) => {
                self.rotate(self.key_step, 0.0)
            }
            WindowEvent::Key(KEY_CAMERA_ZOOM_IN, Action::Press, _) => {
                self.zoom(self.zoom_ratio.recip())
            }
            WindowEvent::Key(KEY_CAMERA_ZOOM_OUT, Action::Press, _) => self.zoom(self.zoom_ratio),
            WindowEvent::Key(KEY_CAMERA_RESET, Action::Press, _) => self.reset(),
            _ => {}
        }
    }

    fn eye(&self) -> Point3<f32> {
        spherical_to_cartesian(self.radius, self.theta, self.phi)
    }

    fn view_transform(&self) -> Isometry3<f32> {
        let look_at = Isometry3::look_at_rh(&self.eye(), &Point3::origin(), &Vector3::y());
        // pose = look_at^-1 * tilt, so view = tilt^-1 * look_at
        Isometry3::from_parts(Translation3::identity(), self.tilt.inverse()) * look_at
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}
