use std::path::Path;

use kiss3d::camera::Camera;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3, Translation3, Vector3};

use super::camera::OrbitCamera;
use super::controller::Controller;
use super::renderers::CompoundRenderer;
use crate::config::CameraConfig;
use crate::model::{Body, BodyID, SceneState, StarSystem};

const GRID_SQUARES: i32 = 20;
const GRID_SQUARE_SIZE: f32 = 2.0;

/// Where a body's group node hangs in the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attachment {
    Root,
    Group(BodyID),
}

// Spheres carry their size as the node scale, and kiss3d multiplies scales
// down the tree. So each body gets an unscaled group that moves, with its
// sphere as a leaf, and children attach to the parent's group.
fn attachment(body: &Body) -> Attachment {
    match body.parent {
        Some(parent_id) => Attachment::Group(parent_id),
        None => Attachment::Root,
    }
}

pub struct View {
    // Unscaled group per body, indexed by BodyID
    body_groups: Vec<SceneNode>,
    camera: OrbitCamera,
    renderer: CompoundRenderer,
}

impl View {
    /// Builds one group and one sphere per body. A body with a parent gets
    /// its group attached under the parent's group, so it inherits the
    /// parent's motion but not its size. Everything else hangs off the root.
    pub fn new(
        window: &mut Window,
        system: &StarSystem,
        camera_config: &CameraConfig,
        viewport_size: (u32, u32),
    ) -> Self {
        let mut body_groups: Vec<SceneNode> = Vec::with_capacity(system.len());
        for body in system.bodies() {
            let mut group = match attachment(body) {
                Attachment::Group(parent_id) => body_groups[parent_id.0].add_group(),
                Attachment::Root => window.add_group(),
            };
            let mut sphere = group.add_sphere(body.info.radius);
            Self::apply_surface(&mut sphere, body);
            body_groups.push(group);
        }

        let (width, height) = viewport_size;
        View {
            body_groups,
            camera: OrbitCamera::new(camera_config, width, height),
            renderer: CompoundRenderer::new(),
        }
    }

    fn apply_surface(sphere: &mut SceneNode, body: &Body) {
        let color = &body.info.color;
        match &body.info.texture {
            Some(path) if path.is_file() => {
                log::info!("Loading texture for {}: {:?}", body.info.name, path);
                // The texture gets tinted by the node color, so keep it white
                sphere.set_color(1.0, 1.0, 1.0);
                sphere.set_texture_from_file(path, &texture_name(path));
            }
            Some(path) => {
                log::warn!(
                    "Texture for {} not found at {:?}, using flat color",
                    body.info.name,
                    path
                );
                sphere.set_color(color.x, color.y, color.z);
            }
            None => sphere.set_color(color.x, color.y, color.z),
        }
    }

    /// Pushes the latest state into the scene graph and the camera.
    pub fn sync(&mut self, state: &SceneState) {
        for (i, group) in self.body_groups.iter_mut().enumerate() {
            let position: Vector3<f32> = nalgebra::convert(state.local_position(BodyID(i)));
            group.set_local_translation(Translation3::from(position));
        }
        self.camera.set_tilt(&state.tilt());
    }

    pub fn prerender_scene(
        &mut self,
        window: &mut Window,
        system: &StarSystem,
        state: &SceneState,
        controller: &Controller,
    ) {
        if controller.show_grid() {
            self.renderer.draw_grid(GRID_SQUARES, GRID_SQUARE_SIZE);
        }
        if controller.show_orbits() {
            self.draw_orbits(system, state);
        }
        if controller.show_hud() {
            window.draw_text(
                &hud_text(state, controller.fps(), self.camera.distance()),
                &Point2::origin(),
                48.0,
                &kiss3d::text::Font::default(),
                &Point3::new(1.0, 1.0, 1.0),
            );
        }
    }

    fn draw_orbits(&mut self, system: &StarSystem, state: &SceneState) {
        for body in system.bodies() {
            let orbit = match &body.orbit {
                Some(orbit) => orbit,
                None => continue,
            };

            // The path circles the parent wherever the parent is right now
            let center = match body.parent {
                Some(parent_id) => state.world_position(system, parent_id),
                None => Point3::origin(),
            };

            // Make an okayish path color by dimming the body color
            let color = Point3::from(body.info.color.coords * 0.5);
            self.renderer
                .draw_orbit(nalgebra::convert(center), orbit.radius() as f32, color);
        }
    }

    pub fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, Some(&mut self.renderer), None)
    }
}

// Textures are cached by name, so the full path keeps them apart
fn texture_name(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn hud_text(state: &SceneState, fps: f64, camera_distance: f32) -> String {
    let tilt = state.tilt();
    format!(
        "FPS: {:.0}
Camera distance: {:.1}
Tilt: x {:+.3}, y {:+.3}",
        fps, camera_distance, tilt.rotation_x, tilt.rotation_y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::SceneConfig;
    use crate::model::{SceneAnimator, Viewport};

    #[test]
    fn test_hud_text() {
        let config = SceneConfig::default();
        let animator = SceneAnimator::new(
            config.build_system().unwrap(),
            Viewport::new(100.0, 100.0),
            0.1,
        );
        let mut state = animator.initial_state();
        animator.on_mouse_move(&mut state, 100.0, 100.0);

        let text = hud_text(&state, 59.7, 20.0);
        assert_eq!(
            text,
            "FPS: 60
Camera distance: 20.0
Tilt: x -0.100, y +0.100"
        );
    }

    #[test]
    fn test_attachment() {
        let system = SceneConfig::default().build_system().unwrap();
        let sun = system.find_by_name("Sun").unwrap();
        let earth = system.find_by_name("Earth").unwrap();
        let moon = system.find_by_name("Moon").unwrap();

        assert_eq!(attachment(system.get_body(sun)), Attachment::Root);
        assert_eq!(attachment(system.get_body(earth)), Attachment::Root);
        // The Moon rides on the Earth's group, never on the Earth's sphere
        assert_eq!(attachment(system.get_body(moon)), Attachment::Group(earth));

        // Groups are built in id order, so a parent's group always exists first
        for body in system.bodies() {
            if let Attachment::Group(parent_id) = attachment(body) {
                assert!(parent_id.0 < body.id.0);
            }
        }
    }

    #[test]
    fn test_texture_name() {
        assert_eq!(
            texture_name(Path::new("textures/earth.jpg")),
            "textures/earth.jpg"
        );
    }
}
