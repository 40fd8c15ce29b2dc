use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use self::controller::Controller;
use self::view::View;
use crate::config::SceneConfig;
use crate::model::{Clock, SceneAnimator, SceneState, Viewport};

mod camera;
mod controller;
mod renderers;
mod view;

/// Owns the scene state and hands it, one borrow at a time, to the input
/// handler and the per-frame update. kiss3d calls `step` once per frame on
/// the same thread that delivers events, so there's never more than one
/// writer at a time.
pub struct SolarScene {
    animator: SceneAnimator,
    state: SceneState,
    clock: Box<dyn Clock>,
    view: View,
    controller: Controller,
}

impl SolarScene {
    /// The window size is read once here; later resizes aren't tracked.
    pub fn new(
        animator: SceneAnimator,
        clock: Box<dyn Clock>,
        config: &SceneConfig,
        window: &mut Window,
    ) -> Self {
        let viewport = animator.viewport();
        let viewport_size = (viewport.width as u32, viewport.height as u32);
        let view = View::new(window, animator.system(), &config.camera, viewport_size);
        let state = animator.initial_state();

        let mut scene = SolarScene {
            animator,
            state,
            clock,
            view,
            controller: Controller::new(&config.display),
        };
        scene.view.sync(&scene.state);
        scene
    }

    /// Viewport matching a window's current size.
    pub fn viewport_of(window: &Window) -> Viewport {
        Viewport::new(window.width() as f64, window.height() as f64)
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        // Process events
        for event in events.iter() {
            self.controller
                .process_event(&event.value, &self.animator, &mut self.state);
        }
    }
}

impl State for SolarScene {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        self.view.cameras_and_effect_and_renderer()
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());
        self.animator
            .update_frame(&mut self.state, self.clock.now_millis());
        self.view.sync(&self.state);
        self.view.prerender_scene(
            window,
            self.animator.system(),
            &self.state,
            &self.controller,
        );
        self.controller.increment_frame_counter();
    }
}
