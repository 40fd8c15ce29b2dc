use nalgebra::{Point3, Vector3};

use super::body::BodyID;
use super::input::{CameraTilt, InputState, Viewport};
use super::system::StarSystem;

/// Everything that changes while the scene runs. Owned by whoever drives the
/// scene; the animator only ever borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    // Indexed by BodyID; offsets from each body's parent node
    local_positions: Vec<Vector3<f64>>,
    tilt: CameraTilt,
    input: InputState,
    last_frame_millis: Option<f64>,
}

impl SceneState {
    /// # Panics
    ///
    /// Panics if `id` doesn't belong to the system this state was built for.
    pub fn local_position(&self, id: BodyID) -> Vector3<f64> {
        self.local_positions[id.0]
    }

    pub fn world_position(&self, system: &StarSystem, id: BodyID) -> Point3<f64> {
        system.world_position(id, |body_id| self.local_position(body_id))
    }

    pub fn tilt(&self) -> CameraTilt {
        self.tilt
    }

    pub fn input(&self) -> InputState {
        self.input
    }

    /// Timestamp of the most recent frame update, if any has run.
    pub fn last_frame_millis(&self) -> Option<f64> {
        self.last_frame_millis
    }
}

/// Drives the scene: positions from the clock, camera tilt from the mouse.
pub struct SceneAnimator {
    system: StarSystem,
    viewport: Viewport,
    tilt_sensitivity: f64,
}

impl SceneAnimator {
    pub fn new(system: StarSystem, viewport: Viewport, tilt_sensitivity: f64) -> Self {
        SceneAnimator {
            system,
            viewport,
            tilt_sensitivity,
        }
    }

    pub fn system(&self) -> &StarSystem {
        &self.system
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// State as it is right after startup, before any frame has run: every
    /// orbiting body sits at its orbit radius along +x.
    pub fn initial_state(&self) -> SceneState {
        SceneState {
            local_positions: self
                .system
                .bodies()
                .map(|b| self.system.initial_local_position(b.id))
                .collect(),
            tilt: CameraTilt::default(),
            input: InputState::default(),
            last_frame_millis: None,
        }
    }

    /// Recomputes every body's offset from its parent. Positions depend only
    /// on `time_millis`, never on earlier frames.
    pub fn update_frame(&self, state: &mut SceneState, time_millis: f64) {
        for body in self.system.bodies() {
            state.local_positions[body.id.0] = self.system.local_position(body.id, time_millis);
        }
        state.last_frame_millis = Some(time_millis);
    }

    /// Maps a cursor position in pixels to the camera tilt. The tilt is
    /// replaced, not accumulated. Returns false if the event was dropped.
    pub fn on_mouse_move(&self, state: &mut SceneState, client_x: f64, client_y: f64) -> bool {
        let ndc = match self.viewport.normalize(client_x, client_y) {
            Some(ndc) => ndc,
            None => {
                log::trace!("Ignoring mouse move on a degenerate viewport");
                return false;
            }
        };

        state.input.mouse_ndc = ndc;
        state.tilt = CameraTilt::from_ndc(&ndc, self.tilt_sensitivity);
        log::trace!(
            "Mouse at ({:.3}, {:.3}), tilt x = {:.4}, y = {:.4}",
            ndc.x,
            ndc.y,
            state.tilt.rotation_x,
            state.tilt.rotation_y
        );
        true
    }

    pub fn reset_tilt(&self, state: &mut SceneState) {
        state.tilt = CameraTilt::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use nalgebra::Vector2;

    use crate::config::SceneConfig;

    fn animator() -> SceneAnimator {
        let config = SceneConfig::default();
        SceneAnimator::new(
            config.build_system().unwrap(),
            Viewport::new(800.0, 600.0),
            0.1,
        )
    }

    #[test]
    fn test_initial_state() {
        let animator = animator();
        let state = animator.initial_state();
        let system = animator.system();

        let earth = system.find_by_name("Earth").unwrap();
        let moon = system.find_by_name("Moon").unwrap();
        assert_eq!(state.local_position(earth), Vector3::new(10.0, 0.0, 0.0));
        assert_eq!(state.local_position(moon), Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(state.world_position(system, moon), Point3::new(12.0, 0.0, 0.0));
        assert_eq!(state.tilt(), CameraTilt::default());
        assert_eq!(state.last_frame_millis(), None);
    }

    #[test]
    fn test_update_frame_is_absolute() {
        let animator = animator();
        let moon = animator.system().find_by_name("Moon").unwrap();

        // Jumping straight to t should match stepping there frame by frame
        let mut stepped = animator.initial_state();
        for i in 0..=60 {
            animator.update_frame(&mut stepped, 1000.0 + 16.0 * i as f64);
        }
        let mut jumped = animator.initial_state();
        animator.update_frame(&mut jumped, 1960.0);

        assert_eq!(stepped, jumped);
        assert_relative_eq!(
            jumped.local_position(moon),
            Vector3::new(2.0 * 19.6_f64.cos(), 0.0, 2.0 * 19.6_f64.sin()),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_mouse_move_sets_tilt() {
        let animator = animator();
        let mut state = animator.initial_state();

        assert!(animator.on_mouse_move(&mut state, 800.0, 300.0));
        assert_relative_eq!(state.tilt().rotation_y, 0.1);
        assert_relative_eq!(state.tilt().rotation_x, 0.0);
        assert_relative_eq!(state.input().mouse_ndc, Vector2::new(1.0, 0.0));

        animator.reset_tilt(&mut state);
        assert_eq!(state.tilt(), CameraTilt::default());
    }

    #[test]
    fn test_mouse_move_degenerate_viewport() {
        let animator = SceneAnimator::new(
            SceneConfig::default().build_system().unwrap(),
            Viewport::new(0.0, 0.0),
            0.1,
        );
        let mut state = animator.initial_state();
        assert!(!animator.on_mouse_move(&mut state, 10.0, 10.0));
        assert_eq!(state.tilt(), CameraTilt::default());
        assert_eq!(state.input(), InputState::default());
    }
}
