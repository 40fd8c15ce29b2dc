use std::time::Instant;

use kiss3d::event::{Action, Key, WindowEvent};

use crate::config::DisplayConfig;
use crate::model::{SceneAnimator, SceneState};

// Key config, all in one place
const KEY_TOGGLE_ORBITS: Key = Key::O;
const KEY_TOGGLE_GRID: Key = Key::G;
const KEY_TOGGLE_HUD: Key = Key::H;
// Same key as the camera's pose reset, so one press restores the whole view
const KEY_RESET_VIEW: Key = Key::Home;

pub struct Controller {
    show_orbits: bool,
    show_grid: bool,
    show_hud: bool,
    fps_counter: FpsCounter,
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    /// Counts a frame. Returns true when a new FPS value was just computed.
    pub fn increment(&mut self) -> bool {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
            true
        } else {
            false
        }
    }
}

impl Controller {
    pub fn new(display: &DisplayConfig) -> Self {
        Controller {
            show_orbits: display.show_orbits,
            show_grid: display.show_grid,
            show_hud: display.show_hud,
            fps_counter: FpsCounter::new(1000),
        }
    }

    /// Mouse moves and view resets go to the animator; toggles stay here.
    /// Camera drags and zooms are picked up by the camera itself.
    pub fn process_event(
        &mut self,
        event: &WindowEvent,
        animator: &SceneAnimator,
        state: &mut SceneState,
    ) {
        match *event {
            WindowEvent::CursorPos(x, y, _) => {
                animator.on_mouse_move(state, x, y);
            }
            WindowEvent::Key(KEY_RESET_VIEW, Action::Press, _) => {
                animator.reset_tilt(state);
                log::debug!("View reset");
            }
            WindowEvent::Key(KEY_TOGGLE_ORBITS, Action::Press, _) => {
                self.show_orbits = !self.show_orbits;
                log::info!("Orbit paths {}", on_off(self.show_orbits));
            }
            WindowEvent::Key(KEY_TOGGLE_GRID, Action::Press, _) => {
                self.show_grid = !self.show_grid;
                log::info!("Grid {}", on_off(self.show_grid));
            }
            WindowEvent::Key(KEY_TOGGLE_HUD, Action::Press, _) => {
                self.show_hud = !self.show_hud;
            }
            _ => {}
        }
    }

    pub fn show_orbits(&self) -> bool {
        self.show_orbits
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn show_hud(&self) -> bool {
        self.show_hud
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        if self.fps_counter.increment() {
            log::debug!("{:.1} fps", self.fps_counter.value());
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
