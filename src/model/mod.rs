mod animator;
mod body;
mod clock;
mod input;
mod orbit;
mod system;

pub use animator::{SceneAnimator, SceneState};
pub use body::{Body, BodyID, BodyInfo};
pub use clock::{Clock, ManualClock, SystemClock};
pub use input::{CameraTilt, InputState, Viewport};
pub use orbit::CircularOrbit;
pub use system::StarSystem;
