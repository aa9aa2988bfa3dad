//! Simulation clock.
//!
//! [`WorldTime`] is advanced once per frame by
//! [`update_world_time`](crate::systems::time::update_world_time) before any
//! state or entity is updated. `delta` is already scaled by `time_scale`, so
//! slow motion reaches every spring, timer and group uniformly.
//! `real_delta` keeps the unscaled frame time for wall-clock readouts.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub real_delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            real_delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

/// Clock handle shared with states that read it during their update.
pub type SharedClock = Rc<Cell<WorldTime>>;

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
