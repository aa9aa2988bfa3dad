//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! once per frame, applying `time_scale` to the provided delta.

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds, and count the frame.
///
/// `dt` is expected to be the unscaled frame delta in seconds. Negative
/// deltas are treated as zero.
pub fn update_world_time(wt: &mut WorldTime, dt: f32) {
    wt.real_delta = dt.max(0.0);
    let scaled_dt = wt.real_delta * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}
