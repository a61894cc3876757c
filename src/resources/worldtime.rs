//! Frame timing.
//!
//! All per-tick constants (speed, impulse, gravity, tumble) are tuned for a
//! 60 Hz reference tick. Systems multiply them by [`WorldTime::tick_scale`],
//! which is exactly `1.0` when a frame lasts 1/60 s.

use bevy_ecs::prelude::Resource;

/// Duration of the reference tick in seconds.
pub const REFERENCE_TICK: f32 = 1.0 / 60.0;
/// Longest frame delta integrated in one step.
pub const MAX_FRAME_DELTA: f32 = 0.1;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    /// Number of simulation steps run so far.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    /// Record a simulation step of `dt` seconds, scaled by `time_scale`.
    pub fn step(&mut self, dt: f32) {
        self.delta = dt * self.time_scale;
        self.elapsed += self.delta;
        self.frame_count += 1;
    }

    /// Multiplier turning per-reference-tick constants into this frame's step.
    pub fn tick_scale(&self) -> f32 {
        self.delta / REFERENCE_TICK
    }
}

/// Frame-skip policy: step the simulation once every `frame_skip + 1`
/// frames.
///
/// Deltas of skipped frames are accumulated and integrated in one go on the
/// next stepped frame, so no frame is integrated twice and none is lost.
#[derive(Debug, Clone, Copy, Default)]
pub struct FramePacer {
    frame_skip: u32,
    skipped: u32,
    pending: f32,
}

impl FramePacer {
    pub fn new(frame_skip: u32) -> Self {
        Self {
            frame_skip,
            ..Self::default()
        }
    }

    /// Register a frame of `dt` seconds. Returns the delta to integrate if
    /// this frame steps the simulation.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        self.pending += dt.max(0.0);
        if self.skipped < self.frame_skip {
            self.skipped += 1;
            return None;
        }
        self.skipped = 0;
        let delta = self.pending.min(MAX_FRAME_DELTA);
        self.pending = 0.0;
        Some(delta)
    }
}
