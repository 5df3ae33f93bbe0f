//! Fixed-timestep scheduling for the rig.
//!
//! Button edges are sampled once per variable-rate frame; locomotion,
//! physics, and camera follow run zero or more times per frame at a fixed
//! step driven by an accumulator. Frame times are passed in explicitly so
//! the loop is deterministic under test.

use tracing::warn;
use wingrig_config::SimulationConfig;

/// Durations visible to a single fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTiming {
    /// Duration of the fixed simulation step.
    pub fixed_dt: f32,
    /// Duration of the most recent variable-rate frame.
    pub frame_dt: f32,
}

impl StepTiming {
    /// Timing where the frame and fixed step coincide.
    pub fn uniform(dt: f32) -> Self {
        Self {
            fixed_dt: dt,
            frame_dt: dt,
        }
    }
}

/// Fixed-timestep accumulator.
#[derive(Debug, Clone)]
pub struct FixedStepLoop {
    fixed_dt: f64,
    max_frame_time: f64,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl FixedStepLoop {
    /// Creates a loop from the simulation config.
    ///
    /// A step that is not positive and finite would never drain the
    /// accumulator; it is replaced by the default step.
    pub fn new(config: &SimulationConfig) -> Self {
        let mut fixed_dt = config.fixed_dt;
        if !(fixed_dt.is_finite() && fixed_dt > 0.0) {
            let fallback = SimulationConfig::default().fixed_dt;
            warn!("Fixed step {fixed_dt}s is unusable, falling back to {fallback}s");
            fixed_dt = fallback;
        }
        Self {
            fixed_dt: f64::from(fixed_dt),
            max_frame_time: f64::from(config.max_frame_time),
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Fixed step duration in seconds.
    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt as f32
    }

    /// Runs one frame: clamps `frame_time`, then calls `update_fn(fixed_dt)`
    /// once per whole fixed step that fits into the accumulator.
    ///
    /// Returns the number of fixed steps run.
    pub fn tick(&mut self, frame_time: f64, mut update_fn: impl FnMut(f32)) -> u32 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > self.max_frame_time {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                self.max_frame_time * 1000.0
            );
            frame_time = self.max_frame_time;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= self.fixed_dt {
            update_fn(self.fixed_dt as f32);
            self.total_sim_time += self.fixed_dt;
            self.accumulator -= self.fixed_dt;
            self.update_count += 1;
            steps += 1;
        }

        self.frame_count += 1;
        steps
    }

    /// Fraction of a fixed step left in the accumulator, in `[0, 1)`.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / self.fixed_dt
        } else {
            0.0
        }
    }

    /// Total number of frames ticked.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Total number of fixed steps executed.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Total simulated time in seconds.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}
