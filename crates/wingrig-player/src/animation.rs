//! Typed parameter schema shared with the motion-clip engine.
//!
//! The locomotion controller writes [`AnimParams`] and sets one-shot
//! [`AnimTrigger`]s; a [`MotionClips`] implementation reads them once per
//! fixed step and answers with root motion and clip events.

use glam::{Quat, Vec3};
use tracing::trace;

use crate::orientation;

/// One-shot triggers consumed by the clip engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimTrigger {
    InitializeFly,
    Land,
    Idle1,
    Idle2,
    Idle3,
}

impl AnimTrigger {
    /// All triggers.
    pub const ALL: [AnimTrigger; 5] = [
        AnimTrigger::InitializeFly,
        AnimTrigger::Land,
        AnimTrigger::Idle1,
        AnimTrigger::Idle2,
        AnimTrigger::Idle3,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Set of pending triggers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimTriggers {
    pending: [bool; AnimTrigger::ALL.len()],
}

impl AnimTriggers {
    pub fn set(&mut self, trigger: AnimTrigger) {
        self.pending[trigger.index()] = true;
    }

    pub fn reset(&mut self, trigger: AnimTrigger) {
        self.pending[trigger.index()] = false;
    }

    pub fn is_set(&self, trigger: AnimTrigger) -> bool {
        self.pending[trigger.index()]
    }

    /// Clear `trigger`, returning whether it was set.
    pub fn consume(&mut self, trigger: AnimTrigger) -> bool {
        std::mem::replace(&mut self.pending[trigger.index()], false)
    }
}

/// Parameters the clip engine blends on.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimParams {
    /// Result of the last ground ray cast.
    pub is_grounded: bool,
    /// Mirrors the flying locomotion state.
    pub flying: bool,
    /// Automatic landing is armed.
    pub can_land: bool,
    /// Forward speed in `[0, 1]`.
    pub forward: f32,
    /// Dive/climb stick value while flying.
    pub flying_dive: f32,
}

/// Per-step displacement produced by the playing clips.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RootMotion {
    /// World-space translation over the step.
    pub delta_position: Vec3,
    /// Angular velocity in radians per second.
    pub angular_velocity: Vec3,
}

/// Events raised by clips at authored points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipEvent {
    /// The launch clip reached its apex.
    LaunchApex,
    /// The collider may be restored.
    EnableCollider,
    /// The character may now land automatically.
    LandingArmed,
    /// The landing clip finished.
    LandingComplete,
}

/// Output of one clip evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipFrame {
    pub root_motion: RootMotion,
    pub events: Vec<ClipEvent>,
}

/// The motion-clip engine.
pub trait MotionClips {
    /// Advance playback by `dt`, consuming any triggers the clips react to.
    fn evaluate(
        &mut self,
        params: &AnimParams,
        triggers: &mut AnimTriggers,
        facing: Quat,
        dt: f32,
    ) -> ClipFrame;
}

/// Deterministic clip engine with fixed timings.
///
/// Walking moves along the flattened facing at `walk_speed * forward`. The
/// launch clip climbs for `launch_duration` and then raises
/// [`ClipEvent::LaunchApex`] followed by [`ClipEvent::EnableCollider`].
/// After `landing_arm_delay` seconds of flight it raises
/// [`ClipEvent::LandingArmed`] once. A consumed `Land` trigger completes as
/// soon as the character is grounded.
#[derive(Debug, Clone)]
pub struct ProceduralClips {
    /// Ground speed at full forward input.
    pub walk_speed: f32,
    /// Length of the launch clip in seconds.
    pub launch_duration: f32,
    /// Upward root motion speed during the launch clip.
    pub launch_climb_speed: f32,
    /// Flight time before automatic landing is armed.
    pub landing_arm_delay: f32,
    launch_elapsed: Option<f32>,
    flight_elapsed: f32,
    landing_armed_sent: bool,
    landing: bool,
    last_idle: Option<AnimTrigger>,
}

impl Default for ProceduralClips {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            launch_duration: 0.6,
            launch_climb_speed: 2.0,
            landing_arm_delay: 1.0,
            launch_elapsed: None,
            flight_elapsed: 0.0,
            landing_armed_sent: false,
            landing: false,
            last_idle: None,
        }
    }
}

impl ProceduralClips {
    /// Whether the launch clip is playing.
    pub fn launching(&self) -> bool {
        self.launch_elapsed.is_some()
    }

    /// Whether the landing clip is playing.
    pub fn landing(&self) -> bool {
        self.landing
    }

    /// Most recent idle flourish started.
    pub fn last_idle(&self) -> Option<AnimTrigger> {
        self.last_idle
    }
}

impl MotionClips for ProceduralClips {
    fn evaluate(
        &mut self,
        params: &AnimParams,
        triggers: &mut AnimTriggers,
        facing: Quat,
        dt: f32,
    ) -> ClipFrame {
        let mut frame = ClipFrame::default();

        if triggers.consume(AnimTrigger::InitializeFly) {
            self.launch_elapsed = Some(0.0);
            self.landing = false;
        }
        if triggers.consume(AnimTrigger::Land) {
            self.launch_elapsed = None;
            self.landing = true;
        }
        for idle in [AnimTrigger::Idle1, AnimTrigger::Idle2, AnimTrigger::Idle3] {
            if triggers.consume(idle) {
                self.last_idle = Some(idle);
            }
        }

        let walk = orientation::flatten(orientation::forward(facing)).normalize_or_zero()
            * params.forward
            * self.walk_speed
            * dt;

        if let Some(elapsed) = self.launch_elapsed {
            frame.root_motion.delta_position = walk + Vec3::Y * self.launch_climb_speed * dt;
            let elapsed = elapsed + dt;
            if elapsed >= self.launch_duration {
                self.launch_elapsed = None;
                frame.events.push(ClipEvent::LaunchApex);
                frame.events.push(ClipEvent::EnableCollider);
            } else {
                self.launch_elapsed = Some(elapsed);
            }
        } else if params.is_grounded && !params.flying {
            frame.root_motion.delta_position = walk;
        }

        if params.flying {
            self.flight_elapsed += dt;
            if !params.can_land
                && !self.landing_armed_sent
                && self.flight_elapsed >= self.landing_arm_delay
            {
                self.landing_armed_sent = true;
                frame.events.push(ClipEvent::LandingArmed);
            }
        } else {
            self.flight_elapsed = 0.0;
            self.landing_armed_sent = false;
        }

        if self.landing && params.is_grounded {
            self.landing = false;
            frame.events.push(ClipEvent::LandingComplete);
        }

        if !frame.events.is_empty() {
            trace!(events = ?frame.events, "clip events");
        }
        frame
    }
}
