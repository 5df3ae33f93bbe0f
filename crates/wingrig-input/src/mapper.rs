//! Turns raw stick and button input into movement and camera intents.
//!
//! Movement input passes through a first-order low-pass filter (a fixed
//! blend per fixed step, not time-scaled) and is then expressed in the
//! camera's ground-plane frame. Look input is forwarded unfiltered. Button
//! edges are polled on the variable-rate pass so a press between two fixed
//! steps is never dropped.

use glam::{Vec2, Vec3};
use tracing::trace;
use wingrig_config::InputConfig;

use crate::deadzone::apply_deadzone_vec2;
use crate::source::{InputAxis, InputButton, InputSource};

/// Camera axes that define the movement frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    /// World-space camera forward.
    pub forward: Vec3,
    /// World-space camera right.
    pub right: Vec3,
}

/// World-space movement request for one fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementIntent {
    /// Ground-plane direction; magnitude carries stick deflection and may be
    /// below 1 when the camera is steeply pitched.
    pub direction: Vec3,
    /// The filtered stick value the direction was built from.
    pub smoothed: Vec2,
}

/// Camera rotation request for one fixed step, in stick units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LookIntent {
    /// Horizontal orbit input.
    pub yaw: f32,
    /// Vertical tilt input.
    pub pitch: f32,
}

/// Remove the component of `v` along the unit vector `normal`.
///
/// The result is not renormalized.
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    v - normal * v.dot(normal)
}

/// Stateful input-to-intent mapping.
///
/// Raw axes are clamped to `[-1, 1]`. Deadzone shaping belongs to the
/// device that produced them.
#[derive(Debug, Clone)]
pub struct InputMapper {
    smoothed: Vec2,
    smoothing: f32,
    invert_pitch: bool,
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new(&InputConfig::default())
    }
}

impl InputMapper {
    /// Create a mapper with a zeroed smoothing accumulator.
    pub fn new(config: &InputConfig) -> Self {
        Self {
            smoothed: Vec2::ZERO,
            smoothing: config.smoothing,
            invert_pitch: config.invert_pitch,
        }
    }

    /// Current value of the smoothing accumulator.
    pub fn smoothed(&self) -> Vec2 {
        self.smoothed
    }

    /// Buttons pressed this frame, in [`InputButton::ALL`] order.
    pub fn poll_buttons(&self, source: &impl InputSource) -> Vec<InputButton> {
        InputButton::ALL
            .into_iter()
            .filter(|button| source.button_down(*button))
            .collect()
    }

    /// Filter one raw movement sample and project it into the camera frame.
    pub fn map_movement(&mut self, raw: Vec2, basis: CameraBasis) -> MovementIntent {
        let raw = apply_deadzone_vec2(raw, 0.0);
        self.smoothed = self.smoothed.lerp(raw, self.smoothing);

        let forward = project_on_plane(basis.forward, Vec3::Y);
        let right = project_on_plane(basis.right, Vec3::Y);
        let direction = forward * self.smoothed.y + right * self.smoothed.x;

        MovementIntent {
            direction,
            smoothed: self.smoothed,
        }
    }

    /// Shape a raw look sample. No filtering is applied.
    pub fn map_look(&self, raw: Vec2) -> LookIntent {
        let raw = apply_deadzone_vec2(raw, 0.0);
        let pitch = if self.invert_pitch { -raw.y } else { raw.y };
        LookIntent { yaw: raw.x, pitch }
    }

    /// Sample both sticks from `source` for one fixed step.
    pub fn fixed_update(
        &mut self,
        source: &impl InputSource,
        basis: CameraBasis,
    ) -> (MovementIntent, LookIntent) {
        let movement_raw = Vec2::new(
            source.axis(InputAxis::MoveHorizontal),
            source.axis(InputAxis::MoveVertical),
        );
        let look_raw = Vec2::new(
            source.axis(InputAxis::CameraYaw),
            source.axis(InputAxis::CameraPitch),
        );

        let movement = self.map_movement(movement_raw, basis);
        let look = self.map_look(look_raw);
        trace!(
            smoothed = ?movement.smoothed,
            direction = ?movement.direction,
            "mapped movement input"
        );
        (movement, look)
    }
}
