//! Lagging follow camera with free orbit around the followed character.
//!
//! The rig keeps the world-space offset between camera and target captured
//! at construction and chases `target - offset` with an exponential lag.
//! Orbit input rotates the camera in place; the follow offset is not
//! rotated with it.

use glam::{EulerRot, Quat, Vec3};
use tracing::{debug, trace};
use wingrig_config::CameraConfig;
use wingrig_input::CameraBasis;

use crate::orientation;
use crate::step_loop::StepTiming;

/// One-way notifications from the locomotion controller to the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraSignal {
    /// Flight started (`true`) or ended (`false`).
    FlyMode(bool),
    /// Current `dot(forward, down)` of the flying character.
    FlightDescent(f32),
}

/// Follow/orbit camera state.
#[derive(Debug, Clone)]
pub struct CameraRig {
    position: Vec3,
    rotation: Quat,
    base_offset: Vec3,
    fly_mode: bool,
    fly_direction_height_offset: f32,
    vertical_look: f32,
    config: CameraConfig,
}

impl CameraRig {
    /// Create a rig at `position`/`rotation`, capturing the follow offset
    /// from the current target position. The offset never changes after
    /// this.
    pub fn new(config: CameraConfig, position: Vec3, rotation: Quat, target: Vec3) -> Self {
        Self {
            position,
            rotation: rotation.normalize(),
            base_offset: target - position,
            fly_mode: false,
            fly_direction_height_offset: 0.0,
            vertical_look: 0.0,
            config,
        }
    }

    /// Camera world position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Camera orientation.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// `target - camera` captured at construction.
    pub fn base_offset(&self) -> Vec3 {
        self.base_offset
    }

    /// Whether the flight follow profile is active.
    pub fn fly_mode(&self) -> bool {
        self.fly_mode
    }

    /// Accumulated vertical look in degrees; positive looks down.
    pub fn vertical_look(&self) -> f32 {
        self.vertical_look
    }

    /// Height bias set by the last [`CameraSignal::FlightDescent`].
    pub fn fly_direction_height_offset(&self) -> f32 {
        self.fly_direction_height_offset
    }

    /// Movement frame for the input mapper.
    pub fn basis(&self) -> CameraBasis {
        CameraBasis {
            forward: orientation::forward(self.rotation),
            right: orientation::right(self.rotation),
        }
    }

    pub fn set_fly_mode(&mut self, fly_mode: bool) {
        if self.fly_mode != fly_mode {
            debug!(fly_mode, "camera follow profile changed");
        }
        self.fly_mode = fly_mode;
    }

    /// Apply a notification from the locomotion controller.
    pub fn apply_signal(&mut self, signal: CameraSignal) {
        match signal {
            CameraSignal::FlyMode(on) => self.set_fly_mode(on),
            CameraSignal::FlightDescent(height_strength) => {
                self.fly_direction_height_offset =
                    -height_strength * self.config.fly_direction_height_scale;
            }
        }
    }

    /// Vertical bias added to the follow target.
    pub fn height_offset(&self) -> f32 {
        if self.fly_mode {
            self.config.fly_height_bias + self.fly_direction_height_offset
        } else {
            0.0
        }
    }

    /// Where the camera wants to be for a target at `target`.
    pub fn desired_position(&self, target: Vec3) -> Vec3 {
        target - self.base_offset + Vec3::Y * self.height_offset()
    }

    /// Chase the follow point by one fixed step.
    ///
    /// The step is `delta * speed * dt` with no clamp, so a large
    /// `speed * dt` overshoots. Within the snap epsilon the camera lands
    /// exactly on the follow point.
    pub fn follow_update(&mut self, target: Vec3, fixed_dt: f32) {
        let desired = self.desired_position(target);
        let speed = if self.fly_mode {
            self.config.fly_follow_speed
        } else {
            self.config.follow_speed
        };

        let delta = desired - self.position;
        if delta.length_squared() > self.config.snap_epsilon_sq {
            self.position += delta * speed * fixed_dt;
        } else {
            self.position = desired;
        }
        trace!(position = ?self.position, ?desired, "camera follow");
    }

    /// Orbit horizontally. Positive `yaw` input turns right.
    ///
    /// Roll is forced back to zero afterwards.
    pub fn rotate(&mut self, yaw: f32, fixed_dt: f32) {
        let degrees = yaw * self.config.rotation_speed * fixed_dt;
        let turned = self.rotation * Quat::from_rotation_y(-degrees.to_radians());
        let (y, x, _) = turned.to_euler(EulerRot::YXZ);
        self.rotation = Quat::from_euler(EulerRot::YXZ, y, x, 0.0);
    }

    /// Tilt vertically. Positive `pitch` input looks down.
    ///
    /// The accumulator advances with the frame duration while the rotation
    /// advances with the fixed step. An increment that would take the
    /// accumulator to or past the pitch limit is dropped whole, rotation
    /// included.
    pub fn rotate_vertical(&mut self, pitch: f32, timing: StepTiming) {
        let limit = self.config.pitch_limit_deg;
        let next = self.vertical_look + pitch * self.config.rotation_speed * timing.frame_dt;
        if next >= limit || next <= -limit {
            trace!(next, limit, "vertical look increment skipped");
            return;
        }
        self.vertical_look = next;

        let degrees = pitch * self.config.rotation_speed * timing.fixed_dt;
        self.rotation = (self.rotation * Quat::from_rotation_x(-degrees.to_radians())).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig_at(position: Vec3, target: Vec3) -> CameraRig {
        CameraRig::new(CameraConfig::default(), position, Quat::IDENTITY, target)
    }

    #[test]
    fn test_base_offset_captured_once() {
        let mut rig = rig_at(Vec3::new(0.0, 2.0, 5.0), Vec3::ZERO);
        assert_eq!(rig.base_offset(), Vec3::new(0.0, -2.0, -5.0));
        rig.follow_update(Vec3::new(10.0, 0.0, 0.0), 0.02);
        assert_eq!(rig.base_offset(), Vec3::new(0.0, -2.0, -5.0));
    }

    #[test]
    fn test_follow_lags_with_ground_speed() {
        let mut rig = rig_at(Vec3::ZERO, Vec3::ZERO);
        rig.follow_update(Vec3::new(1.0, 0.0, 0.0), 0.02);
        // 1.0 * 4 * 0.02
        assert!((rig.position().x - 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_follow_uses_fly_speed_and_height() {
        let mut rig = rig_at(Vec3::ZERO, Vec3::ZERO);
        rig.apply_signal(CameraSignal::FlyMode(true));
        rig.apply_signal(CameraSignal::FlightDescent(0.5));
        // -1.25 + (-0.5 * 1.5)
        assert!((rig.height_offset() + 2.0).abs() < 1e-6);
        rig.follow_update(Vec3::ZERO, 0.1);
        // delta.y = -2, speed 5, dt 0.1
        assert!((rig.position().y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_height_offset_is_zero_on_ground() {
        let mut rig = rig_at(Vec3::ZERO, Vec3::ZERO);
        rig.apply_signal(CameraSignal::FlightDescent(1.0));
        assert_eq!(rig.height_offset(), 0.0);
    }

    #[test]
    fn test_follow_snaps_within_epsilon() {
        let mut rig = rig_at(Vec3::ZERO, Vec3::ZERO);
        rig.follow_update(Vec3::new(0.005, 0.0, 0.0), 0.02);
        assert_eq!(rig.position(), Vec3::new(0.005, 0.0, 0.0));
    }

    #[test]
    fn test_follow_overshoots_with_large_step() {
        let mut rig = rig_at(Vec3::ZERO, Vec3::ZERO);
        rig.follow_update(Vec3::new(1.0, 0.0, 0.0), 0.5);
        // 4 * 0.5 = 2 times the delta
        assert!((rig.position().x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_turns_right_and_keeps_roll_zero() {
        let mut rig = rig_at(Vec3::ZERO, Vec3::ZERO);
        rig.rotate_vertical(1.0, StepTiming::uniform(0.1));
        for _ in 0..20 {
            rig.rotate(1.0, 0.02);
            assert!(orientation::roll_degrees(rig.rotation()).abs() < 1e-3);
        }
        assert!(rig.basis().forward.x > 0.0);
    }

    #[test]
    fn test_rotate_vertical_looks_down() {
        let mut rig = rig_at(Vec3::ZERO, Vec3::ZERO);
        rig.rotate_vertical(1.0, StepTiming::uniform(0.02));
        assert!((rig.vertical_look() - 2.4).abs() < 1e-4);
        assert!(rig.basis().forward.y < 0.0);
    }

    #[test]
    fn test_vertical_look_counts_frame_time_but_turns_by_fixed_step() {
        let mut rig = rig_at(Vec3::ZERO, Vec3::ZERO);
        rig.rotate_vertical(
            1.0,
            StepTiming {
                fixed_dt: 0.02,
                frame_dt: 0.05,
            },
        );
        // 120°/s over the 0.05s frame
        assert_eq!(rig.vertical_look(), 6.0);
        // 120°/s over the 0.02s step
        let below_horizon = (-rig.basis().forward.y).asin().to_degrees();
        assert!((below_horizon - 2.4).abs() < 1e-4, "pitched {below_horizon}°");
    }

    #[test]
    fn test_vertical_look_stays_in_band() {
        let mut rig = rig_at(Vec3::ZERO, Vec3::ZERO);
        let timing = StepTiming {
            fixed_dt: 0.02,
            frame_dt: 0.05,
        };
        for _ in 0..200 {
            rig.rotate_vertical(1.0, timing);
            assert!(rig.vertical_look() < 70.0);
        }
        let held = rig.rotation();
        rig.rotate_vertical(1.0, timing);
        assert_eq!(rig.rotation(), held);

        for _ in 0..400 {
            rig.rotate_vertical(-1.0, timing);
            assert!(rig.vertical_look() > -70.0);
        }
    }
}
