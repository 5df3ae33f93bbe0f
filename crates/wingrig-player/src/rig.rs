//! The shared context that wires input, locomotion, and camera together.
//!
//! [`CharacterRig`] owns the three components and passes data between them
//! explicitly each step instead of letting them hold references to each
//! other. The body and the clip engine are borrowed per call.

use glam::{Quat, Vec3};
use tracing::trace;
use wingrig_config::RigConfig;
use wingrig_input::{InputButton, InputMapper, InputSource};

use crate::animation::MotionClips;
use crate::camera_rig::CameraRig;
use crate::error::RigError;
use crate::locomotion::{IdleVariant, LocomotionController};
use wingrig_physics::CharacterBody;
use crate::step_loop::StepTiming;

/// Assembles a [`CharacterRig`], failing loudly if anything is missing.
#[derive(Debug, Default)]
pub struct CharacterRigBuilder {
    config: Option<RigConfig>,
    camera_pose: Option<(Vec3, Quat)>,
    target: Option<Vec3>,
}

impl CharacterRigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tuning for every component.
    pub fn config(mut self, config: RigConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Initial camera position and orientation.
    pub fn camera_pose(mut self, position: Vec3, rotation: Quat) -> Self {
        self.camera_pose = Some((position, rotation));
        self
    }

    /// Position of the followed character when the rig is built. The camera
    /// keeps its offset to this point for the rig's lifetime.
    pub fn target(mut self, position: Vec3) -> Self {
        self.target = Some(position);
        self
    }

    pub fn build(self) -> Result<CharacterRig, RigError> {
        let config = self
            .config
            .ok_or(RigError::MissingCollaborator("configuration"))?;
        let (camera_position, camera_rotation) = self
            .camera_pose
            .ok_or(RigError::MissingCollaborator("camera"))?;
        let target = self
            .target
            .ok_or(RigError::MissingCollaborator("follow target"))?;
        config.validate()?;

        Ok(CharacterRig {
            mapper: InputMapper::new(&config.input),
            camera: CameraRig::new(config.camera.clone(), camera_position, camera_rotation, target),
            locomotion: LocomotionController::new(config.locomotion.clone()),
            frame_dt: config.simulation.fixed_dt,
            step: 0,
            config,
        })
    }
}

/// Input mapper, locomotion controller and camera rig driven as one unit.
#[derive(Debug, Clone)]
pub struct CharacterRig {
    config: RigConfig,
    mapper: InputMapper,
    camera: CameraRig,
    locomotion: LocomotionController,
    frame_dt: f32,
    step: u64,
}

impl CharacterRig {
    pub fn builder() -> CharacterRigBuilder {
        CharacterRigBuilder::new()
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn locomotion(&self) -> &LocomotionController {
        &self.locomotion
    }

    pub fn locomotion_mut(&mut self) -> &mut LocomotionController {
        &mut self.locomotion
    }

    pub fn mapper(&self) -> &InputMapper {
        &self.mapper
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    /// Number of fixed steps run so far.
    pub fn step_count(&self) -> u64 {
        self.step
    }

    /// Variable-rate pass: remember the frame duration and dispatch button
    /// presses so none fall between fixed steps.
    pub fn frame_update(
        &mut self,
        input: &impl InputSource,
        body: &mut impl CharacterBody,
        frame_dt: f32,
    ) {
        self.frame_dt = frame_dt;
        for button in self.mapper.poll_buttons(input) {
            match button {
                InputButton::Fly => self.locomotion.fly(body),
                InputButton::Idle1 => self.locomotion.play_idle(IdleVariant::One),
                InputButton::Idle2 => self.locomotion.play_idle(IdleVariant::Two),
            }
        }
        self.deliver_camera_signals();
    }

    /// One fixed simulation step.
    pub fn fixed_update(
        &mut self,
        input: &impl InputSource,
        body: &mut impl CharacterBody,
        clips: &mut impl MotionClips,
        dt: f32,
    ) {
        let (movement, look) = self.mapper.fixed_update(input, self.camera.basis());
        self.locomotion
            .move_character(body, movement.direction, movement.smoothed, dt);
        self.camera.rotate(look.yaw, dt);
        self.camera.rotate_vertical(
            look.pitch,
            StepTiming {
                fixed_dt: dt,
                frame_dt: self.frame_dt,
            },
        );

        self.locomotion.physics_tick(body);

        let frame = self.locomotion.evaluate_clips(clips, body.rotation(), dt);
        for event in frame.events {
            self.locomotion.handle_clip_event(body, event);
        }
        self.locomotion.resolve_velocity(body, frame.root_motion, dt);
        body.step(dt);

        self.deliver_camera_signals();
        self.camera.follow_update(body.position(), dt);

        self.step += 1;
        if self.config.debug.trace_steps {
            trace!(
                step = self.step,
                state = ?self.locomotion.state(),
                position = ?body.position(),
                velocity = ?body.linear_velocity(),
                camera = ?self.camera.position(),
                "rig step"
            );
        }
    }

    fn deliver_camera_signals(&mut self) {
        for signal in self.locomotion.drain_camera_signals() {
            self.camera.apply_signal(signal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wingrig_config::ConfigError;

    fn builder() -> CharacterRigBuilder {
        CharacterRig::builder()
            .config(RigConfig::default())
            .camera_pose(Vec3::new(0.0, 2.0, 5.0), Quat::IDENTITY)
            .target(Vec3::ZERO)
    }

    #[test]
    fn test_build_complete_rig() {
        let rig = builder().build().expect("rig");
        assert_eq!(rig.camera().base_offset(), Vec3::new(0.0, -2.0, -5.0));
        assert_eq!(rig.step_count(), 0);
    }

    #[test]
    fn test_missing_camera_is_an_error() {
        let err = CharacterRig::builder()
            .config(RigConfig::default())
            .target(Vec3::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, RigError::MissingCollaborator("camera")));
    }

    #[test]
    fn test_missing_target_is_an_error() {
        let err = CharacterRig::builder()
            .config(RigConfig::default())
            .camera_pose(Vec3::ZERO, Quat::IDENTITY)
            .build()
            .unwrap_err();
        assert!(matches!(err, RigError::MissingCollaborator("follow target")));
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let err = CharacterRig::builder()
            .camera_pose(Vec3::ZERO, Quat::IDENTITY)
            .target(Vec3::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, RigError::MissingCollaborator("configuration")));
        assert!(err.to_string().contains("configuration"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = RigConfig::default();
        config.simulation.fixed_dt = 0.0;
        let err = builder().config(config).build().unwrap_err();
        assert!(matches!(err, RigError::Config(ConfigError::Invalid { .. })));
    }
}
