//! Flight-capable character locomotion, the follow/orbit camera, and the
//! context that drives both from polled input.

pub mod animation;
pub mod camera_rig;
pub mod error;
pub mod locomotion;
pub mod orientation;
pub mod rig;
pub mod step_loop;

pub use animation::{
    AnimParams, AnimTrigger, AnimTriggers, ClipEvent, ClipFrame, MotionClips, ProceduralClips,
    RootMotion,
};
pub use camera_rig::{CameraRig, CameraSignal};
pub use error::RigError;
pub use locomotion::{
    IdleVariant, LocomotionController, LocomotionState, StateEvent, TransitionGate,
    vertical_speed_scale,
};
pub use wingrig_physics::{CharacterBody, DEFAULT_GRAVITY, PhysicsWorld, RapierBody, RayHit};
pub use rig::{CharacterRig, CharacterRigBuilder};
pub use step_loop::{FixedStepLoop, StepTiming};
