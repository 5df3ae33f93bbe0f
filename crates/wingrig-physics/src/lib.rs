//! Rigid-body physics for the character rig.
//!
//! [`CharacterBody`] is the boundary the locomotion controller drives.
//! [`RapierBody`] implements it with a dynamic Rapier body and capsule
//! collider living in a [`PhysicsWorld`]; [`scene`] adds the static
//! geometry it walks on and casts rays against.

pub mod body;
pub mod character;
pub mod scene;

use rapier3d::prelude::*;

pub use body::{CharacterBody, RayHit};
pub use character::{CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS, RapierBody};
pub use scene::{ALL_LAYERS, add_floor, add_static_box, collider_layers};

/// Default gravity, `(0, -9.81, 0)`.
pub const DEFAULT_GRAVITY: glam::Vec3 = glam::Vec3::new(0.0, -9.81, 0.0);

/// Owns every piece of Rapier simulation state.
pub struct PhysicsWorld {
    /// World-space gravity.
    pub gravity: Vector,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    /// Broad phase; also serves ray queries.
    pub broad_phase: BroadPhaseBvh,
    pub narrow_phase: NarrowPhase,
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    /// Empty world with [`DEFAULT_GRAVITY`] stepping `dt` seconds at a time.
    pub fn new(dt: f32) -> Self {
        let integration_parameters = IntegrationParameters {
            dt,
            ..Default::default()
        };

        Self {
            gravity: Vector::new(DEFAULT_GRAVITY.x, DEFAULT_GRAVITY.y, DEFAULT_GRAVITY.z),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Advance the simulation by the configured timestep.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// Run one step with gravity switched off so freshly inserted colliders
    /// reach the broad phase without anything at rest starting to fall.
    pub fn refresh_queries(&mut self) {
        let gravity = std::mem::replace(&mut self.gravity, Vector::new(0.0, 0.0, 0.0));
        self.step();
        self.gravity = gravity;
    }

    pub fn set_gravity(&mut self, gravity: glam::Vec3) {
        self.gravity = Vector::new(gravity.x, gravity.y, gravity.z);
    }

    pub fn gravity(&self) -> glam::Vec3 {
        glam::Vec3::new(self.gravity.x, self.gravity.y, self.gravity.z)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(1.0 / 50.0)
    }
}
