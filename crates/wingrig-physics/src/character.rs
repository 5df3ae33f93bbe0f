//! A capsule character simulated by Rapier.
//!
//! The body is dynamic so gravity, launch impulses and landings come from
//! the solver. Tipping over is prevented by locking rotation about the
//! horizontal axes; facing is set directly by the controller. The capsule
//! sits on top of the body origin so [`CharacterBody::position`] is the
//! point between the feet.

use glam::{Quat, Vec3};
use rapier3d::math::Rotation;
use rapier3d::prelude::*;
use tracing::trace;

use crate::PhysicsWorld;
use crate::body::{CharacterBody, RayHit};
use crate::scene::collider_layers;

/// Half-height of the capsule's cylindrical segment.
pub const CAPSULE_HALF_HEIGHT: f32 = 0.6;
/// Capsule radius. Total height is 2 × (half-height + radius) = 1.8.
pub const CAPSULE_RADIUS: f32 = 0.3;

fn to_vector(v: Vec3) -> Vector {
    Vector::new(v.x, v.y, v.z)
}

/// A character body owning the world it lives in.
pub struct RapierBody {
    /// The simulated world. Add static geometry through [`crate::scene`].
    pub world: PhysicsWorld,
    body_handle: RigidBodyHandle,
    collider_handle: ColliderHandle,
    pending_acceleration: Vec3,
}

impl RapierBody {
    /// Insert a character standing at `feet` into `world`.
    ///
    /// Geometry already in `world` is visible to ray casts immediately.
    pub fn spawn(mut world: PhysicsWorld, feet: Vec3) -> Self {
        let body = RigidBodyBuilder::dynamic()
            .translation(to_vector(feet))
            .enabled_rotations(false, true, false)
            .can_sleep(false)
            .build();
        let body_handle = world.rigid_body_set.insert(body);

        let collider = ColliderBuilder::capsule_y(CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS)
            .translation(Vector::new(0.0, CAPSULE_HALF_HEIGHT + CAPSULE_RADIUS, 0.0))
            .friction(0.0)
            .friction_combine_rule(CoefficientCombineRule::Min)
            .build();
        let collider_handle =
            world
                .collider_set
                .insert_with_parent(collider, body_handle, &mut world.rigid_body_set);

        world.refresh_queries();

        Self {
            world,
            body_handle,
            collider_handle,
            pending_acceleration: Vec3::ZERO,
        }
    }

    pub fn body_handle(&self) -> RigidBodyHandle {
        self.body_handle
    }

    /// Move the body without simulating the path in between.
    pub fn teleport(&mut self, feet: Vec3) {
        self.rigid_body_mut().set_translation(to_vector(feet), true);
    }

    fn rigid_body(&self) -> &RigidBody {
        &self.world.rigid_body_set[self.body_handle]
    }

    fn rigid_body_mut(&mut self) -> &mut RigidBody {
        &mut self.world.rigid_body_set[self.body_handle]
    }
}

impl CharacterBody for RapierBody {
    fn position(&self) -> Vec3 {
        let t = self.rigid_body().translation();
        Vec3::new(t.x, t.y, t.z)
    }

    fn rotation(&self) -> Quat {
        Quat::from_array(self.rigid_body().rotation().to_array())
    }

    fn set_rotation(&mut self, rotation: Quat) {
        let rotation = Rotation::from_array(rotation.normalize().to_array());
        self.rigid_body_mut().set_rotation(rotation, true);
    }

    fn linear_velocity(&self) -> Vec3 {
        let v = self.rigid_body().linvel();
        Vec3::new(v.x, v.y, v.z)
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.rigid_body_mut().set_linvel(to_vector(velocity), true);
    }

    fn angular_velocity(&self) -> Vec3 {
        let v = self.rigid_body().angvel();
        Vec3::new(v.x, v.y, v.z)
    }

    fn set_angular_velocity(&mut self, velocity: Vec3) {
        self.rigid_body_mut().set_angvel(to_vector(velocity), true);
    }

    fn add_acceleration(&mut self, acceleration: Vec3) {
        self.pending_acceleration += acceleration;
    }

    fn set_collider_enabled(&mut self, enabled: bool) {
        self.world.collider_set[self.collider_handle].set_enabled(enabled);
    }

    fn collider_enabled(&self) -> bool {
        self.world.collider_set[self.collider_handle].is_enabled()
    }

    fn gravity(&self) -> Vec3 {
        self.world.gravity()
    }

    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: u32,
    ) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let on_layers = |_: ColliderHandle, collider: &Collider| collider_layers(collider) & mask != 0;
        let filter = QueryFilter::new()
            .exclude_rigid_body(self.body_handle)
            .predicate(&on_layers);
        let query_pipeline = self.world.broad_phase.as_query_pipeline(
            self.world.narrow_phase.query_dispatcher(),
            &self.world.rigid_body_set,
            &self.world.collider_set,
            filter,
        );

        let ray = Ray::new(to_vector(origin), to_vector(direction));
        let (_, hit) = query_pipeline.cast_ray_and_get_normal(&ray, max_distance, true)?;
        let distance = hit.time_of_impact;
        let normal = hit.normal;
        Some(RayHit {
            distance,
            point: origin + direction * distance,
            normal: Vec3::new(normal.x, normal.y, normal.z),
        })
    }

    fn step(&mut self, dt: f32) {
        let acceleration = std::mem::take(&mut self.pending_acceleration);
        let body = self.rigid_body_mut();
        let force = acceleration * body.mass();
        body.reset_forces(false);
        body.add_force(to_vector(force), true);

        self.world.integration_parameters.dt = dt;
        self.world.step();
        self.rigid_body_mut().reset_forces(false);

        trace!(position = ?self.position(), velocity = ?self.linear_velocity(), "body step");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ALL_LAYERS, add_floor, add_static_box};

    const DT: f32 = 0.02;

    fn body_on_floor(feet: Vec3) -> RapierBody {
        let mut world = PhysicsWorld::new(DT);
        add_floor(&mut world, 0.0);
        RapierBody::spawn(world, feet)
    }

    #[test]
    fn test_falls_and_rests_on_floor() {
        let mut body = body_on_floor(Vec3::new(0.0, 2.0, 0.0));
        for _ in 0..150 {
            body.step(DT);
        }
        let y = body.position().y;
        assert!(y.abs() < 0.05, "feet should rest on the floor, got y={y}");
        assert!(body.linear_velocity().y.abs() < 0.1);
    }

    #[test]
    fn test_cancelled_gravity_hovers() {
        let mut body = body_on_floor(Vec3::new(0.0, 10.0, 0.0));
        for _ in 0..50 {
            let g = body.gravity();
            body.add_acceleration(-g);
            body.step(DT);
        }
        assert!((body.position().y - 10.0).abs() < 1e-3);
        assert!(body.linear_velocity().length() < 1e-3);
    }

    #[test]
    fn test_acceleration_lasts_one_step() {
        let mut body = body_on_floor(Vec3::new(0.0, 10.0, 0.0));
        body.add_acceleration(-body.gravity());
        body.step(DT);
        body.step(DT);
        let expected = crate::DEFAULT_GRAVITY.y * DT;
        assert!((body.linear_velocity().y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_disabled_collider_falls_through_floor() {
        let mut body = body_on_floor(Vec3::ZERO);
        body.set_collider_enabled(false);
        assert!(!body.collider_enabled());
        for _ in 0..50 {
            body.set_linear_velocity(Vec3::new(0.0, -5.0, 0.0));
            body.step(DT);
        }
        assert!(body.position().y < -1.0);

        body.set_collider_enabled(true);
        assert!(body.collider_enabled());
    }

    #[test]
    fn test_ray_hits_floor_not_self() {
        let body = body_on_floor(Vec3::ZERO);
        let hit = body
            .cast_ray(Vec3::new(0.0, 0.1, 0.0), Vec3::NEG_Y, 0.3, ALL_LAYERS)
            .expect("floor below the feet");
        assert!((hit.distance - 0.1).abs() < 1e-4);
        assert!((hit.normal - Vec3::Y).length() < 1e-4);
        assert!(
            body.cast_ray(Vec3::new(0.0, 0.5, 0.0), Vec3::NEG_Y, 0.3, ALL_LAYERS)
                .is_none()
        );
    }

    #[test]
    fn test_ray_respects_layer_mask() {
        let mut world = PhysicsWorld::new(DT);
        add_static_box(
            &mut world,
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(10.0, 0.5, 10.0),
            0b10,
        );
        let body = RapierBody::spawn(world, Vec3::new(0.0, 5.0, 0.0));
        let origin = Vec3::new(0.0, 0.1, 0.0);
        assert!(body.cast_ray(origin, Vec3::NEG_Y, 1.0, 0b01).is_none());
        assert!(body.cast_ray(origin, Vec3::NEG_Y, 1.0, 0b10).is_some());
    }

    #[test]
    fn test_wall_normal_faces_the_ray() {
        let mut world = PhysicsWorld::new(DT);
        add_static_box(
            &mut world,
            Vec3::new(0.0, 5.0, -10.5),
            Vec3::new(20.0, 20.0, 0.5),
            ALL_LAYERS,
        );
        let body = RapierBody::spawn(world, Vec3::new(0.0, 5.0, 0.0));
        let hit = body
            .cast_ray(Vec3::new(0.0, 5.0, -8.0), Vec3::NEG_Z, 3.0, ALL_LAYERS)
            .expect("wall ahead");
        assert!((hit.distance - 2.0).abs() < 1e-4);
        assert!((hit.normal - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn test_rotation_round_trips() {
        let mut body = body_on_floor(Vec3::ZERO);
        let facing = Quat::from_rotation_y(0.7) * Quat::from_rotation_x(-0.4);
        body.set_rotation(facing);
        assert!(body.rotation().angle_between(facing) < 1e-4);
    }

    #[test]
    fn test_teleport_moves_body() {
        let mut body = body_on_floor(Vec3::ZERO);
        body.teleport(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(body.position(), Vec3::new(1.0, 2.0, 3.0));
    }
}
