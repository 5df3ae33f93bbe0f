//! The rigid-body boundary the locomotion controller drives.

use glam::{Quat, Vec3};

/// A ray intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
}

/// A dynamic character body and the scene queries the controller needs.
///
/// The body's position is the point between its feet.
pub trait CharacterBody {
    fn position(&self) -> Vec3;
    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);

    fn linear_velocity(&self) -> Vec3;
    fn set_linear_velocity(&mut self, velocity: Vec3);
    fn angular_velocity(&self) -> Vec3;
    fn set_angular_velocity(&mut self, velocity: Vec3);

    /// Apply a mass-independent acceleration for the next step only.
    fn add_acceleration(&mut self, acceleration: Vec3);

    /// Enable or disable collision response.
    fn set_collider_enabled(&mut self, enabled: bool);
    fn collider_enabled(&self) -> bool;

    /// Global gravity.
    fn gravity(&self) -> Vec3;

    /// First hit along `direction` within `max_distance` against geometry
    /// whose layer intersects `mask`. The body never hits itself.
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: u32)
    -> Option<RayHit>;

    /// Advance the simulation by `dt`.
    fn step(&mut self, dt: f32);
}
