//! Static level geometry.
//!
//! A collider's query layers live in its `user_data` bits. Colliders that
//! never set them are on every layer.

use glam::Vec3;
use rapier3d::prelude::*;

use crate::PhysicsWorld;

/// Layer mask matching every layer.
pub const ALL_LAYERS: u32 = u32::MAX;

/// Half extent of the floor slab along X and Z.
const FLOOR_HALF_EXTENT: f32 = 500.0;
const FLOOR_HALF_THICKNESS: f32 = 0.5;

/// Query layers of `collider`.
pub fn collider_layers(collider: &Collider) -> u32 {
    match collider.user_data {
        0 => ALL_LAYERS,
        bits => bits as u32,
    }
}

/// Insert a fixed box centred on `center` on the given query layers.
pub fn add_static_box(
    world: &mut PhysicsWorld,
    center: Vec3,
    half_extents: Vec3,
    layers: u32,
) -> ColliderHandle {
    let body = RigidBodyBuilder::fixed()
        .translation(Vector::new(center.x, center.y, center.z))
        .build();
    let body_handle = world.rigid_body_set.insert(body);
    let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        .user_data(u128::from(layers))
        .build();
    world
        .collider_set
        .insert_with_parent(collider, body_handle, &mut world.rigid_body_set)
}

/// Insert a wide horizontal slab whose top face is at `height`.
pub fn add_floor(world: &mut PhysicsWorld, height: f32) -> ColliderHandle {
    add_static_box(
        world,
        Vec3::new(0.0, height - FLOOR_HALF_THICKNESS, 0.0),
        Vec3::new(FLOOR_HALF_EXTENT, FLOOR_HALF_THICKNESS, FLOOR_HALF_EXTENT),
        ALL_LAYERS,
    )
}
