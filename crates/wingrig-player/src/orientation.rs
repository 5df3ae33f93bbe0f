//! Facing helpers shared by the camera and the character.
//!
//! Conventions: right-handed, +Y up, local forward is -Z, local right is +X.
//! Roll is the rotation about the local Z axis; positive roll lifts the
//! right side.

use glam::{EulerRot, Mat3, Quat, Vec3};

/// World-space forward of `rotation`.
pub fn forward(rotation: Quat) -> Vec3 {
    rotation * Vec3::NEG_Z
}

/// World-space right of `rotation`.
pub fn right(rotation: Quat) -> Vec3 {
    rotation * Vec3::X
}

/// World-space up of `rotation`.
pub fn up(rotation: Quat) -> Vec3 {
    rotation * Vec3::Y
}

/// Drop the vertical component. Not renormalized.
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Rotation whose forward points along `forward` with its up as close to
/// `up` as possible. Returns identity for a zero `forward`.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let f = forward.normalize_or_zero();
    if f == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let r = f.cross(up);
    if r.length_squared() < 1e-8 {
        // forward is parallel to up; any roll is as good as another
        return Quat::from_rotation_arc(Vec3::NEG_Z, f);
    }
    let r = r.normalize();
    let u = r.cross(f);
    Quat::from_mat3(&Mat3::from_cols(r, u, -f)).normalize()
}

/// Interpolate `current` toward a level (zero-roll) facing along
/// `target_forward`. `t` is clamped to `[0, 1]`.
pub fn rotate_towards(current: Quat, target_forward: Vec3, t: f32) -> Quat {
    if target_forward.length_squared() < 1e-12 {
        return current;
    }
    let target = look_rotation(target_forward, Vec3::Y);
    current.slerp(target, t.clamp(0.0, 1.0)).normalize()
}

/// Roll angle of `rotation` in degrees.
pub fn roll_degrees(rotation: Quat) -> f32 {
    let (_, _, roll) = rotation.to_euler(EulerRot::YXZ);
    roll.to_degrees()
}

/// `rotation` with its roll replaced by `roll_deg`, keeping yaw and pitch.
pub fn with_roll(rotation: Quat, roll_deg: f32) -> Quat {
    let (yaw, pitch, _) = rotation.to_euler(EulerRot::YXZ);
    Quat::from_euler(EulerRot::YXZ, yaw, pitch, roll_deg.to_radians())
}

/// Level facing that keeps the heading of `rotation`.
///
/// When the nose points straight up or down the flattened forward vanishes,
/// so the heading is taken from the body's up vector instead.
pub fn level_heading(rotation: Quat) -> Quat {
    let fwd = forward(rotation);
    let mut heading = flatten(fwd);
    if heading.length_squared() < 1e-6 {
        heading = flatten(up(rotation)) * -fwd.y.signum();
    }
    if heading.length_squared() < 1e-12 {
        return rotation;
    }
    look_rotation(heading, Vec3::Y)
}
