//! Analog stick deadzone shaping.

/// Apply deadzone filtering with rescaling.
///
/// If `|raw| < deadzone`, returns `0.0`.
/// Otherwise rescales from `[deadzone, 1.0]` to `[0.0, 1.0]`, preserving sign.
/// The result is always clamped to `[-1.0, 1.0]`, so a zero deadzone acts as
/// a plain range clamp.
pub fn apply_deadzone(raw: f32, deadzone: f32) -> f32 {
    let abs = raw.abs();
    if abs < deadzone {
        return 0.0;
    }
    let scale = 1.0 / (1.0 - deadzone);
    let rescaled = (abs - deadzone) * scale;
    rescaled.min(1.0).copysign(raw)
}

/// [`apply_deadzone`] on both components of a stick.
pub fn apply_deadzone_vec2(raw: glam::Vec2, deadzone: f32) -> glam::Vec2 {
    glam::Vec2::new(
        apply_deadzone(raw.x, deadzone),
        apply_deadzone(raw.y, deadzone),
    )
}
