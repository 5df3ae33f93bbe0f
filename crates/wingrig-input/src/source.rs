//! The input-polling boundary: named analog axes and button-down edges.
//!
//! Anything that can answer "what is this axis right now" and "was this
//! button pressed this frame" can drive the rig. [`KeyboardInput`] does it
//! from winit key events; [`InputSnapshot`] does it from plain values, which
//! is what scripted sessions and tests use.
//!
//! [`KeyboardInput`]: crate::KeyboardInput

use std::collections::HashSet;

/// Analog axes the rig reads, each in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAxis {
    /// Strafe: left(-1)..right(+1).
    MoveHorizontal,
    /// Walk: back(-1)..forward(+1).
    MoveVertical,
    /// Camera orbit: left(-1)..right(+1).
    CameraYaw,
    /// Camera tilt: up(-1)..down(+1).
    CameraPitch,
}

/// Discrete buttons the rig reacts to on press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputButton {
    /// Toggle take-off / landing.
    Fly,
    /// Play the first idle flourish.
    Idle1,
    /// Play the second idle flourish.
    Idle2,
}

impl InputButton {
    /// All buttons, in dispatch order.
    pub const ALL: [InputButton; 3] = [InputButton::Fly, InputButton::Idle1, InputButton::Idle2];
}

/// A polled input device.
pub trait InputSource {
    /// Current value of `axis`, nominally in `[-1, 1]`.
    fn axis(&self, axis: InputAxis) -> f32;

    /// `true` only during the frame `button` went down.
    fn button_down(&self, button: InputButton) -> bool;
}

/// Plain-value input source.
///
/// Axes hold their value until changed; button presses last until
/// [`clear_transients`](Self::clear_transients).
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    /// Movement stick (x = horizontal, y = vertical).
    pub movement: glam::Vec2,
    /// Look stick (x = yaw, y = pitch).
    pub look: glam::Vec2,
    pressed: HashSet<InputButton>,
}

impl InputSnapshot {
    /// Snapshot with the given sticks and no pressed buttons.
    #[must_use]
    pub fn new(movement: glam::Vec2, look: glam::Vec2) -> Self {
        Self {
            movement,
            look,
            pressed: HashSet::new(),
        }
    }

    /// Register a button press for the current frame.
    pub fn press(&mut self, button: InputButton) {
        self.pressed.insert(button);
    }

    /// Forget this frame's button presses.
    pub fn clear_transients(&mut self) {
        self.pressed.clear();
    }
}

impl InputSource for InputSnapshot {
    fn axis(&self, axis: InputAxis) -> f32 {
        match axis {
            InputAxis::MoveHorizontal => self.movement.x,
            InputAxis::MoveVertical => self.movement.y,
            InputAxis::CameraYaw => self.look.x,
            InputAxis::CameraPitch => self.look.y,
        }
    }

    fn button_down(&self, button: InputButton) -> bool {
        self.pressed.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_snapshot_axes() {
        let snap = InputSnapshot::new(Vec2::new(0.5, -1.0), Vec2::new(0.25, 0.75));
        assert_eq!(snap.axis(InputAxis::MoveHorizontal), 0.5);
        assert_eq!(snap.axis(InputAxis::MoveVertical), -1.0);
        assert_eq!(snap.axis(InputAxis::CameraYaw), 0.25);
        assert_eq!(snap.axis(InputAxis::CameraPitch), 0.75);
    }

    #[test]
    fn test_snapshot_press_lasts_one_frame() {
        let mut snap = InputSnapshot::default();
        snap.press(InputButton::Fly);
        assert!(snap.button_down(InputButton::Fly));
        assert!(!snap.button_down(InputButton::Idle1));
        snap.clear_transients();
        assert!(!snap.button_down(InputButton::Fly));
    }
}
