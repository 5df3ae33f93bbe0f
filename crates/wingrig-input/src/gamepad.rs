//! Analog gamepad input.
//!
//! [`GamepadState`] holds the sticks and face buttons of one pad and answers
//! [`InputSource`] queries: left stick moves, right stick orbits the camera,
//! South flies, West and North play the idles. Stick values are shaped by the
//! configured deadzone as they arrive.
//!
//! With the `gamepad` feature, [`GamepadInput`] feeds a state from gilrs.
//! Without it the state can still be driven directly, which is how scripted
//! sessions and tests use it.

use std::collections::HashMap;

use glam::Vec2;
use wingrig_config::InputConfig;

use crate::deadzone::apply_deadzone;
use crate::source::{InputAxis, InputButton, InputSource};

/// Face buttons named by position so Xbox and PlayStation pads agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadButton {
    /// A / Cross
    South,
    /// B / Circle
    East,
    /// Y / Triangle
    North,
    /// X / Square
    West,
    Start,
}

/// One of the four stick axes. Up and right are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
}

#[derive(Debug, Clone, Copy, Default)]
struct ButtonEdges {
    down: bool,
    went_down: bool,
}

/// Deadzone-shaped sticks plus button edges since the last
/// [`end_frame`](Self::end_frame).
#[derive(Debug, Clone)]
pub struct GamepadState {
    left_stick: Vec2,
    right_stick: Vec2,
    buttons: HashMap<PadButton, ButtonEdges>,
    deadzone: f32,
}

impl Default for GamepadState {
    fn default() -> Self {
        Self::from_config(&InputConfig::default())
    }
}

impl GamepadState {
    #[must_use]
    pub fn from_config(config: &InputConfig) -> Self {
        Self {
            left_stick: Vec2::ZERO,
            right_stick: Vec2::ZERO,
            buttons: HashMap::new(),
            deadzone: config.deadzone,
        }
    }

    pub fn deadzone(&self) -> f32 {
        self.deadzone
    }

    /// Movement stick after shaping.
    pub fn left_stick(&self) -> Vec2 {
        self.left_stick
    }

    /// Camera stick after shaping.
    pub fn right_stick(&self) -> Vec2 {
        self.right_stick
    }

    /// Record a raw axis reading.
    pub fn set_axis(&mut self, axis: StickAxis, raw: f32) {
        let value = apply_deadzone(raw, self.deadzone);
        match axis {
            StickAxis::LeftX => self.left_stick.x = value,
            StickAxis::LeftY => self.left_stick.y = value,
            StickAxis::RightX => self.right_stick.x = value,
            StickAxis::RightY => self.right_stick.y = value,
        }
    }

    pub fn set_button(&mut self, button: PadButton, down: bool) {
        let edges = self.buttons.entry(button).or_default();
        edges.went_down |= down && !edges.down;
        edges.down = down;
    }

    pub fn is_held(&self, button: PadButton) -> bool {
        self.buttons.get(&button).is_some_and(|b| b.down)
    }

    pub fn went_down(&self, button: PadButton) -> bool {
        self.buttons.get(&button).is_some_and(|b| b.went_down)
    }

    /// Zero the sticks, e.g. when the pad is unplugged.
    pub fn release_all(&mut self) {
        self.left_stick = Vec2::ZERO;
        self.right_stick = Vec2::ZERO;
        for edges in self.buttons.values_mut() {
            edges.down = false;
        }
    }

    /// Forget this frame's button edges.
    pub fn end_frame(&mut self) {
        for edges in self.buttons.values_mut() {
            edges.went_down = false;
        }
    }

    fn pad_button(button: InputButton) -> PadButton {
        match button {
            InputButton::Fly => PadButton::South,
            InputButton::Idle1 => PadButton::West,
            InputButton::Idle2 => PadButton::North,
        }
    }
}

impl InputSource for GamepadState {
    fn axis(&self, axis: InputAxis) -> f32 {
        match axis {
            InputAxis::MoveHorizontal => self.left_stick.x,
            InputAxis::MoveVertical => self.left_stick.y,
            InputAxis::CameraYaw => self.right_stick.x,
            // Stick up looks up; the rig's pitch axis is positive downward.
            InputAxis::CameraPitch => -self.right_stick.y,
        }
    }

    fn button_down(&self, button: InputButton) -> bool {
        self.went_down(Self::pad_button(button))
    }
}

#[cfg(feature = "gamepad")]
pub use device::GamepadInput;

#[cfg(feature = "gamepad")]
mod device {
    use gilrs::{Axis, Button, EventType, GamepadId, Gilrs};
    use tracing::{debug, info};
    use wingrig_config::InputConfig;

    use super::{GamepadState, PadButton, StickAxis};
    use crate::error::InputError;
    use crate::source::{InputAxis, InputButton, InputSource};

    fn pad_button(button: Button) -> Option<PadButton> {
        match button {
            Button::South => Some(PadButton::South),
            Button::East => Some(PadButton::East),
            Button::North => Some(PadButton::North),
            Button::West => Some(PadButton::West),
            Button::Start => Some(PadButton::Start),
            _ => None,
        }
    }

    fn stick_axis(axis: Axis) -> Option<StickAxis> {
        match axis {
            Axis::LeftStickX => Some(StickAxis::LeftX),
            Axis::LeftStickY => Some(StickAxis::LeftY),
            Axis::RightStickX => Some(StickAxis::RightX),
            Axis::RightStickY => Some(StickAxis::RightY),
            _ => None,
        }
    }

    /// The first connected gilrs pad, polled once per frame.
    pub struct GamepadInput {
        gilrs: Gilrs,
        active: Option<GamepadId>,
        /// Shaped stick and button state of the active pad.
        pub state: GamepadState,
    }

    impl GamepadInput {
        pub fn new(config: &InputConfig) -> Result<Self, InputError> {
            let gilrs = Gilrs::new().map_err(|e| InputError::Gamepad(e.to_string()))?;
            let active = gilrs
                .gamepads()
                .find(|(_, pad)| pad.is_connected())
                .map(|(id, pad)| {
                    info!("Using gamepad `{}`", pad.name());
                    id
                });
            Ok(Self {
                gilrs,
                active,
                state: GamepadState::from_config(config),
            })
        }

        pub fn is_connected(&self) -> bool {
            self.active.is_some()
        }

        /// Drain pending gilrs events. Call once per frame, after the previous
        /// frame's presses were dispatched.
        pub fn poll(&mut self) {
            self.state.end_frame();
            while let Some(event) = self.gilrs.next_event() {
                if self.active.is_none() && matches!(event.event, EventType::Connected) {
                    info!("Gamepad `{}` connected", self.gilrs.gamepad(event.id).name());
                    self.active = Some(event.id);
                }
                if self.active != Some(event.id) {
                    continue;
                }
                match event.event {
                    EventType::AxisChanged(axis, value, _) => {
                        if let Some(axis) = stick_axis(axis) {
                            self.state.set_axis(axis, value);
                        }
                    }
                    EventType::ButtonPressed(button, _) => {
                        if let Some(button) = pad_button(button) {
                            self.state.set_button(button, true);
                        }
                    }
                    EventType::ButtonReleased(button, _) => {
                        if let Some(button) = pad_button(button) {
                            self.state.set_button(button, false);
                        }
                    }
                    EventType::Disconnected => {
                        debug!("Active gamepad disconnected");
                        self.state.release_all();
                        self.active = None;
                    }
                    _ => {}
                }
            }
        }
    }

    impl InputSource for GamepadInput {
        fn axis(&self, axis: InputAxis) -> f32 {
            self.state.axis(axis)
        }

        fn button_down(&self, button: InputButton) -> bool {
            self.state.button_down(button)
        }
    }
}
