//! Keyboard-backed input source.
//!
//! Key events are folded into a per-key record during a frame. A bound key
//! pair stands in for each analog axis and a single bound key for each
//! button. Physical key codes are used so the layout is the same on every
//! keyboard language.

use std::collections::HashMap;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use wingrig_config::InputConfig;

use crate::keybindings::KeyBindings;
use crate::source::{InputAxis, InputButton, InputSource};

/// A key going down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChange {
    pub code: KeyCode,
    pub down: bool,
    /// OS auto-repeat; ignored.
    pub repeat: bool,
}

impl KeyChange {
    /// Convert a winit event. Keys without a known code yield `None`.
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };
        Some(Self {
            code,
            down: event.state == ElementState::Pressed,
            repeat: event.repeat,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct KeyRecord {
    down: bool,
    went_down: bool,
    went_up: bool,
}

/// Held keys plus the edges seen since the last [`end_frame`](Self::end_frame).
///
/// A key tapped and released inside one frame reports both edges, so a
/// short press is never lost.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    keys: HashMap<KeyCode, KeyRecord>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a winit key event into the frame.
    pub fn handle_event(&mut self, event: &KeyEvent) {
        if let Some(change) = KeyChange::from_event(event) {
            self.apply(change);
        }
    }

    pub fn apply(&mut self, change: KeyChange) {
        if change.repeat {
            return;
        }
        let record = self.keys.entry(change.code).or_default();
        if change.down {
            // A second down without an up in between is not a new press.
            record.went_down |= !record.down;
            record.down = true;
        } else {
            record.went_up |= record.down;
            record.down = false;
        }
    }

    #[must_use]
    pub fn held(&self, code: KeyCode) -> bool {
        self.keys.get(&code).is_some_and(|r| r.down)
    }

    #[must_use]
    pub fn went_down(&self, code: KeyCode) -> bool {
        self.keys.get(&code).is_some_and(|r| r.went_down)
    }

    #[must_use]
    pub fn went_up(&self, code: KeyCode) -> bool {
        self.keys.get(&code).is_some_and(|r| r.went_up)
    }

    /// Forget this frame's edges. Call after button presses were dispatched.
    pub fn end_frame(&mut self) {
        self.keys.retain(|_, record| record.down);
        for record in self.keys.values_mut() {
            record.went_down = false;
            record.went_up = false;
        }
    }
}

/// A keyboard acting as the rig's input device.
#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    /// Raw key state, fed from the window event loop.
    pub state: KeyboardState,
    pub bindings: KeyBindings,
}

impl KeyboardInput {
    #[must_use]
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            state: KeyboardState::new(),
            bindings,
        }
    }

    /// Default layout with the config's `keybindings` overrides applied.
    #[must_use]
    pub fn from_config(config: &InputConfig) -> Self {
        Self::new(KeyBindings::with_overrides(&config.keybindings))
    }
}

impl InputSource for KeyboardInput {
    fn axis(&self, axis: InputAxis) -> f32 {
        let Some(keys) = self.bindings.axis_keys(axis) else {
            return 0.0;
        };
        let positive = if self.state.held(keys.positive) { 1.0 } else { 0.0 };
        let negative = if self.state.held(keys.negative) { 1.0 } else { 0.0 };
        positive - negative
    }

    fn button_down(&self, button: InputButton) -> bool {
        self.bindings
            .button_key(button)
            .is_some_and(|key| self.state.went_down(key))
    }
}
