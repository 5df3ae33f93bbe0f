//! Key bindings for driving the rig from a keyboard.
//!
//! Each analog [`InputAxis`] is emulated by a negative/positive key pair and
//! each [`InputButton`] by a single key. Defaults can be overridden by name
//! from [`InputConfig::keybindings`](wingrig_config::InputConfig), e.g.
//! `{"fly": "KeyF", "look_up": "KeyI"}`.

use std::collections::HashMap;

use tracing::warn;
use winit::keyboard::KeyCode;

use crate::source::{InputAxis, InputButton};

/// Negative/positive key pair emulating one analog axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisKeys {
    /// Key driving the axis toward -1.
    pub negative: KeyCode,
    /// Key driving the axis toward +1.
    pub positive: KeyCode,
}

/// Keyboard layout for every axis and button the rig reads.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    axes: HashMap<InputAxis, AxisKeys>,
    buttons: HashMap<InputButton, KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let axes = HashMap::from([
            (
                InputAxis::MoveHorizontal,
                AxisKeys {
                    negative: KeyCode::KeyA,
                    positive: KeyCode::KeyD,
                },
            ),
            (
                InputAxis::MoveVertical,
                AxisKeys {
                    negative: KeyCode::KeyS,
                    positive: KeyCode::KeyW,
                },
            ),
            (
                InputAxis::CameraYaw,
                AxisKeys {
                    negative: KeyCode::ArrowLeft,
                    positive: KeyCode::ArrowRight,
                },
            ),
            (
                InputAxis::CameraPitch,
                AxisKeys {
                    negative: KeyCode::ArrowUp,
                    positive: KeyCode::ArrowDown,
                },
            ),
        ]);
        let buttons = HashMap::from([
            (InputButton::Fly, KeyCode::Space),
            (InputButton::Idle1, KeyCode::Digit1),
            (InputButton::Idle2, KeyCode::Digit2),
        ]);
        Self { axes, buttons }
    }
}

impl KeyBindings {
    /// Default layout with the given name -> key overrides applied.
    ///
    /// Unknown binding or key names are skipped with a warning.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut bindings = Self::default();
        for (name, key_name) in overrides {
            let Some(key) = parse_key_name(key_name) else {
                warn!("Unknown key `{key_name}` for binding `{name}`, keeping default");
                continue;
            };
            if !bindings.rebind(name, key) {
                warn!("Unknown binding name `{name}`, ignoring");
            }
        }
        bindings
    }

    /// Rebind a named slot. Returns `false` if the name is not recognised.
    pub fn rebind(&mut self, name: &str, key: KeyCode) -> bool {
        let axis_slot = match name {
            "move_left" => Some((InputAxis::MoveHorizontal, false)),
            "move_right" => Some((InputAxis::MoveHorizontal, true)),
            "move_back" => Some((InputAxis::MoveVertical, false)),
            "move_forward" => Some((InputAxis::MoveVertical, true)),
            "look_left" => Some((InputAxis::CameraYaw, false)),
            "look_right" => Some((InputAxis::CameraYaw, true)),
            "look_up" => Some((InputAxis::CameraPitch, false)),
            "look_down" => Some((InputAxis::CameraPitch, true)),
            _ => None,
        };
        if let Some((axis, positive)) = axis_slot {
            if let Some(keys) = self.axes.get_mut(&axis) {
                if positive {
                    keys.positive = key;
                } else {
                    keys.negative = key;
                }
            }
            return true;
        }

        let button = match name {
            "fly" => InputButton::Fly,
            "idle1" => InputButton::Idle1,
            "idle2" => InputButton::Idle2,
            _ => return false,
        };
        self.buttons.insert(button, key);
        true
    }

    /// Keys emulating `axis`.
    pub fn axis_keys(&self, axis: InputAxis) -> Option<AxisKeys> {
        self.axes.get(&axis).copied()
    }

    /// Key bound to `button`.
    pub fn button_key(&self, button: InputButton) -> Option<KeyCode> {
        self.buttons.get(&button).copied()
    }
}

/// Parse a key name as written in config files (the `Debug` spelling of
/// [`KeyCode`], e.g. `"KeyW"`, `"Digit1"`, `"ArrowUp"`).
pub fn parse_key_name(s: &str) -> Option<KeyCode> {
    Some(match s {
        "KeyA" => KeyCode::KeyA,
        "KeyB" => KeyCode::KeyB,
        "KeyC" => KeyCode::KeyC,
        "KeyD" => KeyCode::KeyD,
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyG" => KeyCode::KeyG,
        "KeyH" => KeyCode::KeyH,
        "KeyI" => KeyCode::KeyI,
        "KeyJ" => KeyCode::KeyJ,
        "KeyK" => KeyCode::KeyK,
        "KeyL" => KeyCode::KeyL,
        "KeyM" => KeyCode::KeyM,
        "KeyN" => KeyCode::KeyN,
        "KeyO" => KeyCode::KeyO,
        "KeyP" => KeyCode::KeyP,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS,
        "KeyT" => KeyCode::KeyT,
        "KeyU" => KeyCode::KeyU,
        "KeyV" => KeyCode::KeyV,
        "KeyW" => KeyCode::KeyW,
        "KeyX" => KeyCode::KeyX,
        "KeyY" => KeyCode::KeyY,
        "KeyZ" => KeyCode::KeyZ,
        "Digit0" => KeyCode::Digit0,
        "Digit1" => KeyCode::Digit1,
        "Digit2" => KeyCode::Digit2,
        "Digit3" => KeyCode::Digit3,
        "Digit4" => KeyCode::Digit4,
        "Digit5" => KeyCode::Digit5,
        "Digit6" => KeyCode::Digit6,
        "Digit7" => KeyCode::Digit7,
        "Digit8" => KeyCode::Digit8,
        "Digit9" => KeyCode::Digit9,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Tab" => KeyCode::Tab,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "ControlLeft" => KeyCode::ControlLeft,
        "ControlRight" => KeyCode::ControlRight,
        "AltLeft" => KeyCode::AltLeft,
        "AltRight" => KeyCode::AltRight,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let bindings = KeyBindings::default();
        let walk = bindings.axis_keys(InputAxis::MoveVertical).unwrap();
        assert_eq!(walk.positive, KeyCode::KeyW);
        assert_eq!(walk.negative, KeyCode::KeyS);
        assert_eq!(bindings.button_key(InputButton::Fly), Some(KeyCode::Space));
    }

    #[test]
    fn test_overrides_applied_by_name() {
        let overrides = HashMap::from([
            ("fly".to_string(), "KeyF".to_string()),
            ("look_up".to_string(), "KeyI".to_string()),
        ]);
        let bindings = KeyBindings::with_overrides(&overrides);
        assert_eq!(bindings.button_key(InputButton::Fly), Some(KeyCode::KeyF));
        assert_eq!(
            bindings.axis_keys(InputAxis::CameraPitch).unwrap().negative,
            KeyCode::KeyI
        );
    }

    #[test]
    fn test_unknown_names_keep_defaults() {
        let overrides = HashMap::from([
            ("teleport".to_string(), "KeyT".to_string()),
            ("fly".to_string(), "NotAKey".to_string()),
        ]);
        let bindings = KeyBindings::with_overrides(&overrides);
        assert_eq!(bindings, KeyBindings::default());
    }

    #[test]
    fn test_parse_key_name() {
        assert_eq!(parse_key_name("Digit2"), Some(KeyCode::Digit2));
        assert_eq!(parse_key_name("ArrowLeft"), Some(KeyCode::ArrowLeft));
        assert_eq!(parse_key_name("keyw"), None);
    }
}
