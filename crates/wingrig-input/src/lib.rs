//! Input polling boundary, keyboard and gamepad devices, and the
//! input-to-intent mapper.

pub mod deadzone;
pub mod error;
pub mod gamepad;
pub mod keybindings;
pub mod keyboard;
pub mod mapper;
pub mod source;

pub use deadzone::{apply_deadzone, apply_deadzone_vec2};
pub use error::InputError;
#[cfg(feature = "gamepad")]
pub use gamepad::GamepadInput;
pub use gamepad::{GamepadState, PadButton, StickAxis};
pub use keybindings::{AxisKeys, KeyBindings, parse_key_name};
pub use keyboard::{KeyChange, KeyboardInput, KeyboardState};
pub use mapper::{CameraBasis, InputMapper, LookIntent, MovementIntent, project_on_plane};
pub use source::{InputAxis, InputButton, InputSnapshot, InputSource};
