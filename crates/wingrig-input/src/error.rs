/// Errors raised while opening an input device.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("gamepad backend unavailable: {0}")]
    Gamepad(String),
}
