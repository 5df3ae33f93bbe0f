//! Configuration system for the wingrig character rig.
//!
//! Provides tuning values for the camera, locomotion, input, and fixed-step
//! scheduler that persist to disk as RON files. Supports CLI overrides via
//! clap, hot-reload detection, validation, and forward/backward compatible
//! serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, CameraConfig, DebugConfig, InputConfig, LocomotionConfig, RigConfig,
    SimulationConfig, default_config_dir,
};
pub use error::ConfigError;
