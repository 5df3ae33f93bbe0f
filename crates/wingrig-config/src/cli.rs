//! Command-line argument parsing for the wingrig demo driver.

use std::path::PathBuf;

use clap::Parser;

use crate::RigConfig;

/// wingrig command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "wingrig", about = "Flight-capable third-person character rig")]
pub struct CliArgs {
    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Fixed simulation step in seconds.
    #[arg(long)]
    pub fixed_dt: Option<f32>,

    /// Camera orbit speed in degrees per second.
    #[arg(long)]
    pub camera_speed: Option<f32>,

    /// Number of variable-rate frames to simulate.
    #[arg(long, default_value_t = 600)]
    pub frames: u32,

    /// Duration of each simulated frame in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub frame_time: f32,
}

impl RigConfig {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(dt) = args.fixed_dt {
            self.simulation.fixed_dt = dt;
        }
        if let Some(speed) = args.camera_speed {
            self.camera.rotation_speed = speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = RigConfig::default();
        let args = CliArgs {
            fixed_dt: Some(1.0 / 120.0),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.simulation.fixed_dt, 1.0 / 120.0);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.camera.rotation_speed, 120.0);
    }

    #[test]
    fn test_cli_no_override() {
        let original = RigConfig::default();
        let mut config = RigConfig::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from(["wingrig", "--frames", "30", "--camera-speed", "45"]);
        assert_eq!(args.frames, 30);
        assert_eq!(args.camera_speed, Some(45.0));
        assert!(args.config.is_none());
    }
}
