//! Rig tuning structs with sensible defaults and RON persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name used for persisted rig configuration.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level rig configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RigConfig {
    /// Follow/orbit camera settings.
    pub camera: CameraConfig,
    /// Ground and flight locomotion settings.
    pub locomotion: LocomotionConfig,
    /// Stick smoothing and key bindings.
    pub input: InputConfig,
    /// Fixed-step scheduling.
    pub simulation: SimulationConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Camera follow and orbit configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Orbit speed in degrees per second at full stick deflection.
    pub rotation_speed: f32,
    /// Follow lag rate (1/s) while grounded.
    pub follow_speed: f32,
    /// Follow lag rate (1/s) while flying.
    pub fly_follow_speed: f32,
    /// Constant height bias added to the follow target while flying.
    pub fly_height_bias: f32,
    /// Scale applied to the flight pitch when biasing camera height.
    pub fly_direction_height_scale: f32,
    /// Squared distance below which the camera snaps onto its target.
    pub snap_epsilon_sq: f32,
    /// Vertical look limit in degrees (symmetric).
    pub pitch_limit_deg: f32,
}

/// Locomotion and flight configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Multiplier applied to animation root motion while grounded.
    pub movement_speed: f32,
    /// Facing interpolation rate (1/s).
    pub rotation_speed: f32,
    /// How strongly stick input bends the flight direction.
    pub fly_input_strength: f32,
    /// Bank angle in degrees at full lateral deflection.
    pub fly_bank_strength: f32,
    /// Cruise speed while flying (units/s).
    pub flying_base_speed: f32,
    /// Facing/up dot product beyond which vertical steering is blocked.
    pub fly_vertical_clamp: f32,
    /// Upward velocity applied when the launch clip reaches its apex.
    pub launch_impulse: f32,
    /// Forward parameter that must be exceeded to take off.
    pub takeoff_forward_threshold: f32,
    /// Height above the feet the ground ray starts from.
    pub ground_probe_offset: f32,
    /// Length of the downward ground ray.
    pub ground_probe_length: f32,
    /// Length of the forward ray used to detect a landing surface.
    pub landing_probe_length: f32,
    /// Minimum dot(up, normal) for a surface to count as landable.
    pub landing_normal_min_dot: f32,
    /// Squared magnitude under which movement input counts as idle.
    pub move_epsilon_sq: f32,
    /// Physics layer mask the ground and landing rays test against.
    pub ground_mask: u32,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Per-step blend factor of the movement stick low-pass filter.
    pub smoothing: f32,
    /// Gamepad stick deadzone (0 disables shaping).
    pub deadzone: f32,
    /// Invert the camera pitch axis.
    pub invert_pitch: bool,
    /// Keybinding overrides (binding name -> key name).
    pub keybindings: HashMap<String, String>,
}

/// Fixed-step scheduling configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Duration of one fixed simulation step in seconds.
    pub fixed_dt: f32,
    /// Longest frame the accumulator will absorb, in seconds.
    pub max_frame_time: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter override (e.g. "debug", "info,wingrig_player=trace").
    pub log_level: String,
    /// Emit a per-step trace of the rig state.
    pub trace_steps: bool,
}

// --- Default implementations ---

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            rotation_speed: 120.0,
            follow_speed: 4.0,
            fly_follow_speed: 5.0,
            fly_height_bias: -1.25,
            fly_direction_height_scale: 1.5,
            snap_epsilon_sq: 1e-4,
            pitch_limit_deg: 70.0,
        }
    }
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            movement_speed: 1.0,
            rotation_speed: 10.0,
            fly_input_strength: 0.25,
            fly_bank_strength: 50.0,
            flying_base_speed: 6.0,
            fly_vertical_clamp: 0.8,
            launch_impulse: 10.0,
            takeoff_forward_threshold: 0.5,
            ground_probe_offset: 0.1,
            ground_probe_length: 0.3,
            landing_probe_length: 3.0,
            landing_normal_min_dot: 0.8,
            move_epsilon_sq: 1e-3,
            ground_mask: u32::MAX,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.25,
            deadzone: 0.15,
            invert_pitch: false,
            keybindings: HashMap::new(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 0.02,
            max_frame_time: 0.25,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            trace_steps: false,
        }
    }
}

/// Default per-user config directory (`<config dir>/wingrig`), if the platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wingrig"))
}

// --- Validation ---

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be positive and finite",
        })
    }
}

impl RigConfig {
    /// Reject values the rig cannot simulate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("simulation.fixed_dt", self.simulation.fixed_dt)?;
        if !(self.simulation.max_frame_time >= self.simulation.fixed_dt) {
            return Err(ConfigError::Invalid {
                field: "simulation.max_frame_time",
                reason: "must be at least one fixed step",
            });
        }
        if !(self.input.smoothing > 0.0 && self.input.smoothing <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "input.smoothing",
                reason: "must lie in (0, 1]",
            });
        }
        if !(0.0..1.0).contains(&self.input.deadzone) {
            return Err(ConfigError::Invalid {
                field: "input.deadzone",
                reason: "must lie in [0, 1)",
            });
        }
        if !(self.camera.pitch_limit_deg > 0.0 && self.camera.pitch_limit_deg < 90.0) {
            return Err(ConfigError::Invalid {
                field: "camera.pitch_limit_deg",
                reason: "must lie in (0, 90)",
            });
        }

        let camera = &self.camera;
        require_positive("camera.rotation_speed", camera.rotation_speed)?;
        require_positive("camera.follow_speed", camera.follow_speed)?;
        require_positive("camera.fly_follow_speed", camera.fly_follow_speed)?;

        let locomotion = &self.locomotion;
        require_positive("locomotion.movement_speed", locomotion.movement_speed)?;
        require_positive("locomotion.rotation_speed", locomotion.rotation_speed)?;
        require_positive("locomotion.flying_base_speed", locomotion.flying_base_speed)?;
        require_positive("locomotion.ground_probe_length", locomotion.ground_probe_length)?;
        require_positive("locomotion.landing_probe_length", locomotion.landing_probe_length)?;
        Ok(())
    }
}

impl RigConfig {
    /// Path of the config file inside `config_dir`.
    pub fn file_path(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE_NAME)
    }

    fn read_validated(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let parsed: Self = ron::from_str(&text).map_err(ConfigError::ParseError)?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Read `config.ron` from `config_dir`. A missing file is replaced by the
    /// defaults, which are written out so they can be edited.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::file_path(config_dir);
        if !path.exists() {
            let defaults = Self::default();
            defaults.save(config_dir)?;
            log::info!("Wrote default rig config to {}", path.display());
            return Ok(defaults);
        }
        let loaded = Self::read_validated(&path)?;
        log::info!("Read rig config from {}", path.display());
        Ok(loaded)
    }

    /// Write this config to `config_dir`, creating the directory if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;
        let text = ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::new()
                .depth_limit(3)
                .separate_tuple_members(true),
        )
        .map_err(ConfigError::SerializeError)?;
        std::fs::write(Self::file_path(config_dir), text).map_err(ConfigError::WriteError)
    }

    /// Re-read the file. Yields the new config only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = Self::read_validated(&Self::file_path(config_dir))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("Rig config changed on disk");
        Ok(Some(fresh))
    }
}
