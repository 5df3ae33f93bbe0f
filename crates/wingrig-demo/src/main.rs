//! Headless driver that runs a scripted take-off, flight, and landing
//! through the two-rate loop and logs what the rig does.
//!
//! Input goes through the keyboard device with the layout from `config.ron`,
//! so `keybindings` overrides there change which keys the script presses.
//! Configuration can be overridden via CLI flags.
//! Run with `cargo run -p wingrig-demo -- --frames 900 --log-level debug`.

use std::error::Error;

use clap::Parser;
use glam::{Quat, Vec3};
use tracing::{debug, info, warn};
use wingrig_config::{CliArgs, RigConfig, default_config_dir};
use wingrig_input::{InputAxis, InputButton, KeyBindings, KeyChange, KeyboardInput};
use wingrig_physics::add_floor;
use wingrig_player::{
    CharacterBody, CharacterRig, FixedStepLoop, LocomotionState, PhysicsWorld, ProceduralClips,
    RapierBody,
};

/// Seconds of camera orbit at the start of the session.
const ORBIT_FOR: f32 = 0.5;
/// Seconds into the session at which the fly key is tapped to take off.
const TAKE_OFF_AT: f32 = 1.5;
/// Seconds of banked turning once airborne.
const BANK_FOR: f32 = 1.0;
/// Seconds into the session at which the fly key is tapped to land.
const LAND_AT: f32 = 6.0;

/// Keys the script presses, resolved from the configured layout.
#[derive(Debug, Clone, Copy)]
struct ScriptKeys {
    forward: KeyChange,
    bank: KeyChange,
    orbit: KeyChange,
    fly: KeyChange,
}

impl ScriptKeys {
    fn resolve(bindings: &KeyBindings) -> Option<Self> {
        let key = |code| KeyChange {
            code,
            down: true,
            repeat: false,
        };
        Some(Self {
            forward: key(bindings.axis_keys(InputAxis::MoveVertical)?.positive),
            bank: key(bindings.axis_keys(InputAxis::MoveHorizontal)?.positive),
            orbit: key(bindings.axis_keys(InputAxis::CameraYaw)?.positive),
            fly: key(bindings.button_key(InputButton::Fly)?),
        })
    }
}

/// Scripted key presses fed through the keyboard device.
#[derive(Debug)]
struct Script {
    keys: ScriptKeys,
    take_off_sent: bool,
    land_sent: bool,
    airborne_since: Option<f32>,
}

impl Script {
    fn new(keys: ScriptKeys) -> Self {
        Self {
            keys,
            take_off_sent: false,
            land_sent: false,
            airborne_since: None,
        }
    }

    fn drive(&mut self, time: f32, state: LocomotionState, keyboard: &mut KeyboardInput) {
        if state.is_flying() && self.airborne_since.is_none() {
            self.airborne_since = Some(time);
        }

        let banking = matches!(
            (state, self.airborne_since),
            (LocomotionState::Flying { .. }, Some(since)) if time - since < BANK_FOR
        );
        let walking = !state.is_flying()
            && !matches!(state, LocomotionState::Landing { .. })
            && !self.land_sent;

        hold(keyboard, self.keys.orbit, time < ORBIT_FOR);
        hold(keyboard, self.keys.forward, walking);
        hold(keyboard, self.keys.bank, banking);

        if !self.take_off_sent && time >= TAKE_OFF_AT {
            self.take_off_sent = true;
            tap(keyboard, self.keys.fly);
        } else if !self.land_sent && time >= LAND_AT && state.is_flying() {
            self.land_sent = true;
            tap(keyboard, self.keys.fly);
        }
    }
}

fn hold(keyboard: &mut KeyboardInput, key: KeyChange, down: bool) {
    if keyboard.state.held(key.code) != down {
        keyboard.state.apply(KeyChange { down, ..key });
    }
}

/// Press and release within one frame; the press edge survives until
/// the frame ends.
fn tap(keyboard: &mut KeyboardInput, key: KeyChange) {
    debug!(key = ?key.code, "tap");
    keyboard.state.apply(key);
    keyboard.state.apply(KeyChange { down: false, ..key });
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = CliArgs::parse();

    // Resolve config directory; without one the defaults are used as-is.
    let config_dir = args.config.clone().or_else(default_config_dir);

    let mut config = match &config_dir {
        Some(dir) => RigConfig::load_or_create(dir).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}, using defaults");
            RigConfig::default()
        }),
        None => RigConfig::default(),
    };
    config.apply_cli_overrides(&args);
    config.validate()?;

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    wingrig_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    info!(
        frames = args.frames,
        frame_time = args.frame_time,
        fixed_dt = config.simulation.fixed_dt,
        "starting scripted session"
    );

    let mut step_loop = FixedStepLoop::new(&config.simulation);
    let mut keyboard = KeyboardInput::from_config(&config.input);
    let keys = ScriptKeys::resolve(&keyboard.bindings).ok_or("keyboard layout is incomplete")?;
    let mut world = PhysicsWorld::new(step_loop.fixed_dt());
    add_floor(&mut world, 0.0);

    let mut rig = CharacterRig::builder()
        .config(config)
        .camera_pose(Vec3::new(0.0, 2.0, 5.0), Quat::IDENTITY)
        .target(Vec3::ZERO)
        .build()?;
    let mut body = RapierBody::spawn(world, Vec3::ZERO);
    let mut clips = ProceduralClips::default();
    let mut script = Script::new(keys);

    let mut last_state = rig.locomotion().state();
    for frame in 0..args.frames {
        let time = frame as f32 * args.frame_time;
        script.drive(time, rig.locomotion().state(), &mut keyboard);

        rig.frame_update(&keyboard, &mut body, args.frame_time);
        keyboard.state.end_frame();
        step_loop.tick(f64::from(args.frame_time), |dt| {
            rig.fixed_update(&keyboard, &mut body, &mut clips, dt);
        });

        let state = rig.locomotion().state();
        if state != last_state {
            info!(
                time,
                ?state,
                position = ?body.position(),
                camera = ?rig.camera().position(),
                "locomotion state"
            );
            last_state = state;
        }
    }

    if rig.locomotion().state() != LocomotionState::Grounded {
        warn!(state = ?rig.locomotion().state(), "session ended off the ground");
    }
    info!(
        steps = step_loop.update_count(),
        sim_time = step_loop.total_sim_time(),
        position = ?body.position(),
        "session finished"
    );
    Ok(())
}
