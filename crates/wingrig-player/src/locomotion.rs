//! Ground and flight locomotion for a flight-capable character.
//!
//! [`LocomotionState`] is the single source of truth for which mode the
//! character is in; its transition table is a pure function so every rule
//! can be tested without a body. [`LocomotionController`] applies the side
//! effects of each transition to a [`CharacterBody`], mirrors the state into
//! [`AnimParams`] for the clip engine, and queues [`CameraSignal`]s for the
//! camera.

use glam::{Quat, Vec2, Vec3};
use tracing::{debug, info, trace};
use wingrig_config::LocomotionConfig;

use crate::animation::{
    AnimParams, AnimTrigger, AnimTriggers, ClipEvent, ClipFrame, MotionClips, RootMotion,
};
use crate::camera_rig::CameraSignal;
use crate::orientation;
use wingrig_physics::CharacterBody;

/// Locomotion mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocomotionState {
    /// On foot. The character may still be airborne after walking off a
    /// ledge; ground contact is tracked separately.
    #[default]
    Grounded,
    /// Launch clip playing; collider off, gravity cancelled.
    TransitioningToFlight,
    /// Airborne flight.
    Flying { can_land: bool },
    /// Waiting for the landing clip to finish.
    Landing { can_land: bool },
}

/// Inputs that can move the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    /// The fly button went down.
    FlyPressed,
    /// The launch clip reached its apex.
    LaunchApex,
    /// The forward ray found a landable surface.
    LandingSurfaceDetected,
    /// The clip engine armed automatic landing.
    LandingArmed,
    /// The landing clip finished.
    LandingComplete,
}

/// Conditions sampled when evaluating a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionGate {
    pub grounded: bool,
    pub forward: f32,
    pub takeoff_threshold: f32,
}

impl TransitionGate {
    fn fast_enough(&self) -> bool {
        self.forward > self.takeoff_threshold
    }
}

impl LocomotionState {
    /// State reached from `self` on `event`, or `None` when the event is
    /// ignored in this state.
    pub fn next(self, event: StateEvent, gate: TransitionGate) -> Option<LocomotionState> {
        use LocomotionState::*;
        match (self, event) {
            (Grounded | Landing { .. }, StateEvent::FlyPressed)
                if gate.grounded && gate.fast_enough() =>
            {
                Some(TransitioningToFlight)
            }
            (Flying { .. }, StateEvent::FlyPressed) => Some(Landing { can_land: true }),
            (TransitioningToFlight, StateEvent::LaunchApex) if gate.fast_enough() => {
                Some(Flying { can_land: false })
            }
            (Flying { can_land: true }, StateEvent::LandingSurfaceDetected) => {
                Some(Landing { can_land: false })
            }
            (Flying { can_land: false }, StateEvent::LandingArmed) => {
                Some(Flying { can_land: true })
            }
            (Landing { .. }, StateEvent::LandingComplete) => Some(Grounded),
            _ => None,
        }
    }

    pub fn is_flying(self) -> bool {
        matches!(self, LocomotionState::Flying { .. })
    }

    /// Whether the launch clip is playing.
    pub fn flight_entry_armed(self) -> bool {
        self == LocomotionState::TransitioningToFlight
    }

    pub fn can_land(self) -> bool {
        match self {
            LocomotionState::Flying { can_land } | LocomotionState::Landing { can_land } => {
                can_land
            }
            _ => false,
        }
    }
}

/// Idle flourish to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleVariant {
    One,
    Two,
    Three,
}

impl IdleVariant {
    fn trigger(self) -> AnimTrigger {
        match self {
            IdleVariant::One => AnimTrigger::Idle1,
            IdleVariant::Two => AnimTrigger::Idle2,
            IdleVariant::Three => AnimTrigger::Idle3,
        }
    }
}

/// Vertical velocity multiplier for a given `dot(forward, down)`.
///
/// Facing straight down doubles vertical speed; climbing never drops below
/// half speed.
pub fn vertical_speed_scale(height_strength: f32) -> f32 {
    (height_strength + 1.0).max(0.5)
}

/// The flight-capable character state machine.
#[derive(Debug, Clone)]
pub struct LocomotionController {
    state: LocomotionState,
    params: AnimParams,
    triggers: AnimTriggers,
    camera_signals: Vec<CameraSignal>,
    config: LocomotionConfig,
}

impl LocomotionController {
    pub fn new(config: LocomotionConfig) -> Self {
        Self {
            state: LocomotionState::Grounded,
            params: AnimParams::default(),
            triggers: AnimTriggers::default(),
            camera_signals: Vec::new(),
            config,
        }
    }

    pub fn state(&self) -> LocomotionState {
        self.state
    }

    /// Parameters for the clip engine.
    pub fn anim_params(&self) -> &AnimParams {
        &self.params
    }

    /// Run the clip engine against the current parameters and triggers.
    pub fn evaluate_clips(
        &mut self,
        clips: &mut impl MotionClips,
        facing: Quat,
        dt: f32,
    ) -> ClipFrame {
        clips.evaluate(&self.params, &mut self.triggers, facing, dt)
    }

    pub fn triggers(&self) -> &AnimTriggers {
        &self.triggers
    }

    /// Forward speed parameter in `[0, 1]`.
    pub fn forward(&self) -> f32 {
        self.params.forward
    }

    /// Result of the last ground ray cast.
    pub fn is_grounded(&self) -> bool {
        self.params.is_grounded
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Take the camera notifications queued since the last call.
    ///
    /// At most one [`CameraSignal::FlightDescent`] is pending at a time,
    /// carrying the latest value.
    pub fn drain_camera_signals(&mut self) -> Vec<CameraSignal> {
        std::mem::take(&mut self.camera_signals)
    }

    fn gate(&self) -> TransitionGate {
        TransitionGate {
            grounded: self.params.is_grounded,
            forward: self.params.forward,
            takeoff_threshold: self.config.takeoff_forward_threshold,
        }
    }

    fn set_state(&mut self, state: LocomotionState) {
        if state != self.state {
            debug!(from = ?self.state, to = ?state, "locomotion state change");
        }
        self.state = state;
        self.params.flying = state.is_flying();
        self.params.can_land = state.can_land();
    }

    fn reset_facing(&self, body: &mut impl CharacterBody) {
        body.set_rotation(orientation::level_heading(body.rotation()));
    }

    /// Apply one step of movement input.
    ///
    /// `direction` is the camera-relative ground direction and `joystick` the
    /// smoothed stick it was built from.
    pub fn move_character(
        &mut self,
        body: &mut impl CharacterBody,
        direction: Vec3,
        joystick: Vec2,
        dt: f32,
    ) {
        if direction.length_squared() <= self.config.move_epsilon_sq {
            self.params.forward = 0.0;
            return;
        }

        if self.state.is_flying() {
            self.steer_flight(body, joystick, dt);
        } else if self.params.is_grounded && !self.state.flight_entry_armed() {
            let rotation = orientation::rotate_towards(
                body.rotation(),
                direction,
                self.config.rotation_speed * dt,
            );
            body.set_rotation(rotation);
        }

        self.params.forward = direction.length().min(1.0);
    }

    fn steer_flight(&mut self, body: &mut impl CharacterBody, joystick: Vec2, dt: f32) {
        self.params.flying_dive = joystick.y;

        let rotation = body.rotation();
        let forward = orientation::forward(rotation);
        let clamp = self.config.fly_vertical_clamp;
        let facing_up = forward.dot(Vec3::Y);
        let vertical_gate = if (facing_up <= clamp && joystick.y > 0.0)
            || (facing_up >= -clamp && joystick.y < 0.0)
        {
            1.0
        } else {
            0.0
        };

        let strength = self.config.fly_input_strength;
        let horizontal = orientation::flatten(orientation::right(rotation)) * joystick.x * strength;
        let vertical = orientation::up(rotation) * joystick.y * strength * vertical_gate;
        let steered = orientation::rotate_towards(
            rotation,
            forward + horizontal + vertical,
            self.config.rotation_speed * dt,
        );

        let bank = -joystick.x * self.config.fly_bank_strength;
        body.set_rotation(orientation::with_roll(steered, bank));
        trace!(?joystick, vertical_gate, bank, "flight steering");
    }

    /// Fly button handler: start a take-off from the ground, or land while
    /// flying. Presses during the launch clip are ignored.
    pub fn fly(&mut self, body: &mut impl CharacterBody) {
        match self.state.next(StateEvent::FlyPressed, self.gate()) {
            Some(LocomotionState::TransitioningToFlight) => {
                self.triggers.set(AnimTrigger::InitializeFly);
                self.triggers.reset(AnimTrigger::Land);
                body.set_collider_enabled(false);
                self.set_state(LocomotionState::TransitioningToFlight);
                info!(forward = self.params.forward, "take-off armed");
            }
            Some(next @ LocomotionState::Landing { .. }) => {
                self.triggers.reset(AnimTrigger::InitializeFly);
                self.triggers.set(AnimTrigger::Land);
                self.reset_facing(body);
                self.camera_signals.push(CameraSignal::FlyMode(false));
                self.set_state(next);
                info!("landing requested");
            }
            _ => debug!(state = ?self.state, forward = self.params.forward, "fly press ignored"),
        }
    }

    /// Launch apex: leave the launch clip and start flying.
    pub fn enable_fly_mode(&mut self, body: &mut impl CharacterBody) {
        let Some(next) = self.state.next(StateEvent::LaunchApex, self.gate()) else {
            trace!(state = ?self.state, "launch apex ignored");
            return;
        };
        body.set_collider_enabled(true);
        let mut velocity = body.linear_velocity();
        velocity.y = self.config.launch_impulse;
        body.set_linear_velocity(velocity);
        self.triggers.reset(AnimTrigger::Land);
        self.camera_signals.push(CameraSignal::FlyMode(true));
        self.set_state(next);
        info!("launched into flight");
    }

    pub fn enable_collider(&mut self, body: &mut impl CharacterBody) {
        body.set_collider_enabled(true);
    }

    /// Allow the forward ray to land the character automatically.
    pub fn arm_landing(&mut self) {
        if let Some(next) = self.state.next(StateEvent::LandingArmed, self.gate()) {
            self.set_state(next);
            debug!("automatic landing armed");
        }
    }

    /// Landing clip finished.
    pub fn complete_landing(&mut self) {
        if let Some(next) = self.state.next(StateEvent::LandingComplete, self.gate()) {
            self.set_state(next);
            info!("landed");
        }
    }

    /// Start an idle flourish, cancelling any other pending one.
    pub fn play_idle(&mut self, variant: IdleVariant) {
        for trigger in [AnimTrigger::Idle1, AnimTrigger::Idle2, AnimTrigger::Idle3] {
            self.triggers.reset(trigger);
        }
        self.triggers.set(variant.trigger());
    }

    /// Dispatch an event raised by the clip engine.
    pub fn handle_clip_event(&mut self, body: &mut impl CharacterBody, event: ClipEvent) {
        match event {
            ClipEvent::LaunchApex => self.enable_fly_mode(body),
            ClipEvent::EnableCollider => self.enable_collider(body),
            ClipEvent::LandingArmed => self.arm_landing(),
            ClipEvent::LandingComplete => self.complete_landing(),
        }
    }

    /// Per-step ground check, flight physics and launch hover.
    pub fn physics_tick(&mut self, body: &mut impl CharacterBody) {
        let origin = body.position() + Vec3::Y * self.config.ground_probe_offset;
        self.params.is_grounded = body
            .cast_ray(
                origin,
                Vec3::NEG_Y,
                self.config.ground_probe_length,
                self.config.ground_mask,
            )
            .is_some();

        if self.state.is_flying() {
            self.flight_physics(body);
        }

        if self.state.flight_entry_armed() {
            body.add_acceleration(-body.gravity());
        }
    }

    fn flight_physics(&mut self, body: &mut impl CharacterBody) {
        let forward = orientation::forward(body.rotation());
        let height_strength = forward.dot(Vec3::NEG_Y);
        self.camera_signals
            .retain(|signal| !matches!(signal, CameraSignal::FlightDescent(_)));
        self.camera_signals
            .push(CameraSignal::FlightDescent(height_strength));

        let mut velocity = forward * self.config.flying_base_speed;
        velocity.y *= vertical_speed_scale(height_strength);
        body.set_linear_velocity(velocity);
        body.add_acceleration(-body.gravity());

        if self.state.can_land() {
            self.detect_landing_surface(body, forward);
        }
    }

    fn detect_landing_surface(&mut self, body: &mut impl CharacterBody, forward: Vec3) {
        let hit = body.cast_ray(
            body.position(),
            forward,
            self.config.landing_probe_length,
            self.config.ground_mask,
        );
        let Some(hit) = hit else {
            return;
        };
        if hit.normal.dot(Vec3::Y) <= self.config.landing_normal_min_dot {
            return;
        }
        if let Some(next) = self
            .state
            .next(StateEvent::LandingSurfaceDetected, self.gate())
        {
            self.triggers.set(AnimTrigger::Land);
            self.reset_facing(body);
            self.camera_signals.push(CameraSignal::FlyMode(false));
            self.set_state(next);
            info!(distance = hit.distance, "landing surface detected");
        }
    }

    /// Turn the clip engine's root motion into body velocity.
    ///
    /// On the ground the horizontal velocity comes from the clips while the
    /// vertical velocity is left to physics. During the launch clip the clip
    /// motion is used as is.
    pub fn resolve_velocity(&mut self, body: &mut impl CharacterBody, root: RootMotion, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let current = body.linear_velocity();
        let mut velocity = current;

        if self.params.is_grounded {
            velocity = root.delta_position * self.config.movement_speed / dt;
            velocity.y = current.y;
        }
        if self.state.flight_entry_armed() {
            velocity = root.delta_position / dt;
        }

        body.set_linear_velocity(velocity);
        body.set_angular_velocity(root.angular_velocity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wingrig_physics::{PhysicsWorld, RapierBody, add_floor};

    const DT: f32 = 0.02;

    fn gate(grounded: bool, forward: f32) -> TransitionGate {
        TransitionGate {
            grounded,
            forward,
            takeoff_threshold: 0.5,
        }
    }

    fn standing_body() -> RapierBody {
        let mut world = PhysicsWorld::new(DT);
        add_floor(&mut world, 0.0);
        RapierBody::spawn(world, Vec3::ZERO)
    }

    fn airborne_body(height: f32) -> RapierBody {
        RapierBody::spawn(PhysicsWorld::new(DT), Vec3::new(0.0, height, 0.0))
    }

    fn grounded_controller(body: &mut RapierBody, forward: f32) -> LocomotionController {
        let mut controller = LocomotionController::new(LocomotionConfig::default());
        controller.physics_tick(body);
        assert!(controller.is_grounded());
        controller.params.forward = forward;
        controller
    }

    #[test]
    fn test_transition_table() {
        use LocomotionState::*;
        let fast = gate(true, 0.8);
        let slow = gate(true, 0.3);

        assert_eq!(
            Grounded.next(StateEvent::FlyPressed, fast),
            Some(TransitioningToFlight)
        );
        assert_eq!(Grounded.next(StateEvent::FlyPressed, slow), None);
        assert_eq!(Grounded.next(StateEvent::FlyPressed, gate(false, 0.8)), None);
        assert_eq!(TransitioningToFlight.next(StateEvent::FlyPressed, fast), None);
        assert_eq!(
            TransitioningToFlight.next(StateEvent::LaunchApex, fast),
            Some(Flying { can_land: false })
        );
        assert_eq!(TransitioningToFlight.next(StateEvent::LaunchApex, slow), None);
        assert_eq!(
            Flying { can_land: false }.next(StateEvent::FlyPressed, slow),
            Some(Landing { can_land: true })
        );
        assert_eq!(
            Flying { can_land: false }.next(StateEvent::LandingSurfaceDetected, fast),
            None
        );
        assert_eq!(
            Flying { can_land: true }.next(StateEvent::LandingSurfaceDetected, fast),
            Some(Landing { can_land: false })
        );
        assert_eq!(
            Flying { can_land: false }.next(StateEvent::LandingArmed, fast),
            Some(Flying { can_land: true })
        );
        assert_eq!(
            Landing { can_land: true }.next(StateEvent::LandingComplete, slow),
            Some(Grounded)
        );
        assert_eq!(Grounded.next(StateEvent::LaunchApex, fast), None);
        assert_eq!(
            Landing { can_land: false }.next(StateEvent::FlyPressed, fast),
            Some(TransitioningToFlight)
        );
    }

    #[test]
    fn test_vertical_speed_scale() {
        assert_eq!(vertical_speed_scale(1.0), 2.0);
        assert_eq!(vertical_speed_scale(-1.0), 0.5);
        assert_eq!(vertical_speed_scale(0.0), 1.0);
    }

    #[test]
    fn test_move_sets_forward_and_turns() {
        let mut body = standing_body();
        let mut controller = grounded_controller(&mut body, 0.0);
        controller.move_character(&mut body, Vec3::new(0.6, 0.0, 0.0), Vec2::new(0.6, 0.0), DT);
        assert!((controller.forward() - 0.6).abs() < 1e-6);
        assert!(orientation::forward(body.rotation()).x > 0.0);

        controller.move_character(&mut body, Vec3::new(2.0, 0.0, 0.0), Vec2::X, DT);
        assert_eq!(controller.forward(), 1.0);

        controller.move_character(&mut body, Vec3::new(0.01, 0.0, 0.0), Vec2::ZERO, DT);
        assert_eq!(controller.forward(), 0.0);
    }

    #[test]
    fn test_move_does_not_turn_during_launch() {
        let mut body = standing_body();
        let mut controller = grounded_controller(&mut body, 0.8);
        controller.fly(&mut body);
        controller.move_character(&mut body, Vec3::X, Vec2::X, DT);
        assert!(body.rotation().angle_between(Quat::IDENTITY) < 1e-6);
    }

    #[test]
    fn test_fly_press_arms_take_off() {
        let mut body = standing_body();
        let mut controller = grounded_controller(&mut body, 0.8);
        controller.fly(&mut body);
        assert_eq!(controller.state(), LocomotionState::TransitioningToFlight);
        assert!(!body.collider_enabled());
        assert!(controller.triggers().is_set(AnimTrigger::InitializeFly));
        assert!(!controller.anim_params().can_land);
    }

    #[test]
    fn test_fly_press_too_slow_is_ignored() {
        let mut body = standing_body();
        let mut controller = grounded_controller(&mut body, 0.5);
        controller.fly(&mut body);
        assert_eq!(controller.state(), LocomotionState::Grounded);
        assert!(body.collider_enabled());
    }

    #[test]
    fn test_enable_fly_mode_requires_armed_and_speed() {
        let mut body = standing_body();
        let mut controller = grounded_controller(&mut body, 0.8);
        controller.enable_fly_mode(&mut body);
        assert_eq!(controller.state(), LocomotionState::Grounded);
        assert!(body.linear_velocity().length() < 1e-4);
        assert!(controller.drain_camera_signals().is_empty());

        controller.fly(&mut body);
        controller.params.forward = 0.4;
        controller.enable_fly_mode(&mut body);
        assert_eq!(controller.state(), LocomotionState::TransitioningToFlight);
        assert!(body.linear_velocity().length() < 1e-4);
        assert!(!body.collider_enabled());
    }

    #[test]
    fn test_launch_hover_cancels_gravity() {
        let mut body = standing_body();
        let mut controller = grounded_controller(&mut body, 0.8);
        controller.fly(&mut body);
        controller.physics_tick(&mut body);
        body.step(DT);
        assert!(body.linear_velocity().length() < 1e-4);
    }

    #[test]
    fn test_flight_velocity_follows_facing() {
        let mut body = airborne_body(50.0);
        body.set_rotation(orientation::look_rotation(Vec3::new(0.0, -1.0, -1.0), Vec3::Y));
        let mut controller = LocomotionController::new(LocomotionConfig::default());
        controller.set_state(LocomotionState::Flying { can_land: false });

        controller.physics_tick(&mut body);
        let forward = orientation::forward(body.rotation());
        let hs = forward.dot(Vec3::NEG_Y);
        let expected = Vec3::new(forward.x * 6.0, forward.y * 6.0 * (hs + 1.0), forward.z * 6.0);
        assert!((body.linear_velocity() - expected).length() < 1e-4);

        let signals = controller.drain_camera_signals();
        assert_eq!(signals.len(), 1);
        let CameraSignal::FlightDescent(reported) = signals[0] else {
            panic!("expected descent signal, got {signals:?}");
        };
        assert!((reported - hs).abs() < 1e-6);

        body.step(DT);
        assert!((body.linear_velocity() - expected).length() < 1e-4);
    }

    #[test]
    fn test_undrained_descent_keeps_latest_value() {
        let mut body = airborne_body(50.0);
        let mut controller = LocomotionController::new(LocomotionConfig::default());
        controller.set_state(LocomotionState::Flying { can_land: false });

        for _ in 0..20 {
            controller.physics_tick(&mut body);
            body.step(DT);
        }
        body.set_rotation(orientation::look_rotation(Vec3::new(0.0, -1.0, -1.0), Vec3::Y));
        controller.physics_tick(&mut body);

        let signals = controller.drain_camera_signals();
        assert_eq!(signals.len(), 1);
        let CameraSignal::FlightDescent(latest) = signals[0] else {
            panic!("expected descent signal, got {signals:?}");
        };
        assert!((latest - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-4);
    }

    #[test]
    fn test_steering_banks_and_blocks_vertical_past_clamp() {
        let mut body = airborne_body(50.0);
        let mut controller = LocomotionController::new(LocomotionConfig::default());
        controller.set_state(LocomotionState::Flying { can_land: false });

        controller.move_character(&mut body, Vec3::NEG_Z, Vec2::new(1.0, 0.0), DT);
        assert!((orientation::roll_degrees(body.rotation()) + 50.0).abs() < 1e-2);
        assert!(orientation::forward(body.rotation()).x > 0.0);

        // Nearly vertical climb: further climb input is gated off.
        let climb = orientation::look_rotation(Vec3::new(0.0, 0.95, -0.05), Vec3::Y);
        body.set_rotation(climb);
        let before = orientation::forward(climb).y;
        controller.move_character(&mut body, Vec3::NEG_Z, Vec2::new(0.0, 1.0), DT);
        assert!(orientation::forward(body.rotation()).y <= before + 1e-4);
        assert_eq!(controller.anim_params().flying_dive, 1.0);
    }

    #[test]
    fn test_fly_press_while_flying_lands() {
        let mut body = airborne_body(20.0);
        body.set_rotation(orientation::look_rotation(Vec3::new(1.0, -0.5, 0.0), Vec3::Y));
        let mut controller = LocomotionController::new(LocomotionConfig::default());
        controller.set_state(LocomotionState::Flying { can_land: false });

        controller.fly(&mut body);
        assert_eq!(controller.state(), LocomotionState::Landing { can_land: true });
        assert!(controller.triggers().is_set(AnimTrigger::Land));
        assert!((orientation::forward(body.rotation()) - Vec3::X).length() < 1e-4);
        assert_eq!(
            controller.drain_camera_signals(),
            vec![CameraSignal::FlyMode(false)]
        );
    }

    #[test]
    fn test_landing_completes_to_grounded() {
        let mut controller = LocomotionController::new(LocomotionConfig::default());
        controller.set_state(LocomotionState::Landing { can_land: true });
        controller.complete_landing();
        assert_eq!(controller.state(), LocomotionState::Grounded);
        assert!(!controller.anim_params().can_land);
    }

    #[test]
    fn test_play_idle_replaces_pending_idle() {
        let mut controller = LocomotionController::new(LocomotionConfig::default());
        controller.play_idle(IdleVariant::One);
        controller.play_idle(IdleVariant::Three);
        assert!(!controller.triggers().is_set(AnimTrigger::Idle1));
        assert!(controller.triggers().is_set(AnimTrigger::Idle3));
    }

    #[test]
    fn test_resolve_velocity_grounded_keeps_vertical() {
        let mut body = standing_body();
        let mut controller = grounded_controller(&mut body, 1.0);
        body.set_linear_velocity(Vec3::new(0.0, -0.5, 0.0));
        let root = RootMotion {
            delta_position: Vec3::new(0.06, 0.01, 0.0),
            angular_velocity: Vec3::new(0.0, 0.3, 0.0),
        };
        controller.resolve_velocity(&mut body, root, DT);
        assert!((body.linear_velocity() - Vec3::new(3.0, -0.5, 0.0)).length() < 1e-5);
        assert_eq!(body.angular_velocity(), Vec3::new(0.0, 0.3, 0.0));
    }

    #[test]
    fn test_resolve_velocity_during_launch_uses_clip_motion() {
        let mut body = standing_body();
        let mut controller = grounded_controller(&mut body, 0.8);
        controller.fly(&mut body);
        let root = RootMotion {
            delta_position: Vec3::new(0.0, 0.04, -0.02),
            angular_velocity: Vec3::ZERO,
        };
        controller.resolve_velocity(&mut body, root, DT);
        assert!((body.linear_velocity() - Vec3::new(0.0, 2.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_resolve_velocity_airborne_keeps_physics() {
        let mut body = airborne_body(10.0);
        body.set_linear_velocity(Vec3::new(1.0, -3.0, 0.0));
        let mut controller = LocomotionController::new(LocomotionConfig::default());
        controller.physics_tick(&mut body);
        assert!(!controller.is_grounded());
        controller.resolve_velocity(&mut body, RootMotion::default(), DT);
        assert_eq!(body.linear_velocity(), Vec3::new(1.0, -3.0, 0.0));
    }
}
