//! Jump Sequencer
//!
//! Drives a jump frame by frame. A trigger lifts the body by the first curve
//! sample immediately; every later frame either lands or applies the next
//! sample of the force curve as an upward displacement.
//!
//! # Phases
//!
//! ```text
//! Idle --trigger--> Airborne --grounded or ceiling--> Landed --advance--> Idle
//!                    ^    |
//!                    +----+ trigger while jump_count < max_jump_count
//! ```
//!
//! While airborne the body's slope limit is raised so the capsule can mount
//! ledges it would otherwise slide off. Landing restores it and clears the
//! jump counter.

use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::physics::{CharacterBody, CollisionFlags};

use super::config::MovementConfig;

/// Where the sequencer is in a jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpPhase {
    /// No jump running
    #[default]
    Idle,
    /// Applying force each frame
    Airborne,
    /// Landed this frame; returns to idle on the next advance
    Landed,
}

/// What the sequencer did this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpEvent {
    #[default]
    None,
    /// A jump began; `count` is the jump number since the last landing
    Started { count: u8 },
    Landed,
}

/// Per-character jump state machine.
#[derive(Debug, Clone, Default)]
pub struct JumpSequencer {
    phase: JumpPhase,
    jump_count: u8,
    elapsed: f32,
    /// Flags from this sequencer's own last lift
    last_lift: CollisionFlags,
}

impl JumpSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> JumpPhase {
        self.phase
    }

    pub fn is_airborne(&self) -> bool {
        self.phase == JumpPhase::Airborne
    }

    /// Jumps started since the last landing.
    pub fn jump_count(&self) -> u8 {
        self.jump_count
    }

    /// Seconds since the current ascent began.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Whether a jump press would be accepted now.
    pub fn can_trigger(&self, max_jump_count: u8) -> bool {
        !self.is_airborne() || self.jump_count < max_jump_count
    }

    /// Start a jump, or restart the ascent for a double jump.
    ///
    /// Does nothing when the jump budget is spent. On success the first lift
    /// is applied before returning.
    ///
    /// # Returns
    /// [`JumpEvent::Started`] if a jump began, [`JumpEvent::None`] otherwise
    pub fn trigger<B>(&mut self, dt: f32, body: &mut B, config: &MovementConfig) -> JumpEvent
    where
        B: CharacterBody + ?Sized,
    {
        if !self.can_trigger(config.max_jump_count) {
            return JumpEvent::None;
        }

        self.phase = JumpPhase::Airborne;
        self.jump_count += 1;
        self.elapsed = 0.0;
        body.set_slope_limit(config.airborne_slope_limit);
        debug!("jump {} started", self.jump_count);

        self.lift(dt, body, config);
        JumpEvent::Started {
            count: self.jump_count,
        }
    }

    /// Advance by one frame.
    pub fn advance<B>(&mut self, dt: f32, body: &mut B, config: &MovementConfig) -> JumpEvent
    where
        B: CharacterBody + ?Sized,
    {
        match self.phase {
            JumpPhase::Idle => JumpEvent::None,
            JumpPhase::Landed => {
                self.phase = JumpPhase::Idle;
                JumpEvent::None
            }
            JumpPhase::Airborne => {
                let hit_ceiling = body.collision_flags().contains(CollisionFlags::ABOVE)
                    || self.last_lift.contains(CollisionFlags::ABOVE);
                if body.is_grounded() || hit_ceiling {
                    self.land(body, config);
                    JumpEvent::Landed
                } else {
                    self.lift(dt, body, config);
                    JumpEvent::None
                }
            }
        }
    }

    /// Drop any jump in progress without touching a body.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn lift<B>(&mut self, dt: f32, body: &mut B, config: &MovementConfig)
    where
        B: CharacterBody + ?Sized,
    {
        let force = config.jump_curve.evaluate(self.elapsed);
        self.last_lift = body.move_by(Vec3::Y * force * config.jump_multiplier * dt);
        self.elapsed += dt;
    }

    fn land<B>(&mut self, body: &mut B, config: &MovementConfig)
    where
        B: CharacterBody + ?Sized,
    {
        body.set_slope_limit(config.grounded_slope_limit);
        debug!("landed after {:.3}s, {} jump(s)", self.elapsed, self.jump_count);

        self.phase = JumpPhase::Landed;
        self.jump_count = 0;
        self.elapsed = 0.0;
        self.last_lift = CollisionFlags::NONE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::ForceCurve;

    const DT: f32 = 1.0 / 60.0;
    const EPSILON: f32 = 0.0001;

    /// Body whose ground contact is set by the test.
    #[derive(Default)]
    struct ManualBody {
        grounded: bool,
        slope_limit: f32,
        flags: CollisionFlags,
        lifts: Vec<Vec3>,
    }

    impl CharacterBody for ManualBody {
        fn position(&self) -> Vec3 {
            Vec3::ZERO
        }
        fn yaw(&self) -> f32 {
            0.0
        }
        fn height(&self) -> f32 {
            2.0
        }
        fn set_height(&mut self, _height: f32) {}
        fn is_grounded(&self) -> bool {
            self.grounded
        }
        fn slope_limit(&self) -> f32 {
            self.slope_limit
        }
        fn set_slope_limit(&mut self, degrees: f32) {
            self.slope_limit = degrees;
        }
        fn simple_move(&mut self, _velocity: Vec3, _dt: f32) -> CollisionFlags {
            self.flags
        }
        fn move_by(&mut self, displacement: Vec3) -> CollisionFlags {
            self.lifts.push(displacement);
            self.grounded = false;
            self.flags
        }
        fn collision_flags(&self) -> CollisionFlags {
            self.flags
        }
    }

    fn grounded_body() -> ManualBody {
        ManualBody {
            grounded: true,
            slope_limit: 45.0,
            ..Default::default()
        }
    }

    fn constant_config(max_jump_count: u8) -> MovementConfig {
        MovementConfig {
            jump_curve: ForceCurve::constant(1.0),
            jump_multiplier: 6.0,
            max_jump_count,
            ..MovementConfig::default()
        }
    }

    #[test]
    fn test_idle_advance_is_noop() {
        let mut jump = JumpSequencer::new();
        let mut body = grounded_body();
        assert_eq!(jump.advance(DT, &mut body, &constant_config(1)), JumpEvent::None);
        assert!(body.lifts.is_empty());
        assert_eq!(jump.phase(), JumpPhase::Idle);
    }

    #[test]
    fn test_trigger_lifts_immediately() {
        let mut jump = JumpSequencer::new();
        let mut body = grounded_body();
        let config = constant_config(1);

        let event = jump.trigger(DT, &mut body, &config);

        assert_eq!(event, JumpEvent::Started { count: 1 });
        assert!(jump.is_airborne());
        assert_eq!(body.slope_limit, 90.0);
        assert_eq!(body.lifts.len(), 1);
        assert!((body.lifts[0].y - 6.0 * DT).abs() < EPSILON);
        assert!((jump.elapsed() - DT).abs() < EPSILON);
    }

    #[test]
    fn test_lands_when_grounded() {
        let mut jump = JumpSequencer::new();
        let mut body = grounded_body();
        let config = constant_config(1);

        jump.trigger(DT, &mut body, &config);
        jump.advance(DT, &mut body, &config);
        assert_eq!(body.slope_limit, 90.0);

        body.grounded = true;
        assert_eq!(jump.advance(DT, &mut body, &config), JumpEvent::Landed);
        assert_eq!(jump.phase(), JumpPhase::Landed);
        assert_eq!(jump.jump_count(), 0);
        assert_eq!(body.slope_limit, 45.0);

        jump.advance(DT, &mut body, &config);
        assert_eq!(jump.phase(), JumpPhase::Idle);
    }

    #[test]
    fn test_ceiling_ends_jump() {
        let mut jump = JumpSequencer::new();
        let mut body = grounded_body();
        let config = constant_config(1);

        jump.trigger(DT, &mut body, &config);
        body.flags = CollisionFlags::ABOVE | CollisionFlags::SIDES;
        assert_eq!(jump.advance(DT, &mut body, &config), JumpEvent::Landed);
        assert!(!jump.is_airborne());
    }

    #[test]
    fn test_single_jump_ignores_air_trigger() {
        let mut jump = JumpSequencer::new();
        let mut body = grounded_body();
        let config = constant_config(1);

        jump.trigger(DT, &mut body, &config);
        jump.advance(DT, &mut body, &config);
        let elapsed = jump.elapsed();
        let lifts = body.lifts.len();

        assert_eq!(jump.trigger(DT, &mut body, &config), JumpEvent::None);
        assert_eq!(jump.jump_count(), 1);
        assert_eq!(jump.elapsed(), elapsed);
        assert_eq!(body.lifts.len(), lifts);
    }

    #[test]
    fn test_double_jump_restarts_ascent() {
        let mut jump = JumpSequencer::new();
        let mut body = grounded_body();
        let config = constant_config(2);

        jump.trigger(DT, &mut body, &config);
        for _ in 0..10 {
            jump.advance(DT, &mut body, &config);
        }
        assert!(jump.elapsed() > 10.0 * DT);

        assert_eq!(jump.trigger(DT, &mut body, &config), JumpEvent::Started { count: 2 });
        assert!((jump.elapsed() - DT).abs() < EPSILON);

        // Budget spent until landing
        assert_eq!(jump.trigger(DT, &mut body, &config), JumpEvent::None);
        assert_eq!(jump.jump_count(), 2);

        body.grounded = true;
        jump.advance(DT, &mut body, &config);
        assert_eq!(jump.jump_count(), 0);
        assert!(jump.can_trigger(config.max_jump_count));
    }

    #[test]
    fn test_zero_multiplier_gives_no_lift() {
        let mut jump = JumpSequencer::new();
        let mut body = grounded_body();
        let config = MovementConfig {
            jump_multiplier: 0.0,
            ..MovementConfig::default()
        };

        jump.trigger(DT, &mut body, &config);
        assert_eq!(body.lifts[0], Vec3::ZERO);
    }
}
