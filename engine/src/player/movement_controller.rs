//! Player Movement Controller
//!
//! Per-frame locomotion for a capsule character. Movement direction is
//! relative to the body's facing.
//!
//! # Frame Order
//!
//! 1. Read the two input axes and submit `forward * vertical + right * horizontal`
//!    (length capped at 1, scaled by the blended speed) as a `simple_move`
//! 2. While moving on a slope, push the body down so it does not skip off
//!    the surface going downhill
//! 3. Blend the speed toward sprint, crouch or walk speed
//! 4. Start a jump on key press, otherwise advance the jump in progress
//!
//! The blended speed starts at 0, so the first frame with input moves nothing
//! and the character ramps up from there.
//!
//! # Usage
//!
//! ```rust,ignore
//! use player_move_engine::player::{MovementConfig, MovementController};
//!
//! let mut controller = MovementController::new(MovementConfig::default())?;
//!
//! // Each frame:
//! input.update(delta_time);
//! let report = controller.tick(delta_time, &input, &mut body, &scene);
//! input.end_frame();
//! ```

use glam::Vec3;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::{InputAction, InputSource, KeyCode};
use crate::physics::{CharacterBody, SceneQuery};

use super::config::MovementConfig;
use super::crouch::{Stance, StanceController};
use super::jump::{JumpEvent, JumpPhase, JumpSequencer};
use super::state::MotionState;

/// Longest frame the controller will integrate, in seconds
pub const MAX_FRAME_TIME: f32 = 0.1;

/// Which speed the controller is blending toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedMode {
    Walk,
    Sprint,
    Crouch,
}

/// What happened during one [`MovementController::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TickReport {
    /// Horizontal velocity handed to `simple_move` (m/s)
    pub planar_move: Vec3,
    /// Whether the downhill correction was applied
    pub slope_correction: bool,
    pub jump: JumpEvent,
}

/// Drives a [`CharacterBody`] from polled input.
#[derive(Debug, Clone)]
pub struct MovementController {
    config: MovementConfig,
    state: MotionState,
    jump: JumpSequencer,
    stance: StanceController,

    sprint_key: KeyCode,
    crouch_key: KeyCode,
    jump_key: KeyCode,
}

impl MovementController {
    /// Create a controller at rest.
    ///
    /// # Errors
    /// Returns the first problem found by [`MovementConfig::validate`].
    pub fn new(config: MovementConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            sprint_key: config.key_for(InputAction::Sprint),
            crouch_key: config.key_for(InputAction::Crouch),
            jump_key: config.key_for(InputAction::Jump),
            config,
            state: MotionState::new(),
            jump: JumpSequencer::new(),
            stance: StanceController::new(),
        })
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    /// Current blended speed in m/s.
    pub fn speed(&self) -> f32 {
        self.state.speed
    }

    pub fn is_airborne(&self) -> bool {
        self.state.airborne
    }

    pub fn is_crouched(&self) -> bool {
        self.state.crouched
    }

    pub fn jump_count(&self) -> u8 {
        self.state.jump_count
    }

    pub fn jump_phase(&self) -> JumpPhase {
        self.jump.phase()
    }

    pub fn stance(&self) -> Stance {
        self.stance.stance()
    }

    /// Drop back to rest: zero speed, standing, no jump.
    ///
    /// Does not touch the body; use this when respawning.
    pub fn reset(&mut self) {
        self.state = MotionState::new();
        self.jump.reset();
        self.stance.reset();
    }

    /// Horizontal forward direction for a facing angle.
    ///
    /// Yaw is in radians, 0 looks toward -Z.
    pub fn forward_from_yaw(yaw: f32) -> Vec3 {
        Vec3::new(yaw.sin(), 0.0, -yaw.cos())
    }

    /// Horizontal right direction for a facing angle.
    pub fn right_from_yaw(yaw: f32) -> Vec3 {
        // forward x up, for forward = (sin, 0, -cos)
        let forward = Self::forward_from_yaw(yaw);
        Vec3::new(-forward.z, 0.0, forward.x)
    }

    /// Planar velocity for the given axis values at the current speed.
    ///
    /// Diagonal input is no faster than straight input.
    pub fn planar_move(&self, horizontal: f32, vertical: f32, yaw: f32) -> Vec3 {
        let direction =
            Self::forward_from_yaw(yaw) * vertical + Self::right_from_yaw(yaw) * horizontal;
        direction.clamp_length_max(1.0) * self.state.speed
    }

    /// Whether the ground under the body is inclined.
    ///
    /// Always false mid-jump. Otherwise casts straight down from the body
    /// center, `height / 2 * slope_force_ray_length` long.
    pub fn on_slope<B, S>(&self, body: &B, scene: &S) -> bool
    where
        B: CharacterBody + ?Sized,
        S: SceneQuery + ?Sized,
    {
        if self.jump.is_airborne() {
            return false;
        }

        let reach = body.height() / 2.0 * self.config.slope_force_ray_length;
        match scene.raycast(body.position(), Vec3::NEG_Y, reach) {
            Some(hit) if hit.normal != Vec3::Y => {
                trace!("on slope: {:.1} degrees", hit.slope_degrees());
                true
            }
            _ => false,
        }
    }

    /// Speed mode selected by the held keys. Sprint wins over crouch.
    pub fn speed_mode<I>(&self, input: &I) -> SpeedMode
    where
        I: InputSource + ?Sized,
    {
        if input.key_held(self.sprint_key) {
            SpeedMode::Sprint
        } else if input.key_held(self.crouch_key) {
            SpeedMode::Crouch
        } else {
            SpeedMode::Walk
        }
    }

    /// Move the blended speed toward the mode's target.
    ///
    /// Walking blends at the sprint rate.
    fn blend_speed(&mut self, dt: f32, mode: SpeedMode) {
        let (target, rate) = match mode {
            SpeedMode::Sprint => (self.config.sprint_speed, self.config.sprint_lerp_speed),
            SpeedMode::Crouch => (self.config.crouch_speed, self.config.crouch_lerp_speed),
            SpeedMode::Walk => (self.config.walk_speed, self.config.sprint_lerp_speed),
        };
        self.state.speed = lerp(self.state.speed, target, dt * rate);
    }

    /// Run one frame of locomotion.
    ///
    /// # Arguments
    /// * `dt` - Frame time in seconds, capped at [`MAX_FRAME_TIME`]
    /// * `input` - Axis and key state for this frame
    /// * `body` - Capsule to move
    /// * `scene` - World to probe for slopes and headroom
    ///
    /// # Returns
    /// What the controller did this frame
    pub fn tick<I, B, S>(&mut self, dt: f32, input: &I, body: &mut B, scene: &S) -> TickReport
    where
        I: InputSource + ?Sized,
        B: CharacterBody + ?Sized,
        S: SceneQuery + ?Sized,
    {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_TIME) } else { 0.0 };

        let horizontal = axis_value(input, &self.config.horizontal_axis);
        let vertical = axis_value(input, &self.config.vertical_axis);

        let planar_move = self.planar_move(horizontal, vertical, body.yaw());
        body.simple_move(planar_move, dt);

        let mut slope_correction = false;
        if (horizontal != 0.0 || vertical != 0.0) && self.on_slope(body, scene) {
            let push = body.height() / 2.0 * self.config.slope_force * dt;
            body.move_by(Vec3::NEG_Y * push);
            slope_correction = true;
        }

        let mode = self.speed_mode(input);
        self.blend_speed(dt, mode);
        self.stance
            .update(mode == SpeedMode::Crouch, body, scene, &self.config);

        let mut jump = JumpEvent::None;
        if input.key_down(self.jump_key) {
            jump = self.jump.trigger(dt, body, &self.config);
        }
        if jump == JumpEvent::None {
            jump = self.jump.advance(dt, body, &self.config);
        }

        self.state.airborne = self.jump.is_airborne();
        self.state.jump_count = self.jump.jump_count();
        self.state.jump_elapsed = self.jump.elapsed();
        self.state.crouched = self.stance.is_crouching() && !self.state.airborne;

        TickReport {
            planar_move,
            slope_correction,
            jump,
        }
    }
}

/// Axis value clamped to [-1, 1]; NaN reads as 0.
fn axis_value<I>(input: &I, name: &str) -> f32
where
    I: InputSource + ?Sized,
{
    let value = input.axis(name);
    if value.is_nan() { 0.0 } else { value.clamp(-1.0, 1.0) }
}

/// Linear interpolation with `t` clamped to [0, 1].
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}
