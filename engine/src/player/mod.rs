//! Player Module
//!
//! Character locomotion driven once per frame.
//!
//! # Components
//!
//! - [`MovementController`] - Yaw-relative WASD movement with sprint/crouch speed blending
//!   - Pushes the body down while walking on slopes
//!   - Owns the jump and stance state below
//! - [`JumpSequencer`] - Curve-driven jump state machine with optional double jump
//! - [`StanceController`] - Crouch stance with capsule resize and headroom check
//! - [`MovementConfig`] - Tuning loaded from JSON
//! - [`MotionState`] - Speed, airborne, crouched and jump counters

pub mod config;
pub mod crouch;
pub mod jump;
pub mod movement_controller;
pub mod state;

pub use config::{
    MovementConfig,
    WALK_SPEED, SPRINT_SPEED, CROUCH_SPEED, SPRINT_LERP_SPEED, CROUCH_LERP_SPEED,
    SLOPE_FORCE, SLOPE_FORCE_RAY_LENGTH, JUMP_MULTIPLIER,
    STANDING_HEIGHT, CROUCH_HEIGHT, GROUNDED_SLOPE_LIMIT, AIRBORNE_SLOPE_LIMIT,
};
pub use crouch::{Stance, StanceController};
pub use jump::{JumpEvent, JumpPhase, JumpSequencer};
pub use movement_controller::{MovementController, SpeedMode, TickReport, MAX_FRAME_TIME};
pub use state::MotionState;
