//! Per-character motion state

use serde::{Deserialize, Serialize};

/// Everything the controller mutates from frame to frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionState {
    /// Current blended movement speed (m/s)
    pub speed: f32,
    /// A jump is in progress
    pub airborne: bool,
    /// Crouch branch active while on the ground
    pub crouched: bool,
    /// Jumps started since the last landing
    pub jump_count: u8,
    /// Seconds since the current ascent began
    pub jump_elapsed: f32,
}

impl MotionState {
    pub fn new() -> Self {
        Self::default()
    }
}
