//! Keyboard Input Module
//!
//! Tracks which keys are held and which went down during the current frame.
//! Decoupled from any windowing system: the host forwards press/release events
//! with [`KeyboardState::handle_key`] and calls [`KeyboardState::end_frame`]
//! once the frame has been simulated.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Generic key codes, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    Q,
    E,
    Space,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Letter keys (alternate bindings)
    C,
    F,
    R,
    V,
    X,
    Z,

    Escape,
    Enter,
    Tab,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Complete keyboard state for one frame.
///
/// `held` mirrors the physical key state. `pressed` only contains keys whose
/// press event arrived since the last [`end_frame`](Self::end_frame), which is
/// what "key down" queries answer.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Create a new keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or release event.
    ///
    /// Auto-repeat presses of a key that is already held do not count as a
    /// new key-down.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if self.held.insert(key) {
                self.pressed.insert(key);
            }
        } else {
            self.held.remove(&key);
        }
    }

    /// Whether the key is currently held down.
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Whether the key went down during this frame.
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Check if any key is currently held.
    pub fn any_held(&self) -> bool {
        !self.held.is_empty()
    }

    /// Forget this frame's key-down edges. Call once per frame after ticking.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }

    /// Reset all keyboard state.
    pub fn reset(&mut self) {
        self.held.clear();
        self.pressed.clear();
    }
}
