//! Input Module
//!
//! Platform-agnostic input polling for locomotion. The movement controller
//! only sees the [`InputSource`] trait; [`InputState`] is the bundled
//! implementation built from keyboard events and virtual axes.
//!
//! # Example
//!
//! ```rust,ignore
//! use player_move_engine::input::{InputSource, InputState, KeyCode};
//!
//! let mut input = InputState::wasd();
//!
//! // Forward window events
//! input.keyboard.handle_key(KeyCode::W, true);
//!
//! // Each frame
//! input.update(delta_time);
//! let vertical = input.axis("Vertical");
//! // ... tick the controller ...
//! input.end_frame();
//! ```

pub mod axis;
pub mod bindings;
pub mod keyboard;

pub use axis::{AxisSet, VirtualAxis};
pub use bindings::{InputAction, KeyBindings};
pub use keyboard::{KeyCode, KeyboardState};

/// Raw input polling, as a host engine exposes it.
pub trait InputSource {
    /// Value of a named analog axis, in [-1, 1].
    fn axis(&self, name: &str) -> f32;

    /// Whether the key is held this frame.
    fn key_held(&self, key: KeyCode) -> bool;

    /// Whether the key went down this frame.
    fn key_down(&self, key: KeyCode) -> bool;
}

/// Combined keyboard and axis state.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub axes: AxisSet,
}

impl InputState {
    /// Create an input state with no axes registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Input state with the standard "Horizontal"/"Vertical" WASD axes.
    pub fn wasd() -> Self {
        Self {
            keyboard: KeyboardState::new(),
            axes: AxisSet::wasd(),
        }
    }

    /// Advance key-driven axes. Call once per frame before ticking.
    pub fn update(&mut self, dt: f32) {
        self.axes.update(dt, &self.keyboard);
    }

    /// Clear per-frame key-down edges. Call once per frame after ticking.
    pub fn end_frame(&mut self) {
        self.keyboard.end_frame();
    }

    /// Reset all input state to defaults.
    pub fn reset(&mut self) {
        self.keyboard.reset();
        self.axes.reset();
    }
}

impl InputSource for InputState {
    fn axis(&self, name: &str) -> f32 {
        self.axes.value(name)
    }

    fn key_held(&self, key: KeyCode) -> bool {
        self.keyboard.is_held(key)
    }

    fn key_down(&self, key: KeyCode) -> bool {
        self.keyboard.just_pressed(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_state_default() {
        let input = InputState::wasd();
        assert_eq!(input.axis("Horizontal"), 0.0);
        assert_eq!(input.axis("Vertical"), 0.0);
        assert!(!input.key_held(KeyCode::Space));
    }

    #[test]
    fn test_keys_drive_axes() {
        let mut input = InputState::wasd();
        input.keyboard.handle_key(KeyCode::D, true);
        input.update(1.0);
        assert_eq!(input.axis("Horizontal"), 1.0);
        assert_eq!(input.axis("Vertical"), 0.0);
    }

    #[test]
    fn test_key_down_lasts_one_frame() {
        let mut input = InputState::wasd();
        input.keyboard.handle_key(KeyCode::Space, true);
        assert!(input.key_down(KeyCode::Space));

        input.end_frame();
        assert!(!input.key_down(KeyCode::Space));
        assert!(input.key_held(KeyCode::Space));
    }
}
