//! Virtual Axes
//!
//! Named analog axes in [-1, 1] built from a pair of keys, the way desktop
//! engines expose "Horizontal" and "Vertical" to gameplay code.
//!
//! A key-driven axis does not jump straight to +-1: it ramps toward the held
//! direction at `sensitivity` units per second and drifts back to zero at
//! `gravity` units per second once both keys are released. Axes can also be
//! overridden with a raw value (gamepad sticks, scripted input).

use std::collections::HashMap;

use super::{KeyCode, KeyboardState};

/// Default ramp-up speed in units per second
pub const DEFAULT_SENSITIVITY: f32 = 3.0;

/// Default return-to-zero speed in units per second
pub const DEFAULT_GRAVITY: f32 = 3.0;

/// A single key-driven analog axis.
#[derive(Debug, Clone)]
pub struct VirtualAxis {
    /// Key that pushes the axis toward +1
    pub positive: KeyCode,
    /// Key that pushes the axis toward -1
    pub negative: KeyCode,
    /// Ramp speed toward the held direction (units/s)
    pub sensitivity: f32,
    /// Return speed toward zero with no key held (units/s)
    pub gravity: f32,
    /// Jump to zero first when the opposite key is pressed
    pub snap: bool,
    value: f32,
}

impl VirtualAxis {
    /// Create an axis with default sensitivity, gravity and snapping.
    pub fn new(positive: KeyCode, negative: KeyCode) -> Self {
        Self {
            positive,
            negative,
            sensitivity: DEFAULT_SENSITIVITY,
            gravity: DEFAULT_GRAVITY,
            snap: true,
            value: 0.0,
        }
    }

    /// Current axis value in [-1, 1].
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Advance the axis by one frame.
    pub fn update(&mut self, dt: f32, keyboard: &KeyboardState) -> f32 {
        let positive = keyboard.is_held(self.positive) as i32;
        let negative = keyboard.is_held(self.negative) as i32;
        let target = (positive - negative) as f32;

        if target == 0.0 {
            self.value = move_towards(self.value, 0.0, self.gravity * dt);
        } else {
            if self.snap && self.value * target < 0.0 {
                self.value = 0.0;
            }
            self.value = move_towards(self.value, target, self.sensitivity * dt);
        }

        self.value
    }

    /// Snap the axis back to zero.
    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

/// Named collection of axes.
///
/// Raw overrides take precedence over key-driven values until cleared.
#[derive(Debug, Clone, Default)]
pub struct AxisSet {
    axes: HashMap<String, VirtualAxis>,
    overrides: HashMap<String, f32>,
}

impl AxisSet {
    /// Create an empty axis set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard WASD + arrow layout: "Horizontal" (D/A) and "Vertical" (W/S).
    pub fn wasd() -> Self {
        let mut set = Self::new();
        set.insert("Horizontal", VirtualAxis::new(KeyCode::D, KeyCode::A));
        set.insert("Vertical", VirtualAxis::new(KeyCode::W, KeyCode::S));
        set
    }

    /// Register or replace an axis.
    pub fn insert(&mut self, name: impl Into<String>, axis: VirtualAxis) {
        self.axes.insert(name.into(), axis);
    }

    /// Force an axis to a raw value, clamped to [-1, 1].
    pub fn set_raw(&mut self, name: impl Into<String>, value: f32) {
        self.overrides.insert(name.into(), value.clamp(-1.0, 1.0));
    }

    /// Drop a raw override so the key-driven value shows again.
    pub fn clear_raw(&mut self, name: &str) {
        self.overrides.remove(name);
    }

    /// Value of the named axis. Unknown names read as 0.
    pub fn value(&self, name: &str) -> f32 {
        if let Some(&raw) = self.overrides.get(name) {
            return raw;
        }
        self.axes.get(name).map_or(0.0, VirtualAxis::value)
    }

    /// Advance every key-driven axis by one frame.
    pub fn update(&mut self, dt: f32, keyboard: &KeyboardState) {
        for axis in self.axes.values_mut() {
            axis.update(dt, keyboard);
        }
    }

    /// Zero every axis and drop all overrides.
    pub fn reset(&mut self) {
        for axis in self.axes.values_mut() {
            axis.reset();
        }
        self.overrides.clear();
    }
}

fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_axis_ramps_up() {
        let mut keyboard = KeyboardState::new();
        keyboard.handle_key(KeyCode::W, true);

        let mut axis = VirtualAxis::new(KeyCode::W, KeyCode::S);
        axis.update(0.1, &keyboard);
        assert!(approx_eq(axis.value(), 0.3));

        // Saturates at 1
        for _ in 0..20 {
            axis.update(0.1, &keyboard);
        }
        assert!(approx_eq(axis.value(), 1.0));
    }

    #[test]
    fn test_axis_returns_to_zero() {
        let mut keyboard = KeyboardState::new();
        keyboard.handle_key(KeyCode::W, true);
        let mut axis = VirtualAxis::new(KeyCode::W, KeyCode::S);
        for _ in 0..10 {
            axis.update(0.1, &keyboard);
        }

        keyboard.handle_key(KeyCode::W, false);
        axis.update(0.1, &keyboard);
        assert!(axis.value() < 1.0);
        assert!(axis.value() > 0.0);

        for _ in 0..10 {
            axis.update(0.1, &keyboard);
        }
        assert_eq!(axis.value(), 0.0);
    }

    #[test]
    fn test_axis_snaps_on_reverse() {
        let mut keyboard = KeyboardState::new();
        keyboard.handle_key(KeyCode::D, true);
        let mut axis = VirtualAxis::new(KeyCode::D, KeyCode::A);
        for _ in 0..10 {
            axis.update(0.1, &keyboard);
        }

        keyboard.handle_key(KeyCode::D, false);
        keyboard.handle_key(KeyCode::A, true);
        axis.update(0.1, &keyboard);
        assert!(approx_eq(axis.value(), -0.3));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut keyboard = KeyboardState::new();
        keyboard.handle_key(KeyCode::W, true);
        keyboard.handle_key(KeyCode::S, true);

        let mut axis = VirtualAxis::new(KeyCode::W, KeyCode::S);
        axis.update(0.1, &keyboard);
        assert_eq!(axis.value(), 0.0);
    }

    #[test]
    fn test_raw_override_is_clamped_and_wins() {
        let mut set = AxisSet::wasd();
        set.set_raw("Vertical", 3.0);
        assert_eq!(set.value("Vertical"), 1.0);

        set.clear_raw("Vertical");
        assert_eq!(set.value("Vertical"), 0.0);
    }

    #[test]
    fn test_unknown_axis_reads_zero() {
        let set = AxisSet::wasd();
        assert_eq!(set.value("Mouse X"), 0.0);
    }
}
