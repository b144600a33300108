//! Input Bindings Module
//!
//! Maps physical keys to the logical locomotion actions (sprint, crouch,
//! jump), allowing key remapping without touching movement code.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::KeyCode;
use crate::error::ConfigError;

/// Logical locomotion actions that can be bound to physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InputAction {
    /// Sprint while held (default: Shift)
    Sprint,
    /// Crouch while held (default: Ctrl)
    Crouch,
    /// Jump on press (default: Space)
    Jump,
}

impl InputAction {
    /// Every action a movement config must bind.
    pub const ALL: [InputAction; 3] = [InputAction::Sprint, InputAction::Crouch, InputAction::Jump];
}

/// Two-way map between physical keys and logical actions.
///
/// Serialized as an action-to-key map, e.g. `{"Sprint": "ShiftLeft", ...}`.
/// Deserialization rejects two actions sharing one key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<InputAction, KeyCode>",
    into = "BTreeMap<InputAction, KeyCode>"
)]
pub struct KeyBindings {
    /// Map from physical key to logical action
    key_to_action: HashMap<KeyCode, InputAction>,
    /// Map from logical action to physical key
    action_to_key: HashMap<InputAction, KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create bindings with the default keys.
    ///
    /// Default bindings:
    /// - Shift (Left) = Sprint
    /// - Ctrl (Left) = Crouch
    /// - Space = Jump
    pub fn new() -> Self {
        let mut bindings = Self::empty();
        bindings.bind(KeyCode::ShiftLeft, InputAction::Sprint);
        bindings.bind(KeyCode::ControlLeft, InputAction::Crouch);
        bindings.bind(KeyCode::Space, InputAction::Jump);
        bindings
    }

    /// Create bindings with nothing bound.
    pub fn empty() -> Self {
        Self {
            key_to_action: HashMap::new(),
            action_to_key: HashMap::new(),
        }
    }

    /// Bind a physical key to a logical action.
    ///
    /// If the key was previously bound to another action, that binding is removed.
    /// If the action was previously bound to another key, that binding is also removed.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        if let Some(old_action) = self.key_to_action.remove(&key) {
            self.action_to_key.remove(&old_action);
        }
        if let Some(old_key) = self.action_to_key.remove(&action) {
            self.key_to_action.remove(&old_key);
        }

        self.key_to_action.insert(key, action);
        self.action_to_key.insert(action, key);
    }

    /// Remove the binding for a specific action.
    pub fn unbind_action(&mut self, action: InputAction) {
        if let Some(key) = self.action_to_key.remove(&action) {
            self.key_to_action.remove(&key);
        }
    }

    /// Get the action bound to a physical key, if any.
    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.key_to_action.get(&key).copied()
    }

    /// Get the key bound to a logical action, if any.
    pub fn get_key(&self, action: InputAction) -> Option<KeyCode> {
        self.action_to_key.get(&action).copied()
    }

    /// Check that every locomotion action has a key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for action in InputAction::ALL {
            if !self.action_to_key.contains_key(&action) {
                return Err(ConfigError::UnboundAction(action));
            }
        }
        Ok(())
    }
}

impl TryFrom<BTreeMap<InputAction, KeyCode>> for KeyBindings {
    type Error = ConfigError;

    fn try_from(map: BTreeMap<InputAction, KeyCode>) -> Result<Self, Self::Error> {
        let mut bindings = Self::empty();
        for (action, key) in map {
            if bindings.key_to_action.contains_key(&key) {
                return Err(ConfigError::DuplicateBinding(key));
            }
            bindings.bind(key, action);
        }
        Ok(bindings)
    }
}

impl From<KeyBindings> for BTreeMap<InputAction, KeyCode> {
    fn from(bindings: KeyBindings) -> Self {
        bindings.action_to_key.into_iter().collect()
    }
}
