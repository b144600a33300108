//! Configuration errors.
//!
//! Everything that can go wrong happens while loading or validating a
//! [`MovementConfig`](crate::player::MovementConfig). Once a controller is
//! constructed, ticking it cannot fail.

use crate::input::{InputAction, KeyCode};

/// Errors raised while loading or validating a movement configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Standard I/O error while reading a config file.
    IoError(std::io::Error),
    /// JSON serialization/deserialization error.
    JsonError(serde_json::Error),
    /// An input axis name is empty.
    MissingAxis(&'static str),
    /// A numeric field is negative, non-finite, or otherwise out of range.
    InvalidValue { field: &'static str, value: f32 },
    /// The jump force curve has no keyframes.
    EmptyCurve,
    /// Keyframe times must be strictly increasing.
    UnorderedCurve { index: usize },
    /// A keyframe holds a NaN or infinite component.
    NonFiniteCurve { index: usize },
    /// `max_jump_count` must be 1 (single jump) or 2 (double jump).
    InvalidJumpCount(u8),
    /// Two actions are bound to the same key.
    DuplicateBinding(KeyCode),
    /// A required action has no key.
    UnboundAction(InputAction),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::JsonError(e) => write!(f, "JSON error: {e}"),
            ConfigError::MissingAxis(field) => write!(f, "input axis `{field}` has no name"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "invalid value for `{field}`: {value}")
            }
            ConfigError::EmptyCurve => write!(f, "jump curve has no keyframes"),
            ConfigError::UnorderedCurve { index } => {
                write!(f, "jump curve keyframe {index} is not after the previous one")
            }
            ConfigError::NonFiniteCurve { index } => {
                write!(f, "jump curve keyframe {index} is not finite")
            }
            ConfigError::InvalidJumpCount(n) => {
                write!(f, "max_jump_count must be 1 or 2, got {n}")
            }
            ConfigError::DuplicateBinding(key) => {
                write!(f, "key {key:?} is bound to more than one action")
            }
            ConfigError::UnboundAction(action) => write!(f, "action {action:?} has no key"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::JsonError(e)
    }
}
