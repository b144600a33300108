//! Movement tuning
//!
//! [`MovementConfig`] is set once and read every tick. It loads from JSON,
//! where any missing field falls back to the base preset, and is validated
//! before a controller will accept it.
//!
//! # Presets
//!
//! - [`MovementConfig::default`] - single jump, crouching only slows down
//! - [`MovementConfig::double_jump`] - second jump in the air, crouching
//!   also shrinks the capsule
//!
//! # Example
//!
//! ```rust,ignore
//! use player_move_engine::player::MovementConfig;
//!
//! let config = MovementConfig::from_json_str(r#"{ "sprint_speed": 14.0 }"#)?;
//! assert_eq!(config.walk_speed, 6.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::curve::ForceCurve;
use crate::error::ConfigError;
use crate::input::{InputAction, KeyBindings, KeyCode};

/// Walking speed in m/s
pub const WALK_SPEED: f32 = 6.0;

/// Sprinting speed in m/s
pub const SPRINT_SPEED: f32 = 12.0;

/// Crouched speed in m/s
pub const CROUCH_SPEED: f32 = 3.0;

/// Blend rate toward sprint and walk speed (per second)
pub const SPRINT_LERP_SPEED: f32 = 8.0;

/// Blend rate toward crouch speed (per second)
pub const CROUCH_LERP_SPEED: f32 = 8.0;

/// Downward slope correction per meter of half-height
pub const SLOPE_FORCE: f32 = 5.0;

/// Slope probe length, in half-heights
pub const SLOPE_FORCE_RAY_LENGTH: f32 = 1.5;

/// Scale applied to the jump curve
pub const JUMP_MULTIPLIER: f32 = 10.0;

/// Capsule height while standing (meters)
pub const STANDING_HEIGHT: f32 = 2.0;

/// Capsule height while crouched (meters)
pub const CROUCH_HEIGHT: f32 = 1.0;

/// Walkable slope on the ground (degrees)
pub const GROUNDED_SLOPE_LIMIT: f32 = 45.0;

/// Slope limit while airborne, lets the capsule mount ledges (degrees)
pub const AIRBORNE_SLOPE_LIMIT: f32 = 90.0;

/// Locomotion tuning for one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Input axis for strafing
    pub horizontal_axis: String,
    /// Input axis for forward/back
    pub vertical_axis: String,

    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub crouch_speed: f32,

    /// Also used when blending back to walk speed
    pub sprint_lerp_speed: f32,
    pub crouch_lerp_speed: f32,

    pub bindings: KeyBindings,

    pub slope_force: f32,
    pub slope_force_ray_length: f32,

    pub jump_curve: ForceCurve,
    pub jump_multiplier: f32,
    /// 1 for single jump, 2 for double jump
    pub max_jump_count: u8,

    /// Whether crouching changes the capsule height
    pub crouch_shrinks_height: bool,
    pub standing_height: f32,
    pub crouch_height: f32,

    pub grounded_slope_limit: f32,
    pub airborne_slope_limit: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            horizontal_axis: "Horizontal".to_string(),
            vertical_axis: "Vertical".to_string(),
            walk_speed: WALK_SPEED,
            sprint_speed: SPRINT_SPEED,
            crouch_speed: CROUCH_SPEED,
            sprint_lerp_speed: SPRINT_LERP_SPEED,
            crouch_lerp_speed: CROUCH_LERP_SPEED,
            bindings: KeyBindings::new(),
            slope_force: SLOPE_FORCE,
            slope_force_ray_length: SLOPE_FORCE_RAY_LENGTH,
            jump_curve: ForceCurve::default(),
            jump_multiplier: JUMP_MULTIPLIER,
            max_jump_count: 1,
            crouch_shrinks_height: false,
            standing_height: STANDING_HEIGHT,
            crouch_height: CROUCH_HEIGHT,
            grounded_slope_limit: GROUNDED_SLOPE_LIMIT,
            airborne_slope_limit: AIRBORNE_SLOPE_LIMIT,
        }
    }
}

impl MovementConfig {
    /// Double-jump variant: two jumps before landing, crouch shrinks the capsule.
    pub fn double_jump() -> Self {
        Self {
            max_jump_count: 2,
            crouch_shrinks_height: true,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Key bound to `action`. Only meaningful after [`validate`](Self::validate).
    pub fn key_for(&self, action: InputAction) -> KeyCode {
        self.bindings.get_key(action).unwrap_or(KeyCode::Unknown)
    }

    /// Reject configs the controller cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizontal_axis.trim().is_empty() {
            return Err(ConfigError::MissingAxis("horizontal_axis"));
        }
        if self.vertical_axis.trim().is_empty() {
            return Err(ConfigError::MissingAxis("vertical_axis"));
        }

        let non_negative = [
            ("walk_speed", self.walk_speed),
            ("sprint_speed", self.sprint_speed),
            ("crouch_speed", self.crouch_speed),
            ("sprint_lerp_speed", self.sprint_lerp_speed),
            ("crouch_lerp_speed", self.crouch_lerp_speed),
            ("slope_force", self.slope_force),
            ("slope_force_ray_length", self.slope_force_ray_length),
            ("jump_multiplier", self.jump_multiplier),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        let positive = [
            ("standing_height", self.standing_height),
            ("crouch_height", self.crouch_height),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        if self.crouch_height > self.standing_height {
            return Err(ConfigError::InvalidValue {
                field: "crouch_height",
                value: self.crouch_height,
            });
        }

        let slope_limits = [
            ("grounded_slope_limit", self.grounded_slope_limit),
            ("airborne_slope_limit", self.airborne_slope_limit),
        ];
        for (field, value) in slope_limits {
            if !value.is_finite() || !(0.0..=180.0).contains(&value) {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        if !(1..=2).contains(&self.max_jump_count) {
            return Err(ConfigError::InvalidJumpCount(self.max_jump_count));
        }

        self.jump_curve.validate()?;
        self.bindings.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Keyframe;

    #[test]
    fn test_presets_are_valid() {
        assert!(MovementConfig::default().validate().is_ok());
        assert!(MovementConfig::double_jump().validate().is_ok());
    }

    #[test]
    fn test_presets_differ_only_in_variant_flags() {
        let base = MovementConfig::default();
        let double = MovementConfig::double_jump();
        assert_eq!(base.max_jump_count, 1);
        assert_eq!(double.max_jump_count, 2);
        assert!(!base.crouch_shrinks_height);
        assert!(double.crouch_shrinks_height);
        assert_eq!(base.walk_speed, double.walk_speed);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = MovementConfig::from_json_str(r#"{ "sprint_speed": 14.0 }"#).unwrap();
        assert_eq!(config.sprint_speed, 14.0);
        assert_eq!(config.walk_speed, WALK_SPEED);
        assert_eq!(config.horizontal_axis, "Horizontal");
        assert_eq!(config.key_for(InputAction::Jump), KeyCode::Space);
    }

    #[test]
    fn test_json_round_trip() {
        let config = MovementConfig::double_jump();
        let json = config.to_json_string().unwrap();
        let parsed = MovementConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_negative_speed() {
        let config = MovementConfig {
            crouch_speed: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "crouch_speed", .. })
        ));
    }

    #[test]
    fn test_rejects_nan_rate() {
        let config = MovementConfig {
            sprint_lerp_speed: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "sprint_lerp_speed", .. })
        ));
    }

    #[test]
    fn test_rejects_crouch_taller_than_standing() {
        let config = MovementConfig {
            crouch_height: 2.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "crouch_height", .. })
        ));
    }

    #[test]
    fn test_rejects_empty_axis() {
        let config = MovementConfig {
            vertical_axis: String::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MissingAxis("vertical_axis"))));
    }

    #[test]
    fn test_rejects_jump_count() {
        for count in [0, 3] {
            let config = MovementConfig {
                max_jump_count: count,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidJumpCount(n)) if n == count
            ));
        }
    }

    #[test]
    fn test_rejects_bad_curve() {
        let config = MovementConfig {
            jump_curve: ForceCurve::new(vec![Keyframe::new(0.3, 1.0), Keyframe::new(0.1, 0.0)]),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::UnorderedCurve { index: 1 })));
    }

    #[test]
    fn test_rejects_unbound_jump() {
        let mut config = MovementConfig::default();
        config.bindings.unbind_action(InputAction::Jump);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnboundAction(InputAction::Jump))
        ));
    }

    #[test]
    fn test_rejects_duplicate_binding_in_json() {
        let json = r#"{ "bindings": { "Sprint": "Space", "Crouch": "ControlLeft", "Jump": "Space" } }"#;
        assert!(matches!(
            MovementConfig::from_json_str(json),
            Err(ConfigError::JsonError(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = MovementConfig::load("/nonexistent/movement.json").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
