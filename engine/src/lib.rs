//! Player Move Engine Library
//!
//! Frame-driven character locomotion: planar movement with sprint/crouch
//! speed blending, slope correction and a curve-driven (double) jump.
//! The host engine plugs in through three small traits, so everything here
//! also runs headless.
//!
//! # Modules
//!
//! - [`player`] - Movement controller, jump sequencer, stance and config
//! - [`input`] - Key and axis polling behind the [`InputSource`] trait
//! - [`physics`] - [`CharacterBody`]/[`SceneQuery`] traits, static world and kinematic capsule
//! - [`curve`] - Keyframed force curves
//! - [`error`] - Configuration errors
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use glam::Vec3;
//! use player_move_engine::{InputState, KeyCode, KinematicCapsule, MovementConfig,
//!     MovementController, StaticWorld};
//!
//! let world = Arc::new(StaticWorld::flat(0.0));
//! let mut body = KinematicCapsule::standing_at(world.clone(), Vec3::ZERO);
//! let mut controller = MovementController::new(MovementConfig::double_jump())?;
//!
//! let mut input = InputState::wasd();
//! input.keyboard.handle_key(KeyCode::W, true);
//!
//! for _ in 0..60 {
//!     input.update(1.0 / 60.0);
//!     controller.tick(1.0 / 60.0, &input, &mut body, world.as_ref());
//!     input.end_frame();
//! }
//! ```

pub mod curve;
pub mod error;
pub mod input;
pub mod physics;
pub mod player;

// Re-export the types a host needs to wire up a controller
pub use curve::{Curve, ForceCurve, Keyframe};
pub use error::ConfigError;
pub use input::{InputAction, InputSource, InputState, KeyBindings, KeyCode};
pub use physics::{CharacterBody, CollisionFlags, KinematicCapsule, RayHit, SceneQuery, StaticWorld};
pub use player::{JumpEvent, MotionState, MovementConfig, MovementController, TickReport};
