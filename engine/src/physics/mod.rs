//! Physics module
//!
//! Everything the movement controller needs from a physics engine, expressed
//! as two capabilities plus one small bundled implementation of each.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//! - Slope angles in degrees
//!
//! # Submodules
//!
//! - [`types`] - Math types re-exported from glam
//! - [`collision`] - Ray hits and ray-vs-primitive intersection
//! - [`character`] - [`CharacterBody`] and [`SceneQuery`] capabilities
//! - [`world`] - [`StaticWorld`] of floors, blocks and ramps
//! - [`capsule`] - [`KinematicCapsule`] body moving through a [`StaticWorld`]

pub mod capsule;
pub mod character;
pub mod collision;
pub mod types;
pub mod world;

pub use capsule::KinematicCapsule;
pub use character::{CharacterBody, CollisionFlags, SceneQuery};
pub use collision::{RayHit, aabb_surface_normal, ray_aabb_intersect, ray_plane_intersect};
pub use types::{Vec2, Vec3};
pub use world::{Block, Ramp, StaticWorld};
