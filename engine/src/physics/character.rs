//! Character body capabilities
//!
//! The movement controller never owns physics. It drives whatever capsule
//! controller the host provides through [`CharacterBody`] and probes the
//! scene through [`SceneQuery`]. [`KinematicCapsule`](super::KinematicCapsule)
//! and [`StaticWorld`](super::StaticWorld) are the bundled implementations.

use super::types::Vec3;

use super::collision::RayHit;

/// Sides of the capsule that touched something during the last move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CollisionFlags(u8);

impl CollisionFlags {
    pub const NONE: Self = Self(0);
    /// Touched a wall or too-steep slope
    pub const SIDES: Self = Self(1);
    /// Touched a ceiling
    pub const ABOVE: Self = Self(1 << 1);
    /// Touched the ground
    pub const BELOW: Self = Self(1 << 2);

    /// Raw bit representation.
    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every bit of `other` is set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

impl std::ops::BitOr for CollisionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for CollisionFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// A capsule-shaped character controller owned by the host engine.
///
/// The body resolves collisions itself; callers only submit velocities and
/// displacements.
pub trait CharacterBody {
    /// Capsule center in world space.
    fn position(&self) -> Vec3;

    /// Facing angle around world up, in radians. 0 looks toward -Z.
    fn yaw(&self) -> f32;

    /// Capsule height in meters.
    fn height(&self) -> f32;

    fn set_height(&mut self, height: f32);

    /// Whether the last move ended in ground contact.
    fn is_grounded(&self) -> bool;

    /// Steepest walkable surface, in degrees.
    fn slope_limit(&self) -> f32;

    fn set_slope_limit(&mut self, degrees: f32);

    /// Move with a horizontal velocity for `dt` seconds. The vertical
    /// component of `velocity` is ignored and gravity is applied by the body.
    fn simple_move(&mut self, velocity: Vec3, dt: f32) -> CollisionFlags;

    /// Move by an exact displacement, with collision.
    fn move_by(&mut self, displacement: Vec3) -> CollisionFlags;

    /// Flags produced by the most recent move.
    fn collision_flags(&self) -> CollisionFlags;
}

/// Read-only ray queries against the world.
pub trait SceneQuery {
    /// Nearest hit along `direction` within `max_distance`, if any.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;
}

impl<T: SceneQuery + ?Sized> SceneQuery for &T {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        (**self).raycast(origin, direction, max_distance)
    }
}
