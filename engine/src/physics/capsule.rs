//! Kinematic Capsule
//!
//! Reference [`CharacterBody`] that moves a vertical capsule through a
//! [`StaticWorld`]. It mirrors the behavior game engines give their
//! character-controller primitive:
//!
//! - `simple_move` takes a horizontal velocity and applies gravity itself
//! - `move_by` moves by an exact displacement and reports what was touched
//! - walls and surfaces steeper than the slope limit block horizontal motion
//! - ledges up to the step offset are climbed; with a 90 degree slope limit
//!   anything up to one radius above the feet can be mounted
//!
//! # Unit System
//!
//! 1 unit = 1 meter, time in seconds, angles in degrees.

use std::sync::Arc;

use super::types::Vec3;

use super::character::{CharacterBody, CollisionFlags, SceneQuery};
use super::world::StaticWorld;

/// Gravity acceleration in meters per second squared
pub const DEFAULT_GRAVITY: f32 = 9.81;

/// Default capsule height in meters
pub const DEFAULT_HEIGHT: f32 = 2.0;

/// Default capsule radius in meters
pub const DEFAULT_RADIUS: f32 = 0.5;

/// Default walkable slope in degrees
pub const DEFAULT_SLOPE_LIMIT: f32 = 45.0;

/// Tallest ledge climbed without jumping, in meters
pub const STEP_OFFSET: f32 = 0.3;

/// Contact tolerance in meters
pub const SKIN_WIDTH: f32 = 0.01;

/// Vertical capsule driven through a static world.
#[derive(Debug, Clone)]
pub struct KinematicCapsule {
    world: Arc<StaticWorld>,

    /// Capsule center in world space
    position: Vec3,

    /// Facing angle in radians (0 = looking toward -Z)
    yaw: f32,

    height: f32,
    radius: f32,
    slope_limit: f32,
    gravity: f32,

    /// Whether the last move ended touching the ground
    grounded: bool,

    /// Accumulated downward speed from gravity (m/s)
    fall_speed: f32,

    flags: CollisionFlags,
}

impl KinematicCapsule {
    /// Create a capsule centered at `position` with default dimensions.
    ///
    /// The capsule starts airborne; the first move settles it.
    pub fn new(world: Arc<StaticWorld>, position: Vec3) -> Self {
        Self {
            world,
            position,
            yaw: 0.0,
            height: DEFAULT_HEIGHT,
            radius: DEFAULT_RADIUS,
            slope_limit: DEFAULT_SLOPE_LIMIT,
            gravity: DEFAULT_GRAVITY,
            grounded: false,
            fall_speed: 0.0,
            flags: CollisionFlags::NONE,
        }
    }

    /// Create a capsule standing with its feet at `feet`.
    pub fn standing_at(world: Arc<StaticWorld>, feet: Vec3) -> Self {
        let mut capsule = Self::new(world, feet + Vec3::Y * (DEFAULT_HEIGHT * 0.5));
        capsule.move_by(Vec3::ZERO);
        capsule
    }

    /// Override gravity (m/s^2).
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Override the capsule radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn world(&self) -> &StaticWorld {
        &self.world
    }

    /// Teleport without collision.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    /// World-space height of the capsule's lowest point.
    pub fn feet(&self) -> f32 {
        self.position.y - self.height * 0.5
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Current accumulated fall speed (m/s).
    pub fn fall_speed(&self) -> f32 {
        self.fall_speed
    }

    /// Tallest ledge the capsule can walk onto.
    fn step_height(&self) -> f32 {
        if self.slope_limit >= 90.0 {
            self.radius.max(STEP_OFFSET)
        } else {
            STEP_OFFSET
        }
    }

    /// Highest surface supporting a capsule centered at `target`, searching
    /// from `top` down to `bottom`.
    fn support_height(&self, target: Vec3, top: f32, bottom: f32) -> Option<f32> {
        let origin = Vec3::new(target.x, top, target.z);
        let mut ground = self
            .world
            .raycast(origin, Vec3::NEG_Y, top - bottom)
            .map(|hit| hit.position.y);

        // The capsule rests on block edges its radius overhangs
        let ceiling = self.feet().max(target.y - self.height * 0.5) + self.step_height();
        for block in &self.world.blocks {
            if block.overlaps_xz(target, self.radius)
                && block.max.y >= bottom
                && block.max.y <= ceiling
            {
                ground = Some(ground.map_or(block.max.y, |g| g.max(block.max.y)));
            }
        }

        ground
    }

    /// Whether moving to `target` runs into a wall or a too-steep surface.
    fn horizontal_blocked(&self, target: Vec3) -> bool {
        let feet = self.feet();
        let head = self.position.y + self.height * 0.5;
        let step = self.step_height();

        for block in &self.world.blocks {
            // Blocks the capsule already overlaps never hold it in place
            let in_the_way = block.overlaps_xz(target, self.radius)
                && !block.overlaps_xz(self.position, self.radius)
                && block.max.y > feet + SKIN_WIDTH
                && block.min.y < head;
            if in_the_way && block.max.y - feet > step {
                return true;
            }
        }

        // Rising ground steeper than the slope limit acts as a wall
        let probe = Vec3::new(target.x, head, target.z);
        if let Some(hit) = self.world.raycast(probe, Vec3::NEG_Y, self.height + STEP_OFFSET) {
            if hit.position.y > feet + SKIN_WIDTH && hit.slope_degrees() > self.slope_limit {
                return true;
            }
        }

        false
    }
}

impl CharacterBody for KinematicCapsule {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn yaw(&self) -> f32 {
        self.yaw
    }

    fn height(&self) -> f32 {
        self.height
    }

    /// Resize the capsule, keeping the feet planted while grounded.
    fn set_height(&mut self, height: f32) {
        if self.grounded {
            self.position.y += (height - self.height) * 0.5;
        }
        self.height = height;
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn slope_limit(&self) -> f32 {
        self.slope_limit
    }

    fn set_slope_limit(&mut self, degrees: f32) {
        self.slope_limit = degrees;
    }

    fn simple_move(&mut self, velocity: Vec3, dt: f32) -> CollisionFlags {
        // Grounded bodies still press down a little to keep contact
        self.fall_speed = if self.grounded {
            self.gravity * dt
        } else {
            self.fall_speed + self.gravity * dt
        };

        let displacement = Vec3::new(velocity.x * dt, -self.fall_speed * dt, velocity.z * dt);
        self.move_by(displacement)
    }

    fn move_by(&mut self, displacement: Vec3) -> CollisionFlags {
        let half = self.height * 0.5;
        let mut flags = CollisionFlags::NONE;
        let mut target = self.position + displacement;

        if displacement.x != 0.0 || displacement.z != 0.0 {
            if self.horizontal_blocked(target) {
                target.x = self.position.x;
                target.z = self.position.z;
                flags |= CollisionFlags::SIDES;
            }
        }

        if displacement.y > 0.0 {
            let origin = Vec3::new(target.x, self.position.y, target.z);
            let reach = half + displacement.y + SKIN_WIDTH;
            if let Some(hit) = self.world.raycast(origin, Vec3::Y, reach) {
                let max_center = hit.position.y - half - SKIN_WIDTH;
                if target.y > max_center {
                    target.y = max_center.max(self.position.y);
                    flags |= CollisionFlags::ABOVE;
                }
            }

            // Undersides the radius reaches even when the center ray misses
            let old_head = self.position.y + half;
            let new_head = target.y + half;
            for block in &self.world.blocks {
                if block.overlaps_xz(target, self.radius)
                    && block.min.y >= old_head - SKIN_WIDTH
                    && block.min.y < new_head + SKIN_WIDTH
                {
                    let max_center = block.min.y - half - SKIN_WIDTH;
                    if target.y > max_center {
                        target.y = max_center.max(self.position.y);
                        flags |= CollisionFlags::ABOVE;
                    }
                }
            }
        }

        // Ground probe from the higher of the old and new head positions
        let top = self.position.y.max(target.y) + half;
        let bottom = target.y - half - SKIN_WIDTH;
        match self.support_height(target, top, bottom) {
            Some(ground) => {
                target.y = target.y.max(ground + half);
                self.grounded = true;
                self.fall_speed = 0.0;
                flags |= CollisionFlags::BELOW;
            }
            None => self.grounded = false,
        }

        self.position = target;
        self.flags = flags;
        flags
    }

    fn collision_flags(&self) -> CollisionFlags {
        self.flags
    }
}
