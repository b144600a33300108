//! Static test world
//!
//! A minimal scene for running the controller headless: an optional infinite
//! floor, solid axis-aligned blocks (walls, ledges, ceilings) and one-sided
//! planar ramps. All geometry is immutable once built.

use super::types::{Vec2, Vec3};

use super::character::SceneQuery;
use super::collision::{RayHit, aabb_surface_normal, ray_aabb_intersect, ray_plane_intersect};

/// Solid axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub min: Vec3,
    pub max: Vec3,
}

impl Block {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Whether the point is strictly inside the box.
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpgt(self.min).all() && point.cmplt(self.max).all()
    }

    /// Whether the XZ footprint, grown by `margin`, contains the point.
    pub fn overlaps_xz(&self, point: Vec3, margin: f32) -> bool {
        point.x > self.min.x - margin
            && point.x < self.max.x + margin
            && point.z > self.min.z - margin
            && point.z < self.max.z + margin
    }
}

/// Walkable inclined rectangle.
///
/// Surface height is `base_height + gradient.dot(xz - min)` over the XZ
/// rectangle `[min, max]`. Only the top face is solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    pub min: Vec2,
    pub max: Vec2,
    pub base_height: f32,
    /// Rise per meter along X and Z
    pub gradient: Vec2,
}

impl Ramp {
    /// Ramp rising along +X at `degrees` from horizontal.
    pub fn along_x(min: Vec2, max: Vec2, base_height: f32, degrees: f32) -> Self {
        Self {
            min,
            max,
            base_height,
            gradient: Vec2::new(degrees.to_radians().tan(), 0.0),
        }
    }

    /// Upward surface normal.
    pub fn normal(&self) -> Vec3 {
        Vec3::new(-self.gradient.x, 1.0, -self.gradient.y).normalize()
    }

    /// Surface height at (x, z), or `None` outside the footprint.
    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        let p = Vec2::new(x, z);
        if p.cmpge(self.min).all() && p.cmple(self.max).all() {
            Some(self.base_height + self.gradient.dot(p - self.min))
        } else {
            None
        }
    }

    /// Incline from horizontal, in degrees.
    pub fn degrees(&self) -> f32 {
        self.normal().y.clamp(-1.0, 1.0).acos().to_degrees()
    }

    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        let anchor = Vec3::new(self.min.x, self.base_height, self.min.y);
        let normal = self.normal();
        let t = ray_plane_intersect(origin, direction, anchor, normal)?;
        let position = origin + direction * t;
        self.height_at(position.x, position.z)?;
        Some(RayHit::new(position, normal, t))
    }
}

/// Immutable collection of world geometry.
#[derive(Debug, Clone, Default)]
pub struct StaticWorld {
    /// Height of the infinite floor plane, if any
    pub floor_height: Option<f32>,
    pub blocks: Vec<Block>,
    pub ramps: Vec<Ramp>,
}

impl StaticWorld {
    /// Empty world with no floor.
    pub fn new() -> Self {
        Self::default()
    }

    /// World with just a flat floor at `height`.
    pub fn flat(height: f32) -> Self {
        Self {
            floor_height: Some(height),
            ..Default::default()
        }
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn with_ramp(mut self, ramp: Ramp) -> Self {
        self.ramps.push(ramp);
        self
    }
}

impl SceneQuery for StaticWorld {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO || max_distance < 0.0 {
            return None;
        }

        let mut nearest: Option<RayHit> = None;
        let mut consider = |hit: RayHit| {
            if hit.distance <= max_distance
                && nearest.is_none_or(|best| hit.distance < best.distance)
            {
                nearest = Some(hit);
            }
        };

        if let Some(floor) = self.floor_height {
            let anchor = Vec3::new(0.0, floor, 0.0);
            if let Some(t) = ray_plane_intersect(origin, direction, anchor, Vec3::Y) {
                consider(RayHit::new(origin + direction * t, Vec3::Y, t));
            }
        }

        for block in &self.blocks {
            // A ray starting inside a block would report its exit face
            if block.contains(origin) {
                continue;
            }
            if let Some(t) = ray_aabb_intersect(origin, direction, block.min, block.max) {
                let position = origin + direction * t;
                let normal = aabb_surface_normal(position, block.min, block.max);
                consider(RayHit::new(position, normal, t));
            }
        }

        for ramp in &self.ramps {
            if let Some(hit) = ramp.raycast(origin, direction) {
                consider(hit);
            }
        }

        nearest
    }
}
