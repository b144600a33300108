//! Collision detection module
//!
//! Ray queries against the primitive shapes the static test world is made
//! of: axis-aligned boxes and bounded planes.
//!
//! # Ray-AABB Intersection
//!
//! The slab method is used for ray-AABB intersection, which finds the
//! intersection points by computing entry and exit times for each axis.
//!
//! # Example
//!
//! ```ignore
//! use player_move_engine::physics::collision::{ray_aabb_intersect, aabb_surface_normal};
//! use glam::Vec3;
//!
//! let origin = Vec3::new(0.0, 5.0, 0.0);
//! let aabb_min = Vec3::new(-1.0, -1.0, -1.0);
//! let aabb_max = Vec3::new(1.0, 1.0, 1.0);
//!
//! if let Some(t) = ray_aabb_intersect(origin, Vec3::NEG_Y, aabb_min, aabb_max) {
//!     let hit_point = origin + Vec3::NEG_Y * t;
//!     let normal = aabb_surface_normal(hit_point, aabb_min, aabb_max);
//! }
//! ```

use super::types::Vec3;

/// Result of a successful ray query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space position where the ray hit
    pub position: Vec3,
    /// Surface normal at the hit point (normalized)
    pub normal: Vec3,
    /// Distance from ray origin to hit point
    pub distance: f32,
}

impl RayHit {
    /// Creates a new RayHit with the given parameters.
    pub fn new(position: Vec3, normal: Vec3, distance: f32) -> Self {
        Self {
            position,
            normal,
            distance,
        }
    }

    /// Angle between the surface normal and world up, in degrees.
    pub fn slope_degrees(&self) -> f32 {
        self.normal.dot(Vec3::Y).clamp(-1.0, 1.0).acos().to_degrees()
    }
}

/// Performs ray-AABB (Axis-Aligned Bounding Box) intersection test using the slab method.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the intersection point (t >= 0)
/// * `None` - No intersection or intersection is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Near-zero direction components get a huge inverse instead of dividing by zero
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() > 1e-10 { 1.0 / ray_dir.x } else { f32::MAX * ray_dir.x.signum() },
        if ray_dir.y.abs() > 1e-10 { 1.0 / ray_dir.y } else { f32::MAX * ray_dir.y.signum() },
        if ray_dir.z.abs() > 1e-10 { 1.0 / ray_dir.z } else { f32::MAX * ray_dir.z.signum() },
    );

    let t1 = (aabb_min.x - ray_origin.x) * inv_dir.x;
    let t2 = (aabb_max.x - ray_origin.x) * inv_dir.x;

    let mut t_min = t1.min(t2);
    let mut t_max = t1.max(t2);

    let t3 = (aabb_min.y - ray_origin.y) * inv_dir.y;
    let t4 = (aabb_max.y - ray_origin.y) * inv_dir.y;

    t_min = t_min.max(t3.min(t4));
    t_max = t_max.min(t3.max(t4));

    let t5 = (aabb_min.z - ray_origin.z) * inv_dir.z;
    let t6 = (aabb_max.z - ray_origin.z) * inv_dir.z;

    t_min = t_min.max(t5.min(t6));
    t_max = t_max.min(t5.max(t6));

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 {
            Some(t_min)
        } else {
            // Ray starts inside the AABB
            Some(t_max)
        }
    } else {
        None
    }
}

/// Computes the outward surface normal for a point on an AABB surface.
///
/// The face is the one whose axis has the largest normalized offset from the
/// box center.
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half_extents = (aabb_max - aabb_min) * 0.5;
    let local = point - center;

    let normalized = Vec3::new(
        local.x / half_extents.x,
        local.y / half_extents.y,
        local.z / half_extents.z,
    );

    let abs_normalized = normalized.abs();

    if abs_normalized.x >= abs_normalized.y && abs_normalized.x >= abs_normalized.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs_normalized.y >= abs_normalized.x && abs_normalized.y >= abs_normalized.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}

/// Intersects a ray with the front face of a plane.
///
/// Only hits the side the normal points to; rays travelling along the normal
/// or parallel to the plane miss.
///
/// # Returns
///
/// Distance along the ray, if the plane is ahead of the origin.
pub fn ray_plane_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<f32> {
    let denom = plane_normal.dot(ray_dir);
    if denom > -1e-6 {
        return None;
    }

    let t = (plane_point - ray_origin).dot(plane_normal) / denom;
    if t >= 0.0 { Some(t) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_aabb_hit_from_above() {
        let origin = Vec3::new(0.0, 5.0, 0.0);
        let aabb_min = Vec3::new(-1.0, -1.0, -1.0);
        let aabb_max = Vec3::new(1.0, 1.0, 1.0);

        let t = ray_aabb_intersect(origin, Vec3::NEG_Y, aabb_min, aabb_max);
        assert_eq!(t, Some(4.0));
    }

    #[test]
    fn test_ray_aabb_miss_beside() {
        let origin = Vec3::new(3.0, 5.0, 0.0);
        let aabb_min = Vec3::new(-1.0, -1.0, -1.0);
        let aabb_max = Vec3::new(1.0, 1.0, 1.0);

        assert!(ray_aabb_intersect(origin, Vec3::NEG_Y, aabb_min, aabb_max).is_none());
    }

    #[test]
    fn test_ray_aabb_behind_origin() {
        let origin = Vec3::new(0.0, 0.0, 5.0);
        let dir = Vec3::new(0.0, 0.0, 1.0);
        let aabb_min = Vec3::new(-1.0, -1.0, -1.0);
        let aabb_max = Vec3::new(1.0, 1.0, 1.0);

        assert!(ray_aabb_intersect(origin, dir, aabb_min, aabb_max).is_none());
    }

    #[test]
    fn test_surface_normal_faces() {
        let aabb_min = Vec3::new(-1.0, -1.0, -1.0);
        let aabb_max = Vec3::new(1.0, 1.0, 1.0);

        assert_eq!(aabb_surface_normal(Vec3::new(1.0, 0.0, 0.0), aabb_min, aabb_max), Vec3::X);
        assert_eq!(aabb_surface_normal(Vec3::new(0.0, 1.0, 0.2), aabb_min, aabb_max), Vec3::Y);
        assert_eq!(
            aabb_surface_normal(Vec3::new(0.0, -1.0, 0.0), aabb_min, aabb_max),
            Vec3::NEG_Y
        );
    }

    #[test]
    fn test_ray_plane_front_face() {
        let t = ray_plane_intersect(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y, Vec3::ZERO, Vec3::Y);
        assert_eq!(t, Some(3.0));
    }

    #[test]
    fn test_ray_plane_back_face_misses() {
        let t = ray_plane_intersect(Vec3::new(0.0, -3.0, 0.0), Vec3::Y, Vec3::ZERO, Vec3::Y);
        assert!(t.is_none());
    }

    #[test]
    fn test_slope_degrees() {
        let flat = RayHit::new(Vec3::ZERO, Vec3::Y, 1.0);
        assert!(flat.slope_degrees().abs() < 0.01);

        let normal = Vec3::new(-1.0, 1.0, 0.0).normalize();
        let ramp = RayHit::new(Vec3::ZERO, normal, 1.0);
        assert!((ramp.slope_degrees() - 45.0).abs() < 0.01);
    }
}
