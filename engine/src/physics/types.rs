//! Math type re-exports from glam
//!
//! Positions, displacements and normals are all `Vec3`; ramp footprints and
//! planar input use `Vec2`.

pub use glam::{Vec2, Vec3};
