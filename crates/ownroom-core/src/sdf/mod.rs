//! Signed Distance Functions (SDF) for 3D shape definition
//!
//! SDFs represent shapes as mathematical functions that return the distance
//! from any point in space to the nearest surface. Negative values are inside,
//! positive values are outside, and zero is exactly on the surface.
//!
//! ## Example
//!
//! ```rust
//! use ownroom_core::prelude::*;
//!
//! // Carve a capsule out of a box
//! let base = rounded_box(Vec3::splat(0.5), 0.1);
//! let cutter = capsule(0.2, 1.0).placed(Vec3::new(0.0, -0.5, 0.0), Vec3::ZERO);
//! let carved = base.smooth_subtract(cutter, 0.15);
//!
//! assert!(carved.distance(Vec3::ZERO) > 0.0);
//! ```

pub mod operations;
pub mod primitives;
pub mod transforms;

use glam::{Mat3, Vec3};

/// The core SDF trait - any type that can compute distance from a point
pub trait Sdf: Send + Sync {
    /// Calculate the signed distance from point `p` to the surface.
    ///
    /// - Returns negative values for points inside the shape
    /// - Returns positive values for points outside the shape
    /// - Returns zero for points exactly on the surface
    fn distance(&self, p: Vec3) -> f32;

    /// Get a conservative bounding box for this SDF.
    fn bounds(&self) -> Aabb {
        Aabb::cube(10.0)
    }
}

impl<S: Sdf + ?Sized> Sdf for &S {
    fn distance(&self, p: Vec3) -> f32 {
        (**self).distance(p)
    }

    fn bounds(&self) -> Aabb {
        (**self).bounds()
    }
}

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a cube centered at origin
    pub fn cube(half_size: f32) -> Self {
        Self::new(Vec3::splat(-half_size), Vec3::splat(half_size))
    }

    /// Create from center and half-extents
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Expand the bounding box by a margin
    pub fn expand(&self, margin: f32) -> Self {
        Self::new(
            self.min - Vec3::splat(margin),
            self.max + Vec3::splat(margin),
        )
    }

    /// Merge two bounding boxes
    pub fn union(&self, other: &Aabb) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Get the size of the bounding box
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Get the center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Inclusive point containment
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Euclidean distance from `p` to the box, zero inside
    pub fn exterior_distance(&self, p: Vec3) -> f32 {
        (self.min - p).max(p - self.max).max(Vec3::ZERO).length()
    }

    /// The eight corners, min corner first
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Bounds of this box after rotating by `rotation` and then translating.
    pub fn transformed(&self, rotation: Mat3, translation: Vec3) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for corner in self.corners() {
            let p = rotation * corner + translation;
            min = min.min(p);
            max = max.max(p);
        }
        Self::new(min, max)
    }
}

/// Extension trait providing chainable composition on SDFs
pub trait SdfExt: Sdf + Sized {
    /// Hard union with another field
    fn union<S: Sdf>(self, other: S) -> operations::Union<Self, S> {
        operations::Union::new(self, other)
    }

    /// Smooth union with blend constant `k`
    fn smooth_union<S: Sdf>(self, other: S, k: f32) -> operations::SmoothUnion<Self, S> {
        operations::SmoothUnion::new(self, other, k)
    }

    /// Smoothly remove `cutter` from this field
    fn smooth_subtract<S: Sdf>(self, cutter: S, k: f32) -> operations::SmoothSubtract<S, Self> {
        operations::SmoothSubtract::new(cutter, self, k)
    }

    /// Non-uniform scale (approximate distance, see [`transforms::NonUniformScale`])
    fn scaled(self, scale: Vec3) -> transforms::NonUniformScale<Self> {
        transforms::NonUniformScale::new(self, scale)
    }

    /// Rotate by Euler angles (radians, intrinsic XYZ) then translate
    fn placed(self, translation: Vec3, euler: Vec3) -> transforms::Placed<Self> {
        transforms::Placed::new(self, translation, euler)
    }
}

impl<T: Sdf> SdfExt for T {}

// Re-exports
pub use operations::*;
pub use primitives::*;
pub use transforms::*;
