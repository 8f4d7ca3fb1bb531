//! SDF Primitive shapes
//!
//! All primitives live in their own local frame. Place them with
//! [`Placed`](super::Placed) and stretch them with
//! [`NonUniformScale`](super::NonUniformScale).
//!
//! The editable primitives round their own edges. The rounding radius is a
//! fixed fraction of the primitive's size and is added on the outside, so the
//! surface sits slightly beyond the nominal dimensions.

// Distance formulas read closest to their usual notation with short names
#![allow(clippy::many_single_char_names)]

use super::{Aabb, Sdf};
use glam::{Vec2, Vec3};

/// Edge rounding of boxes and cylinders, relative to the smallest half-extent
pub const EDGE_ROUNDING: f32 = 0.4;

/// Rounding of round cones, relative to the smaller end radius
pub const CONE_ROUNDING: f32 = 0.1;

// ============================================================================
// Constructor functions (ergonomic API)
// ============================================================================

/// Create a sphere with given radius
pub fn sphere(radius: f32) -> Sphere {
    Sphere::new(radius)
}

/// Create a sharp box with given half-extents
pub fn box3(half_extents: Vec3) -> Box3 {
    Box3::new(half_extents)
}

/// Create a box whose edges are rounded outward by `radius`
pub fn rounded_box(half_extents: Vec3, radius: f32) -> RoundedBox {
    RoundedBox::new(half_extents, radius)
}

/// Create a torus lying in the XZ plane
pub fn torus(major_radius: f32, minor_radius: f32) -> Torus {
    Torus::new(major_radius, minor_radius)
}

/// Create a round cone: `base_radius` at the origin, `top_radius` at `height` up Y
pub fn round_cone(base_radius: f32, top_radius: f32, height: f32) -> RoundCone {
    RoundCone::new(base_radius, top_radius, height)
}

/// Create a capsule whose segment runs from the origin to `height` along +Y
pub fn capsule(radius: f32, height: f32) -> Capsule {
    Capsule::new(radius, height)
}

/// Create a Y-aligned cylinder with rounded rims
pub fn rounded_cylinder(radius: f32, half_height: f32) -> RoundedCylinder {
    RoundedCylinder::new(radius, half_height)
}

// ============================================================================
// Primitive Structs
// ============================================================================

/// Sphere centered at origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub radius: f32,
}

impl Sphere {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Sdf for Sphere {
    fn distance(&self, p: Vec3) -> f32 {
        p.length() - self.radius
    }

    fn bounds(&self) -> Aabb {
        Aabb::cube(self.radius)
    }
}

/// Axis-aligned box with sharp edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Box3 {
    pub half_extents: Vec3,
}

impl Box3 {
    pub fn new(half_extents: Vec3) -> Self {
        Self { half_extents }
    }
}

impl Sdf for Box3 {
    fn distance(&self, p: Vec3) -> f32 {
        let q = p.abs() - self.half_extents;
        q.max(Vec3::ZERO).length() + q.x.max(q.y.max(q.z)).min(0.0)
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(-self.half_extents, self.half_extents)
    }
}

/// Box whose surface is offset outward by `radius`, which rounds every edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedBox {
    pub half_extents: Vec3,
    pub radius: f32,
}

impl RoundedBox {
    pub fn new(half_extents: Vec3, radius: f32) -> Self {
        Self {
            half_extents,
            radius,
        }
    }

    /// Rounded box with the editor's default rounding of 40% of the smallest half-extent
    pub fn with_auto_rounding(half_extents: Vec3) -> Self {
        Self::new(half_extents, half_extents.min_element() * EDGE_ROUNDING)
    }
}

impl Sdf for RoundedBox {
    fn distance(&self, p: Vec3) -> f32 {
        let q = p.abs() - self.half_extents;
        q.x.max(q.y.max(q.z)).min(0.0) + q.max(Vec3::ZERO).length() - self.radius
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(-self.half_extents, self.half_extents).expand(self.radius)
    }
}

/// Torus (donut) lying in the XZ plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torus {
    pub major_radius: f32,
    pub minor_radius: f32,
}

impl Torus {
    pub fn new(major_radius: f32, minor_radius: f32) -> Self {
        Self {
            major_radius,
            minor_radius,
        }
    }
}

impl Sdf for Torus {
    fn distance(&self, p: Vec3) -> f32 {
        let q = Vec2::new(Vec2::new(p.x, p.z).length() - self.major_radius, p.y);
        q.length() - self.minor_radius
    }

    fn bounds(&self) -> Aabb {
        let r = self.major_radius + self.minor_radius;
        Aabb::new(
            Vec3::new(-r, -self.minor_radius, -r),
            Vec3::new(r, self.minor_radius, r),
        )
    }
}

/// Cone with spherical ends, from `base_radius` at the origin to `top_radius`
/// at `height` along +Y, inflated by a rounding of 10% of the smaller radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundCone {
    pub base_radius: f32,
    pub top_radius: f32,
    pub height: f32,
}

impl RoundCone {
    pub fn new(base_radius: f32, top_radius: f32, height: f32) -> Self {
        Self {
            base_radius,
            top_radius,
            height,
        }
    }

    /// Outward rounding added to both end caps and the flank
    pub fn rounding(&self) -> f32 {
        self.base_radius.min(self.top_radius) * CONE_ROUNDING
    }
}

impl Sdf for RoundCone {
    fn distance(&self, p: Vec3) -> f32 {
        let (r1, r2, h) = (self.base_radius, self.top_radius, self.height);
        let q = Vec2::new(Vec2::new(p.x, p.z).length(), p.y);
        let b = (r1 - r2) / h;
        let a = (1.0 - b * b).sqrt();
        let k = q.dot(Vec2::new(-b, a));
        let rounding = self.rounding();

        if k < 0.0 {
            q.length() - r1 - rounding
        } else if k > a * h {
            (q - Vec2::new(0.0, h)).length() - r2 - rounding
        } else {
            q.dot(Vec2::new(a, b)) - r1 - rounding
        }
    }

    fn bounds(&self) -> Aabb {
        let rounding = self.rounding();
        let r = self.base_radius.max(self.top_radius) + rounding;
        Aabb::new(
            Vec3::new(-r, -self.base_radius - rounding, -r),
            Vec3::new(r, self.height + self.top_radius + rounding, r),
        )
    }
}

/// Capsule whose core segment runs from the origin to `height` along +Y
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub radius: f32,
    pub height: f32,
}

impl Capsule {
    pub fn new(radius: f32, height: f32) -> Self {
        Self { radius, height }
    }
}

impl Sdf for Capsule {
    fn distance(&self, p: Vec3) -> f32 {
        let on_segment = Vec3::new(0.0, p.y.clamp(0.0, self.height), 0.0);
        (p - on_segment).length() - self.radius
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec3::new(-self.radius, -self.radius, -self.radius),
            Vec3::new(self.radius, self.height + self.radius, self.radius),
        )
    }
}

/// Y-aligned cylinder whose rims are rounded outward by 40% of its smaller dimension
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedCylinder {
    pub radius: f32,
    pub half_height: f32,
}

impl RoundedCylinder {
    pub fn new(radius: f32, half_height: f32) -> Self {
        Self {
            radius,
            half_height,
        }
    }

    pub fn rounding(&self) -> f32 {
        self.radius.min(self.half_height) * EDGE_ROUNDING
    }
}

impl Sdf for RoundedCylinder {
    fn distance(&self, p: Vec3) -> f32 {
        let d = Vec2::new(Vec2::new(p.x, p.z).length(), p.y).abs()
            - Vec2::new(self.radius, self.half_height);
        d.x.max(d.y).min(0.0) + d.max(Vec2::ZERO).length() - self.rounding()
    }

    fn bounds(&self) -> Aabb {
        let rounding = self.rounding();
        let r = self.radius + rounding;
        let h = self.half_height + rounding;
        Aabb::new(Vec3::new(-r, -h, -r), Vec3::new(r, h, r))
    }
}
