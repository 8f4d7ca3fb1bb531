//! SDF Operations - hard and smooth boolean composition
//!
//! The scalar functions are the source of truth. Render and collider paths
//! must call them with the same blend constant `k`, otherwise what is drawn
//! and what collides drift apart.

use super::{Aabb, Sdf};
use glam::Vec3;

// ============================================================================
// Scalar operators
// ============================================================================

/// Hard union: the closer of two surfaces
#[inline]
pub fn union(d1: f32, d2: f32) -> f32 {
    d1.min(d2)
}

/// Smooth union with a blend band of width ~`k`.
///
/// Never larger than [`union`], symmetric in its arguments, and equal to the
/// hard union once the two distances differ by at least `k`.
#[inline]
pub fn smooth_union(d1: f32, d2: f32, k: f32) -> f32 {
    let h = (k - (d1 - d2).abs()).max(0.0) / k;
    d1.min(d2) - h * h * k * 0.25
}

/// Smoothly remove the shape at distance `d1` from the shape at distance `d2`.
///
/// Argument order matters: `d1` is the cutter, `d2` the base.
#[inline]
pub fn smooth_subtraction(d1: f32, d2: f32, k: f32) -> f32 {
    let h = (0.5 - 0.5 * (d2 + d1) / k).clamp(0.0, 1.0);
    lerp(d2, -d1, h) + k * h * (1.0 - h)
}

// ============================================================================
// Field combinators
// ============================================================================

/// Union of two SDFs (combine shapes)
#[derive(Debug, Clone, Copy)]
pub struct Union<A: Sdf, B: Sdf> {
    pub a: A,
    pub b: B,
}

impl<A: Sdf, B: Sdf> Union<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: Sdf, B: Sdf> Sdf for Union<A, B> {
    fn distance(&self, p: Vec3) -> f32 {
        union(self.a.distance(p), self.b.distance(p))
    }

    fn bounds(&self) -> Aabb {
        self.a.bounds().union(&self.b.bounds())
    }
}

/// Smooth union with quadratic blending
#[derive(Debug, Clone, Copy)]
pub struct SmoothUnion<A: Sdf, B: Sdf> {
    pub a: A,
    pub b: B,
    pub k: f32,
}

impl<A: Sdf, B: Sdf> SmoothUnion<A, B> {
    pub fn new(a: A, b: B, k: f32) -> Self {
        Self { a, b, k }
    }
}

impl<A: Sdf, B: Sdf> Sdf for SmoothUnion<A, B> {
    fn distance(&self, p: Vec3) -> f32 {
        smooth_union(self.a.distance(p), self.b.distance(p), self.k)
    }

    fn bounds(&self) -> Aabb {
        self.a.bounds().union(&self.b.bounds()).expand(self.k)
    }
}

/// Smooth subtraction: `cutter` removed from `base`
#[derive(Debug, Clone, Copy)]
pub struct SmoothSubtract<C: Sdf, B: Sdf> {
    pub cutter: C,
    pub base: B,
    pub k: f32,
}

impl<C: Sdf, B: Sdf> SmoothSubtract<C, B> {
    pub fn new(cutter: C, base: B, k: f32) -> Self {
        Self { cutter, base, k }
    }
}

impl<C: Sdf, B: Sdf> Sdf for SmoothSubtract<C, B> {
    fn distance(&self, p: Vec3) -> f32 {
        smooth_subtraction(self.cutter.distance(p), self.base.distance(p), self.k)
    }

    fn bounds(&self) -> Aabb {
        // The blend term can push the surface out by at most k/4
        self.base.bounds().expand(self.k * 0.25)
    }
}

// ============================================================================
// Helpers
// ============================================================================

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// ============================================================================
// Tests
// ============================================================================
