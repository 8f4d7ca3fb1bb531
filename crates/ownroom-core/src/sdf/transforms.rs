//! SDF Transforms - placement and non-uniform scale

use super::{Aabb, Sdf};
use glam::{EulerRot, Mat3, Vec3};

/// Rotation matrix for Euler angles in radians, applied intrinsically X then Y then Z.
#[inline]
pub fn rotation_from_euler(euler: Vec3) -> Mat3 {
    Mat3::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z)
}

/// Rigid placement: rotate the inner field, then translate it.
///
/// Points are brought into local space with `Rᵀ(p - t)`, which keeps the
/// field exact since rotation preserves distances.
#[derive(Debug, Clone, Copy)]
pub struct Placed<S: Sdf> {
    pub inner: S,
    pub translation: Vec3,
    pub rotation: Mat3,
    inverse: Mat3,
}

impl<S: Sdf> Placed<S> {
    pub fn new(inner: S, translation: Vec3, euler: Vec3) -> Self {
        let rotation = rotation_from_euler(euler);
        Self {
            inner,
            translation,
            rotation,
            inverse: rotation.transpose(),
        }
    }

    /// Map a world-space point into the inner field's frame
    #[inline]
    pub fn to_local(&self, p: Vec3) -> Vec3 {
        self.inverse * (p - self.translation)
    }
}

impl<S: Sdf> Sdf for Placed<S> {
    fn distance(&self, p: Vec3) -> f32 {
        self.inner.distance(self.to_local(p))
    }

    fn bounds(&self) -> Aabb {
        self.inner.bounds().transformed(self.rotation, self.translation)
    }
}

/// Non-uniform scale transform.
///
/// Evaluates the inner field at `p / scale` and multiplies by the smallest
/// component. The result underestimates the true distance, which keeps
/// sphere tracing safe but is not exact. All components must be positive.
#[derive(Debug, Clone, Copy)]
pub struct NonUniformScale<S: Sdf> {
    pub inner: S,
    pub scale: Vec3,
}

impl<S: Sdf> NonUniformScale<S> {
    pub fn new(inner: S, scale: Vec3) -> Self {
        Self { inner, scale }
    }
}

impl<S: Sdf> Sdf for NonUniformScale<S> {
    fn distance(&self, p: Vec3) -> f32 {
        self.inner.distance(p / self.scale) * self.scale.min_element()
    }

    fn bounds(&self) -> Aabb {
        let b = self.inner.bounds();
        Aabb::new(b.min * self.scale, b.max * self.scale)
    }
}
