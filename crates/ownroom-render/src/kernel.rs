//! Sphere tracing, normals and soft shadows over any distance field

use glam::{Vec2, Vec3};
use ownroom_core::sdf::Sdf;

/// A ray with a normalized direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point along the ray at distance `t`
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Sphere tracing limits
#[derive(Debug, Clone, PartialEq)]
pub struct MarchConfig {
    /// A sample closer than this counts as a hit
    pub hit_epsilon: f32,
    /// Steps before giving up; giving up is a miss
    pub max_steps: u32,
}

impl Default for MarchConfig {
    fn default() -> Self {
        Self {
            hit_epsilon: 0.001,
            max_steps: 128,
        }
    }
}

/// Where a ray met the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub t: f32,
    pub position: Vec3,
    pub steps: u32,
}

/// March `ray` through `sdf` until it hits, passes `t_max`, or runs out of steps.
pub fn march<S: Sdf + ?Sized>(sdf: &S, ray: &Ray, t_max: f32, config: &MarchConfig) -> Option<Hit> {
    let mut t = 0.0;
    for steps in 0..config.max_steps {
        if t > t_max {
            return None;
        }
        let position = ray.at(t);
        let h = sdf.distance(position);
        if h < config.hit_epsilon {
            return Some(Hit { t, position, steps });
        }
        t += h;
    }
    None
}

/// Surface normal from four tetrahedral samples
pub fn calc_normal<S: Sdf + ?Sized>(sdf: &S, p: Vec3) -> Vec3 {
    const OFFSET: f32 = 1e-4;
    let e = Vec2::new(1.0, -1.0) * 0.5773;
    let xyy = Vec3::new(e.x, e.y, e.y);
    let yyx = Vec3::new(e.y, e.y, e.x);
    let yxy = Vec3::new(e.y, e.x, e.y);
    let xxx = Vec3::splat(e.x);

    (xyy * sdf.distance(p + xyy * OFFSET)
        + yyx * sdf.distance(p + yyx * OFFSET)
        + yxy * sdf.distance(p + yxy * OFFSET)
        + xxx * sdf.distance(p + xxx * OFFSET))
    .normalize_or_zero()
}

/// Penumbra factor along `rd` from `ro`: 1 is fully lit, 0 fully shadowed.
///
/// `k` controls sharpness; larger values give harder shadow edges.
pub fn calc_soft_shadow<S: Sdf + ?Sized>(
    sdf: &S,
    ro: Vec3,
    rd: Vec3,
    tmin: f32,
    tmax: f32,
    k: f32,
) -> f32 {
    let mut res: f32 = 1.0;
    let mut t = tmin;
    for _ in 0..50 {
        let h = sdf.distance(ro + rd * t);
        res = res.min(k * h / t);
        t += h.clamp(0.02, 0.20);
        if res < 0.005 || t > tmax {
            break;
        }
    }
    res.clamp(0.0, 1.0)
}
