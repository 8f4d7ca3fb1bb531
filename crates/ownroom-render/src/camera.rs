//! Look-at camera for primary ray generation

use crate::kernel::Ray;
use glam::Vec3;

/// Marching never gives up before this distance
pub const MIN_MARCH_DISTANCE: f32 = 50.0;

/// A perspective camera looking from `position` toward `target`
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera is looking at
    pub target: Vec3,
    /// Up vector (usually Y-up)
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Near plane, used for depth output
    pub near: f32,
    /// Far plane, used for depth output
    pub far: f32,
}

impl Default for Camera {
    /// The editor's far-away, narrow-angle overview of the room
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 300.0, 600.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 1.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// Camera at `position` looking at `target` with a 45 degree field of view
    pub fn look_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            fov: 45.0_f32.to_radians(),
            ..Default::default()
        }
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize()
    }

    /// Up direction orthogonal to forward and right
    pub fn actual_up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// How far a primary ray may travel: `max(50, 2 * |position|)`
    pub fn max_distance(&self) -> f32 {
        MIN_MARCH_DISTANCE.max(self.position.length() * 2.0)
    }

    /// Primary ray through the center of pixel `(x, y)`, with `y = 0` at the top
    pub fn ray_for_pixel(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let aspect = width as f32 / height.max(1) as f32;
        let half_height = (self.fov * 0.5).tan();
        let u = ((x as f32 + 0.5) / width as f32 * 2.0 - 1.0) * half_height * aspect;
        let v = (1.0 - (y as f32 + 0.5) / height as f32 * 2.0) * half_height;

        let direction = self.forward() + self.right() * u + self.actual_up() * v;
        Ray::new(self.position, direction)
    }

    /// Window depth in `[0, 1]` for a hit at ray distance `t`.
    ///
    /// Hits nearer than the near plane, including `t = 0`, land on 0.
    pub fn depth(&self, t: f32) -> f32 {
        let (n, f) = (self.near, self.far);
        let ndc = (f + n - 2.0 * n * f / t) / (f - n);
        ((ndc + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}
