//! Per-pixel shading and whole-frame rendering
//!
//! Frames are rendered on the CPU with Rayon, one pixel per task. Output
//! order is row-major with the top row first.

use crate::camera::Camera;
use crate::kernel::{MarchConfig, Ray, calc_normal, calc_soft_shadow, march};
use glam::Vec3;
use image::{Rgba, RgbaImage};
use ownroom_core::sdf::Sdf;
use rayon::prelude::*;

/// Lighting and surface settings
#[derive(Debug, Clone, PartialEq)]
pub struct Lighting {
    /// Direction toward the light (will be normalized)
    pub light_direction: Vec3,
    /// Surface color (RGB, 0-1)
    pub albedo: Vec3,
    /// Upper clamp on the diffuse term
    pub max_diffuse: f32,

    // Shadow ray parameters
    pub shadow_tmin: f32,
    pub shadow_tmax: f32,
    pub shadow_sharpness: f32,
    /// Shadow rays start this far off the surface along the normal
    pub surface_offset: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            light_direction: Vec3::new(1.0, 1.5, -0.5),
            // Warm plaster
            albedo: Vec3::new(0.92, 0.89, 0.84),
            max_diffuse: 0.5,

            shadow_tmin: 0.01,
            shadow_tmax: 3.0,
            shadow_sharpness: 16.0,
            surface_offset: 0.001,
        }
    }
}

/// One shaded sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    /// Gamma-corrected RGB
    pub color: Vec3,
    /// 1 for a hit, 0 for background
    pub alpha: f32,
    /// Window depth in `[0, 1]`, 1 for background
    pub depth: f32,
}

impl Pixel {
    /// Transparent white at the far plane
    pub const MISS: Pixel = Pixel {
        color: Vec3::ONE,
        alpha: 0.0,
        depth: 1.0,
    };

    pub fn is_hit(&self) -> bool {
        self.alpha > 0.0
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            to_byte(self.color.x),
            to_byte(self.color.y),
            to_byte(self.color.z),
            to_byte(self.alpha),
        ]
    }
}

/// Shade the surface seen along `ray`
pub fn shade<S: Sdf + ?Sized>(
    sdf: &S,
    camera: &Camera,
    ray: &Ray,
    march_config: &MarchConfig,
    lighting: &Lighting,
) -> Pixel {
    let Some(hit) = march(sdf, ray, camera.max_distance(), march_config) else {
        return Pixel::MISS;
    };

    let normal = calc_normal(sdf, hit.position);
    let light = lighting.light_direction.normalize_or_zero();

    let diffuse = normal.dot(light).min(lighting.max_diffuse).max(0.0);
    let shadow = calc_soft_shadow(
        sdf,
        hit.position + normal * lighting.surface_offset,
        light,
        lighting.shadow_tmin,
        lighting.shadow_tmax,
        lighting.shadow_sharpness,
    );
    let ambient = 1.0 + normal.y;

    let color = lighting.albedo * (ambient * 0.5 + diffuse * shadow);

    Pixel {
        color: color.max(Vec3::ZERO).powf(0.5),
        alpha: 1.0,
        depth: camera.depth(hit.t),
    }
}

/// A rendered image with color, coverage and depth per pixel
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Pixel>,
}

impl Frame {
    pub fn get(&self, x: u32, y: u32) -> Option<&Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize)
    }

    pub fn hit_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_hit()).count()
    }

    pub fn depth_buffer(&self) -> Vec<f32> {
        self.pixels.iter().map(|p| p.depth).collect()
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            self.get(x, y)
                .map_or(Rgba([255, 255, 255, 0]), |p| Rgba(p.to_rgba8()))
        })
    }
}

/// Render with default march and lighting settings
pub fn render_frame<S: Sdf + ?Sized>(sdf: &S, camera: &Camera, width: u32, height: u32) -> Frame {
    render_frame_with(
        sdf,
        camera,
        width,
        height,
        &MarchConfig::default(),
        &Lighting::default(),
    )
}

pub fn render_frame_with<S: Sdf + ?Sized>(
    sdf: &S,
    camera: &Camera,
    width: u32,
    height: u32,
    march_config: &MarchConfig,
    lighting: &Lighting,
) -> Frame {
    let pixels: Vec<Pixel> = (0..width * height)
        .into_par_iter()
        .map(|i| {
            let ray = camera.ray_for_pixel(i % width, i / width, width, height);
            shade(sdf, camera, &ray, march_config, lighting)
        })
        .collect();

    let frame = Frame {
        width,
        height,
        pixels,
    };
    tracing::debug!(
        "Rendered {}x{} frame, {} pixels hit",
        width,
        height,
        frame.hit_count()
    );
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use ownroom_core::sdf::primitives::sphere;

    fn camera() -> Camera {
        Camera::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO)
    }

    #[test]
    fn miss_is_transparent_white_at_far_plane() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        let pixel = shade(&sphere(1.0), &camera(), &ray, &MarchConfig::default(), &Lighting::default());

        assert_eq!(pixel, Pixel::MISS);
        assert_eq!(pixel.to_rgba8(), [255, 255, 255, 0]);
    }

    #[test]
    fn hit_is_opaque_with_valid_depth() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let pixel = shade(&sphere(1.0), &camera(), &ray, &MarchConfig::default(), &Lighting::default());

        assert!(pixel.is_hit());
        assert!(pixel.depth > 0.0 && pixel.depth < 1.0);
        for c in pixel.color.to_array() {
            assert!((0.0..=1.0).contains(&c));
        }
    }

    #[test]
    fn lit_side_is_brighter_than_underside() {
        let sdf = sphere(1.0);
        let lighting = Lighting::default();
        let config = MarchConfig::default();

        let top_cam = Camera::look_at(Vec3::new(0.0, 5.0, 0.01), Vec3::ZERO);
        let bottom_cam = Camera::look_at(Vec3::new(0.0, -5.0, 0.01), Vec3::ZERO);
        let top = shade(&sdf, &top_cam, &top_cam.ray_for_pixel(0, 0, 1, 1), &config, &lighting);
        let bottom = shade(&sdf, &bottom_cam, &bottom_cam.ray_for_pixel(0, 0, 1, 1), &config, &lighting);

        assert!(top.color.x > bottom.color.x);
    }

    #[test]
    fn frame_covers_sphere_in_center() {
        let frame = render_frame(&sphere(1.0), &camera(), 32, 24);

        assert_eq!(frame.pixels.len(), 32 * 24);
        assert!(frame.get(16, 12).is_some_and(Pixel::is_hit));
        assert!(frame.get(0, 0).is_some_and(|p| !p.is_hit()));
        assert!(frame.get(32, 0).is_none());
        assert!(frame.hit_count() > 0 && frame.hit_count() < 32 * 24);

        let image = frame.to_rgba_image();
        assert_eq!(image.dimensions(), (32, 24));
        assert_eq!(image.get_pixel(16, 12)[3], 255);
        assert_eq!(image.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn negative_diffuse_cap_leaves_ambient_only() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let lighting = Lighting {
            max_diffuse: -1.0,
            ..Lighting::default()
        };
        let pixel = shade(&sphere(1.0), &camera(), &ray, &MarchConfig::default(), &lighting);

        assert!(pixel.is_hit());
        assert!(pixel.color.is_finite());
    }
}
