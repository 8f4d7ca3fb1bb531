//! Own Room Render - CPU sphere tracing for scene previews
//!
//! The kernel functions work on any [`Sdf`](ownroom_core::sdf::Sdf), so the
//! same march, normal and shadow code serves the full scene field and plain
//! test shapes.
//!
//! ## Example
//!
//! ```rust
//! use glam::Vec3;
//! use ownroom_core::sdf::primitives::sphere;
//! use ownroom_render::{Camera, render_frame};
//!
//! let camera = Camera::look_at(Vec3::new(0.0, 0.0, 4.0), Vec3::ZERO);
//! let frame = render_frame(&sphere(1.0), &camera, 16, 16);
//! assert!(frame.hit_count() > 0);
//! ```

pub mod camera;
pub mod kernel;
pub mod shading;
pub mod visibility;

pub use camera::Camera;
pub use kernel::{Hit, MarchConfig, Ray, calc_normal, calc_soft_shadow, march};
pub use shading::{Frame, Lighting, Pixel, render_frame, render_frame_with, shade};
pub use visibility::{is_wall_facing, wall_visibility};
