//! # Own Room Core
//!
//! Signed distance primitives and the building blocks for turning an implicit
//! field into physics colliders.
//!
//! ## Quick Start
//!
//! ```rust
//! use ownroom_core::prelude::*;
//!
//! // A sphere squashed along Y, blended into a box
//! let blob = sphere(0.5).scaled(Vec3::new(1.0, 0.5, 1.0));
//! let block = rounded_box(Vec3::splat(0.3), 0.05).placed(Vec3::X, Vec3::ZERO);
//! let field = blob.smooth_union(block, 0.15);
//!
//! assert!(field.distance(Vec3::ZERO) < 0.0);
//! ```
//!
//! ## Units and Conventions
//!
//! - **Distances**: Arbitrary units (typically interpreted as meters). `1.0` = 1 meter.
//! - **Angles**: All rotation functions use **radians**
//! - **Precision**: All SDF operations use `f32` so the same math can run in a shader
//! - **Coordinate system**: Right-handed, Y-up

pub mod collider;
pub mod sdf;

mod error;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    // SDF primitives and operators
    pub use crate::sdf::{Aabb, Sdf, SdfExt, operations::*, primitives::*};

    // Collider generation
    pub use crate::collider::{BoxCollider, VoxelGrid, greedy_merge};

    // Math (re-export glam)
    pub use glam::{Mat3, Vec2, Vec3};

    // Error handling
    pub use crate::{Error, Result};
}
