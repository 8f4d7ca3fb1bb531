//! # Own Room Scene
//!
//! The editable scene: a fixed-capacity list of primitive shapes inside a
//! five-slab room, the distance field that composes them, and the voxelizer
//! that turns the shapes into box colliders.
//!
//! ## Example
//!
//! ```rust
//! use ownroom_scene::prelude::*;
//!
//! let config = SceneConfig::default();
//! let mut registry = ShapeRegistry::from_config(&config);
//! let room = Room::new(config.room.clone());
//!
//! let id = registry.add(ShapeKind::Sphere)?;
//! registry.set_position(id, Vec3::new(0.0, -1.0, 0.0))?;
//!
//! let scene = SceneSdf::new(registry.shapes(), &room, config.blend_strength);
//! assert!(scene.map(Vec3::new(0.0, -1.0, 0.0)) < 0.0);
//!
//! let colliders = Voxelizer::new(&config).voxelize(registry.shapes(), &room)?;
//! assert!(colliders.boxes.len() > 5);
//! # Ok::<(), ownroom_scene::SceneError>(())
//! ```

pub mod config;
pub mod evaluator;
pub mod registry;
pub mod room;
pub mod shape;
pub mod voxelize;

mod error;

pub use error::{Result, SceneError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{RoomConfig, SceneConfig, VoxelizerConfig};
    pub use crate::evaluator::{SceneSdf, ShapeField};
    pub use crate::registry::{MIN_SCALE, ShapeRegistry};
    pub use crate::room::{Room, Wall, WallVisibility};
    pub use crate::shape::{Operation, Shape, ShapeId, ShapeKind};
    pub use crate::voxelize::{CellSize, Voxelization, Voxelizer};
    pub use crate::{Result, SceneError};

    pub use glam::Vec3;
    pub use ownroom_core::collider::BoxCollider;
}
