//! Own Room Engine - editing session over the scene core
//!
//! The Engine owns the configuration, the shape registry and the room. It
//! applies edits, keeps the wall visibility in step with the camera, and
//! regenerates colliders lazily on [`Engine::commit`].
//!
//! Edits never fail loudly: adding past capacity returns `None`, and edits
//! that name an unknown shape return `false`.
//!
//! ## Example
//!
//! ```rust
//! use ownroom_engine::{Engine, ShapeKind, Vec3};
//!
//! let mut engine = Engine::new();
//! let id = engine.add_shape(ShapeKind::Sphere).expect("registry has room");
//! engine.set_position(id, Vec3::new(0.0, -1.0, 0.0));
//!
//! let colliders = engine.commit()?;
//! assert!(colliders.len() > 5);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod preview;

use anyhow::Result;
use ownroom_render::wall_visibility;
use ownroom_scene::evaluator::SceneSdf;
use ownroom_scene::registry::ShapeRegistry;
use ownroom_scene::room::Room;
use ownroom_scene::voxelize::Voxelizer;
use std::path::Path;

// Re-export commonly used types from dependencies
pub use glam::Vec3;
pub use ownroom_core::collider::BoxCollider;
pub use ownroom_render::{Camera, Frame};
pub use ownroom_scene::config::SceneConfig;
pub use ownroom_scene::room::WallVisibility;
pub use ownroom_scene::shape::{Operation, Shape, ShapeId, ShapeKind};
pub use ownroom_scene::voxelize::CellSize;

pub use preview::{PreviewOptions, PreviewResult};

/// An editing session
pub struct Engine {
    config: SceneConfig,
    registry: ShapeRegistry,
    room: Room,
    camera: Camera,
    voxelizer: Voxelizer,

    /// Colliders from the last commit
    colliders: Vec<BoxCollider>,

    /// Shapes changed since the last commit
    dirty: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Create an engine from `config`, repairing values that cannot be evaluated
    pub fn with_config(config: SceneConfig) -> Self {
        let config = config.validated();
        let mut engine = Self {
            registry: ShapeRegistry::from_config(&config),
            room: Room::new(config.room.clone()),
            camera: Camera::default(),
            voxelizer: Voxelizer::new(&config),
            colliders: Vec::new(),
            dirty: true,
            config,
        };
        engine.refresh_visibility();
        engine
    }

    /// Override the voxelizer cell size for subsequent commits
    pub fn set_cell_size(&mut self, cell_size: CellSize) {
        self.voxelizer = self.voxelizer.clone().with_cell_size(cell_size);
        self.dirty = true;
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Add a shape of `kind` at the origin; `None` when the registry is full
    pub fn add_shape(&mut self, kind: ShapeKind) -> Option<ShapeId> {
        match self.registry.add(kind) {
            Ok(id) => {
                tracing::debug!("Added {} ({})", id, kind);
                self.dirty = true;
                Some(id)
            }
            Err(e) => {
                tracing::debug!("Ignoring add of {}: {}", kind, e);
                None
            }
        }
    }

    pub fn remove_shape(&mut self, id: ShapeId) -> bool {
        let removed = self.registry.remove(id).map(|_| ());
        self.applied(removed)
    }

    pub fn set_position(&mut self, id: ShapeId, position: Vec3) -> bool {
        let result = self.registry.set_position(id, position);
        self.applied(result)
    }

    /// Set per-axis scale; non-positive components are clamped
    pub fn set_scale(&mut self, id: ShapeId, scale: Vec3) -> bool {
        let result = self.registry.set_scale(id, scale).map(|_| ());
        self.applied(result)
    }

    /// Set Euler rotation in radians (intrinsic XYZ)
    pub fn set_rotation(&mut self, id: ShapeId, rotation: Vec3) -> bool {
        let result = self.registry.set_rotation(id, rotation);
        self.applied(result)
    }

    pub fn toggle_operation(&mut self, id: ShapeId) -> bool {
        let result = self.registry.toggle_operation(id).map(|_| ());
        self.applied(result)
    }

    fn applied(&mut self, result: ownroom_scene::Result<()>) -> bool {
        match result {
            Ok(()) => {
                self.dirty = true;
                true
            }
            Err(e) => {
                tracing::debug!("Ignoring edit: {}", e);
                false
            }
        }
    }

    // ========================================================================
    // Scene Access
    // ========================================================================

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Shapes in composition order
    pub fn shapes(&self) -> &[Shape] {
        self.registry.shapes()
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.registry.get(id)
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Whether shapes changed since the last commit
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Colliders from the last commit, possibly stale
    pub fn colliders(&self) -> &[BoxCollider] {
        &self.colliders
    }

    /// Snapshot of the full scene field for rendering
    pub fn scene_sdf(&self) -> SceneSdf {
        SceneSdf::new(self.registry.shapes(), &self.room, self.config.blend_strength)
    }

    // ========================================================================
    // Colliders
    // ========================================================================

    /// Regenerate colliders if anything changed since the last commit.
    ///
    /// The result is five wall boxes followed by the shape boxes.
    pub fn commit(&mut self) -> Result<&[BoxCollider]> {
        if self.dirty {
            let snapshot = self.registry.snapshot();
            let voxelization = self.voxelizer.voxelize(&snapshot, &self.room)?;
            tracing::info!(
                "Committed {} shapes into {} colliders ({} walls)",
                snapshot.len(),
                voxelization.boxes.len(),
                voxelization.wall_count
            );
            self.colliders = voxelization.boxes;
            self.dirty = false;
        }
        Ok(&self.colliders)
    }

    // ========================================================================
    // Camera & Preview
    // ========================================================================

    /// Move the camera and recompute which walls face it
    pub fn update_camera(&mut self, camera: Camera) -> WallVisibility {
        self.camera = camera;
        self.refresh_visibility()
    }

    fn refresh_visibility(&mut self) -> WallVisibility {
        let visibility = wall_visibility(&self.room, self.camera.position);
        self.room.set_visibility(visibility);
        visibility
    }

    /// Render the current scene from the current camera
    pub fn render_preview(&self, options: &PreviewOptions) -> Frame {
        preview::render_preview(&self.scene_sdf(), &self.camera, options)
    }

    /// Render and save the current scene as PNG
    pub fn save_preview(&self, path: &Path, options: &PreviewOptions) -> Result<PreviewResult> {
        let frame = self.render_preview(options);
        preview::save_frame(&frame, path)
    }
}
