//! Scene configuration
//!
//! Every field has a default, so a partial document such as
//! `{ "blend_strength": 0.2 }` deserializes to a complete config.

use glam::Vec3;
use ownroom_core::collider::MAX_GRID_CELLS;
use serde::{Deserialize, Serialize};

/// Smallest blend constant the smooth operators are evaluated with
pub const MIN_BLEND_STRENGTH: f32 = 1e-3;

/// Raise `k` to [`MIN_BLEND_STRENGTH`] when it is smaller or NaN.
///
/// The smooth operators divide by `k`, so zero would turn every distance NaN.
pub fn clamp_blend_strength(k: f32) -> f32 {
    if k >= MIN_BLEND_STRENGTH {
        k
    } else {
        tracing::warn!("Clamped blend strength from {} to {}", k, MIN_BLEND_STRENGTH);
        MIN_BLEND_STRENGTH
    }
}

/// Top-level settings shared by editing, rendering and collider generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Smooth blend constant `k`, used by both the render and collider paths
    pub blend_strength: f32,
    /// Maximum number of shapes the registry accepts
    pub max_shapes: usize,
    /// Radius given to newly added shapes
    pub default_radius: f32,
    pub room: RoomConfig,
    pub voxel: VoxelizerConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            blend_strength: 0.15,
            max_shapes: 10,
            default_radius: 0.5,
            room: RoomConfig::default(),
            voxel: VoxelizerConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Repair values that deserialize fine but cannot be evaluated
    pub fn validated(mut self) -> Self {
        self.blend_strength = clamp_blend_strength(self.blend_strength);

        let voxel = &mut self.voxel;
        if voxel.min_cell_size > voxel.max_cell_size {
            tracing::warn!(
                "Swapped cell size range {}..{}",
                voxel.min_cell_size,
                voxel.max_cell_size
            );
            std::mem::swap(&mut voxel.min_cell_size, &mut voxel.max_cell_size);
        }
        self
    }
}

/// Room boundary geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Half-size of each wall slab in its two long directions
    pub size: f32,
    /// Half-thickness of each wall slab
    pub wall_thickness: f32,
    /// Outward rounding applied to wall edges
    pub corner_radius: f32,
    /// Full thickness of the mask boxes outside each wall
    pub mask_thickness: f32,
    /// Gap between a wall and the near face of its mask box
    pub mask_offset: f32,

    // Slab centers
    pub floor: Vec3,
    pub front: Vec3,
    pub back: Vec3,
    pub left: Vec3,
    pub right: Vec3,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            size: 2.0,
            wall_thickness: 0.01,
            corner_radius: 0.3,
            mask_thickness: 1.0,
            mask_offset: 0.5,

            floor: Vec3::new(0.0, -2.0, 0.0),
            front: Vec3::new(0.0, 0.1, 2.15),
            back: Vec3::new(0.0, 0.1, -2.15),
            left: Vec3::new(-2.15, 0.1, 0.0),
            right: Vec3::new(2.15, 0.1, 0.0),
        }
    }
}

/// Collider grid settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoxelizerConfig {
    /// Adaptive cell size is the mean bounds extent divided by this
    pub cells_per_extent: f32,
    /// Lower clamp for adaptive cell size
    pub min_cell_size: f32,
    /// Upper clamp for adaptive cell size
    pub max_cell_size: f32,
    /// A cell is solid below `-threshold_ratio * cell_size`
    pub threshold_ratio: f32,
    /// Fixed cell size; adaptive sizing is used when unset
    pub cell_size: Option<f32>,
    /// Cells allowed in one grid; the cell size grows until the grid fits
    pub max_grid_cells: usize,
}

impl Default for VoxelizerConfig {
    fn default() -> Self {
        Self {
            cells_per_extent: 12.0,
            min_cell_size: 0.15,
            max_cell_size: 0.2,
            threshold_ratio: 0.05,
            cell_size: None,
            max_grid_cells: MAX_GRID_CELLS,
        }
    }
}
