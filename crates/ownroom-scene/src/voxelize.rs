//! Collider generation for a scene
//!
//! Walls get one analytic box each. Shapes are sampled on a grid using the
//! shapes-only field and the solid cells are merged greedily into boxes.

use crate::config::{SceneConfig, VoxelizerConfig};
use crate::error::Result;
use crate::evaluator::ShapeField;
use crate::room::Room;
use crate::shape::Shape;
use ownroom_core::collider::{BoxCollider, MAX_GRID_CELLS, VoxelGrid, greedy_merge};
use ownroom_core::sdf::Aabb;

/// Minimum growth per step while coarsening a grid to fit the cell budget
const FIT_GROWTH: f32 = 1.01;
const MAX_FIT_STEPS: usize = 64;

/// How the grid cell size is chosen
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellSize {
    /// Derived from the mean extent of the shape bounds, then clamped
    Adaptive,
    /// Always this edge length
    Fixed(f32),
}

/// Turns a scene snapshot into an ordered list of box colliders
#[derive(Debug, Clone)]
pub struct Voxelizer {
    config: VoxelizerConfig,
    blend_strength: f32,
    cell_size: CellSize,
}

impl Default for Voxelizer {
    fn default() -> Self {
        Self::new(&SceneConfig::default())
    }
}

impl Voxelizer {
    pub fn new(config: &SceneConfig) -> Self {
        let cell_size = match config.voxel.cell_size {
            Some(size) => CellSize::Fixed(size),
            None => CellSize::Adaptive,
        };
        Self {
            config: config.voxel.clone(),
            blend_strength: config.blend_strength,
            cell_size,
        }
    }

    pub fn with_cell_size(mut self, cell_size: CellSize) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Edge length used for a grid over `bounds`
    pub fn cell_size_for(&self, bounds: &Aabb) -> f32 {
        match self.cell_size {
            CellSize::Fixed(size) => size,
            CellSize::Adaptive => {
                let size = bounds.size();
                let mean = (size.x + size.y + size.z) / 3.0;
                // Not `clamp`, which panics on an inverted range
                (mean / self.config.cells_per_extent)
                    .max(self.config.min_cell_size)
                    .min(self.config.max_cell_size)
            }
        }
    }

    /// Coarsen `cell_size` until a grid over `bounds` fits the cell budget.
    ///
    /// Invalid sizes pass through untouched so grid construction reports them.
    pub fn fit_cell_size(&self, bounds: &Aabb, cell_size: f32) -> f32 {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return cell_size;
        }
        let budget = self.config.max_grid_cells.clamp(1, MAX_GRID_CELLS);

        let mut size = cell_size;
        for _ in 0..MAX_FIT_STEPS {
            match VoxelGrid::cell_count_for(bounds, size) {
                Some(cells) if cells <= budget => break,
                Some(cells) => size *= (cells as f32 / budget as f32).cbrt().max(FIT_GROWTH),
                None => size *= 2.0,
            }
        }

        if size != cell_size {
            tracing::warn!(
                "Grid over {:?}..{:?} exceeds {} cells, coarsened cell size from {} to {}",
                bounds.min,
                bounds.max,
                budget,
                cell_size,
                size
            );
        }
        size
    }

    /// Generate colliders: the five wall boxes first, then the merged shape boxes.
    ///
    /// The output depends only on the inputs, so identical scenes produce
    /// byte-identical collider lists.
    pub fn voxelize(&self, shapes: &[Shape], room: &Room) -> Result<Voxelization> {
        let mut boxes: Vec<BoxCollider> = room.colliders().to_vec();
        let wall_count = boxes.len();

        let field = ShapeField::new(shapes, self.blend_strength);
        let Some(bounds) = field.bounds() else {
            tracing::debug!("No shapes, emitting {} wall colliders", wall_count);
            return Ok(Voxelization {
                boxes,
                wall_count,
                grid: None,
            });
        };

        let cell_size = self.fit_cell_size(&bounds, self.cell_size_for(&bounds));
        let threshold = -self.config.threshold_ratio * cell_size;
        tracing::debug!(
            "Voxelizing {} shapes over {:?}..{:?} with cell size {}",
            shapes.len(),
            bounds.min,
            bounds.max,
            cell_size
        );

        let grid = VoxelGrid::from_fn(bounds, cell_size, |p| field.is_solid(p, threshold))?;
        let shape_boxes = greedy_merge(&grid);
        tracing::debug!(
            "Merged {} solid cells of {} into {} boxes",
            grid.solid_count(),
            grid.cell_count(),
            shape_boxes.len()
        );

        boxes.extend(shape_boxes);
        Ok(Voxelization {
            boxes,
            wall_count,
            grid: Some(grid),
        })
    }
}

/// Result of one voxelization pass
#[derive(Debug, Clone)]
pub struct Voxelization {
    /// Wall boxes followed by shape boxes
    pub boxes: Vec<BoxCollider>,
    pub wall_count: usize,
    /// The sampled grid, absent when there were no shapes
    pub grid: Option<VoxelGrid>,
}

impl Voxelization {
    pub fn wall_boxes(&self) -> &[BoxCollider] {
        &self.boxes[..self.wall_count]
    }

    pub fn shape_boxes(&self) -> &[BoxCollider] {
        &self.boxes[self.wall_count..]
    }

    pub fn cell_size(&self) -> Option<f32> {
        self.grid.as_ref().map(|g| g.cell_size)
    }
}
