//! Collider generation from implicit fields
//!
//! A field is sampled at cell centers on a regular grid, each cell is
//! classified as solid or empty, and the solid cells are merged into as few
//! axis-aligned boxes as a greedy sweep finds.
//!
//! Uses Rayon for parallel classification of grid cells.

mod greedy;

use crate::sdf::Aabb;
use crate::{Error, Result};
use glam::Vec3;
use rayon::prelude::*;

pub use greedy::greedy_merge;

/// Upper bound on cells in a single grid
pub const MAX_GRID_CELLS: usize = 1 << 26;

/// An axis-aligned box collider.
///
/// Plain-old-data so a collider list can be handed to a physics engine or
/// uploaded as a buffer without conversion.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct BoxCollider {
    /// Box center in world space
    pub position: [f32; 3],
    /// Full edge lengths (not half-extents)
    pub size: [f32; 3],
}

impl BoxCollider {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self {
            position: center.to_array(),
            size: size.to_array(),
        }
    }

    pub fn center(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn size(&self) -> Vec3 {
        Vec3::from_array(self.size)
    }

    pub fn half_extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.center(), self.half_extents())
    }

    pub fn volume(&self) -> f32 {
        let s = self.size();
        s.x * s.y * s.z
    }

    /// Inclusive containment test
    pub fn contains(&self, p: Vec3) -> bool {
        self.aabb().contains(p)
    }
}

/// Solid/empty classification of a regular grid of cubic cells.
///
/// Cell `(x, y, z)` covers `origin + [x, x+1) * cell_size` on each axis and
/// is stored at `(x * ny + y) * nz + z`.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    pub dims: [usize; 3],
    pub origin: Vec3,
    pub cell_size: f32,
    solid: Vec<bool>,
}

impl VoxelGrid {
    /// Classify every cell of `bounds` by evaluating `is_solid` at its center.
    ///
    /// The grid has `ceil(size / cell_size)` cells per axis, so it may
    /// overhang `bounds.max` by less than one cell.
    pub fn from_fn<F>(bounds: Aabb, cell_size: f32, is_solid: F) -> Result<Self>
    where
        F: Fn(Vec3) -> bool + Sync,
    {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "cell size must be positive, got {cell_size}"
            )));
        }

        let dims = grid_dims(&bounds, cell_size);
        let [nx, ny, nz] = dims;
        let total = total_cells(dims)
            .filter(|&n| n <= MAX_GRID_CELLS)
            .ok_or(Error::GridTooLarge {
                x: nx,
                y: ny,
                z: nz,
            })?;

        let origin = bounds.min;
        let solid: Vec<bool> = (0..total)
            .into_par_iter()
            .map(|idx| {
                let x = idx / (ny * nz);
                let y = (idx / nz) % ny;
                let z = idx % nz;
                let center = origin
                    + (Vec3::new(x as f32, y as f32, z as f32) + Vec3::splat(0.5)) * cell_size;
                is_solid(center)
            })
            .collect();

        Ok(Self {
            dims,
            origin,
            cell_size,
            solid,
        })
    }

    /// Number of cells a grid over `bounds` would have, `None` on overflow
    pub fn cell_count_for(bounds: &Aabb, cell_size: f32) -> Option<usize> {
        total_cells(grid_dims(bounds, cell_size))
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (x * self.dims[1] + y) * self.dims[2] + z
    }

    /// Whether a cell is solid; out-of-range cells are empty
    pub fn is_solid(&self, x: usize, y: usize, z: usize) -> bool {
        let [nx, ny, nz] = self.dims;
        x < nx && y < ny && z < nz && self.solid[self.index(x, y, z)]
    }

    /// Center of a cell in world space
    pub fn cell_center(&self, x: usize, y: usize, z: usize) -> Vec3 {
        self.origin + (Vec3::new(x as f32, y as f32, z as f32) + Vec3::splat(0.5)) * self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        self.solid.len()
    }

    pub fn solid_count(&self) -> usize {
        self.solid.iter().filter(|&&s| s).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.solid.iter().any(|&s| s)
    }

    /// Iterate over the coordinates of all solid cells in storage order
    pub fn solid_cells(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        let [_, ny, nz] = self.dims;
        self.solid
            .iter()
            .enumerate()
            .filter(|(_, s)| **s)
            .map(move |(idx, _)| [idx / (ny * nz), (idx / nz) % ny, idx % nz])
    }
}

fn cells_along(extent: f32, cell_size: f32) -> usize {
    (extent / cell_size).ceil().max(0.0) as usize
}

fn grid_dims(bounds: &Aabb, cell_size: f32) -> [usize; 3] {
    let size = bounds.size().max(Vec3::ZERO);
    [
        cells_along(size.x, cell_size),
        cells_along(size.y, cell_size),
        cells_along(size.z, cell_size),
    ]
}

fn total_cells([nx, ny, nz]: [usize; 3]) -> Option<usize> {
    nx.checked_mul(ny).and_then(|n| n.checked_mul(nz))
}
