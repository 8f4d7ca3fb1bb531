//! Greedy box merging over a voxel grid
//!
//! Cells are visited with x outermost and z innermost. From each unvisited
//! solid cell the run is grown along x, then the x-run is grown along y, then
//! the x-by-y slab is grown along z. The result is deterministic for a given
//! grid but not a minimal decomposition.

use super::{BoxCollider, VoxelGrid};
use glam::Vec3;

/// Merge the solid cells of `grid` into axis-aligned boxes.
///
/// Every solid cell ends up in exactly one box and no box covers an empty cell.
pub fn greedy_merge(grid: &VoxelGrid) -> Vec<BoxCollider> {
    let [nx, ny, nz] = grid.dims;
    let mut visited = vec![false; grid.cell_count()];
    let mut boxes = Vec::new();

    let free = |visited: &[bool], x: usize, y: usize, z: usize| {
        grid.is_solid(x, y, z) && !visited[grid.index(x, y, z)]
    };

    for x in 0..nx {
        for y in 0..ny {
            for z in 0..nz {
                if !free(&visited, x, y, z) {
                    continue;
                }

                let mut xs = 1;
                while x + xs < nx && free(&visited, x + xs, y, z) {
                    xs += 1;
                }

                let mut ys = 1;
                while y + ys < ny && (x..x + xs).all(|cx| free(&visited, cx, y + ys, z)) {
                    ys += 1;
                }

                let mut zs = 1;
                while z + zs < nz
                    && (x..x + xs).all(|cx| (y..y + ys).all(|cy| free(&visited, cx, cy, z + zs)))
                {
                    zs += 1;
                }

                for cx in x..x + xs {
                    for cy in y..y + ys {
                        for cz in z..z + zs {
                            visited[grid.index(cx, cy, cz)] = true;
                        }
                    }
                }

                let start = Vec3::new(x as f32, y as f32, z as f32);
                let extent = Vec3::new(xs as f32, ys as f32, zs as f32);
                boxes.push(BoxCollider::new(
                    grid.origin + (start + extent * 0.5) * grid.cell_size,
                    extent * grid.cell_size,
                ));
            }
        }
    }

    boxes
}
