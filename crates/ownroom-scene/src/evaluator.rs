//! Scene distance fields
//!
//! [`SceneSdf`] is the full field used for rendering: room walls, every
//! shape folded in registry order, and the mask that keeps blended shapes
//! from bulging through the boundary. [`ShapeField`] is the shapes-only field
//! the voxelizer samples. Both are built from an owned snapshot, so later
//! edits to the registry never reach an evaluation in progress.

use crate::config::clamp_blend_strength;
use crate::room::Room;
use crate::shape::{Operation, Shape, ShapeSdf};
use glam::Vec3;
use ownroom_core::sdf::{Aabb, Sdf, smooth_subtraction, smooth_union};

/// One shape prepared for repeated evaluation
#[derive(Debug, Clone)]
pub struct ShapeInstance {
    pub sdf: ShapeSdf,
    pub operation: Operation,
    /// Conservative world bounds
    pub bounds: Aabb,
    /// `min(scale) / max(scale)`, relates bounds distance to field value
    scale_ratio: f32,
}

impl ShapeInstance {
    pub fn new(shape: &Shape) -> Self {
        Self {
            sdf: shape.sdf(),
            operation: shape.operation,
            bounds: shape.bounds(),
            scale_ratio: shape.scale.min_element() / shape.scale.max_element(),
        }
    }

    #[inline]
    pub fn distance(&self, p: Vec3) -> f32 {
        self.sdf.distance(p)
    }

    /// A value the field at `p` is guaranteed not to go below
    #[inline]
    pub fn lower_bound(&self, p: Vec3) -> f32 {
        self.bounds.exterior_distance(p) * self.scale_ratio
    }
}

fn instances(shapes: &[Shape]) -> Vec<ShapeInstance> {
    shapes.iter().map(ShapeInstance::new).collect()
}

/// Complete scene field: walls, shapes and boundary mask
#[derive(Debug, Clone)]
pub struct SceneSdf {
    room: Room,
    shapes: Vec<ShapeInstance>,
    k: f32,
}

impl SceneSdf {
    /// Snapshot `shapes` over `room`; `k` is raised to the minimum blend strength
    pub fn new(shapes: &[Shape], room: &Room, k: f32) -> Self {
        Self {
            room: room.clone(),
            shapes: instances(shapes),
            k: clamp_blend_strength(k),
        }
    }

    pub fn blend_strength(&self) -> f32 {
        self.k
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Visible walls only
    pub fn walls(&self, p: Vec3) -> f32 {
        self.room.walls_distance(p, self.k)
    }

    /// Walls and shapes without the boundary mask
    pub fn map_unmasked(&self, p: Vec3) -> f32 {
        self.fold_shapes(self.walls(p), p)
    }

    /// The scene field
    pub fn map(&self, p: Vec3) -> f32 {
        let walls = self.walls(p);
        let d = self.fold_shapes(walls, p);

        // Only mask where the shapes actually moved the field off the walls
        if d < walls {
            smooth_subtraction(self.room.mask_distance(p), d, self.k)
        } else {
            d
        }
    }

    fn fold_shapes(&self, start: f32, p: Vec3) -> f32 {
        self.shapes.iter().fold(start, |d, shape| {
            let s = shape.distance(p);
            match shape.operation {
                Operation::Union => smooth_union(d, s, self.k),
                Operation::Subtract => smooth_subtraction(s, d, self.k),
            }
        })
    }
}

impl Sdf for SceneSdf {
    fn distance(&self, p: Vec3) -> f32 {
        self.map(p)
    }

    fn bounds(&self) -> Aabb {
        self.shapes
            .iter()
            .fold(self.room.bounds(), |b, s| b.union(&s.bounds))
            .expand(self.k)
    }
}

/// Shapes-only field used for collider generation.
///
/// The first union seeds the accumulator; a subtraction with nothing
/// accumulated yet is skipped. [`ShapeField::evaluate`] returns `None` while
/// nothing has been accumulated, which counts as empty space.
#[derive(Debug, Clone)]
pub struct ShapeField {
    shapes: Vec<ShapeInstance>,
    k: f32,
    culling: bool,
}

impl ShapeField {
    pub fn new(shapes: &[Shape], k: f32) -> Self {
        Self {
            shapes: instances(shapes),
            k: clamp_blend_strength(k),
            culling: true,
        }
    }

    /// Evaluate every shape at every point
    pub fn without_culling(mut self) -> Self {
        self.culling = false;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Union of all shape bounds, `None` without shapes
    pub fn bounds(&self) -> Option<Aabb> {
        self.shapes
            .iter()
            .map(|s| s.bounds)
            .reduce(|a, b| a.union(&b))
    }

    /// Shapes-only distance at `p`.
    ///
    /// With culling on, a shape is skipped when its bounds put it far enough
    /// away that blending could not change the accumulated value, so the
    /// result is identical to the unculled one.
    pub fn evaluate(&self, p: Vec3) -> Option<f32> {
        let mut acc: Option<f32> = None;
        for shape in &self.shapes {
            let lower = if self.culling {
                shape.lower_bound(p)
            } else {
                0.0
            };
            match (shape.operation, acc) {
                (Operation::Union, None) => acc = Some(shape.distance(p)),
                (Operation::Union, Some(d)) => {
                    if self.culling && lower - d >= self.k {
                        continue;
                    }
                    acc = Some(smooth_union(d, shape.distance(p), self.k));
                }
                (Operation::Subtract, None) => {}
                (Operation::Subtract, Some(d)) => {
                    if self.culling && d + lower >= self.k {
                        continue;
                    }
                    acc = Some(smooth_subtraction(shape.distance(p), d, self.k));
                }
            }
        }
        acc
    }

    /// Solid test used for grid classification
    pub fn is_solid(&self, p: Vec3, threshold: f32) -> bool {
        self.evaluate(p).is_some_and(|d| d < threshold)
    }
}
