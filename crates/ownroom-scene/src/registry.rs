//! Fixed-capacity, insertion-ordered shape registry
//!
//! The registry owns every shape. Its order is the composition order used by
//! both the scene evaluator and the voxelizer.

use crate::config::SceneConfig;
use crate::error::{Result, SceneError};
use crate::shape::{DEFAULT_RADIUS, Operation, Shape, ShapeId, ShapeKind};
use glam::Vec3;

/// Default maximum number of shapes
pub const DEFAULT_CAPACITY: usize = 10;

/// Scale components at or below zero are replaced with this
pub const MIN_SCALE: f32 = 1e-3;

#[derive(Debug, Clone)]
pub struct ShapeRegistry {
    shapes: Vec<Shape>,
    capacity: usize,
    next_id: u64,
    default_radius: f32,
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ShapeRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            shapes: Vec::with_capacity(capacity),
            capacity,
            next_id: 0,
            default_radius: DEFAULT_RADIUS,
        }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            default_radius: config.default_radius,
            ..Self::new(config.max_shapes)
        }
    }

    /// Append a new shape of `kind` with default transform
    pub fn add(&mut self, kind: ShapeKind) -> Result<ShapeId> {
        if self.is_full() {
            return Err(SceneError::RegistryFull {
                capacity: self.capacity,
            });
        }

        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.shapes
            .push(Shape::new(id, kind).with_radius(self.default_radius));
        Ok(id)
    }

    /// Remove a shape, keeping the order of the others
    pub fn remove(&mut self, id: ShapeId) -> Result<Shape> {
        let index = self.index_of(id)?;
        Ok(self.shapes.remove(index))
    }

    pub fn set_position(&mut self, id: ShapeId, position: Vec3) -> Result<()> {
        self.get_mut(id)?.position = position;
        Ok(())
    }

    /// Set per-axis scale. Components that are not strictly positive are
    /// clamped to [`MIN_SCALE`]; the applied scale is returned.
    pub fn set_scale(&mut self, id: ShapeId, scale: Vec3) -> Result<Vec3> {
        let shape = self.get_mut(id)?;
        let clamped = clamp_scale(scale);
        if clamped != scale {
            tracing::warn!("Clamped scale of {} from {} to {}", id, scale, clamped);
        }
        shape.scale = clamped;
        Ok(clamped)
    }

    /// Set Euler rotation in radians
    pub fn set_rotation(&mut self, id: ShapeId, rotation: Vec3) -> Result<()> {
        self.get_mut(id)?.rotation = rotation;
        Ok(())
    }

    /// Flip between union and subtract, returning the new operation
    pub fn toggle_operation(&mut self, id: ShapeId) -> Result<Operation> {
        let shape = self.get_mut(id)?;
        shape.operation = shape.operation.toggled();
        Ok(shape.operation)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Shapes in composition order
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Owned copy of the current shapes for a computation that must not see
    /// later edits
    pub fn snapshot(&self) -> Vec<Shape> {
        self.shapes.clone()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.shapes.len() >= self.capacity
    }

    fn index_of(&self, id: ShapeId) -> Result<usize> {
        self.shapes
            .iter()
            .position(|s| s.id == id)
            .ok_or(SceneError::UnknownShape(id))
    }

    fn get_mut(&mut self, id: ShapeId) -> Result<&mut Shape> {
        self.shapes
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(SceneError::UnknownShape(id))
    }
}

fn clamp_scale(scale: Vec3) -> Vec3 {
    let clamp = |c: f32| if c > 0.0 { c } else { MIN_SCALE };
    Vec3::new(clamp(scale.x), clamp(scale.y), clamp(scale.z))
}
