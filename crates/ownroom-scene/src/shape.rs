//! User-placed primitive shapes

use glam::Vec3;
use ownroom_core::sdf::{
    Aabb, Capsule, NonUniformScale, Placed, RoundCone, RoundedBox, RoundedCylinder, Sdf, SdfExt,
    Sphere, Torus,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Radius of a freshly created shape
pub const DEFAULT_RADIUS: f32 = 0.5;

/// Half-size of the coarse bounding cube, relative to `radius * max(scale)`
pub const BOUNDS_FACTOR: f32 = 1.5;

/// Stable shape identifier. Ids are handed out by the registry and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape-{}", self.0)
    }
}

/// The six editable primitive kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Sphere,
    Box,
    Torus,
    RoundCone,
    Capsule,
    Cylinder,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Sphere,
        ShapeKind::Box,
        ShapeKind::Torus,
        ShapeKind::RoundCone,
        ShapeKind::Capsule,
        ShapeKind::Cylinder,
    ];

    /// Human-readable name shown in the editor
    pub fn display_name(self) -> &'static str {
        match self {
            ShapeKind::Sphere => "Sphere",
            ShapeKind::Box => "Rounded Box",
            ShapeKind::Torus => "Torus",
            ShapeKind::RoundCone => "Rounded Cone",
            ShapeKind::Capsule => "Capsule",
            ShapeKind::Cylinder => "Rounded Cylinder",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How a shape combines with everything before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    #[default]
    Union,
    Subtract,
}

impl Operation {
    pub fn toggled(self) -> Self {
        match self {
            Operation::Union => Operation::Subtract,
            Operation::Subtract => Operation::Union,
        }
    }
}

/// A primitive sized from a single radius, dispatched by kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Box(RoundedBox),
    Torus(Torus),
    RoundCone(RoundCone),
    Capsule(Capsule),
    Cylinder(RoundedCylinder),
}

impl Primitive {
    /// Derive the kind-specific dimensions from `radius`
    pub fn new(kind: ShapeKind, radius: f32) -> Self {
        match kind {
            ShapeKind::Sphere => Primitive::Sphere(Sphere::new(radius)),
            ShapeKind::Box => Primitive::Box(RoundedBox::with_auto_rounding(Vec3::splat(radius))),
            ShapeKind::Torus => Primitive::Torus(Torus::new(radius, radius * 0.5)),
            ShapeKind::RoundCone => {
                Primitive::RoundCone(RoundCone::new(radius, radius * 0.5, radius * 2.0))
            }
            ShapeKind::Capsule => Primitive::Capsule(Capsule::new(radius * 0.5, radius * 2.0)),
            ShapeKind::Cylinder => {
                Primitive::Cylinder(RoundedCylinder::new(radius * 0.8, radius))
            }
        }
    }
}

impl Sdf for Primitive {
    fn distance(&self, p: Vec3) -> f32 {
        match self {
            Primitive::Sphere(s) => s.distance(p),
            Primitive::Box(s) => s.distance(p),
            Primitive::Torus(s) => s.distance(p),
            Primitive::RoundCone(s) => s.distance(p),
            Primitive::Capsule(s) => s.distance(p),
            Primitive::Cylinder(s) => s.distance(p),
        }
    }

    fn bounds(&self) -> Aabb {
        match self {
            Primitive::Sphere(s) => s.bounds(),
            Primitive::Box(s) => s.bounds(),
            Primitive::Torus(s) => s.bounds(),
            Primitive::RoundCone(s) => s.bounds(),
            Primitive::Capsule(s) => s.bounds(),
            Primitive::Cylinder(s) => s.bounds(),
        }
    }
}

/// World-space field of one shape: scaled, rotated, then translated
pub type ShapeSdf = Placed<NonUniformScale<Primitive>>;

/// A user-placed primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub position: Vec3,
    /// Euler angles in radians, intrinsic XYZ
    pub rotation: Vec3,
    /// Per-axis scale, every component positive
    pub scale: Vec3,
    pub radius: f32,
    pub operation: Operation,
}

impl Shape {
    /// New shape at the origin with identity transform and union operation
    pub fn new(id: ShapeId, kind: ShapeKind) -> Self {
        Self {
            id,
            kind,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            radius: DEFAULT_RADIUS,
            operation: Operation::Union,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = operation;
        self
    }

    pub fn primitive(&self) -> Primitive {
        Primitive::new(self.kind, self.radius)
    }

    /// The shape's distance field in world space
    pub fn sdf(&self) -> ShapeSdf {
        self.primitive()
            .scaled(self.scale)
            .placed(self.position, self.rotation)
    }

    /// Conservative world-space bounds.
    ///
    /// The cube `position ± radius * max(scale) * 1.5`, widened to the
    /// transformed primitive bounds where those reach further (box corners,
    /// capsule and cone tips).
    pub fn bounds(&self) -> Aabb {
        let half = self.radius * self.scale.max_element() * BOUNDS_FACTOR;
        Aabb::from_center(self.position, Vec3::splat(half)).union(&self.sdf().bounds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn id_displays_with_prefix() {
        assert_eq!(ShapeId(3).to_string(), "shape-3");
    }

    #[test]
    fn display_names() {
        let names: Vec<_> = ShapeKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(
            names,
            ["Sphere", "Rounded Box", "Torus", "Rounded Cone", "Capsule", "Rounded Cylinder"]
        );
    }

    #[test]
    fn new_shape_has_defaults() {
        let s = Shape::new(ShapeId(0), ShapeKind::Torus);
        assert_eq!(s.scale, Vec3::ONE);
        assert_eq!(s.rotation, Vec3::ZERO);
        assert_eq!(s.radius, DEFAULT_RADIUS);
        assert_eq!(s.operation, Operation::Union);
    }

    #[test]
    fn operation_toggles_both_ways() {
        assert_eq!(Operation::Union.toggled(), Operation::Subtract);
        assert_eq!(Operation::Union.toggled().toggled(), Operation::Union);
    }

    #[test]
    fn primitive_dimensions_follow_radius() {
        let r = 0.4;
        match Primitive::new(ShapeKind::Capsule, r) {
            Primitive::Capsule(c) => {
                assert_relative_eq!(c.radius, 0.2);
                assert_relative_eq!(c.height, 0.8);
            }
            other => panic!("unexpected primitive {other:?}"),
        }
        match Primitive::new(ShapeKind::Cylinder, r) {
            Primitive::Cylinder(c) => {
                assert_relative_eq!(c.radius, 0.32);
                assert_relative_eq!(c.half_height, 0.4);
            }
            other => panic!("unexpected primitive {other:?}"),
        }
        match Primitive::new(ShapeKind::Box, r) {
            Primitive::Box(b) => assert_relative_eq!(b.radius, 0.16),
            other => panic!("unexpected primitive {other:?}"),
        }
    }

    #[test]
    fn every_kind_is_solid_near_its_anchor() {
        // Capsule and cone grow up from the origin, the rest are centered on it
        for kind in ShapeKind::ALL {
            let shape = Shape::new(ShapeId(0), kind);
            let probe = match kind {
                ShapeKind::Capsule | ShapeKind::RoundCone => Vec3::new(0.0, 0.3, 0.0),
                ShapeKind::Torus => Vec3::new(0.5, 0.0, 0.0),
                _ => Vec3::ZERO,
            };
            assert!(shape.sdf().distance(probe) < 0.0, "{kind}");
        }
    }

    #[test]
    fn world_transform_is_applied() {
        let shape = Shape::new(ShapeId(0), ShapeKind::Capsule)
            .with_position(Vec3::new(1.0, 0.0, 0.0))
            .with_rotation(Vec3::new(0.0, 0.0, -FRAC_PI_2));

        // Local +Y turns into world +X
        assert!(shape.sdf().distance(Vec3::new(1.8, 0.0, 0.0)) < 0.0);
        assert!(shape.sdf().distance(Vec3::new(1.0, 0.8, 0.0)) > 0.0);
    }

    #[test]
    fn bounds_cover_capsule_tip() {
        let shape = Shape::new(ShapeId(0), ShapeKind::Capsule);
        let b = shape.bounds();

        // The tip sits at 2r + r/2 = 1.25, beyond the 1.5r cube
        assert!(b.max.y >= 1.25);
        assert_relative_eq!(b.min.x, -0.75);
    }

    #[test]
    fn bounds_enclose_scaled_rotated_surface() {
        let shape = Shape::new(ShapeId(0), ShapeKind::Box)
            .with_scale(Vec3::new(2.0, 1.0, 0.5))
            .with_rotation(Vec3::new(0.3, 0.9, -0.4))
            .with_position(Vec3::new(0.5, 1.0, -0.5));
        let sdf = shape.sdf();
        let bounds = shape.bounds();

        let steps = 24;
        let lo = bounds.min - Vec3::splat(0.5);
        let step = (bounds.size() + Vec3::ONE) / steps as f32;
        for i in 0..=steps {
            for j in 0..=steps {
                for k in 0..=steps {
                    let p = lo + Vec3::new(i as f32, j as f32, k as f32) * step;
                    if sdf.distance(p) < 0.0 {
                        assert!(bounds.contains(p), "{p:?} escapes {bounds:?}");
                    }
                }
            }
        }
    }
}
