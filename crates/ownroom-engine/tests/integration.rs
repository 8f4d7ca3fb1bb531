//! End-to-end tests through the editing session

use approx::assert_relative_eq;
use ownroom_engine::{
    BoxCollider, Camera, CellSize, Engine, Operation, PreviewOptions, SceneConfig, ShapeKind, Vec3,
};
use ownroom_scene::config::{MIN_BLEND_STRENGTH, VoxelizerConfig};
use ownroom_scene::registry::MIN_SCALE;

const WALLS: usize = 5;

/// Bounding box of a set of colliders as (min, max)
fn extent(boxes: &[BoxCollider]) -> (Vec3, Vec3) {
    boxes.iter().fold(
        (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
        |(lo, hi), b| {
            let aabb = b.aabb();
            (lo.min(aabb.min), hi.max(aabb.max))
        },
    )
}

fn shape_volume(boxes: &[BoxCollider]) -> f32 {
    boxes[WALLS..].iter().map(BoxCollider::volume).sum()
}

#[test]
fn empty_scene_yields_exactly_the_wall_boxes() {
    let mut engine = Engine::new();
    let colliders = engine.commit().expect("commit");

    assert_eq!(colliders.len(), WALLS);

    let expected_positions = [
        [0.0, -2.0, 0.0],
        [0.0, 0.1, 2.15],
        [0.0, 0.1, -2.15],
        [-2.15, 0.1, 0.0],
        [2.15, 0.1, 0.0],
    ];
    for (collider, position) in colliders.iter().zip(expected_positions) {
        assert_eq!(collider.position, position);
    }

    // 2(S+R) along the slab, 2(t+R) across it
    let floor = colliders[0].size();
    assert_relative_eq!(floor.x, 4.6, epsilon = 1e-5);
    assert_relative_eq!(floor.y, 0.62, epsilon = 1e-5);
    assert_relative_eq!(floor.z, 4.6, epsilon = 1e-5);

    let left = colliders[3].size();
    assert_relative_eq!(left.x, 0.62, epsilon = 1e-5);
    assert_relative_eq!(left.y, 4.6, epsilon = 1e-5);
}

#[test]
fn single_sphere_with_fixed_cells() {
    let mut engine = Engine::new();
    engine.set_cell_size(CellSize::Fixed(0.2));
    engine.add_shape(ShapeKind::Sphere).expect("room");

    let colliders = engine.commit().expect("commit").to_vec();
    assert!(colliders.len() > WALLS);

    let (lo, hi) = extent(&colliders[WALLS..]);
    let center = (lo + hi) * 0.5;
    let half = (hi - lo) * 0.5;

    // Grid starts at -0.75 so the solid block is offset by a fraction of a cell
    assert!(center.length() < 0.1 * 3.0_f32.sqrt(), "center {center}");
    for h in half.to_array() {
        assert!((0.4..=0.65).contains(&h), "half extent {half}");
    }

    // Every box stays within the sphere's coarse bounds
    for b in &colliders[WALLS..] {
        let aabb = b.aabb();
        assert!(aabb.min.cmpge(Vec3::splat(-0.75 - 1e-4)).all());
        assert!(aabb.max.cmple(Vec3::splat(0.85 + 1e-4)).all());
    }

    // Box volume approximates the sphere volume
    let sphere_volume = 4.0 / 3.0 * std::f32::consts::PI * 0.125;
    let volume = shape_volume(&colliders);
    assert!(volume > sphere_volume * 0.5 && volume < sphere_volume * 1.5, "volume {volume}");
}

#[test]
fn capacity_boundary() {
    let mut engine = Engine::new();
    let ids: Vec<_> = (0..10)
        .map(|i| engine.add_shape(ShapeKind::ALL[i % ShapeKind::ALL.len()]))
        .collect();

    assert!(ids.iter().all(Option::is_some));
    assert_eq!(engine.add_shape(ShapeKind::Sphere), None);
    assert_eq!(engine.shapes().len(), 10);

    let first = ids[0].expect("added");
    assert!(engine.remove_shape(first));
    let replacement = engine.add_shape(ShapeKind::Sphere).expect("room again");
    assert_ne!(replacement, first);
    assert_eq!(engine.shapes().len(), 10);
}

fn build_scene(engine: &mut Engine) {
    let a = engine.add_shape(ShapeKind::Box).expect("room");
    engine.set_position(a, Vec3::new(0.3, -1.0, 0.2));
    engine.set_rotation(a, Vec3::new(0.2, 0.7, -0.1));
    engine.set_scale(a, Vec3::new(1.5, 0.8, 1.0));

    let b = engine.add_shape(ShapeKind::Torus).expect("room");
    engine.set_position(b, Vec3::new(-0.5, -0.6, 0.0));

    let c = engine.add_shape(ShapeKind::Capsule).expect("room");
    engine.set_position(c, Vec3::new(0.3, -1.4, 0.2));
    engine.toggle_operation(c);
}

#[test]
fn identical_edits_give_byte_identical_colliders() {
    let mut first = Engine::new();
    let mut second = Engine::new();
    build_scene(&mut first);
    build_scene(&mut second);

    let a = first.commit().expect("commit").to_vec();
    let b = second.commit().expect("commit").to_vec();

    assert!(a.len() > WALLS);
    assert_eq!(bytemuck::cast_slice::<BoxCollider, u8>(&a), bytemuck::cast_slice::<BoxCollider, u8>(&b));
}

#[test]
fn subtracting_removes_volume() {
    let mut engine = Engine::new();
    engine.set_cell_size(CellSize::Fixed(0.1));
    engine.add_shape(ShapeKind::Box).expect("room");
    let full = shape_volume(engine.commit().expect("commit"));

    let cutter = engine.add_shape(ShapeKind::Sphere).expect("room");
    engine.set_position(cutter, Vec3::new(0.5, 0.5, 0.5));
    engine.toggle_operation(cutter);
    assert_eq!(engine.shape(cutter).map(|s| s.operation), Some(Operation::Subtract));

    let carved = shape_volume(engine.commit().expect("commit"));
    assert!(carved < full, "{carved} >= {full}");
    assert!(carved > 0.0);
}

#[test]
fn edits_after_commit_wait_for_next_commit() {
    let mut engine = Engine::new();
    let id = engine.add_shape(ShapeKind::Sphere).expect("room");
    let before = engine.commit().expect("commit").to_vec();

    engine.set_position(id, Vec3::new(1.0, -1.0, 0.0));
    assert_eq!(engine.colliders(), before.as_slice());

    let after = engine.commit().expect("commit").to_vec();
    assert_ne!(after, before);
    assert_eq!(after[..WALLS], before[..WALLS]);
}

#[test]
fn non_positive_scale_is_clamped() {
    let mut engine = Engine::new();
    let id = engine.add_shape(ShapeKind::Cylinder).expect("room");

    assert!(engine.set_scale(id, Vec3::new(0.0, -2.0, 1.5)));
    let scale = engine.shape(id).map(|s| s.scale).expect("present");
    assert_eq!(scale, Vec3::new(MIN_SCALE, MIN_SCALE, 1.5));

    // Degenerate scale must not poison collider generation
    assert!(engine.commit().is_ok());
}

#[test]
fn masking_only_affects_shapes_crossing_the_boundary() {
    let mut engine = Engine::new();
    let inside = engine.add_shape(ShapeKind::Sphere).expect("room");
    engine.set_position(inside, Vec3::new(0.0, -0.5, 0.0));

    let scene = engine.scene_sdf();
    for p in [Vec3::new(0.0, -0.5, 0.0), Vec3::new(0.4, -0.3, 0.1), Vec3::new(-0.2, 0.0, 0.3)] {
        assert_relative_eq!(scene.map(p), scene.map_unmasked(p), epsilon = 1e-6);
    }

    let poking = engine.add_shape(ShapeKind::Sphere).expect("room");
    engine.set_position(poking, Vec3::new(0.0, 0.0, -2.8));

    let scene = engine.scene_sdf();
    let outside = Vec3::new(0.0, 0.0, -2.9);
    assert!(scene.map_unmasked(outside) < 0.0);
    assert!(scene.map(outside) > 0.0);
}

#[test]
fn preview_sees_the_room() {
    let mut engine = Engine::new();
    engine.add_shape(ShapeKind::Torus).expect("room");
    let visibility = engine.update_camera(Camera::look_at(Vec3::new(0.0, 3.0, 9.0), Vec3::new(0.0, -1.0, 0.0)));
    assert_eq!(visibility.visible_count(), 4);

    let frame = engine.render_preview(&PreviewOptions::default().with_size(24, 18));
    let center = frame.get(12, 9).expect("in frame");

    assert!(center.is_hit());
    assert!(center.depth > 0.0 && center.depth < 1.0);

    let depths = frame.depth_buffer();
    assert_eq!(depths.len(), 24 * 18);
    assert!(depths.iter().all(|d| (0.0..=1.0).contains(d)));
    assert_eq!(depths[9 * 24 + 12], center.depth);
}

#[test]
fn far_apart_shapes_still_commit_with_walls() {
    let config = SceneConfig {
        voxel: VoxelizerConfig {
            max_grid_cells: 50_000,
            ..VoxelizerConfig::default()
        },
        ..SceneConfig::default()
    };
    let mut engine = Engine::with_config(config);
    let a = engine.add_shape(ShapeKind::Sphere).expect("room");
    let b = engine.add_shape(ShapeKind::Box).expect("room");
    assert!(engine.set_position(a, Vec3::splat(-40.0)));
    assert!(engine.set_position(b, Vec3::splat(40.0)));

    let colliders = engine.commit().expect("commit").to_vec();
    assert!(colliders.len() >= WALLS);
    assert_eq!(colliders[..WALLS], engine.room().colliders());
}

#[test]
fn unusable_config_values_are_repaired() {
    let config = SceneConfig {
        blend_strength: 0.0,
        voxel: VoxelizerConfig {
            min_cell_size: 0.5,
            ..VoxelizerConfig::default()
        },
        ..SceneConfig::default()
    };
    let mut engine = Engine::with_config(config);
    assert_eq!(engine.config().blend_strength, MIN_BLEND_STRENGTH);

    engine.add_shape(ShapeKind::Sphere).expect("room");
    assert!(engine.scene_sdf().map(Vec3::ZERO).is_finite());
    assert!(engine.commit().expect("commit").len() > WALLS);
}
