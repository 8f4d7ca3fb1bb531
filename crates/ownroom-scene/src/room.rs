//! The room boundary: a floor and four walls
//!
//! Walls are thin rounded slabs. Just outside each one sits a thicker mask
//! box that trims away any part of a shape that pokes through the boundary.

use crate::config::RoomConfig;
use glam::Vec3;
use ownroom_core::collider::BoxCollider;
use ownroom_core::sdf::{Aabb, Box3, RoundedBox, Sdf, smooth_union};

/// Distance reported for a hidden wall
pub const HIDDEN_WALL_DISTANCE: f32 = 1e10;

/// The five boundary slabs, in composition order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wall {
    Floor,
    Front,
    Back,
    Left,
    Right,
}

impl Wall {
    pub const ALL: [Wall; 5] = [Wall::Floor, Wall::Front, Wall::Back, Wall::Left, Wall::Right];

    /// Unit normal pointing into the room
    pub fn inward_normal(self) -> Vec3 {
        match self {
            Wall::Floor => Vec3::Y,
            Wall::Front => Vec3::NEG_Z,
            Wall::Back => Vec3::Z,
            Wall::Left => Vec3::X,
            Wall::Right => Vec3::NEG_X,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Per-wall visibility flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallVisibility([bool; 5]);

impl Default for WallVisibility {
    fn default() -> Self {
        Self::all()
    }
}

impl WallVisibility {
    pub fn all() -> Self {
        Self([true; 5])
    }

    pub fn is_visible(&self, wall: Wall) -> bool {
        self.0[wall.index()]
    }

    pub fn set(&mut self, wall: Wall, visible: bool) {
        self.0[wall.index()] = visible;
    }

    pub fn visible_count(&self) -> usize {
        self.0.iter().filter(|&&v| v).count()
    }
}

/// Room boundary geometry plus the current visibility of each wall
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    config: RoomConfig,
    visibility: WallVisibility,
}

impl Default for Room {
    fn default() -> Self {
        Self::new(RoomConfig::default())
    }
}

impl Room {
    pub fn new(config: RoomConfig) -> Self {
        Self {
            config,
            visibility: WallVisibility::all(),
        }
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    pub fn visibility(&self) -> WallVisibility {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: WallVisibility) {
        self.visibility = visibility;
    }

    pub fn position(&self, wall: Wall) -> Vec3 {
        match wall {
            Wall::Floor => self.config.floor,
            Wall::Front => self.config.front,
            Wall::Back => self.config.back,
            Wall::Left => self.config.left,
            Wall::Right => self.config.right,
        }
    }

    /// Half-extents of the slab before corner rounding
    pub fn half_extents(&self, wall: Wall) -> Vec3 {
        let s = self.config.size;
        let t = self.config.wall_thickness;
        match wall {
            Wall::Floor => Vec3::new(s, t, s),
            Wall::Front | Wall::Back => Vec3::new(s, s, t),
            Wall::Left | Wall::Right => Vec3::new(t, s, s),
        }
    }

    /// Distance to one slab, or [`HIDDEN_WALL_DISTANCE`] when it is hidden
    pub fn wall_distance(&self, wall: Wall, p: Vec3) -> f32 {
        if !self.visibility.is_visible(wall) {
            return HIDDEN_WALL_DISTANCE;
        }
        RoundedBox::new(self.half_extents(wall), self.config.corner_radius)
            .distance(p - self.position(wall))
    }

    /// All visible slabs smoothly joined in [`Wall::ALL`] order
    pub fn walls_distance(&self, p: Vec3, k: f32) -> f32 {
        let mut walls = Wall::ALL.iter().map(|&w| self.wall_distance(w, p));
        let first = walls.next().unwrap_or(HIDDEN_WALL_DISTANCE);
        walls.fold(first, |acc, d| smooth_union(acc, d, k))
    }

    /// Sharp mask box sitting just outside `wall`
    pub fn mask_box(&self, wall: Wall) -> (Vec3, Vec3) {
        let s = self.config.size;
        let thickness = self.config.mask_thickness;
        let offset = thickness * 0.5 + self.config.mask_offset;
        let center = self.position(wall) - wall.inward_normal() * offset;
        let half_extents = match wall {
            Wall::Floor => Vec3::new(s, thickness, s),
            Wall::Front | Wall::Back => Vec3::new(s, s, thickness),
            Wall::Left | Wall::Right => Vec3::new(thickness, s, s),
        };
        (center, half_extents)
    }

    /// Hard union of the five mask boxes. Visibility does not apply.
    pub fn mask_distance(&self, p: Vec3) -> f32 {
        Wall::ALL
            .iter()
            .map(|&w| {
                let (center, half_extents) = self.mask_box(w);
                Box3::new(half_extents).distance(p - center)
            })
            .fold(f32::INFINITY, f32::min)
    }

    /// One analytic collider per slab, rounding included, in [`Wall::ALL`] order
    pub fn colliders(&self) -> [BoxCollider; 5] {
        let r = self.config.corner_radius;
        Wall::ALL.map(|w| {
            BoxCollider::new(self.position(w), (self.half_extents(w) + Vec3::splat(r)) * 2.0)
        })
    }

    /// World bounds of all slabs including rounding
    pub fn bounds(&self) -> Aabb {
        let r = self.config.corner_radius;
        Wall::ALL
            .iter()
            .map(|&w| Aabb::from_center(self.position(w), self.half_extents(w) + Vec3::splat(r)))
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| Aabb::cube(self.config.size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn inward_normals_point_at_origin() {
        let room = Room::default();
        for wall in Wall::ALL {
            let to_center = (Vec3::new(0.0, 0.1, 0.0) - room.position(wall)).normalize();
            assert!(wall.inward_normal().dot(to_center) > 0.0, "{wall:?}");
        }
    }

    #[test]
    fn wall_surface_includes_rounding() {
        let room = Room::default();
        // Floor top face sits at -2 + 0.01 + 0.3
        let top = Vec3::new(0.0, -2.0 + 0.01 + 0.3, 0.0);
        assert_relative_eq!(room.wall_distance(Wall::Floor, top), 0.0, epsilon = 1e-5);
        assert!(room.wall_distance(Wall::Floor, Vec3::new(0.0, -2.0, 0.0)) < 0.0);
    }

    #[test]
    fn hidden_wall_is_far_away() {
        let mut room = Room::default();
        let mut visibility = WallVisibility::all();
        visibility.set(Wall::Left, false);
        room.set_visibility(visibility);

        assert_eq!(room.wall_distance(Wall::Left, room.position(Wall::Left)), HIDDEN_WALL_DISTANCE);
        assert!(room.wall_distance(Wall::Right, room.position(Wall::Right)) < 0.0);
        assert_eq!(room.visibility().visible_count(), 4);
    }

    #[test]
    fn walls_are_outside_at_room_center() {
        let room = Room::default();
        assert!(room.walls_distance(Vec3::new(0.0, 0.1, 0.0), 0.15) > 1.0);
        assert!(room.walls_distance(room.position(Wall::Back), 0.15) < 0.0);
    }

    #[test]
    fn mask_sits_beyond_each_wall() {
        let room = Room::default();
        for wall in Wall::ALL {
            let pos = room.position(wall);
            let inward = wall.inward_normal();

            // The mask reaches back exactly to the slab center plane
            assert_relative_eq!(room.mask_distance(pos), 0.0, epsilon = 1e-5);
            assert!(room.mask_distance(pos + inward * 0.1) > 0.0, "{wall:?} room side masked");
            assert!(room.mask_distance(pos - inward) < 0.0, "{wall:?} mask missing");
        }
        assert!(room.mask_distance(Vec3::ZERO) > 1.0);
    }

    #[test]
    fn mask_box_layout() {
        let room = Room::default();
        let (center, half) = room.mask_box(Wall::Floor);
        assert_relative_eq!(center.y, -3.0);
        assert_eq!(half, Vec3::new(2.0, 1.0, 2.0));

        let (center, half) = room.mask_box(Wall::Right);
        assert_relative_eq!(center.x, 3.15);
        assert_eq!(half, Vec3::new(1.0, 2.0, 2.0));
    }

    #[test]
    fn wall_colliders_match_slab_geometry() {
        let room = Room::default();
        let colliders = room.colliders();

        assert_eq!(colliders[0].position, [0.0, -2.0, 0.0]);
        assert_relative_eq!(colliders[0].size[0], 4.6);
        assert_relative_eq!(colliders[0].size[1], 0.62);
        assert_relative_eq!(colliders[1].size[2], 0.62);
        assert_relative_eq!(colliders[3].size[0], 0.62);
        assert_eq!(colliders[4].position, [2.15, 0.1, 0.0]);
    }
}
