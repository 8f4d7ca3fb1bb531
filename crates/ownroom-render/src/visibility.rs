//! Camera-facing wall visibility
//!
//! A wall is drawn only while the camera is on the room side of it, so the
//! walls between the camera and the room drop out of view. The floor is
//! always drawn.

use glam::Vec3;
use ownroom_scene::room::{Room, Wall, WallVisibility};

/// Whether `wall` faces a camera at `camera_position`
pub fn is_wall_facing(room: &Room, wall: Wall, camera_position: Vec3) -> bool {
    if wall == Wall::Floor {
        return true;
    }
    let to_camera = (camera_position - room.position(wall)).normalize_or_zero();
    wall.inward_normal().dot(to_camera) > 0.0
}

/// Visibility of every wall for a camera at `camera_position`
pub fn wall_visibility(room: &Room, camera_position: Vec3) -> WallVisibility {
    let mut visibility = WallVisibility::all();
    for wall in Wall::ALL {
        visibility.set(wall, is_wall_facing(room, wall, camera_position));
    }
    visibility
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_in_front_hides_front_wall() {
        let room = Room::default();
        let v = wall_visibility(&room, Vec3::new(0.0, 1.0, 10.0));

        assert!(!v.is_visible(Wall::Front));
        assert!(v.is_visible(Wall::Back));
        assert!(v.is_visible(Wall::Left));
        assert!(v.is_visible(Wall::Right));
        assert!(v.is_visible(Wall::Floor));
    }

    #[test]
    fn corner_view_hides_two_walls() {
        let room = Room::default();
        let v = wall_visibility(&room, Vec3::new(8.0, 3.0, -8.0));

        assert!(!v.is_visible(Wall::Right));
        assert!(!v.is_visible(Wall::Back));
        assert!(v.is_visible(Wall::Front));
        assert!(v.is_visible(Wall::Left));
        assert_eq!(v.visible_count(), 3);
    }

    #[test]
    fn floor_stays_visible_from_below() {
        let room = Room::default();
        assert!(is_wall_facing(&room, Wall::Floor, Vec3::new(0.0, -10.0, 0.0)));
    }

    #[test]
    fn camera_inside_room_sees_everything() {
        let room = Room::default();
        assert_eq!(wall_visibility(&room, Vec3::new(0.0, 0.5, 0.0)), WallVisibility::all());
    }
}
