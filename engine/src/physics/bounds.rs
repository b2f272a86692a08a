//! Room Bounds
//!
//! Footprint containment for bounded rooms. Only X and Z are constrained;
//! height is free.

use glam::{Vec2, Vec3};
use tracing::debug;

use crate::geometry::{BlockType, Rotation, rotated_dimensions};
use crate::world::RoomSize;

/// Tolerance on each room edge.
pub const ROOM_EPSILON: f32 = 0.01;

/// Rotated X/Z footprint of a block as `(min, max)`.
pub fn footprint(position: Vec3, block_type: BlockType, rotation: Rotation) -> (Vec2, Vec2) {
    let dims = rotated_dimensions(block_type, rotation);
    let center = Vec2::new(position.x, position.z);
    let half = Vec2::new(dims.x, dims.z) * 0.5;
    (center - half, center + half)
}

/// Whether a footprint lies inside `[0, width] x [0, depth]`, within
/// [`ROOM_EPSILON`].
pub fn footprint_fits(min: Vec2, max: Vec2, width: f32, depth: f32) -> bool {
    min.x >= -ROOM_EPSILON
        && max.x <= width + ROOM_EPSILON
        && min.y >= -ROOM_EPSILON
        && max.y <= depth + ROOM_EPSILON
}

/// `true` when the block is inside the room. Always true for the unlimited
/// studio.
pub fn check_room_bounds(position: Vec3, block_type: BlockType, rotation: Rotation, room: RoomSize) -> bool {
    if !room.is_bounded() {
        return true;
    }

    let spec = room.spec();
    let (min, max) = footprint(position, block_type, rotation);
    let inside = footprint_fits(min, max, spec.width, spec.depth);
    if !inside {
        debug!(?position, %block_type, %room, "bounds: footprint leaves room");
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_accepts_anything() {
        let far = Vec3::new(-500.0, 3.0, 1e6);
        assert!(check_room_bounds(far, BlockType::Conn4D, Rotation::IDENTITY, RoomSize::Unlimited));
    }

    #[test]
    fn test_flush_corner_passes() {
        // BASE in the origin corner of the niche
        assert!(check_room_bounds(Vec3::new(0.5, 0.5, 0.5), BlockType::Base, Rotation::IDENTITY, RoomSize::Niche2M));
        // Far corner (10 x 5)
        assert!(check_room_bounds(Vec3::new(9.5, 0.5, 4.5), BlockType::Base, Rotation::IDENTITY, RoomSize::Niche2M));
    }

    #[test]
    fn test_epsilon_edge() {
        let (min, max) = footprint(Vec3::new(0.5, 0.0, 0.5), BlockType::Base, Rotation::IDENTITY);
        assert!(footprint_fits(min, max, 1.0, 1.0));

        let (min, max) = footprint(Vec3::new(0.505, 0.0, 0.5), BlockType::Base, Rotation::IDENTITY);
        assert!(footprint_fits(min, max, 1.0, 1.0));

        let (min, max) = footprint(Vec3::new(0.57, 0.0, 0.5), BlockType::Base, Rotation::IDENTITY);
        assert!(!footprint_fits(min, max, 1.0, 1.0));
    }

    #[test]
    fn test_rotation_changes_footprint() {
        // CONN_3D is 2 x 1.5 in X/Z; a quarter turn about Y makes it 1.5 x 2
        let pos = Vec3::new(0.75, 0.5, 4.0);
        assert!(!check_room_bounds(pos, BlockType::Conn3D, Rotation::IDENTITY, RoomSize::Niche2M));
        assert!(check_room_bounds(pos, BlockType::Conn3D, Rotation::new(0, 1, 0), RoomSize::Niche2M));
    }

    #[test]
    fn test_height_is_unconstrained() {
        let high = Vec3::new(5.0, 400.0, 2.5);
        assert!(check_room_bounds(high, BlockType::Double, Rotation::IDENTITY, RoomSize::Niche2M));
    }
}
