//! Rotated Nominal Dimensions
//!
//! Cheap axis-swap heuristic for a block's bounding size under a 90°-step
//! rotation. Used for footprints, stacking heights and the floor check.
//!
//! This is deliberately NOT the same math as
//! [`transform_box_to_world`](crate::physics::transform::transform_box_to_world):
//! swaps are applied per odd axis in the fixed order X, Y, Z rather than by
//! composing rotations. Both treatments agree for the orthogonal states the
//! builder produces, and placement heights depend on this exact order.

use glam::Vec3;

use super::types::{BlockType, Rotation};

/// Nominal dimensions of `block_type` with axes swapped by rotation parity.
///
/// - odd X steps swap Y and Z
/// - odd Y steps swap X and Z
/// - odd Z steps swap X and Y
pub fn rotated_dimensions(block_type: BlockType, rotation: Rotation) -> Vec3 {
    swap_by_parity(block_type.dimensions(), rotation)
}

/// The swap rule applied to arbitrary dimensions.
pub fn swap_by_parity(dims: Vec3, rotation: Rotation) -> Vec3 {
    let Vec3 { mut x, mut y, mut z } = dims;
    let (odd_x, odd_y, odd_z) = rotation.odd_axes();

    if odd_x {
        std::mem::swap(&mut y, &mut z);
    }
    if odd_y {
        std::mem::swap(&mut x, &mut z);
    }
    if odd_z {
        std::mem::swap(&mut x, &mut y);
    }

    Vec3::new(x, y, z)
}
