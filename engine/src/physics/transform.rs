//! Local-to-World Transform
//!
//! Places a block's local sub-boxes into world space and bounds them with
//! axis-aligned boxes.
//!
//! The transform runs in two stages, both using the same rotation built from
//! the block's 90° steps (intrinsic X → Y → Z):
//!
//! 1. rotate the sub-box's local centre offset and add the block position
//! 2. rotate each of the sub-box's 8 half-size corners and add them to that
//!    rotated centre, accumulating min/max
//!
//! The corner pass bounds the rotated box without assuming it stays axis
//! aligned.

use glam::{Quat, Vec3};

use crate::geometry::{OrientedBox, Rotation};

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of `size` centred on `center`.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Strict interval overlap on all three axes, with each interval inset by
    /// `epsilon` so that flush (touching) boxes do not count.
    pub fn overlaps(&self, other: &Aabb, epsilon: f32) -> bool {
        self.min.x < other.max.x - epsilon
            && self.max.x > other.min.x + epsilon
            && self.min.y < other.max.y - epsilon
            && self.max.y > other.min.y + epsilon
            && self.min.z < other.max.z - epsilon
            && self.max.z > other.min.z + epsilon
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.min(other.min), self.max.max(other.max))
    }
}

/// Rotation for a block's step triple, composed as Rx · Ry · Rz.
pub fn rotation_quat(rotation: Rotation) -> Quat {
    let angles = rotation.radians();
    Quat::from_rotation_x(angles.x) * Quat::from_rotation_y(angles.y) * Quat::from_rotation_z(angles.z)
}

/// Corner sign pattern, one entry per box corner.
const CORNER_SIGNS: [Vec3; 8] = [
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, -1.0),
];

/// World AABB of one local sub-box on a block at `block_position` with
/// `block_rotation`.
pub fn transform_box_to_world(sub_box: &OrientedBox, block_position: Vec3, block_rotation: Rotation) -> Aabb {
    transform_box_with(sub_box, block_position, rotation_quat(block_rotation))
}

/// Same as [`transform_box_to_world`] with a precomputed rotation, for
/// callers transforming every sub-box of one block.
pub fn transform_box_with(sub_box: &OrientedBox, block_position: Vec3, rotation: Quat) -> Aabb {
    // Stage 1: rotated centre, placed at the block
    let world_center = rotation * sub_box.center + block_position;

    // Stage 2: each rotated corner around that centre
    let half = sub_box.half_size();
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for signs in CORNER_SIGNS {
        let corner = rotation * (half * signs) + world_center;
        min = min.min(corner);
        max = max.max(corner);
    }

    Aabb::new(min, max)
}

/// World AABBs of every sub-box of one block.
pub fn world_boxes(boxes: &[OrientedBox], block_position: Vec3, block_rotation: Rotation) -> Vec<Aabb> {
    let rotation = rotation_quat(block_rotation);
    boxes
        .iter()
        .map(|b| transform_box_with(b, block_position, rotation))
        .collect()
}
