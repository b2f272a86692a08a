//! Headless Picking
//!
//! Ray queries against block colliders and the floor plane, producing the
//! `{ point, normal }` hits the snap resolver consumes.
//!
//! # Colliders
//!
//! Each block is picked by its rotated nominal box (the invisible collider a
//! renderer would raycast), not by its collision sub-boxes. That keeps the
//! face normal well defined: a connector's arm gaps never produce a hit on an
//! inner face.
//!
//! # Example
//!
//! ```ignore
//! use brock_engine::physics::raycast::raycast_blocks;
//! use glam::Vec3;
//!
//! if let Some(hit) = raycast_blocks(camera_pos, ray_dir, &blocks) {
//!     println!("block {} face {:?}", hit.block_id, hit.hit.normal);
//! }
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::transform::Aabb;
use crate::world::{BlockId, PlacedBlock};

/// A surface hit: world point and outward face normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceHit {
    pub point: Vec3,
    pub normal: Vec3,
}

impl SurfaceHit {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self { point, normal }
    }

    /// Hit on the floor plane (normal +Y).
    pub fn floor(point: Vec3) -> Self {
        Self::new(point, Vec3::Y)
    }
}

/// Nearest block struck by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockHit {
    pub block_id: BlockId,
    pub hit: SurfaceHit,
    /// Ray parameter at the hit (distance when the direction is normalized)
    pub distance: f32,
}

/// Ray-AABB intersection by the slab method.
///
/// Returns the ray parameter of the nearest intersection at or ahead of the
/// origin; a ray starting inside the box reports its exit.
pub fn ray_aabb_intersect(ray_origin: Vec3, ray_dir: Vec3, aabb: &Aabb) -> Option<f32> {
    // Near-zero components get a huge inverse so their slab never clips
    let inv = |d: f32| if d.abs() > 1e-10 { 1.0 / d } else { f32::MAX * d.signum() };
    let inv_dir = Vec3::new(inv(ray_dir.x), inv(ray_dir.y), inv(ray_dir.z));

    let t1 = (aabb.min - ray_origin) * inv_dir;
    let t2 = (aabb.max - ray_origin) * inv_dir;

    let t_min = t1.min(t2).max_element();
    let t_max = t1.max(t2).min_element();

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 { Some(t_min) } else { Some(t_max) }
    } else {
        None
    }
}

/// Outward axis normal of the face of `aabb` nearest to `point`.
pub fn aabb_surface_normal(point: Vec3, aabb: &Aabb) -> Vec3 {
    let half_extents = aabb.size() * 0.5;
    let normalized = (point - aabb.center()) / half_extents;
    let abs = normalized.abs();

    if abs.x >= abs.y && abs.x >= abs.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs.y >= abs.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}

/// Picking collider of a block: its rotated nominal box.
pub fn block_collider(block: &PlacedBlock) -> Aabb {
    Aabb::from_center_size(block.position, block.rotated_dimensions())
}

/// Nearest block hit along a ray. Blocks without a usable position are
/// skipped.
pub fn raycast_blocks(ray_origin: Vec3, ray_dir: Vec3, blocks: &[PlacedBlock]) -> Option<BlockHit> {
    let mut closest: Option<BlockHit> = None;

    for block in blocks.iter().filter(|b| b.has_position()) {
        let collider = block_collider(block);
        let Some(t) = ray_aabb_intersect(ray_origin, ray_dir, &collider) else {
            continue;
        };
        if closest.is_some_and(|c| c.distance <= t) {
            continue;
        }
        let point = ray_origin + ray_dir * t;
        closest = Some(BlockHit {
            block_id: block.id,
            hit: SurfaceHit::new(point, aabb_surface_normal(point, &collider)),
            distance: t,
        });
    }

    closest
}

/// Hit on the `y = 0` floor plane, for rays travelling downward.
pub fn raycast_floor(ray_origin: Vec3, ray_dir: Vec3) -> Option<SurfaceHit> {
    if ray_dir.y >= -1e-6 || ray_origin.y < 0.0 {
        return None;
    }
    let t = -ray_origin.y / ray_dir.y;
    Some(SurfaceHit::floor(ray_origin + ray_dir * t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BlockType, Rotation};

    fn block(id: u128, block_type: BlockType, position: Vec3) -> PlacedBlock {
        PlacedBlock::new(BlockId::from_u128(id), block_type, position, Rotation::IDENTITY, 0)
    }

    #[test]
    fn test_ray_hits_aabb_from_front() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let t = ray_aabb_intersect(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, &aabb);
        assert!((t.unwrap() - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_ray_misses_aabb() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        assert!(ray_aabb_intersect(Vec3::new(3.0, 0.0, -5.0), Vec3::Z, &aabb).is_none());
        // Box behind the origin
        assert!(ray_aabb_intersect(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, &aabb).is_none());
    }

    #[test]
    fn test_ray_from_inside_reports_exit() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let t = ray_aabb_intersect(Vec3::ZERO, Vec3::X, &aabb);
        assert!((t.unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_surface_normal_picks_face() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 2.0));
        assert_eq!(aabb_surface_normal(Vec3::new(1.0, 1.0, 1.2), &aabb), Vec3::Y);
        assert_eq!(aabb_surface_normal(Vec3::new(0.0, 0.5, 1.0), &aabb), Vec3::NEG_X);
        assert_eq!(aabb_surface_normal(Vec3::new(1.0, 0.4, 2.0), &aabb), Vec3::Z);
    }

    #[test]
    fn test_raycast_blocks_returns_nearest_top_face() {
        let blocks = [
            block(1, BlockType::Base, Vec3::new(0.5, 0.5, 0.5)),
            block(2, BlockType::Base, Vec3::new(0.5, 1.5, 0.5)),
        ];
        let hit = raycast_blocks(Vec3::new(0.6, 10.0, 0.4), Vec3::NEG_Y, &blocks).unwrap();
        assert_eq!(hit.block_id, BlockId::from_u128(2));
        assert_eq!(hit.hit.normal, Vec3::Y);
        assert!((hit.hit.point.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_raycast_blocks_side_face() {
        let blocks = [block(1, BlockType::Double, Vec3::new(0.5, 1.0, 0.5))];
        let hit = raycast_blocks(Vec3::new(5.0, 1.2, 0.5), Vec3::NEG_X, &blocks).unwrap();
        assert_eq!(hit.hit.normal, Vec3::X);
        assert!((hit.distance - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_raycast_skips_blocks_without_position() {
        let blocks = [block(1, BlockType::Base, Vec3::splat(f32::NAN))];
        assert!(raycast_blocks(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y, &blocks).is_none());
    }

    #[test]
    fn test_raycast_floor() {
        let dir = Vec3::new(1.0, -1.0, 0.0).normalize();
        let hit = raycast_floor(Vec3::new(0.0, 2.0, 3.0), dir).unwrap();
        assert!((hit.point - Vec3::new(2.0, 0.0, 3.0)).abs().max_element() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
        assert!(raycast_floor(Vec3::new(0.0, 2.0, 0.0), Vec3::Y).is_none());
    }
}
