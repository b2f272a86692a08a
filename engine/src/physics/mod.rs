//! Physics module for the Brock engine
//!
//! Geometric validity checks for block placement. There is no simulation:
//! no gravity, no load analysis. Everything here is a pure query over a block
//! list and the live geometry configuration.
//!
//! # Unit System
//!
//! **1 unit = 1 grid unit = 0.2 m**
//!
//! # Submodules
//!
//! - [`transform`] - local sub-box to world AABB (corner enumeration)
//! - [`collision`] - floor rule, broad phase, multi-box overlap
//! - [`bounds`] - room footprint containment
//! - [`raycast`] - headless picking against block colliders and the floor
//!
//! Two rotation treatments coexist: footprints and floor checks
//! use the parity swap in [`crate::geometry::dimensions`], collision shapes
//! use the full rotation in [`transform`].

pub mod bounds;
pub mod collision;
pub mod raycast;
pub mod transform;

pub use bounds::{ROOM_EPSILON, check_room_bounds, footprint, footprint_fits};
pub use collision::{
    BroadPhase, CollisionChecker, DistanceCull, FLOOR_EPSILON, OVERLAP_EPSILON, SpatialHash, below_floor,
    bodies_overlap, check_collision, collision_body,
};
pub use raycast::{BlockHit, SurfaceHit, aabb_surface_normal, block_collider, ray_aabb_intersect, raycast_blocks, raycast_floor};
pub use transform::{Aabb, rotation_quat, transform_box_to_world, world_boxes};
