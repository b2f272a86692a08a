//! Brock Engine Library
//!
//! Geometry, collision and snap-placement core for designing modular
//! furniture out of cork "Brock" blocks on a 0.2 m grid. Everything here is
//! headless: rendering and input live with the host application, which feeds
//! pointer hits in and reads positions and validity back out.
//!
//! # Modules
//!
//! - [`geometry`] - block catalogue, tunable geometry parameters, sub-box decomposition
//! - [`physics`] - world transforms, collision, room bounds, picking rays
//! - [`world`] - grid snapping, room presets, the placed-block record
//! - [`builder`] - snap calculation and placement validation
//! - [`scene`] - editing session: history, selection, clipboard, instructions, stats
//!
//! # Example
//!
//! ```ignore
//! use brock_engine::builder::{HoverTarget, PlacementContext, preview_hover};
//! use brock_engine::geometry::{BlockType, GeometryConfig, Rotation};
//! use brock_engine::physics::raycast_blocks;
//! use brock_engine::world::{RoomSize, SnapMode};
//!
//! let config = GeometryConfig::shared();
//! let ctx = PlacementContext::new(&blocks, RoomSize::Niche2M, &config);
//!
//! if let Some(hit) = raycast_blocks(origin, dir, &blocks) {
//!     let target = blocks.iter().find(|b| b.id == hit.block_id).unwrap();
//!     let hover = HoverTarget::Block { target, hit: hit.hit };
//!     let preview = preview_hover(hover, BlockType::Conn1D, Rotation::IDENTITY, SnapMode::Grid, None, &ctx);
//! }
//! ```

pub mod geometry;
pub mod physics;
pub mod world;

// Placement tooling (located in src/builder/ directory)
#[path = "../../src/builder/mod.rs"]
pub mod builder;

// Editing session (located in src/scene/ directory)
#[path = "../../src/scene/mod.rs"]
pub mod scene;

// Re-export the types most callers need at crate level
pub use geometry::{BlockType, GeometryConfig, GeometryParams, Rotation};
pub use physics::{SurfaceHit, check_collision, check_room_bounds};
pub use world::{BlockId, PlacedBlock, RoomSize, SnapMode};
pub use builder::{calculate_floor_snap, calculate_snap};
pub use scene::Scene;

// Block records are copied freely between snapshots
static_assertions::assert_impl_all!(PlacedBlock: Copy, Send, Sync);
static_assertions::assert_impl_all!(BlockType: Copy, Eq, std::hash::Hash);
static_assertions::assert_eq_size!(BlockId, u128);
