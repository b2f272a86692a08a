//! World Module
//!
//! The space blocks live in: grid units and snapping, room presets and the
//! placed-block record.
//!
//! ## Coordinates
//! 1 grid unit = 0.2 m. +Y is up and the floor is `y = 0`. Bounded rooms
//! start at the origin corner and extend along +X (width) and +Z (depth).

pub mod block;
pub mod grid;
pub mod room;

pub use block::{BlockId, PlacedBlock};
pub use grid::{SnapMode, UNIT_METERS, snap_all_axes, snap_to_grid, snap_to_step, units_to_meters};
pub use room::{ParseRoomSizeError, RoomSize, RoomSpec, Wall};
