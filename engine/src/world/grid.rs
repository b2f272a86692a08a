//! Grid Configuration Module
//!
//! Grid units and snapping for the block world.
//!
//! ## Units
//! - 1 grid unit = 0.2 meters (one BASE block edge)
//! - Normal placement snaps to half units (2 steps per unit)
//! - Precision placement snaps to tenth units (10 steps per unit)
//!
//! ## Rounding
//! Ties round toward +infinity (`-0.25` at 2 steps per unit lands on `0.0`,
//! not `-0.5`), so a hover exactly on a cell border always picks the same
//! cell regardless of which side of the origin it sits on.

use glam::Vec3;

/// Physical size of one grid unit in meters.
pub const UNIT_METERS: f32 = 0.2;

/// Snap steps per unit in precision mode.
pub const FINE_STEPS_PER_UNIT: f32 = 10.0;

/// Snap steps per unit in normal mode.
pub const COARSE_STEPS_PER_UNIT: f32 = 2.0;

/// Placement snapping mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SnapMode {
    /// Block-relative grid snapping (half units on the floor)
    #[default]
    Grid,
    /// Free placement on the fine grid
    Precision,
}

impl SnapMode {
    pub fn from_precision(precision: bool) -> Self {
        if precision { SnapMode::Precision } else { SnapMode::Grid }
    }

    pub fn is_precision(self) -> bool {
        self == SnapMode::Precision
    }

    /// Floor snap steps per grid unit.
    pub fn steps_per_unit(self) -> f32 {
        match self {
            SnapMode::Grid => COARSE_STEPS_PER_UNIT,
            SnapMode::Precision => FINE_STEPS_PER_UNIT,
        }
    }
}

/// Round half toward +infinity.
pub fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

/// Snap a scalar to `1 / steps_per_unit`.
pub fn snap_to_step(value: f32, steps_per_unit: f32) -> f32 {
    round_half_up(value * steps_per_unit) / steps_per_unit
}

/// Snap X and Z to the grid; Y is preserved.
pub fn snap_to_grid(pos: Vec3, steps_per_unit: f32) -> Vec3 {
    Vec3::new(
        snap_to_step(pos.x, steps_per_unit),
        pos.y,
        snap_to_step(pos.z, steps_per_unit),
    )
}

/// Snap all three axes to the grid.
pub fn snap_all_axes(pos: Vec3, steps_per_unit: f32) -> Vec3 {
    Vec3::new(
        snap_to_step(pos.x, steps_per_unit),
        snap_to_step(pos.y, steps_per_unit),
        snap_to_step(pos.z, steps_per_unit),
    )
}

/// Grid units to meters.
pub fn units_to_meters(units: f32) -> f32 {
    units * UNIT_METERS
}
