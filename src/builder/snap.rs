//! Snap Resolver
//!
//! Turns a surface hit into the position a block would be placed at. The
//! resolver only decides *where*; [`super::placement`] decides *whether*.
//!
//! ## Face rules
//! - Top face (`normal.y > 0.9`): stack on the target. One connector-class
//!   and one structural block interlock, sinking the new block 0.5 units.
//!   Hits near an edge shift the stack half a unit toward that edge.
//! - Side face (`|normal.y| < 0.1`): the horizontal neighbour cell.
//! - Anything else: no snap.
//!
//! In precision mode every axis snaps to the 0.1 grid instead, except that a
//! top-face hit still rests exactly on the target.

use glam::Vec3;
use tracing::trace;

use crate::geometry::{BlockType, Rotation, rotated_dimensions};
use crate::physics::SurfaceHit;
use crate::world::grid::{FINE_STEPS_PER_UNIT, round_half_up, snap_all_axes, snap_to_grid};
use crate::world::{PlacedBlock, SnapMode};

/// Minimum normal Y for a top-face hit.
pub const TOP_FACE_MIN_NORMAL_Y: f32 = 0.9;

/// Maximum |normal Y| for a side-face hit.
pub const SIDE_FACE_MAX_NORMAL_Y: f32 = 0.1;

/// Local hit offset beyond which a top-face stack shifts toward the edge.
pub const EDGE_THRESHOLD: f32 = 0.20;

/// Lateral shift applied past [`EDGE_THRESHOLD`].
pub const EDGE_OFFSET: f32 = 0.5;

/// Vertical recess of an interlocking pair.
pub const INTERLOCK_OFFSET: f32 = 0.5;

/// Which kind of face a hit normal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceKind {
    Top,
    Side,
    /// Bottom faces and anything steep; never snaps in grid mode
    Other,
}

impl FaceKind {
    pub fn classify(normal: Vec3) -> Self {
        if normal.y > TOP_FACE_MIN_NORMAL_Y {
            FaceKind::Top
        } else if normal.y.abs() < SIDE_FACE_MAX_NORMAL_Y {
            FaceKind::Side
        } else {
            FaceKind::Other
        }
    }
}

/// Exactly one of the pair is connector-class.
pub fn is_interlock(target: BlockType, active: BlockType) -> bool {
    target.is_connector_class() != active.is_connector_class()
}

/// Y at which `active` rests on top of `target`, including the interlock
/// recess.
pub fn stacked_y(target: &PlacedBlock, active_type: BlockType, active_rotation: Rotation) -> f32 {
    let target_dims = target.rotated_dimensions();
    let active_dims = rotated_dimensions(active_type, active_rotation);
    let y = target.position.y + target_dims.y / 2.0 + active_dims.y / 2.0;
    if is_interlock(target.block_type, active_type) {
        y - INTERLOCK_OFFSET
    } else {
        y
    }
}

/// Edge shift for one axis of a top-face hit.
fn edge_shift(local: f32) -> f32 {
    if local.abs() > EDGE_THRESHOLD {
        local.signum() * EDGE_OFFSET
    } else {
        0.0
    }
}

/// Snap position for placing `active_type` against a face of `target`.
///
/// # Arguments
/// * `hit` - World hit point and face normal on the target's collider
/// * `target` - The block that was hit
/// * `active_type` - Type of the block being placed or moved
/// * `active_rotation` - Rotation of the block being placed or moved
/// * `mode` - Grid or precision snapping
///
/// # Returns
/// The snapped centre position, or `None` for an unsupported face or a hit
/// without a usable position.
pub fn calculate_snap(
    hit: &SurfaceHit,
    target: &PlacedBlock,
    active_type: BlockType,
    active_rotation: Rotation,
    mode: SnapMode,
) -> Option<Vec3> {
    if !hit.point.is_finite() || !hit.normal.is_finite() || !target.has_position() {
        return None;
    }

    let face = FaceKind::classify(hit.normal);
    let snapped = match mode {
        SnapMode::Precision => Some(precision_snap(hit, target, face, active_type, active_rotation)),
        SnapMode::Grid => grid_snap(hit, target, face, active_type, active_rotation),
    };

    trace!(?face, ?mode, %active_type, target = %target.id, ?snapped, "snap resolved");
    snapped
}

fn precision_snap(
    hit: &SurfaceHit,
    target: &PlacedBlock,
    face: FaceKind,
    active_type: BlockType,
    active_rotation: Rotation,
) -> Vec3 {
    let dims = rotated_dimensions(active_type, active_rotation);
    // Push the centre out of the face by half the block
    let projected = hit.point + hit.normal * dims * 0.5;

    match face {
        FaceKind::Top => {
            let target_dims = target.rotated_dimensions();
            let y = target.position.y + target_dims.y / 2.0 + dims.y / 2.0;
            snap_to_grid(Vec3::new(projected.x, y, projected.z), FINE_STEPS_PER_UNIT)
        }
        FaceKind::Side | FaceKind::Other => snap_all_axes(projected, FINE_STEPS_PER_UNIT),
    }
}

fn grid_snap(
    hit: &SurfaceHit,
    target: &PlacedBlock,
    face: FaceKind,
    active_type: BlockType,
    active_rotation: Rotation,
) -> Option<Vec3> {
    let base = target.position;
    match face {
        FaceKind::Top => {
            let local = hit.point - base;
            Some(Vec3::new(
                base.x + edge_shift(local.x),
                stacked_y(target, active_type, active_rotation),
                base.z + edge_shift(local.z),
            ))
        }
        FaceKind::Side => Some(Vec3::new(
            base.x + round_half_up(hit.normal.x),
            base.y,
            base.z + round_half_up(hit.normal.z),
        )),
        FaceKind::Other => None,
    }
}

/// Snap position for a floor hit: X/Z on the mode's grid, resting on `y = 0`.
pub fn calculate_floor_snap(point: Vec3, active_type: BlockType, active_rotation: Rotation, mode: SnapMode) -> Option<Vec3> {
    if !point.is_finite() {
        return None;
    }
    let dims = rotated_dimensions(active_type, active_rotation);
    let snapped = snap_to_grid(point, mode.steps_per_unit());
    Some(Vec3::new(snapped.x, dims.y / 2.0, snapped.z))
}
