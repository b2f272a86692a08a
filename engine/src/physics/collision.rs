//! Collision Detection
//!
//! Blocked-or-free test for a candidate block against the scene.
//!
//! # Pipeline
//!
//! 1. **Floor**: the candidate's lower extent (position.y minus half its
//!    rotated height) may not sink more than [`FLOOR_EPSILON`] below `y = 0`.
//! 2. **Broad phase**: a [`BroadPhase`] picks the existing blocks worth
//!    testing. [`DistanceCull`] keeps those within 3 units centre to centre.
//! 3. **Narrow phase**: both bodies are decomposed into collision-mode
//!    sub-boxes, transformed to world AABBs, and tested pairwise with every
//!    interval inset by [`OVERLAP_EPSILON`]. Any overlapping pair blocks.
//!
//! The inset is what lets flush faces and interlocking connectors sit
//! against each other without counting as a collision.
//!
//! # Example
//!
//! ```ignore
//! use brock_engine::physics::collision::check_collision;
//!
//! let blocked = check_collision(pos, &blocks, BlockType::Conn2D, rot, &HashSet::new(), &config);
//! ```

use std::collections::{HashMap, HashSet};

use glam::{IVec3, Vec3};
use tracing::debug;

use super::transform::{Aabb, world_boxes};
use crate::geometry::{BlockType, GeometryConfig, GeometryParams, Rotation, component_boxes, rotated_dimensions};
use crate::world::{BlockId, PlacedBlock};

/// How far below the floor a block's base may sit.
pub const FLOOR_EPSILON: f32 = 0.05;

/// Per-side inset applied to both intervals in the overlap test.
pub const OVERLAP_EPSILON: f32 = 0.001;

/// Squared centre distance beyond which two blocks are never tested.
pub const BROAD_PHASE_RADIUS_SQ: f32 = 9.0;

// =============================================================================
// Broad phase
// =============================================================================

/// Pre-filter choosing which existing blocks reach the narrow phase.
///
/// Implementations may only drop blocks that cannot collide: everything the
/// narrow phase would report must survive the filter.
pub trait BroadPhase {
    /// Blocks of `blocks` that may touch a candidate centred at `position`.
    fn candidates<'b>(&self, position: Vec3, blocks: &'b [PlacedBlock]) -> Vec<&'b PlacedBlock>;
}

/// Squared centre-distance cull; scans every block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceCull {
    pub max_distance_sq: f32,
}

impl Default for DistanceCull {
    fn default() -> Self {
        Self {
            max_distance_sq: BROAD_PHASE_RADIUS_SQ,
        }
    }
}

impl BroadPhase for DistanceCull {
    fn candidates<'b>(&self, position: Vec3, blocks: &'b [PlacedBlock]) -> Vec<&'b PlacedBlock> {
        blocks
            .iter()
            .filter(|b| b.has_position() && b.position.distance_squared(position) <= self.max_distance_sq)
            .collect()
    }
}

/// Largest cell coordinate magnitude the hash indexes. Positions beyond it
/// (in cells) bypass the grid.
const MAX_CELL: f32 = 16_777_216.0;

/// Uniform-cell spatial hash over one block list.
///
/// Built once for a scene snapshot and queried with that same slice; cells
/// are `cell_size` units wide, so with `cell_size` at least the cull radius
/// only the 27 cells around the candidate need visiting. Survivors are still
/// distance-culled, so results match [`DistanceCull`] exactly.
///
/// Blocks too far out to index are kept in a side list and tested on every
/// query; queries too far out fall back to the plain cull.
#[derive(Debug, Clone, Default)]
pub struct SpatialHash {
    cells: HashMap<IVec3, Vec<usize>>,
    outliers: Vec<usize>,
    cell_size: f32,
    len: usize,
    cull: DistanceCull,
}

impl SpatialHash {
    /// Index `blocks` with cells sized to the default cull radius.
    pub fn build(blocks: &[PlacedBlock]) -> Self {
        Self::with_cell_size(blocks, BROAD_PHASE_RADIUS_SQ.sqrt())
    }

    pub fn with_cell_size(blocks: &[PlacedBlock], cell_size: f32) -> Self {
        let cull = DistanceCull::default();
        // Cells narrower than the cull radius would need a wider neighbourhood
        let cell_size = cell_size.max(cull.max_distance_sq.sqrt());
        let mut cells: HashMap<IVec3, Vec<usize>> = HashMap::new();
        let mut outliers = Vec::new();
        for (index, block) in blocks.iter().enumerate().filter(|(_, b)| b.has_position()) {
            match Self::cell_of(block.position, cell_size) {
                Some(cell) => cells.entry(cell).or_default().push(index),
                None => outliers.push(index),
            }
        }
        Self {
            cells,
            outliers,
            cell_size,
            len: blocks.len(),
            cull,
        }
    }

    /// Cell containing `position`, or `None` outside the indexed range.
    fn cell_of(position: Vec3, cell_size: f32) -> Option<IVec3> {
        let cell = (position / cell_size).floor();
        (cell.is_finite() && cell.abs().max_element() <= MAX_CELL).then(|| cell.as_ivec3())
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

impl BroadPhase for SpatialHash {
    fn candidates<'b>(&self, position: Vec3, blocks: &'b [PlacedBlock]) -> Vec<&'b PlacedBlock> {
        // Queried with a different list than it was built from
        if blocks.len() != self.len {
            return self.cull.candidates(position, blocks);
        }
        let Some(center) = Self::cell_of(position, self.cell_size) else {
            return self.cull.candidates(position, blocks);
        };

        let mut indices = self.outliers.clone();
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if let Some(cell) = self.cells.get(&(center + IVec3::new(dx, dy, dz))) {
                        indices.extend_from_slice(cell);
                    }
                }
            }
        }
        // Keep scene order so the first contact is deterministic
        indices.sort_unstable();

        indices
            .into_iter()
            .filter_map(|i| blocks.get(i))
            .filter(|b| b.position.distance_squared(position) <= self.cull.max_distance_sq)
            .collect()
    }
}

// =============================================================================
// Narrow phase
// =============================================================================

/// Whether any box of `a` overlaps any box of `b`.
pub fn bodies_overlap(a: &[Aabb], b: &[Aabb]) -> bool {
    a.iter()
        .any(|box_a| b.iter().any(|box_b| box_a.overlaps(box_b, OVERLAP_EPSILON)))
}

/// World AABBs of a block's collision-mode sub-boxes.
pub fn collision_body(block_type: BlockType, position: Vec3, rotation: Rotation, params: &GeometryParams) -> Vec<Aabb> {
    world_boxes(&component_boxes(block_type, true, params), position, rotation)
}

/// Whether a block at `position` would sink below the floor.
pub fn below_floor(position: Vec3, block_type: BlockType, rotation: Rotation) -> bool {
    let dims = rotated_dimensions(block_type, rotation);
    position.y - dims.y / 2.0 < -FLOOR_EPSILON
}

/// Collision query bound to a geometry configuration and broad phase.
#[derive(Debug)]
pub struct CollisionChecker<'c, B = DistanceCull> {
    config: &'c GeometryConfig,
    broad_phase: B,
}

impl<'c> CollisionChecker<'c> {
    pub fn new(config: &'c GeometryConfig) -> Self {
        Self {
            config,
            broad_phase: DistanceCull::default(),
        }
    }
}

impl<'c, B: BroadPhase> CollisionChecker<'c, B> {
    pub fn with_broad_phase(config: &'c GeometryConfig, broad_phase: B) -> Self {
        Self { config, broad_phase }
    }

    /// First existing block the candidate would intersect, if any.
    ///
    /// Does not apply the floor rule.
    pub fn first_contact(
        &self,
        position: Vec3,
        existing: &[PlacedBlock],
        block_type: BlockType,
        rotation: Rotation,
        ignore_ids: &HashSet<BlockId>,
    ) -> Option<BlockId> {
        let params = self.config.params();
        let candidate = collision_body(block_type, position, rotation, &params);

        self.broad_phase
            .candidates(position, existing)
            .into_iter()
            .filter(|b| !ignore_ids.contains(&b.id))
            .find(|b| {
                let body = collision_body(b.block_type, b.position, b.rotation, &params);
                bodies_overlap(&candidate, &body)
            })
            .map(|b| b.id)
    }

    /// `true` when the candidate is BLOCKED.
    ///
    /// A non-finite position counts as missing and is always blocked.
    pub fn check(
        &self,
        position: Vec3,
        existing: &[PlacedBlock],
        block_type: BlockType,
        rotation: Rotation,
        ignore_ids: &HashSet<BlockId>,
    ) -> bool {
        if !position.is_finite() {
            debug!(?position, "collision: no usable position");
            return true;
        }

        if below_floor(position, block_type, rotation) {
            debug!(?position, %block_type, "collision: below floor");
            return true;
        }

        match self.first_contact(position, existing, block_type, rotation, ignore_ids) {
            Some(other) => {
                debug!(?position, %block_type, %other, "collision: overlaps block");
                true
            }
            None => false,
        }
    }
}

/// `true` when placing `block_type` at `position` is BLOCKED.
pub fn check_collision(
    position: Vec3,
    existing: &[PlacedBlock],
    block_type: BlockType,
    rotation: Rotation,
    ignore_ids: &HashSet<BlockId>,
    config: &GeometryConfig,
) -> bool {
    CollisionChecker::new(config).check(position, existing, block_type, rotation, ignore_ids)
}
