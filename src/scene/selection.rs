//! Selection
//!
//! Ordered set of selected block ids. Order matters: the first id is the
//! leader that group moves, rotations and absolute transforms pivot on.

use std::collections::HashSet;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::world::{BlockId, PlacedBlock, UNIT_METERS};

/// Selected ids in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: Vec<BlockId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = BlockId>) -> Self {
        let mut selection = Self::new();
        selection.extend(ids);
        selection
    }

    /// First selected id.
    pub fn leader(&self) -> Option<BlockId> {
        self.ids.first().copied()
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[BlockId] {
        &self.ids
    }

    pub fn to_set(&self) -> HashSet<BlockId> {
        self.ids.iter().copied().collect()
    }

    /// Add `id` if absent, remove it if present (multi-select click).
    pub fn toggle(&mut self, id: BlockId) {
        if let Some(index) = self.ids.iter().position(|x| *x == id) {
            self.ids.remove(index);
        } else {
            self.ids.push(id);
        }
    }

    /// Replace the selection with `id` alone.
    pub fn select_only(&mut self, id: BlockId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Append ids not already selected (marquee union).
    pub fn extend(&mut self, ids: impl IntoIterator<Item = BlockId>) {
        for id in ids {
            if !self.contains(id) {
                self.ids.push(id);
            }
        }
    }

    /// Drop ids with no block in `blocks`.
    pub fn retain_existing(&mut self, blocks: &[PlacedBlock]) {
        self.ids.retain(|id| blocks.iter().any(|b| b.id == *id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

/// Overall size in meters of the selected blocks' rotated nominal boxes.
///
/// Returns `None` when no selected block exists in `blocks`.
pub fn selection_bounds(blocks: &[PlacedBlock], selection: &Selection) -> Option<Vec3> {
    let (min, max) = blocks
        .iter()
        .filter(|b| b.has_position() && selection.contains(b.id))
        .map(|b| {
            let half = b.rotated_dimensions() * 0.5;
            (b.position - half, b.position + half)
        })
        .reduce(|(lo, hi), (min, max)| (lo.min(min), hi.max(max)))?;

    Some((max - min).max(Vec3::ZERO) * UNIT_METERS)
}
