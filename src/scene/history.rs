//! Scene History
//!
//! Append-only list of full block-list snapshots with a cursor. Snapshots
//! are shared immutable slices; undoing never copies a block list.
//!
//! # Usage
//!
//! ```ignore
//! use brock_engine::scene::history::SceneHistory;
//!
//! let mut history = SceneHistory::new();
//! history.push(vec![block]);
//! history.undo();
//! assert!(history.current().is_empty());
//! ```

use std::rc::Rc;

use crate::world::PlacedBlock;

// ============================================================================
// HISTORY
// ============================================================================

/// Maximum number of snapshots kept, including the current one.
pub const MAX_HISTORY_SIZE: usize = 100;

/// Snapshot history starting from one empty scene.
#[derive(Debug, Clone)]
pub struct SceneHistory {
    /// Snapshots, oldest first; never empty
    snapshots: Vec<Rc<[PlacedBlock]>>,
    /// Index of the current snapshot
    cursor: usize,
    max_size: usize,
}

impl Default for SceneHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneHistory {
    pub fn new() -> Self {
        Self::with_max_size(MAX_HISTORY_SIZE)
    }

    /// History capped at `max_size` snapshots (at least 1).
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            snapshots: vec![Rc::from(Vec::new())],
            cursor: 0,
            max_size: max_size.max(1),
        }
    }

    /// The block list at the cursor.
    pub fn current(&self) -> Rc<[PlacedBlock]> {
        Rc::clone(&self.snapshots[self.cursor])
    }

    /// Record a new block list as current.
    pub fn push(&mut self, blocks: impl Into<Rc<[PlacedBlock]>>) {
        // Discard everything after the cursor
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(blocks.into());

        // Drop the oldest snapshots past the cap
        if self.snapshots.len() > self.max_size {
            let excess = self.snapshots.len() - self.max_size;
            self.snapshots.drain(0..excess);
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back; returns the new current list, or `None` at the start.
    pub fn undo(&mut self) -> Option<Rc<[PlacedBlock]>> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Step forward; returns the new current list, or `None` at the end.
    pub fn redo(&mut self) -> Option<Rc<[PlacedBlock]>> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn undo_count(&self) -> usize {
        self.cursor
    }

    pub fn redo_count(&self) -> usize {
        self.snapshots.len() - self.cursor - 1
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Never true: the initial empty snapshot is always present.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Reset to a single empty snapshot.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.snapshots.push(Rc::from(Vec::new()));
        self.cursor = 0;
    }
}

// ============================================================================
// TESTS
// ============================================================================
