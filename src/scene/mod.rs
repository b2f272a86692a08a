//! Scene Module
//!
//! The editing session: block history, selection, clipboard and the command
//! set the UI drives. Every command computes a new block list with the pure
//! functions in [`edit`] and pushes it as a history snapshot.
//!
//! # Usage
//!
//! ```ignore
//! use brock_engine::scene::Scene;
//!
//! let mut scene = Scene::new(GeometryConfig::shared(), RoomSize::Niche2M);
//! let id = scene.place(BlockType::Base, Vec3::new(0.5, 0.5, 0.5), Rotation::IDENTITY);
//! scene.undo();
//! ```

pub mod edit;
pub mod history;
pub mod instructions;
pub mod selection;
pub mod stats;

pub use edit::{copy_selected, delete_selected, move_group, paste, place_block, rotate_offset, set_absolute_transform, update_selected};
pub use history::{MAX_HISTORY_SIZE, SceneHistory};
pub use instructions::{generate_instruction_steps, step_label, visible_block_ids};
pub use selection::{Selection, selection_bounds};
pub use stats::{BlockStats, calculate_stats};

use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec3;
use tracing::{debug, info};

use crate::builder::{HoverTarget, MovingGroup, PlacementContext, PlacementPreview, preview_hover, validate_group_move, validate_placement};
use crate::geometry::{BlockType, GeometryConfig, Rotation};
use crate::world::{BlockId, PlacedBlock, RoomSize, SnapMode};

/// Milliseconds since the Unix epoch (0 if the clock is before it).
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// One design session.
#[derive(Debug)]
pub struct Scene {
    config: Rc<GeometryConfig>,
    room: RoomSize,
    history: SceneHistory,
    selection: Selection,
    clipboard: Vec<PlacedBlock>,
    /// Set while the selection follows the pointer
    moving: Option<MovingGroup>,
}

impl Scene {
    pub fn new(config: Rc<GeometryConfig>, room: RoomSize) -> Self {
        Self {
            config,
            room,
            history: SceneHistory::new(),
            selection: Selection::new(),
            clipboard: Vec::new(),
            moving: None,
        }
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    /// Current block list.
    pub fn blocks(&self) -> Rc<[PlacedBlock]> {
        self.history.current()
    }

    pub fn block(&self, id: BlockId) -> Option<PlacedBlock> {
        self.blocks().iter().find(|b| b.id == id).copied()
    }

    pub fn config(&self) -> &Rc<GeometryConfig> {
        &self.config
    }

    pub fn room(&self) -> RoomSize {
        self.room
    }

    /// Switch rooms. Existing blocks are kept even if they no longer fit.
    pub fn set_room(&mut self, room: RoomSize) {
        self.room = room;
    }

    pub fn history(&self) -> &SceneHistory {
        &self.history
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn clipboard(&self) -> &[PlacedBlock] {
        &self.clipboard
    }

    pub fn is_moving(&self) -> bool {
        self.moving.is_some()
    }

    pub fn moving_group(&self) -> Option<&MovingGroup> {
        self.moving.as_ref()
    }

    fn commit(&mut self, blocks: Vec<PlacedBlock>) {
        self.history.push(blocks);
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Click on a block: toggle with `multi`, otherwise select it alone.
    pub fn select(&mut self, id: BlockId, multi: bool) {
        if multi {
            self.selection.toggle(id);
        } else {
            self.selection.select_only(id);
        }
        self.moving = None;
    }

    /// Marquee result: add to the selection.
    pub fn select_many(&mut self, ids: impl IntoIterator<Item = BlockId>) {
        self.selection.extend(ids);
        self.moving = None;
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.moving = None;
    }

    /// Size of the selection in meters.
    pub fn selection_bounds(&self) -> Option<Vec3> {
        selection_bounds(&self.blocks(), &self.selection)
    }

    // ------------------------------------------------------------------
    // Placement and moves
    // ------------------------------------------------------------------

    /// Snap and validate a hover against the current blocks. While moving,
    /// validation covers the whole group.
    pub fn preview(&self, hover: HoverTarget<'_>, active_type: BlockType, rotation: Rotation, mode: SnapMode) -> Option<PlacementPreview> {
        let blocks = self.blocks();
        let ctx = PlacementContext::new(&blocks, self.room, &self.config);
        preview_hover(hover, active_type, rotation, mode, self.moving.as_ref(), &ctx)
    }

    /// Place a new block if the position is valid; returns its id.
    pub fn place(&mut self, block_type: BlockType, position: Vec3, rotation: Rotation) -> Option<BlockId> {
        let blocks = self.blocks();
        let ctx = PlacementContext::new(&blocks, self.room, &self.config);
        if !validate_placement(position, block_type, rotation, &ctx) {
            debug!(?position, %block_type, "placement rejected");
            return None;
        }

        let id = BlockId::new();
        let next = place_block(&blocks, id, block_type, position, rotation, now_ms());
        self.commit(next);
        self.selection.clear();
        Some(id)
    }

    /// Start moving the selection. Returns `false` when nothing selected
    /// exists.
    pub fn begin_move(&mut self) -> bool {
        self.moving = MovingGroup::from_selection(&self.blocks(), self.selection.ids());
        self.moving.is_some()
    }

    pub fn cancel_move(&mut self) {
        self.moving = None;
    }

    /// Drop the moving group with its leader at `leader_position`.
    pub fn commit_move(&mut self, leader_position: Vec3, leader_rotation: Rotation) -> bool {
        let Some(group) = self.moving.as_ref() else {
            return false;
        };
        let blocks = self.blocks();
        let ctx = PlacementContext::new(&blocks, self.room, &self.config);
        if !validate_group_move(leader_position, leader_rotation, group, &ctx) {
            return false;
        }

        // Move exactly the validated members, leader first
        let members = Selection::from_ids(group.members().iter().map(|m| m.id));
        let Some(next) = move_group(&blocks, &members, leader_position, leader_rotation) else {
            return false;
        };
        self.commit(next);
        self.moving = None;
        true
    }

    /// Numeric transform of the leader; followers keep their offsets.
    pub fn set_absolute_transform(&mut self, position: Vec3, rotation: Rotation) -> bool {
        match set_absolute_transform(&self.blocks(), &self.selection, position, rotation) {
            Some(next) => {
                self.commit(next);
                true
            }
            None => false,
        }
    }

    /// Keyboard nudge / rotate of the selection.
    pub fn update_selected(&mut self, position_delta: Vec3, rotation_delta: Rotation) -> bool {
        if self.is_moving() {
            return false;
        }
        match update_selected(&self.blocks(), &self.selection, position_delta, rotation_delta) {
            Some(next) => {
                self.commit(next);
                true
            }
            None => false,
        }
    }

    /// Delete the selection; returns how many blocks were removed.
    pub fn delete_selected(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        let blocks = self.blocks();
        let next = delete_selected(&blocks, &self.selection);
        let removed = blocks.len() - next.len();
        self.commit(next);
        self.selection.clear();
        self.moving = None;
        removed
    }

    // ------------------------------------------------------------------
    // Clipboard
    // ------------------------------------------------------------------

    /// Copy the selection; returns the clipboard size.
    pub fn copy(&mut self) -> usize {
        if !self.selection.is_empty() {
            self.clipboard = copy_selected(&self.blocks(), &self.selection);
        }
        self.clipboard.len()
    }

    /// Paste the clipboard in place. The copies become the selection and
    /// start moving with the pointer.
    pub fn paste(&mut self) -> Vec<BlockId> {
        if self.clipboard.is_empty() {
            return Vec::new();
        }
        let (next, ids) = paste(&self.blocks(), &self.clipboard, BlockId::new, now_ms());
        self.commit(next);
        self.selection = Selection::from_ids(ids.iter().copied());
        self.begin_move();
        ids
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo().is_some();
        if moved {
            self.clear_selection();
        }
        moved
    }

    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo().is_some();
        if moved {
            self.clear_selection();
        }
        moved
    }

    /// Replace the design wholesale (e.g. after loading a file).
    pub fn load(&mut self, blocks: Vec<PlacedBlock>) {
        self.clear_selection();
        self.commit(blocks);
    }

    /// Empty the scene and its history.
    pub fn clear(&mut self) {
        self.history.clear();
        self.clear_selection();
        info!("scene cleared");
    }

    // ------------------------------------------------------------------
    // Reports
    // ------------------------------------------------------------------

    pub fn instruction_steps(&self) -> Vec<Vec<PlacedBlock>> {
        generate_instruction_steps(&self.blocks())
    }

    pub fn stats(&self) -> BlockStats {
        calculate_stats(&self.blocks())
    }
}
