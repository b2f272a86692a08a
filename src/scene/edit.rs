//! Scene Edits
//!
//! Block-list transformations. Every function takes the current list and
//! returns a new one; records are replaced, never mutated in place. Group
//! edits pivot on the selection leader and return `None` when the leader is
//! not in the list (nothing to do).

use glam::Vec3;

use super::selection::Selection;
use crate::geometry::{BlockType, Rotation};
use crate::world::{BlockId, PlacedBlock};

/// Append a new block.
pub fn place_block(
    blocks: &[PlacedBlock],
    id: BlockId,
    block_type: BlockType,
    position: Vec3,
    rotation: Rotation,
    timestamp: u64,
) -> Vec<PlacedBlock> {
    let mut next = blocks.to_vec();
    next.push(PlacedBlock::new(id, block_type, position, rotation, timestamp));
    next
}

fn find_leader<'a>(blocks: &'a [PlacedBlock], selection: &Selection) -> Option<&'a PlacedBlock> {
    let leader = selection.leader()?;
    blocks.iter().find(|b| b.id == leader)
}

/// Drop the group so its leader lands on `leader_position`.
///
/// Every selected block shifts by the leader's delta. Only the leader takes
/// `leader_rotation`; followers keep theirs.
pub fn move_group(
    blocks: &[PlacedBlock],
    selection: &Selection,
    leader_position: Vec3,
    leader_rotation: Rotation,
) -> Option<Vec<PlacedBlock>> {
    let leader = find_leader(blocks, selection)?;
    let delta = leader_position - leader.position;

    Some(
        blocks
            .iter()
            .map(|b| {
                if !selection.contains(b.id) {
                    *b
                } else if b.id == leader.id {
                    b.with_transform(b.position + delta, leader_rotation)
                } else {
                    b.with_position(b.position + delta)
                }
            })
            .collect(),
    )
}

/// Set the leader's absolute transform from numeric input.
///
/// Followers shift by the leader's delta and all take `rotation`.
pub fn set_absolute_transform(
    blocks: &[PlacedBlock],
    selection: &Selection,
    position: Vec3,
    rotation: Rotation,
) -> Option<Vec<PlacedBlock>> {
    let leader = find_leader(blocks, selection)?;
    let delta = position - leader.position;

    Some(
        blocks
            .iter()
            .map(|b| {
                if !selection.contains(b.id) {
                    *b
                } else if b.id == leader.id {
                    b.with_transform(position, rotation)
                } else {
                    b.with_transform(b.position + delta, rotation)
                }
            })
            .collect(),
    )
}

/// Rotate an offset a quarter turn per non-zero axis of `rotation_delta`,
/// in the order X, Y, Z, direction by the sign of each component.
pub fn rotate_offset(offset: Vec3, rotation_delta: Rotation) -> Vec3 {
    let Vec3 { mut x, mut y, mut z } = offset;

    if rotation_delta.x != 0 {
        let s = rotation_delta.x.signum() as f32;
        (y, z) = (-z * s, y * s);
    }
    if rotation_delta.y != 0 {
        let s = rotation_delta.y.signum() as f32;
        (x, z) = (z * s, -x * s);
    }
    if rotation_delta.z != 0 {
        let s = rotation_delta.z.signum() as f32;
        (x, y) = (-y * s, x * s);
    }

    Vec3::new(x, y, z)
}

/// Nudge and/or rotate the selection as a rigid group around its leader.
///
/// Each member's offset from the leader is rotated by [`rotate_offset`],
/// re-applied around the leader plus `position_delta`, and each member's
/// rotation steps are incremented by `rotation_delta`.
pub fn update_selected(
    blocks: &[PlacedBlock],
    selection: &Selection,
    position_delta: Vec3,
    rotation_delta: Rotation,
) -> Option<Vec<PlacedBlock>> {
    let pivot = find_leader(blocks, selection)?.position;

    Some(
        blocks
            .iter()
            .map(|b| {
                if !selection.contains(b.id) {
                    return *b;
                }
                let offset = rotate_offset(b.position - pivot, rotation_delta);
                b.with_transform(pivot + offset + position_delta, b.rotation + rotation_delta)
            })
            .collect(),
    )
}

/// Remove every selected block.
pub fn delete_selected(blocks: &[PlacedBlock], selection: &Selection) -> Vec<PlacedBlock> {
    blocks.iter().filter(|b| !selection.contains(b.id)).copied().collect()
}

/// Selected blocks, in scene order, for the clipboard.
pub fn copy_selected(blocks: &[PlacedBlock], selection: &Selection) -> Vec<PlacedBlock> {
    blocks.iter().filter(|b| selection.contains(b.id)).copied().collect()
}

/// Append copies of `clipboard` with fresh ids and timestamps.
///
/// Returns the new list and the new ids, in clipboard order.
pub fn paste(
    blocks: &[PlacedBlock],
    clipboard: &[PlacedBlock],
    mut next_id: impl FnMut() -> BlockId,
    timestamp: u64,
) -> (Vec<PlacedBlock>, Vec<BlockId>) {
    let copies: Vec<PlacedBlock> = clipboard
        .iter()
        .map(|b| PlacedBlock {
            id: next_id(),
            timestamp,
            ..*b
        })
        .collect();
    let ids = copies.iter().map(|b| b.id).collect();

    let mut next = blocks.to_vec();
    next.extend(copies);
    (next, ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u128) -> BlockId {
        BlockId::from_u128(n)
    }

    fn block(n: u128, position: Vec3) -> PlacedBlock {
        PlacedBlock::new(id(n), BlockType::Base, position, Rotation::IDENTITY, 10)
    }

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    fn scene() -> Vec<PlacedBlock> {
        vec![
            block(1, Vec3::new(0.5, 0.5, 0.5)),
            block(2, Vec3::new(1.5, 0.5, 0.5)),
            block(3, Vec3::new(5.5, 0.5, 0.5)),
        ]
    }

    #[test]
    fn test_place_block_appends() {
        let blocks = scene();
        let next = place_block(&blocks, id(9), BlockType::Terminal, Vec3::ONE, Rotation::new(0, 1, 0), 42);
        assert_eq!(next.len(), 4);
        assert_eq!(next[3].block_type, BlockType::Terminal);
        assert_eq!(next[3].timestamp, 42);
        assert_eq!(blocks.len(), 3);
    }

    #[test]
    fn test_move_group_rotates_only_leader() {
        let selection = Selection::from_ids([id(2), id(1)]);
        let next = move_group(&scene(), &selection, Vec3::new(3.5, 0.5, 2.5), Rotation::new(0, 1, 0)).unwrap();

        assert_eq!(next[1].position, Vec3::new(3.5, 0.5, 2.5));
        assert_eq!(next[1].rotation, Rotation::new(0, 1, 0));
        assert_eq!(next[0].position, Vec3::new(2.5, 0.5, 2.5));
        assert_eq!(next[0].rotation, Rotation::IDENTITY);
        assert_eq!(next[2].position, Vec3::new(5.5, 0.5, 0.5));
    }

    #[test]
    fn test_absolute_transform_rotates_all() {
        let selection = Selection::from_ids([id(1), id(2)]);
        let next = set_absolute_transform(&scene(), &selection, Vec3::new(0.5, 2.5, 0.5), Rotation::new(1, 0, 0)).unwrap();

        assert_eq!(next[0].position, Vec3::new(0.5, 2.5, 0.5));
        assert_eq!(next[1].position, Vec3::new(1.5, 2.5, 0.5));
        assert!(next[..2].iter().all(|b| b.rotation == Rotation::new(1, 0, 0)));
        assert_eq!(next[2].rotation, Rotation::IDENTITY);
    }

    #[test]
    fn test_group_edits_need_leader() {
        let missing = Selection::from_ids([id(7)]);
        assert!(move_group(&scene(), &missing, Vec3::ZERO, Rotation::IDENTITY).is_none());
        assert!(update_selected(&scene(), &Selection::new(), Vec3::X, Rotation::IDENTITY).is_none());
    }

    #[test]
    fn test_rotate_offset_quarter_turns() {
        // +Y turn: (1, 0, 0) -> (0, 0, -1)
        assert!(approx(rotate_offset(Vec3::X, Rotation::new(0, 1, 0)), Vec3::NEG_Z));
        // -Y turn: (1, 0, 0) -> (0, 0, 1)
        assert!(approx(rotate_offset(Vec3::X, Rotation::new(0, -1, 0)), Vec3::Z));
        // +X turn: (0, 1, 0) -> (0, 0, 1)
        assert!(approx(rotate_offset(Vec3::Y, Rotation::new(1, 0, 0)), Vec3::Z));
        // +Z turn: (1, 0, 0) -> (0, 1, 0)
        assert!(approx(rotate_offset(Vec3::X, Rotation::new(0, 0, 1)), Vec3::Y));
        // Magnitude ignored: a delta of 3 is still one quarter turn
        assert!(approx(rotate_offset(Vec3::X, Rotation::new(0, 3, 0)), Vec3::NEG_Z));
    }

    #[test]
    fn test_update_selected_rotates_group_about_leader() {
        let selection = Selection::from_ids([id(1), id(2)]);
        let next = update_selected(&scene(), &selection, Vec3::ZERO, Rotation::new(0, 1, 0)).unwrap();

        assert!(approx(next[0].position, Vec3::new(0.5, 0.5, 0.5)));
        assert!(approx(next[1].position, Vec3::new(0.5, 0.5, -0.5)));
        assert_eq!(next[0].rotation, Rotation::new(0, 1, 0));
        assert_eq!(next[1].rotation, Rotation::new(0, 1, 0));
        assert_eq!(next[2], scene()[2]);
    }

    #[test]
    fn test_update_selected_nudges() {
        let selection = Selection::from_ids([id(2), id(1)]);
        let next = update_selected(&scene(), &selection, Vec3::new(0.0, 0.0, -0.5), Rotation::IDENTITY).unwrap();
        assert!(approx(next[0].position, Vec3::new(0.5, 0.5, 0.0)));
        assert!(approx(next[1].position, Vec3::new(1.5, 0.5, 0.0)));
    }

    #[test]
    fn test_delete_and_copy() {
        let selection = Selection::from_ids([id(3), id(1)]);
        let remaining = delete_selected(&scene(), &selection);
        assert_eq!(remaining.iter().map(|b| b.id).collect::<Vec<_>>(), vec![id(2)]);

        let copied = copy_selected(&scene(), &selection);
        assert_eq!(copied.iter().map(|b| b.id).collect::<Vec<_>>(), vec![id(1), id(3)]);
    }

    #[test]
    fn test_paste_assigns_fresh_ids() {
        let blocks = scene();
        let clipboard = copy_selected(&blocks, &Selection::from_ids([id(1), id(2)]));
        let mut counter = 100;
        let (next, ids) = paste(
            &blocks,
            &clipboard,
            || {
                counter += 1;
                id(counter)
            },
            99,
        );

        assert_eq!(next.len(), 5);
        assert_eq!(ids, vec![id(101), id(102)]);
        assert_eq!(next[3].position, blocks[0].position);
        assert!(next[3..].iter().all(|b| b.timestamp == 99));
    }
}
