//! Block Placement
//!
//! Validation of snapped positions for single placements and group moves,
//! and the hover preview that ties snap and validation together.

use std::collections::HashSet;

use glam::Vec3;
use tracing::debug;

use super::snap::{calculate_floor_snap, calculate_snap};
use crate::geometry::{BlockType, GeometryConfig, Rotation};
use crate::physics::{CollisionChecker, SurfaceHit, check_room_bounds};
use crate::world::{BlockId, PlacedBlock, RoomSize, SnapMode};

/// Scene state a placement is validated against.
#[derive(Debug, Clone, Copy)]
pub struct PlacementContext<'a> {
    pub blocks: &'a [PlacedBlock],
    pub room: RoomSize,
    pub config: &'a GeometryConfig,
}

impl<'a> PlacementContext<'a> {
    pub fn new(blocks: &'a [PlacedBlock], room: RoomSize, config: &'a GeometryConfig) -> Self {
        Self { blocks, room, config }
    }
}

/// Ghost position under the pointer and whether committing it is legal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementPreview {
    pub position: Vec3,
    pub valid: bool,
}

/// Whether a new block may be placed at `position`: inside the room and not
/// colliding with anything.
pub fn validate_placement(position: Vec3, block_type: BlockType, rotation: Rotation, ctx: &PlacementContext<'_>) -> bool {
    if !check_room_bounds(position, block_type, rotation, ctx.room) {
        return false;
    }
    !CollisionChecker::new(ctx.config).check(position, ctx.blocks, block_type, rotation, &HashSet::new())
}

// =============================================================================
// Group moves
// =============================================================================

/// One block of a moving selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupMember {
    pub id: BlockId,
    pub block_type: BlockType,
    pub rotation: Rotation,
    /// Position relative to the leader
    pub offset: Vec3,
}

/// A selection being moved as a rigid group around its leader.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingGroup {
    members: Vec<GroupMember>,
    ids: HashSet<BlockId>,
}

impl MovingGroup {
    /// Build from selection order: the first selected block present in
    /// `blocks` leads. Returns `None` when nothing selected exists.
    pub fn from_selection(blocks: &[PlacedBlock], selection: &[BlockId]) -> Option<Self> {
        let selected: Vec<&PlacedBlock> = selection
            .iter()
            .filter_map(|id| blocks.iter().find(|b| b.id == *id))
            .filter(|b| b.has_position())
            .collect();
        let leader = selected.first()?.position;

        let members: Vec<GroupMember> = selected
            .iter()
            .map(|b| GroupMember {
                id: b.id,
                block_type: b.block_type,
                rotation: b.rotation,
                offset: b.position - leader,
            })
            .collect();
        let ids = members.iter().map(|m| m.id).collect();

        Some(Self { members, ids })
    }

    pub fn leader(&self) -> &GroupMember {
        // Construction guarantees at least one member
        &self.members[0]
    }

    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    pub fn ids(&self) -> &HashSet<BlockId> {
        &self.ids
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.ids.contains(&id)
    }

    /// Each member's position with the leader at `leader_target`.
    pub fn positions_at(&self, leader_target: Vec3) -> impl Iterator<Item = (&GroupMember, Vec3)> + '_ {
        self.members.iter().map(move |m| (m, leader_target + m.offset))
    }
}

/// Whether the group may move with its leader to `leader_target`.
///
/// The leader's type at `leader_rotation` must fit the room at the target,
/// and every member, at its stored rotation, must fit the room and clear all
/// blocks outside the group.
pub fn validate_group_move(
    leader_target: Vec3,
    leader_rotation: Rotation,
    group: &MovingGroup,
    ctx: &PlacementContext<'_>,
) -> bool {
    let leader = group.leader();
    if !check_room_bounds(leader_target, leader.block_type, leader_rotation, ctx.room) {
        return false;
    }

    let checker = CollisionChecker::new(ctx.config);
    group.positions_at(leader_target).all(|(member, position)| {
        let ok = check_room_bounds(position, member.block_type, member.rotation, ctx.room)
            && !checker.check(position, ctx.blocks, member.block_type, member.rotation, group.ids());
        if !ok {
            debug!(member = %member.id, ?position, "group move rejected");
        }
        ok
    })
}

// =============================================================================
// Hover preview
// =============================================================================

/// What the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoverTarget<'a> {
    /// A face of an existing block's collider
    Block { target: &'a PlacedBlock, hit: SurfaceHit },
    /// The floor plane
    Floor { point: Vec3 },
}

/// Snap the hover and validate the result.
///
/// # Arguments
/// * `hover` - Block face or floor point under the pointer
/// * `active_type` - Type being placed (the leader's type when moving)
/// * `rotation` - Current placement rotation
/// * `mode` - Grid or precision snapping
/// * `moving` - The group being moved, if this is a move rather than a placement
/// * `ctx` - Blocks, room and geometry configuration
///
/// # Returns
/// `None` when nothing snaps (unsupported face, or hovering a block that is
/// itself part of the moving group).
pub fn preview_hover(
    hover: HoverTarget<'_>,
    active_type: BlockType,
    rotation: Rotation,
    mode: SnapMode,
    moving: Option<&MovingGroup>,
    ctx: &PlacementContext<'_>,
) -> Option<PlacementPreview> {
    let position = match hover {
        HoverTarget::Block { target, hit } => {
            if moving.is_some_and(|g| g.contains(target.id)) {
                return None;
            }
            calculate_snap(&hit, target, active_type, rotation, mode)?
        }
        HoverTarget::Floor { point } => calculate_floor_snap(point, active_type, rotation, mode)?,
    };

    let valid = match moving {
        Some(group) => validate_group_move(position, rotation, group, ctx),
        None => validate_placement(position, active_type, rotation, ctx),
    };

    Some(PlacementPreview { position, valid })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: u128, block_type: BlockType, position: Vec3) -> PlacedBlock {
        PlacedBlock::new(BlockId::from_u128(id), block_type, position, Rotation::IDENTITY, 0)
    }

    #[test]
    fn test_validate_placement_checks_bounds_then_collision() {
        let config = GeometryConfig::new();
        let blocks = [block(1, BlockType::Base, Vec3::new(0.5, 0.5, 0.5))];
        let ctx = PlacementContext::new(&blocks, RoomSize::Niche2M, &config);

        assert!(validate_placement(Vec3::new(1.5, 0.5, 0.5), BlockType::Base, Rotation::IDENTITY, &ctx));
        // Same cell as the existing block
        assert!(!validate_placement(Vec3::new(0.5, 0.5, 0.5), BlockType::Base, Rotation::IDENTITY, &ctx));
        // Outside the niche (x < 0)
        assert!(!validate_placement(Vec3::new(-0.5, 0.5, 0.5), BlockType::Base, Rotation::IDENTITY, &ctx));
    }

    #[test]
    fn test_moving_group_offsets_follow_selection_order() {
        let blocks = [
            block(1, BlockType::Base, Vec3::new(0.5, 0.5, 0.5)),
            block(2, BlockType::Base, Vec3::new(1.5, 0.5, 0.5)),
            block(3, BlockType::Base, Vec3::new(5.5, 0.5, 0.5)),
        ];
        let selection = [BlockId::from_u128(2), BlockId::from_u128(1)];
        let group = MovingGroup::from_selection(&blocks, &selection).unwrap();

        assert_eq!(group.leader().id, BlockId::from_u128(2));
        assert_eq!(group.members()[1].offset, Vec3::new(-1.0, 0.0, 0.0));
        assert!(group.contains(BlockId::from_u128(1)));
        assert!(!group.contains(BlockId::from_u128(3)));
    }

    #[test]
    fn test_moving_group_needs_existing_selection() {
        let blocks = [block(1, BlockType::Base, Vec3::new(0.5, 0.5, 0.5))];
        assert!(MovingGroup::from_selection(&blocks, &[]).is_none());
        assert!(MovingGroup::from_selection(&blocks, &[BlockId::from_u128(9)]).is_none());
    }

    #[test]
    fn test_group_may_overlap_its_own_old_positions() {
        let config = GeometryConfig::new();
        let blocks = [
            block(1, BlockType::Base, Vec3::new(0.5, 0.5, 0.5)),
            block(2, BlockType::Base, Vec3::new(1.5, 0.5, 0.5)),
        ];
        let ctx = PlacementContext::new(&blocks, RoomSize::Unlimited, &config);
        let group = MovingGroup::from_selection(&blocks, &[BlockId::from_u128(1), BlockId::from_u128(2)]).unwrap();

        // Shift right by one: block 1 lands where block 2 was
        assert!(validate_group_move(Vec3::new(1.5, 0.5, 0.5), Rotation::IDENTITY, &group, &ctx));
    }

    #[test]
    fn test_group_rejects_member_collision_and_bounds() {
        let config = GeometryConfig::new();
        let blocks = [
            block(1, BlockType::Base, Vec3::new(0.5, 0.5, 0.5)),
            block(2, BlockType::Base, Vec3::new(1.5, 0.5, 0.5)),
            block(3, BlockType::Base, Vec3::new(4.5, 0.5, 0.5)),
        ];
        let ctx = PlacementContext::new(&blocks, RoomSize::Niche2M, &config);
        let group = MovingGroup::from_selection(&blocks, &[BlockId::from_u128(1), BlockId::from_u128(2)]).unwrap();

        // Follower would land on block 3
        assert!(!validate_group_move(Vec3::new(3.5, 0.5, 0.5), Rotation::IDENTITY, &group, &ctx));
        // Follower would leave the 10-wide niche
        assert!(!validate_group_move(Vec3::new(9.5, 0.5, 0.5), Rotation::IDENTITY, &group, &ctx));
        // Clear spot
        assert!(validate_group_move(Vec3::new(6.5, 0.5, 2.5), Rotation::IDENTITY, &group, &ctx));
    }

    #[test]
    fn test_preview_floor_and_block() {
        let config = GeometryConfig::new();
        let blocks = [block(1, BlockType::Base, Vec3::new(0.5, 0.5, 0.5))];
        let ctx = PlacementContext::new(&blocks, RoomSize::Unlimited, &config);

        let floor = preview_hover(
            HoverTarget::Floor { point: Vec3::new(2.4, 0.0, 0.6) },
            BlockType::Base,
            Rotation::IDENTITY,
            SnapMode::Grid,
            None,
            &ctx,
        )
        .unwrap();
        assert_eq!(floor.position, Vec3::new(2.5, 0.5, 0.5));
        assert!(floor.valid);

        let top = preview_hover(
            HoverTarget::Block {
                target: &blocks[0],
                hit: SurfaceHit::new(Vec3::new(0.5, 1.0, 0.5), Vec3::Y),
            },
            BlockType::Base,
            Rotation::IDENTITY,
            SnapMode::Grid,
            None,
            &ctx,
        )
        .unwrap();
        assert_eq!(top.position, Vec3::new(0.5, 1.5, 0.5));
        assert!(top.valid);
    }

    #[test]
    fn test_preview_ignores_hover_on_moving_block() {
        let config = GeometryConfig::new();
        let blocks = [block(1, BlockType::Base, Vec3::new(0.5, 0.5, 0.5))];
        let ctx = PlacementContext::new(&blocks, RoomSize::Unlimited, &config);
        let group = MovingGroup::from_selection(&blocks, &[BlockId::from_u128(1)]).unwrap();

        let hover = HoverTarget::Block {
            target: &blocks[0],
            hit: SurfaceHit::new(Vec3::new(0.5, 1.0, 0.5), Vec3::Y),
        };
        assert!(preview_hover(hover, BlockType::Base, Rotation::IDENTITY, SnapMode::Grid, Some(&group), &ctx).is_none());
    }
}
