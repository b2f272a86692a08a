//! Builder Module
//!
//! Placement-time logic: where a hovered block would snap, whether it may go
//! there, and screen-space selection helpers.

pub mod marquee;
pub mod placement;
pub mod snap;

pub use marquee::{ScreenRect, blocks_in_rect, screen_to_ray, world_to_screen};
pub use placement::{
    GroupMember, HoverTarget, MovingGroup, PlacementContext, PlacementPreview, preview_hover, validate_group_move,
    validate_placement,
};
pub use snap::{EDGE_THRESHOLD, FaceKind, INTERLOCK_OFFSET, calculate_floor_snap, calculate_snap, is_interlock, stacked_y};
