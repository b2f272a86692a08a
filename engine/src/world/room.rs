//! Room Presets
//!
//! The rooms a design can be built in. Bounded rooms have their origin at a
//! floor corner: valid footprints lie in `[0, width] x [0, depth]` (grid
//! units). The unlimited studio carries nominal extents for camera framing
//! but never constrains placement.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Room preset selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomSize {
    #[default]
    Unlimited,
    #[serde(rename = "NICHE_2M")]
    Niche2M,
    #[serde(rename = "WALL_3M")]
    Wall3M,
    #[serde(rename = "CORNER_3M")]
    Corner3M,
    #[serde(rename = "ROOM_4X5")]
    Room4x5,
}

/// Wall present along one room edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wall {
    Back,
    Left,
    Right,
    Front,
}

/// Static description of a room preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomSpec {
    pub name: &'static str,
    /// Extent along X in grid units
    pub width: f32,
    /// Extent along Z in grid units
    pub depth: f32,
    pub walls: &'static [Wall],
    /// Room centre on the floor (X, Z), used to frame the camera
    pub offset: Vec2,
}

const UNLIMITED_SPEC: RoomSpec = RoomSpec {
    name: "Studio (Unlimited)",
    width: 100.0,
    depth: 100.0,
    walls: &[],
    offset: Vec2::new(50.0, 50.0),
};

const NICHE_2M_SPEC: RoomSpec = RoomSpec {
    name: "Niche (2m x 1m)",
    width: 10.0,
    depth: 5.0,
    walls: &[Wall::Back, Wall::Left, Wall::Right],
    offset: Vec2::new(5.0, 2.5),
};

const WALL_3M_SPEC: RoomSpec = RoomSpec {
    name: "Wall (3m Wide)",
    width: 15.0,
    depth: 10.0,
    walls: &[Wall::Back],
    offset: Vec2::new(7.5, 5.0),
};

const CORNER_3M_SPEC: RoomSpec = RoomSpec {
    name: "Corner (3m x 3m)",
    width: 15.0,
    depth: 15.0,
    walls: &[Wall::Back, Wall::Left],
    offset: Vec2::new(7.5, 7.5),
};

const ROOM_4X5_SPEC: RoomSpec = RoomSpec {
    name: "Full Room (4m x 5m)",
    width: 20.0,
    depth: 25.0,
    walls: &[Wall::Back, Wall::Left, Wall::Right],
    offset: Vec2::new(10.0, 12.5),
};

impl RoomSize {
    pub const ALL: [RoomSize; 5] = [
        RoomSize::Unlimited,
        RoomSize::Niche2M,
        RoomSize::Wall3M,
        RoomSize::Corner3M,
        RoomSize::Room4x5,
    ];

    pub fn spec(self) -> &'static RoomSpec {
        match self {
            RoomSize::Unlimited => &UNLIMITED_SPEC,
            RoomSize::Niche2M => &NICHE_2M_SPEC,
            RoomSize::Wall3M => &WALL_3M_SPEC,
            RoomSize::Corner3M => &CORNER_3M_SPEC,
            RoomSize::Room4x5 => &ROOM_4X5_SPEC,
        }
    }

    /// Whether placement is constrained to the room footprint.
    pub fn is_bounded(self) -> bool {
        self != RoomSize::Unlimited
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoomSize::Unlimited => "UNLIMITED",
            RoomSize::Niche2M => "NICHE_2M",
            RoomSize::Wall3M => "WALL_3M",
            RoomSize::Corner3M => "CORNER_3M",
            RoomSize::Room4x5 => "ROOM_4X5",
        }
    }
}

impl RoomSpec {
    pub fn has_wall(&self, wall: Wall) -> bool {
        self.walls.contains(&wall)
    }
}

impl fmt::Display for RoomSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no room preset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown room size: {0}")]
pub struct ParseRoomSizeError(pub String);

impl FromStr for RoomSize {
    type Err = ParseRoomSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomSize::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseRoomSizeError(s.to_string()))
    }
}
