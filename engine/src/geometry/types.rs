//! Block Types
//!
//! The closed catalogue of placeable blocks and the 90°-step rotation triple.
//!
//! All dimensions are in grid units (1 unit = 0.2 m).

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One of the seven physical block variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    /// Unit cube slab with four pillar nubs
    Base,
    /// Double-height structural block
    Double,
    /// Linear 1-way connector
    #[serde(rename = "CONN_1D")]
    Conn1D,
    /// Corner 2-way connector
    #[serde(rename = "CONN_2D")]
    Conn2D,
    /// T-junction 3-way connector
    #[serde(rename = "CONN_3D")]
    Conn3D,
    /// Cross 4-way connector
    #[serde(rename = "CONN_4D")]
    Conn4D,
    /// Decorative end-cap
    Terminal,
}

/// Static description of a block type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockSpec {
    /// Display name (used in instructions and stats)
    pub name: &'static str,
    /// Short product description
    pub description: &'static str,
    /// Nominal bounding dimensions in grid units
    pub dimensions: Vec3,
    /// Weight in kg
    pub weight: f32,
    /// Price in EUR
    pub cost: f32,
    /// Sustainability impact score
    pub sdg_impact: f32,
    /// Catalogue connector flag (TERMINAL is not flagged here)
    pub is_connector: bool,
}

const BASE_SPEC: BlockSpec = BlockSpec {
    name: "BASE-Brock",
    description: "0.20m Cube.",
    dimensions: Vec3::new(1.0, 1.0, 1.0),
    weight: 1.22,
    cost: 11.50,
    sdg_impact: 20.00,
    is_connector: false,
};

const DOUBLE_SPEC: BlockSpec = BlockSpec {
    name: "DOUBLE - Brock",
    description: "0.40m Tall.",
    dimensions: Vec3::new(1.0, 2.0, 1.0),
    weight: 2.45,
    cost: 23.08,
    sdg_impact: 40.16,
    is_connector: false,
};

const CONN_1D_SPEC: BlockSpec = BlockSpec {
    name: "1D - Brock",
    description: "Linear Connector.",
    dimensions: Vec3::new(1.0, 1.0, 1.0),
    weight: 0.94,
    cost: 8.87,
    sdg_impact: 15.41,
    is_connector: true,
};

const CONN_2D_SPEC: BlockSpec = BlockSpec {
    name: "2D - Brock",
    description: "Corner Connector.",
    dimensions: Vec3::new(1.5, 1.0, 1.5),
    weight: 1.88,
    cost: 17.77,
    sdg_impact: 30.82,
    is_connector: true,
};

const CONN_3D_SPEC: BlockSpec = BlockSpec {
    name: "3D - Brock",
    description: "T-Junction Connector.",
    dimensions: Vec3::new(2.0, 1.0, 1.5),
    weight: 2.35,
    cost: 22.14,
    sdg_impact: 38.52,
    is_connector: true,
};

const CONN_4D_SPEC: BlockSpec = BlockSpec {
    name: "4D - Brock",
    description: "4-Way Connector.",
    dimensions: Vec3::new(2.0, 1.0, 2.0),
    weight: 2.82,
    cost: 26.56,
    sdg_impact: 46.23,
    is_connector: true,
};

const TERMINAL_SPEC: BlockSpec = BlockSpec {
    name: "T - Brock",
    description: "Finishing Cap.",
    dimensions: Vec3::new(1.0, 1.0, 1.0),
    weight: 0.47,
    cost: 4.44,
    sdg_impact: 7.70,
    is_connector: false,
};

impl BlockType {
    /// Every block type, in catalogue order.
    pub const ALL: [BlockType; 7] = [
        BlockType::Base,
        BlockType::Double,
        BlockType::Conn1D,
        BlockType::Conn2D,
        BlockType::Conn3D,
        BlockType::Conn4D,
        BlockType::Terminal,
    ];

    /// Catalogue entry for this type.
    pub fn spec(self) -> &'static BlockSpec {
        match self {
            BlockType::Base => &BASE_SPEC,
            BlockType::Double => &DOUBLE_SPEC,
            BlockType::Conn1D => &CONN_1D_SPEC,
            BlockType::Conn2D => &CONN_2D_SPEC,
            BlockType::Conn3D => &CONN_3D_SPEC,
            BlockType::Conn4D => &CONN_4D_SPEC,
            BlockType::Terminal => &TERMINAL_SPEC,
        }
    }

    /// Nominal (unrotated) dimensions in grid units.
    pub fn dimensions(self) -> Vec3 {
        self.spec().dimensions
    }

    /// Connector-class blocks join structural layers.
    ///
    /// TERMINAL counts as connector-class for stacking even though the
    /// catalogue does not flag it as a connector.
    pub fn is_connector_class(self) -> bool {
        self.spec().is_connector || self == BlockType::Terminal
    }

    /// Canonical upper-case name (`"CONN_2D"`).
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Base => "BASE",
            BlockType::Double => "DOUBLE",
            BlockType::Conn1D => "CONN_1D",
            BlockType::Conn2D => "CONN_2D",
            BlockType::Conn3D => "CONN_3D",
            BlockType::Conn4D => "CONN_4D",
            BlockType::Terminal => "TERMINAL",
        }
    }
}

impl Default for BlockType {
    fn default() -> Self {
        BlockType::Base
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no block type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown block type: {0}")]
pub struct ParseBlockTypeError(pub String);

impl FromStr for BlockType {
    type Err = ParseBlockTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseBlockTypeError(s.to_string()))
    }
}

/// Rotation as integer 90° step counts around each axis.
///
/// Missing components deserialize as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rotation {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Rotation {
    pub const IDENTITY: Rotation = Rotation { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Euler angles in radians (steps × 90°).
    pub fn radians(self) -> Vec3 {
        let step = std::f32::consts::FRAC_PI_2;
        Vec3::new(
            self.x as f32 * step,
            self.y as f32 * step,
            self.z as f32 * step,
        )
    }

    /// Per-axis odd parity (odd step count).
    pub fn odd_axes(self) -> (bool, bool, bool) {
        (
            self.x.rem_euclid(2) == 1,
            self.y.rem_euclid(2) == 1,
            self.z.rem_euclid(2) == 1,
        )
    }
}

impl std::ops::Add for Rotation {
    type Output = Rotation;

    fn add(self, other: Rotation) -> Rotation {
        Rotation::new(
            self.x.wrapping_add(other.x),
            self.y.wrapping_add(other.y),
            self.z.wrapping_add(other.z),
        )
    }
}
