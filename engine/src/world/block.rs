//! Placed Blocks
//!
//! The record every scene list, collision query and instruction step works
//! on. Records are values: an edit produces a new record, it never mutates a
//! published one.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::geometry::{BlockType, Rotation, rotated_dimensions};

/// Unique identity of a placed block.
///
/// Serialized as a UUID string. Ids that are not UUIDs (short random strings
/// in older design files) load as a name-based UUID derived from the string,
/// so the same file always yields the same ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BlockId(Uuid);

impl BlockId {
    /// Fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic id, for fixtures and replays.
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl<'de> Deserialize<'de> for BlockId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let uuid = Uuid::parse_str(&raw).unwrap_or_else(|_| Uuid::new_v5(&Uuid::NAMESPACE_OID, raw.as_bytes()));
        Ok(Self(uuid))
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for BlockId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// A block instance in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedBlock {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    /// Centre of the nominal bounding box, grid units
    #[serde(with = "xyz")]
    pub position: Vec3,
    #[serde(default)]
    pub rotation: Rotation,
    /// Creation time in milliseconds since the Unix epoch
    pub timestamp: u64,
}

impl PlacedBlock {
    pub fn new(id: BlockId, block_type: BlockType, position: Vec3, rotation: Rotation, timestamp: u64) -> Self {
        Self {
            id,
            block_type,
            position,
            rotation,
            timestamp,
        }
    }

    /// Copy of this record at a new position.
    pub fn with_position(&self, position: Vec3) -> Self {
        Self { position, ..*self }
    }

    /// Copy of this record at a new position and rotation.
    pub fn with_transform(&self, position: Vec3, rotation: Rotation) -> Self {
        Self {
            position,
            rotation,
            ..*self
        }
    }

    /// Nominal dimensions under this block's rotation.
    pub fn rotated_dimensions(&self) -> Vec3 {
        rotated_dimensions(self.block_type, self.rotation)
    }

    /// A record with a non-finite coordinate has no usable position.
    pub fn has_position(&self) -> bool {
        self.position.is_finite()
    }
}

/// `Vec3` as a `{ "x", "y", "z" }` object. Also reads glam's `[x, y, z]`.
mod xyz {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Xyz {
        x: f32,
        y: f32,
        z: f32,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Object(Xyz),
        Array([f32; 3]),
    }

    pub fn serialize<S: Serializer>(v: &Vec3, serializer: S) -> Result<S::Ok, S::Error> {
        Xyz { x: v.x, y: v.y, z: v.z }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec3, D::Error> {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Object(Xyz { x, y, z }) => Vec3::new(x, y, z),
            Repr::Array(a) => Vec3::from_array(a),
        })
    }
}
