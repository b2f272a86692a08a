//! Geometry Module
//!
//! Block catalogue, live geometry configuration and the local-space
//! decomposition of each block type into oriented sub-boxes.
//!
//! # Unit System
//!
//! **1 grid unit = 0.2 meters.** Block origins sit at the centre of their
//! nominal bounding box; +Y is up.
//!
//! # Submodules
//!
//! - [`types`] - `BlockType`, `BlockSpec` catalogue, `Rotation`
//! - [`config`] - tunable parameters with change notification
//! - [`decompose`] - visual and collision sub-box lists
//! - [`dimensions`] - rotated nominal dimensions (parity swap rule)

pub mod config;
pub mod decompose;
pub mod dimensions;
pub mod types;

pub use config::{ConfigError, GeoKey, GeoParamMeta, GeometryConfig, GeometryParams, Subscription};
pub use decompose::{OrientedBox, ShapeKind, component_boxes, local_extents};
pub use dimensions::{rotated_dimensions, swap_by_parity};
pub use types::{BlockSpec, BlockType, ParseBlockTypeError, Rotation};
