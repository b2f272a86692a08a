//! Block Decomposition
//!
//! Maps each block type to a fixed list of oriented sub-boxes in the block's
//! local (unrotated) frame.
//!
//! Two independently authored shapes exist per type:
//!
//! - **visual**: the exact rendered silhouette (slabs, pillar nubs, hub bars,
//!   tips, terminal plate and stem)
//! - **collision**: a coarser, deliberately shrunk shape that gives the
//!   physical interlock its tolerance
//!
//! The collision shape is not a scaled copy of the visual one and must not be
//! derived from it.

use glam::Vec3;

use super::config::GeometryParams;
use super::types::BlockType;

/// Atomic geometric primitive: a box centred at `center` (relative to the
/// owning block's origin) with full extents `size`, both in local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    pub center: Vec3,
    pub size: Vec3,
}

impl OrientedBox {
    pub const fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size }
    }

    fn at(cx: f32, cy: f32, cz: f32, sx: f32, sy: f32, sz: f32) -> Self {
        Self::new(Vec3::new(cx, cy, cz), Vec3::new(sx, sy, sz))
    }

    pub fn half_size(&self) -> Vec3 {
        self.size * 0.5
    }

    /// Local-space minimum corner.
    pub fn min(&self) -> Vec3 {
        self.center - self.half_size()
    }

    /// Local-space maximum corner.
    pub fn max(&self) -> Vec3 {
        self.center + self.half_size()
    }
}

/// Which of the two authored shapes to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Visual,
    Collision,
}

impl ShapeKind {
    pub fn from_collision_flag(for_collision: bool) -> Self {
        if for_collision {
            ShapeKind::Collision
        } else {
            ShapeKind::Visual
        }
    }
}

/// Decompose `block_type` into sub-boxes using the given parameter snapshot.
///
/// Pure function of its inputs.
pub fn component_boxes(block_type: BlockType, for_collision: bool, params: &GeometryParams) -> Vec<OrientedBox> {
    match ShapeKind::from_collision_flag(for_collision) {
        ShapeKind::Visual => visual_boxes(block_type, params),
        ShapeKind::Collision => collision_boxes(block_type, params),
    }
}

// ============================================================================
// VISUAL
// ============================================================================

/// Visual block height (all connectors and slabs share it)
const VIS_HEIGHT: f32 = 1.0;
/// Height of one pillar nub on BASE/DOUBLE
const VIS_PILLAR_HEIGHT: f32 = 0.5;
/// CONN_1D visual is a fixed shape: web length along X
const VIS_1D_WEB_LENGTH: f32 = 0.68;
/// TERMINAL stem depth along Z
const VIS_TERMINAL_STEM_DEPTH: f32 = 0.333;

fn visual_pillars(y: f32, p: &GeometryParams) -> [OrientedBox; 4] {
    let off = p.vis_pillar_offset;
    let s = p.vis_pillar_size;
    [
        OrientedBox::at(off, y, off, s, VIS_PILLAR_HEIGHT, s),
        OrientedBox::at(-off, y, off, s, VIS_PILLAR_HEIGHT, s),
        OrientedBox::at(off, y, -off, s, VIS_PILLAR_HEIGHT, s),
        OrientedBox::at(-off, y, -off, s, VIS_PILLAR_HEIGHT, s),
    ]
}

fn visual_tip_x(dir: f32, p: &GeometryParams) -> OrientedBox {
    OrientedBox::at(dir * p.vis_arm_long, 0.0, 0.0, p.vis_tip_width, VIS_HEIGHT, 1.0)
}

fn visual_tip_z(dir: f32, p: &GeometryParams) -> OrientedBox {
    OrientedBox::at(0.0, 0.0, dir * p.vis_arm_long, 1.0, VIS_HEIGHT, p.vis_tip_width)
}

fn visual_boxes(block_type: BlockType, p: &GeometryParams) -> Vec<OrientedBox> {
    let hub = p.vis_hub_thick;
    let long = p.vis_arm_long;
    let short = p.vis_arm_short;
    // Bar running from -short to +long along one axis
    let asym_center = (long - short) / 2.0;
    let asym_len = short + long;

    match block_type {
        BlockType::Base => {
            let slab_h = p.vis_base_slab_height;
            let mut boxes = vec![OrientedBox::at(0.0, -0.5 + slab_h / 2.0, 0.0, 1.0, slab_h, 1.0)];
            boxes.extend(visual_pillars(0.25, p));
            boxes
        }
        BlockType::Double => {
            let mut boxes = vec![OrientedBox::at(0.0, 0.0, 0.0, 1.0, 1.0, 1.0)];
            boxes.extend(visual_pillars(0.75, p));
            boxes.extend(visual_pillars(-0.75, p));
            boxes
        }
        BlockType::Conn1D => vec![
            OrientedBox::at(0.0, 0.0, 0.0, VIS_1D_WEB_LENGTH, VIS_HEIGHT, 1.0 / 3.0),
            OrientedBox::at(-5.0 / 12.0, 0.0, 0.0, 1.0 / 6.0, VIS_HEIGHT, 1.0),
            OrientedBox::at(5.0 / 12.0, 0.0, 0.0, 1.0 / 6.0, VIS_HEIGHT, 1.0),
        ],
        BlockType::Conn2D => vec![
            OrientedBox::at(asym_center, 0.0, 0.0, asym_len, VIS_HEIGHT, hub),
            visual_tip_x(1.0, p),
            OrientedBox::at(0.0, 0.0, asym_center, hub, VIS_HEIGHT, asym_len),
            visual_tip_z(1.0, p),
        ],
        BlockType::Conn3D => vec![
            OrientedBox::at(0.0, 0.0, 0.0, long * 2.0, VIS_HEIGHT, hub),
            visual_tip_x(1.0, p),
            visual_tip_x(-1.0, p),
            OrientedBox::at(0.0, 0.0, asym_center, hub, VIS_HEIGHT, asym_len),
            visual_tip_z(1.0, p),
        ],
        BlockType::Conn4D => vec![
            OrientedBox::at(0.0, 0.0, 0.0, long * 2.0, VIS_HEIGHT, hub),
            visual_tip_x(1.0, p),
            visual_tip_x(-1.0, p),
            OrientedBox::at(0.0, 0.0, 0.0, hub, VIS_HEIGHT, long * 2.0),
            visual_tip_z(1.0, p),
            visual_tip_z(-1.0, p),
        ],
        BlockType::Terminal => vec![
            OrientedBox::at(0.0, 0.0, p.vis_terminal_plate_z, p.vis_terminal_plate_depth, 1.0, p.vis_tip_width),
            OrientedBox::at(0.0, 0.0, p.vis_terminal_stem_z, hub, 1.0, VIS_TERMINAL_STEM_DEPTH),
        ],
    }
}

// ============================================================================
// COLLISION
// ============================================================================

/// Collision arm: 0.7 long, centred 0.45 from the hub
const COL_ARM_LEN: f32 = 0.7;
const COL_ARM_CENTER: f32 = 0.45;
/// Back stub on the inactive side of 2D/3D connectors
const COL_BACK_LEN: f32 = 0.36;
const COL_BACK_CENTER: f32 = 0.32;
/// Structural pillar placement and height
const COL_PILLAR_OFFSET: f32 = 0.35;
const COL_PILLAR_HEIGHT: f32 = 0.45;
/// CONN_1D centre bar length along X
const COL_1D_BAR_LEN: f32 = 0.65;
/// TERMINAL plate and stem
const COL_TERMINAL_PLATE_WIDTH: f32 = 0.95;
const COL_TERMINAL_PLATE_DEPTH: f32 = 0.1;
const COL_TERMINAL_PLATE_Z: f32 = 0.4;
const COL_TERMINAL_STEM_DEPTH: f32 = 0.4;
const COL_TERMINAL_STEM_Z: f32 = 0.2;

/// Per-call collision helpers, built from one parameter snapshot.
struct CollisionKit {
    height: f32,
    slab_xz: f32,
    arm_thick: f32,
    tip_width: f32,
    tip_len: f32,
    tip_center: f32,
    tip_1d_center: f32,
    thick_1d: f32,
    pillar_size: f32,
}

impl CollisionKit {
    fn new(p: &GeometryParams) -> Self {
        Self {
            height: 1.0 - p.col_h_shrink,
            slab_xz: 1.0 - p.col_h_shrink,
            arm_thick: p.col_arm_thick,
            tip_width: p.col_tip_width,
            tip_len: p.col_tip_len,
            tip_center: p.col_tip_center,
            tip_1d_center: p.col_1d_tip_center,
            thick_1d: p.col_1d_thick,
            pillar_size: p.col_pillar_size,
        }
    }

    fn hub(&self) -> OrientedBox {
        OrientedBox::at(0.0, 0.0, 0.0, self.arm_thick, self.height, self.arm_thick)
    }

    fn arm_x(&self, dir: f32) -> OrientedBox {
        OrientedBox::at(dir * COL_ARM_CENTER, 0.0, 0.0, COL_ARM_LEN, self.height, self.arm_thick)
    }

    fn arm_z(&self, dir: f32) -> OrientedBox {
        OrientedBox::at(0.0, 0.0, dir * COL_ARM_CENTER, self.arm_thick, self.height, COL_ARM_LEN)
    }

    fn back_x(&self, dir: f32) -> OrientedBox {
        OrientedBox::at(dir * COL_BACK_CENTER, 0.0, 0.0, COL_BACK_LEN, self.height, self.arm_thick)
    }

    fn back_z(&self, dir: f32) -> OrientedBox {
        OrientedBox::at(0.0, 0.0, dir * COL_BACK_CENTER, self.arm_thick, self.height, COL_BACK_LEN)
    }

    fn tip_x(&self, dir: f32) -> OrientedBox {
        OrientedBox::at(dir * self.tip_center, 0.0, 0.0, self.tip_width, self.height, self.tip_len)
    }

    fn tip_z(&self, dir: f32) -> OrientedBox {
        OrientedBox::at(0.0, 0.0, dir * self.tip_center, self.tip_len, self.height, self.tip_width)
    }

    /// CONN_1D flange: own centre offset, shared tip width/length.
    fn tip_1d(&self, dir: f32) -> OrientedBox {
        OrientedBox::at(dir * self.tip_1d_center, 0.0, 0.0, self.tip_width, self.height, self.tip_len)
    }

    fn pillars(&self, y: f32) -> [OrientedBox; 4] {
        let o = COL_PILLAR_OFFSET;
        let s = self.pillar_size;
        [
            OrientedBox::at(o, y, o, s, COL_PILLAR_HEIGHT, s),
            OrientedBox::at(-o, y, o, s, COL_PILLAR_HEIGHT, s),
            OrientedBox::at(o, y, -o, s, COL_PILLAR_HEIGHT, s),
            OrientedBox::at(-o, y, -o, s, COL_PILLAR_HEIGHT, s),
        ]
    }
}

fn collision_boxes(block_type: BlockType, p: &GeometryParams) -> Vec<OrientedBox> {
    let kit = CollisionKit::new(p);

    match block_type {
        BlockType::Base => {
            let mut boxes = vec![OrientedBox::at(0.0, -0.25, 0.0, kit.slab_xz, 0.5, kit.slab_xz)];
            boxes.extend(kit.pillars(0.25));
            boxes
        }
        BlockType::Double => {
            let mut boxes = vec![OrientedBox::at(0.0, 0.0, 0.0, kit.slab_xz, 1.0, kit.slab_xz)];
            boxes.extend(kit.pillars(0.75));
            boxes.extend(kit.pillars(-0.75));
            boxes
        }
        BlockType::Conn1D => vec![
            OrientedBox::at(0.0, 0.0, 0.0, COL_1D_BAR_LEN, kit.height, kit.thick_1d),
            kit.tip_1d(1.0),
            kit.tip_1d(-1.0),
        ],
        BlockType::Conn2D => vec![
            kit.hub(),
            kit.arm_x(1.0),
            kit.tip_x(1.0),
            kit.back_x(-1.0),
            kit.arm_z(1.0),
            kit.tip_z(1.0),
            kit.back_z(-1.0),
        ],
        BlockType::Conn3D => vec![
            kit.hub(),
            kit.arm_x(1.0),
            kit.tip_x(1.0),
            kit.arm_x(-1.0),
            kit.tip_x(-1.0),
            kit.arm_z(1.0),
            kit.tip_z(1.0),
            kit.back_z(-1.0),
        ],
        BlockType::Conn4D => vec![
            kit.hub(),
            kit.arm_x(1.0),
            kit.tip_x(1.0),
            kit.arm_x(-1.0),
            kit.tip_x(-1.0),
            kit.arm_z(1.0),
            kit.tip_z(1.0),
            kit.arm_z(-1.0),
            kit.tip_z(-1.0),
        ],
        BlockType::Terminal => vec![
            OrientedBox::at(
                0.0,
                0.0,
                COL_TERMINAL_PLATE_Z,
                COL_TERMINAL_PLATE_WIDTH,
                kit.height,
                COL_TERMINAL_PLATE_DEPTH,
            ),
            OrientedBox::at(0.0, 0.0, COL_TERMINAL_STEM_Z, kit.arm_thick, kit.height, COL_TERMINAL_STEM_DEPTH),
        ],
    }
}

/// Local-space extents (min, max) of the union of `boxes`.
///
/// Returns `None` for an empty list.
pub fn local_extents(boxes: &[OrientedBox]) -> Option<(Vec3, Vec3)> {
    let first = boxes.first()?;
    Some(boxes.iter().skip(1).fold((first.min(), first.max()), |(lo, hi), b| {
        (lo.min(b.min()), hi.max(b.max()))
    }))
}
