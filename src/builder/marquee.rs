//! Screen-Space Selection
//!
//! Projection helpers between the camera and the block world: marquee
//! (rectangle) selection and pointer rays for headless picking.

use std::collections::HashSet;

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::world::{BlockId, PlacedBlock};

/// Drag rectangle in pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl ScreenRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle spanned by two drag corners in any order.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        let size = (a - b).abs();
        Self::new(min.x, min.y, size.x, size.y)
    }

    /// Edges inclusive.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// Project a world point to pixel coordinates (top-left origin).
pub fn world_to_screen(point: Vec3, view_proj: Mat4, viewport: Vec2) -> Vec2 {
    let ndc = view_proj.project_point3(point);
    Vec2::new((ndc.x + 1.0) / 2.0 * viewport.x, (1.0 - (ndc.y + 1.0) / 2.0) * viewport.y)
}

/// Ids of blocks whose centres project inside `rect`.
///
/// # Arguments
/// * `blocks` - Scene blocks
/// * `view_proj` - Camera projection × view matrix
/// * `rect` - Marquee rectangle in pixels
/// * `viewport` - Canvas size in pixels
/// * `visible` - When set (instruction mode), only these ids may be selected
pub fn blocks_in_rect(
    blocks: &[PlacedBlock],
    view_proj: Mat4,
    rect: ScreenRect,
    viewport: Vec2,
    visible: Option<&HashSet<BlockId>>,
) -> Vec<BlockId> {
    blocks
        .iter()
        .filter(|b| b.has_position())
        .filter(|b| visible.is_none_or(|v| v.contains(&b.id)))
        .filter(|b| rect.contains(world_to_screen(b.position, view_proj, viewport)))
        .map(|b| b.id)
        .collect()
}

/// World-space ray through a pixel.
///
/// # Returns
/// Tuple of (ray_origin, ray_direction); the origin lies on the near plane.
pub fn screen_to_ray(screen: Vec2, viewport: Vec2, view_proj: Mat4) -> (Vec3, Vec3) {
    let ndc_x = 2.0 * screen.x / viewport.x - 1.0;
    let ndc_y = 1.0 - 2.0 * screen.y / viewport.y; // Flip Y

    let inverse = view_proj.inverse();
    // glam projections use a [0, 1] depth range
    let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
    let far = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));

    (near, (far - near).normalize_or_zero())
}
