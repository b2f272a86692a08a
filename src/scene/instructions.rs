//! Assembly Instructions
//!
//! Splits a design into build steps, one per height layer. Layers are keyed
//! by Y rounded to one decimal, so half-unit connector layers get their own
//! step between integer structural layers.

use std::collections::{BTreeMap, HashSet};

use crate::world::grid::round_half_up;
use crate::world::{BlockId, PlacedBlock};

/// Layer key: Y in tenths of a unit.
fn layer_key(y: f32) -> i64 {
    round_half_up(y * 10.0) as i64
}

/// Group blocks into ascending-Y layers. Within a layer, blocks keep their
/// input order. Blocks without a usable position are left out.
pub fn generate_instruction_steps(blocks: &[PlacedBlock]) -> Vec<Vec<PlacedBlock>> {
    let mut layers: BTreeMap<i64, Vec<PlacedBlock>> = BTreeMap::new();
    for block in blocks.iter().filter(|b| b.has_position()) {
        layers.entry(layer_key(block.position.y)).or_default().push(*block);
    }
    layers.into_values().collect()
}

/// Ids visible at step `step`: every block of steps `0..=step`.
pub fn visible_block_ids(steps: &[Vec<PlacedBlock>], step: usize) -> HashSet<BlockId> {
    steps.iter().take(step.saturating_add(1)).flatten().map(|b| b.id).collect()
}

/// Caption for step `step`, named after its first block.
pub fn step_label(steps: &[Vec<PlacedBlock>], step: usize) -> Option<String> {
    let first = steps.get(step)?.first()?;
    Some(format!(
        "Add {} to Layer {}",
        first.block_type.spec().name,
        round_half_up(first.position.y) as i64
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BlockType, Rotation};
    use glam::Vec3;

    fn at_y(n: u128, block_type: BlockType, y: f32) -> PlacedBlock {
        PlacedBlock::new(BlockId::from_u128(n), block_type, Vec3::new(n as f32, y, 0.0), Rotation::IDENTITY, 0)
    }

    #[test]
    fn test_layers_sorted_by_height() {
        let blocks = [
            at_y(1, BlockType::Base, 1.0),
            at_y(2, BlockType::Conn1D, 0.5),
            at_y(3, BlockType::Base, 0.0),
            at_y(4, BlockType::Conn2D, 0.5),
        ];
        let steps = generate_instruction_steps(&blocks);
        let sizes: Vec<_> = steps.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![1, 2, 1]);
        // Insertion order inside a layer
        assert_eq!(steps[1][0].id, BlockId::from_u128(2));
        assert_eq!(steps[1][1].id, BlockId::from_u128(4));
    }

    #[test]
    fn test_near_heights_share_a_layer() {
        let blocks = [at_y(1, BlockType::Base, 0.5), at_y(2, BlockType::Base, 0.5 + 1e-4), at_y(3, BlockType::Base, 0.62)];
        let steps = generate_instruction_steps(&blocks);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].len(), 2);
    }

    #[test]
    fn test_empty_design_has_no_steps() {
        assert!(generate_instruction_steps(&[]).is_empty());
    }

    #[test]
    fn test_visible_ids_accumulate() {
        let blocks = [at_y(1, BlockType::Base, 0.5), at_y(2, BlockType::Conn1D, 1.0), at_y(3, BlockType::Base, 1.5)];
        let steps = generate_instruction_steps(&blocks);
        assert_eq!(visible_block_ids(&steps, 0).len(), 1);
        assert_eq!(visible_block_ids(&steps, 1).len(), 2);
        assert_eq!(visible_block_ids(&steps, 99).len(), 3);
    }

    #[test]
    fn test_step_label() {
        let blocks = [at_y(1, BlockType::Base, 0.5), at_y(2, BlockType::Conn2D, 1.0)];
        let steps = generate_instruction_steps(&blocks);
        let expected = format!("Add {} to Layer 1", BlockType::Base.spec().name);
        assert_eq!(step_label(&steps, 0), Some(expected));
        let expected = format!("Add {} to Layer 1", BlockType::Conn2D.spec().name);
        assert_eq!(step_label(&steps, 1), Some(expected));
        assert_eq!(step_label(&steps, 2), None);
    }
}
