//! Design Stats
//!
//! Cost, weight and SDG rollup over a block list.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::world::PlacedBlock;

/// Totals for a design.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlockStats {
    /// EUR
    pub total_cost: f32,
    /// kg
    pub total_weight: f32,
    pub total_sdg: f32,
    /// Block count per catalogue name
    pub counts: BTreeMap<&'static str, usize>,
}

impl BlockStats {
    pub fn block_count(&self) -> usize {
        self.counts.values().sum()
    }
}

pub fn calculate_stats(blocks: &[PlacedBlock]) -> BlockStats {
    blocks.iter().fold(BlockStats::default(), |mut stats, block| {
        let spec = block.block_type.spec();
        stats.total_cost += spec.cost;
        stats.total_weight += spec.weight;
        stats.total_sdg += spec.sdg_impact;
        *stats.counts.entry(spec.name).or_default() += 1;
        stats
    })
}
