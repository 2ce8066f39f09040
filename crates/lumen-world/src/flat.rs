//! Layered flat chunk filler for fixtures and the driver binary.

use lumen_blocks::{Block, BlockRegistry};
use lumen_chunk::{Chunk, ChunkCoord};

use crate::WorldConfig;

/// Bottom-up `(block, thickness)` layers; everything above is air.
#[derive(Clone, Debug, Default)]
pub struct FlatLayers {
    pub layers: Vec<(Block, usize)>,
}

impl FlatLayers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(mut self, b: Block, thickness: usize) -> Self {
        self.layers.push((b, thickness));
        self
    }

    /// Builds layers from block names; `None` if a name is not in the catalog.
    pub fn from_names(reg: &BlockRegistry, layers: &[(&str, usize)]) -> Option<Self> {
        let mut out = FlatLayers::new();
        for (name, thickness) in layers {
            out = out.layer(reg.block(name)?, *thickness);
        }
        Some(out)
    }

    /// Y of the first voxel above all layers.
    pub fn top(&self) -> usize {
        self.layers.iter().map(|(_, t)| t).sum()
    }

    pub fn fill(&self, coord: ChunkCoord, cfg: &WorldConfig, reg: &BlockRegistry) -> Chunk {
        let (sx, sy, sz) = (cfg.chunk_size_x, cfg.world_height, cfg.chunk_size_z);
        let mut blocks = vec![Block::AIR; sx * sy * sz];
        let mut y = 0usize;
        for &(b, thickness) in &self.layers {
            for _ in 0..thickness {
                if y >= sy {
                    break;
                }
                let row = y * sx * sz;
                blocks[row..row + sx * sz].fill(b);
                y += 1;
            }
        }
        Chunk::from_blocks_local(coord, sx, sy, sz, blocks, reg)
    }
}
