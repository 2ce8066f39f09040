//! Column chunks: block storage, packed light channels, and the height map.
#![forbid(unsafe_code)]

use lumen_blocks::{Block, BlockRegistry};
use lumen_geom::{IVec3, VoxelBox};

mod coord;
pub mod nibble;

pub use coord::ChunkCoord;
pub use nibble::NibbleArray;

#[derive(Clone, Debug)]
pub struct Chunk {
    pub coord: ChunkCoord,
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
    blocks: Vec<Block>,
    sky_light: NibbleArray,
    block_light: NibbleArray,
    // Per column: lowest y open to the sky (one above the topmost obstruction).
    heights: Vec<u16>,
}

impl Chunk {
    /// An all-air chunk. Light starts dark; the height map is 0 everywhere.
    pub fn new(coord: ChunkCoord, sx: usize, sy: usize, sz: usize) -> Self {
        let n = sx * sy * sz;
        Chunk {
            coord,
            sx,
            sy,
            sz,
            blocks: vec![Block::AIR; n],
            sky_light: NibbleArray::new(n),
            block_light: NibbleArray::new(n),
            heights: vec![0; sx * sz],
        }
    }

    pub fn from_blocks_local(
        coord: ChunkCoord,
        sx: usize,
        sy: usize,
        sz: usize,
        blocks: Vec<Block>,
        reg: &BlockRegistry,
    ) -> Self {
        let mut b = blocks;
        let expect = sx * sy * sz;
        if b.len() != expect {
            b.resize(expect, Block::AIR);
        }
        let mut chunk = Chunk {
            blocks: b,
            ..Chunk::new(coord, sx, sy, sz)
        };
        chunk.recompute_heights(reg);
        chunk
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.sz + z) * self.sx + x
    }

    /// World position of local voxel (0,0,0).
    #[inline]
    pub fn origin(&self) -> IVec3 {
        IVec3::new(
            self.coord.cx * self.sx as i32,
            0,
            self.coord.cz * self.sz as i32,
        )
    }

    /// World-space box covered by this chunk.
    pub fn bounds(&self) -> VoxelBox {
        let o = self.origin();
        VoxelBox::new(
            o,
            o + IVec3::new(self.sx as i32 - 1, self.sy as i32 - 1, self.sz as i32 - 1),
        )
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Block {
        self.blocks[self.idx(x, y, z)]
    }

    /// Writes a block and keeps the column's height map current.
    /// Returns the previous block.
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, b: Block, reg: &BlockRegistry) -> Block {
        let i = self.idx(x, y, z);
        let prev = std::mem::replace(&mut self.blocks[i], b);
        if prev != b {
            self.update_column_height(x, z, y, reg);
        }
        prev
    }

    #[inline]
    pub fn sky_light(&self, x: usize, y: usize, z: usize) -> u8 {
        self.sky_light.get(self.idx(x, y, z))
    }

    #[inline]
    pub fn set_sky_light(&mut self, x: usize, y: usize, z: usize, level: u8) {
        let i = self.idx(x, y, z);
        self.sky_light.set(i, level);
    }

    #[inline]
    pub fn block_light(&self, x: usize, y: usize, z: usize) -> u8 {
        self.block_light.get(self.idx(x, y, z))
    }

    #[inline]
    pub fn set_block_light(&mut self, x: usize, y: usize, z: usize, level: u8) {
        let i = self.idx(x, y, z);
        self.block_light.set(i, level);
    }

    /// Lowest y of column (x, z) that sees open sky.
    #[inline]
    pub fn height(&self, x: usize, z: usize) -> usize {
        self.heights[z * self.sx + x] as usize
    }

    pub fn recompute_heights(&mut self, reg: &BlockRegistry) {
        for z in 0..self.sz {
            for x in 0..self.sx {
                let h = self.scan_column(x, z, self.sy, reg);
                self.heights[z * self.sx + x] = h as u16;
            }
        }
    }

    fn update_column_height(&mut self, x: usize, z: usize, y: usize, reg: &BlockRegistry) {
        let hi = z * self.sx + x;
        let current = self.heights[hi] as usize;
        let obstructs = reg.resolve(self.get_local(x, y, z)).obstructs_sky();
        let h = if obstructs {
            current.max(y + 1)
        } else if y + 1 == current {
            // Topmost obstruction removed; look further down.
            self.scan_column(x, z, y, reg)
        } else {
            current
        };
        self.heights[hi] = h as u16;
    }

    // Height of the column considering only voxels below `top`.
    fn scan_column(&self, x: usize, z: usize, top: usize, reg: &BlockRegistry) -> usize {
        (0..top)
            .rev()
            .find(|&y| reg.resolve(self.get_local(x, y, z)).obstructs_sky())
            .map_or(0, |y| y + 1)
    }
}
