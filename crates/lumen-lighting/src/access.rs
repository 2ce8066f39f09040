use lumen_blocks::Block;
use lumen_chunk::ChunkCoord;
use lumen_geom::{IVec3, VoxelBox};
use lumen_world::Dimension;

use crate::LightChannel;

/// World view the light passes read and write through.
///
/// Every accessor answers `None` (or `false`) for positions that are
/// outside the vertical range or inside a chunk that is not loaded.
pub trait LightAccess {
    fn world_height(&self) -> i32;

    fn block(&self, pos: IVec3) -> Option<Block>;

    fn light(&self, pos: IVec3, channel: LightChannel) -> Option<u8>;

    fn set_light(&mut self, pos: IVec3, channel: LightChannel, level: u8) -> bool;

    /// Lowest y open to the sky in column (x, z).
    fn height(&self, x: i32, z: i32) -> Option<i32>;

    fn chunk_bounds(&self, coord: ChunkCoord) -> Option<VoxelBox>;

    #[inline]
    fn is_loaded(&self, pos: IVec3) -> bool {
        self.block(pos).is_some()
    }
}

impl LightAccess for Dimension {
    #[inline]
    fn world_height(&self) -> i32 {
        Dimension::world_height(self)
    }

    #[inline]
    fn block(&self, pos: IVec3) -> Option<Block> {
        Dimension::block(self, pos)
    }

    #[inline]
    fn light(&self, pos: IVec3, channel: LightChannel) -> Option<u8> {
        match channel {
            LightChannel::Sky => self.sky_light(pos),
            LightChannel::Block => self.block_light(pos),
        }
    }

    #[inline]
    fn set_light(&mut self, pos: IVec3, channel: LightChannel, level: u8) -> bool {
        match channel {
            LightChannel::Sky => self.set_sky_light(pos, level),
            LightChannel::Block => self.set_block_light(pos, level),
        }
    }

    #[inline]
    fn height(&self, x: i32, z: i32) -> Option<i32> {
        Dimension::height(self, x, z)
    }

    fn chunk_bounds(&self, coord: ChunkCoord) -> Option<VoxelBox> {
        self.chunk(coord).map(|c| c.bounds())
    }

    #[inline]
    fn is_loaded(&self, pos: IVec3) -> bool {
        Dimension::is_loaded(self, pos)
    }
}
