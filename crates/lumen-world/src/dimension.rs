use hashbrown::HashMap;
use lumen_blocks::{Block, BlockRegistry};
use lumen_chunk::{Chunk, ChunkCoord};
use lumen_geom::IVec3;

use crate::WorldConfig;

/// Loaded chunks of one world, addressed in world space. Owns chunk memory;
/// everything else borrows through these accessors.
pub struct Dimension {
    config: WorldConfig,
    chunks: HashMap<ChunkCoord, Chunk>,
}

impl Dimension {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            chunks: HashMap::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    #[inline]
    pub fn world_height(&self) -> i32 {
        self.config.world_height as i32
    }

    /// Empty chunk sized for this world.
    pub fn empty_chunk(&self, coord: ChunkCoord) -> Chunk {
        Chunk::new(
            coord,
            self.config.chunk_size_x,
            self.config.world_height,
            self.config.chunk_size_z,
        )
    }

    pub fn insert_chunk(&mut self, chunk: Chunk) -> Option<Chunk> {
        debug_assert_eq!(
            (chunk.sx, chunk.sy, chunk.sz),
            (
                self.config.chunk_size_x,
                self.config.world_height,
                self.config.chunk_size_z
            ),
            "chunk size does not match world config"
        );
        log::trace!(target: "world", "chunk loaded ({}, {})", chunk.coord.cx, chunk.coord.cz);
        self.chunks.insert(chunk.coord, chunk)
    }

    #[inline]
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn chunk_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    #[inline]
    pub fn chunk_coord_of(&self, pos: IVec3) -> ChunkCoord {
        ChunkCoord::containing(pos.x, pos.z, self.config.chunk_size_x, self.config.chunk_size_z)
    }

    /// Y inside the world's vertical range.
    #[inline]
    pub fn is_valid_position(&self, pos: IVec3) -> bool {
        pos.y >= 0 && pos.y < self.world_height()
    }

    /// Valid position whose chunk is loaded.
    #[inline]
    pub fn is_loaded(&self, pos: IVec3) -> bool {
        self.locate(pos).is_some()
    }

    #[inline]
    fn local(&self, pos: IVec3) -> (usize, usize, usize) {
        let sx = self.config.chunk_size_x as i32;
        let sz = self.config.chunk_size_z as i32;
        (
            pos.x.rem_euclid(sx) as usize,
            pos.y as usize,
            pos.z.rem_euclid(sz) as usize,
        )
    }

    #[inline]
    fn locate(&self, pos: IVec3) -> Option<(&Chunk, (usize, usize, usize))> {
        if !self.is_valid_position(pos) {
            return None;
        }
        let chunk = self.chunks.get(&self.chunk_coord_of(pos))?;
        Some((chunk, self.local(pos)))
    }

    #[inline]
    fn locate_mut(&mut self, pos: IVec3) -> Option<(&mut Chunk, (usize, usize, usize))> {
        if !self.is_valid_position(pos) {
            return None;
        }
        let coord = self.chunk_coord_of(pos);
        let local = self.local(pos);
        let chunk = self.chunks.get_mut(&coord)?;
        Some((chunk, local))
    }

    #[inline]
    pub fn block(&self, pos: IVec3) -> Option<Block> {
        self.locate(pos).map(|(c, (x, y, z))| c.get_local(x, y, z))
    }

    /// Replaces a block and updates the column height map. Returns the previous
    /// block, or `None` when the position is not loaded. Light is untouched.
    pub fn set_block(&mut self, pos: IVec3, b: Block, reg: &BlockRegistry) -> Option<Block> {
        let (chunk, (x, y, z)) = self.locate_mut(pos)?;
        Some(chunk.set_local(x, y, z, b, reg))
    }

    #[inline]
    pub fn sky_light(&self, pos: IVec3) -> Option<u8> {
        self.locate(pos).map(|(c, (x, y, z))| c.sky_light(x, y, z))
    }

    #[inline]
    pub fn set_sky_light(&mut self, pos: IVec3, level: u8) -> bool {
        match self.locate_mut(pos) {
            Some((c, (x, y, z))) => {
                c.set_sky_light(x, y, z, level);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn block_light(&self, pos: IVec3) -> Option<u8> {
        self.locate(pos).map(|(c, (x, y, z))| c.block_light(x, y, z))
    }

    #[inline]
    pub fn set_block_light(&mut self, pos: IVec3, level: u8) -> bool {
        match self.locate_mut(pos) {
            Some((c, (x, y, z))) => {
                c.set_block_light(x, y, z, level);
                true
            }
            None => false,
        }
    }

    /// Lowest y open to the sky in world column (wx, wz), if loaded.
    #[inline]
    pub fn height(&self, wx: i32, wz: i32) -> Option<i32> {
        let chunk = self.chunks.get(&self.chunk_coord_of(IVec3::new(wx, 0, wz)))?;
        let (x, _, z) = self.local(IVec3::new(wx, 0, wz));
        Some(chunk.height(x, z) as i32)
    }
}
