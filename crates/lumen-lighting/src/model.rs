use lumen_blocks::{Block, BlockRegistry, BlockType};
use lumen_geom::IVec3;

use crate::LightAccess;

pub const MAX_LIGHT: u8 = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightChannel {
    Sky,
    Block,
}

impl LightChannel {
    pub const ALL: [LightChannel; 2] = [LightChannel::Sky, LightChannel::Block];

    pub fn name(self) -> &'static str {
        match self {
            LightChannel::Sky => "sky",
            LightChannel::Block => "block",
        }
    }
}

/// Brightness a renderer should use for a voxel.
#[inline]
pub fn effective_light(sky: u8, block: u8) -> u8 {
    sky.max(block)
}

/// Per-block light properties and the natural light rule, resolved through
/// the block registry.
#[derive(Clone, Copy)]
pub struct LightModel<'r> {
    reg: &'r BlockRegistry,
}

impl<'r> LightModel<'r> {
    pub fn new(reg: &'r BlockRegistry) -> Self {
        Self { reg }
    }

    #[inline]
    fn ty(&self, b: Block) -> &'r BlockType {
        self.reg.resolve(b)
    }

    /// Levels lost when light enters the voxel. Always at least 1.
    #[inline]
    pub fn attenuation(&self, b: Block) -> u8 {
        self.ty(b).attenuation()
    }

    #[inline]
    pub fn luminance(&self, b: Block) -> u8 {
        self.ty(b).luminance().min(MAX_LIGHT)
    }

    /// Level a voxel holds on its own, before any propagation.
    ///
    /// Sky: full light at or above the column height. The top layer is lit
    /// by the sky through its own attenuation even when it blocks the column.
    /// Block: the block's luminance.
    pub fn natural<A: LightAccess + ?Sized>(
        &self,
        world: &A,
        pos: IVec3,
        b: Block,
        channel: LightChannel,
    ) -> u8 {
        match channel {
            LightChannel::Block => self.luminance(b),
            LightChannel::Sky => {
                let Some(height) = world.height(pos.x, pos.z) else {
                    return 0;
                };
                if pos.y >= height {
                    MAX_LIGHT
                } else if pos.y == world.world_height() - 1 {
                    MAX_LIGHT.saturating_sub(self.attenuation(b))
                } else {
                    0
                }
            }
        }
    }

    /// Level reached in a voxel of block `b` from a neighbor at `from`,
    /// never below the voxel's own natural level.
    #[inline]
    pub fn relax(&self, from: u8, b: Block, natural: u8) -> u8 {
        from.saturating_sub(self.attenuation(b)).max(natural)
    }
}
