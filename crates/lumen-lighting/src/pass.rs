use hashbrown::HashSet;
use lumen_geom::IVec3;

use crate::{LightAccess, LightChannel, LightModel};

/// World, channel and dirty set shared by one darkening or brightening run.
pub(crate) struct Pass<'a, 'r, A: LightAccess + ?Sized> {
    pub world: &'a mut A,
    pub model: LightModel<'r>,
    pub channel: LightChannel,
    pub dirty: &'a mut HashSet<IVec3>,
}

impl<A: LightAccess + ?Sized> Pass<'_, '_, A> {
    #[inline]
    pub fn level(&self, pos: IVec3) -> Option<u8> {
        self.world.light(pos, self.channel)
    }

    #[inline]
    pub fn natural_at(&self, pos: IVec3) -> Option<u8> {
        let b = self.world.block(pos)?;
        Some(self.model.natural(&*self.world, pos, b, self.channel))
    }

    /// Stores `level` and records the voxel as dirty. Returns true only when
    /// the stored value actually changed.
    #[inline]
    pub fn write(&mut self, pos: IVec3, level: u8) -> bool {
        if self.level(pos) == Some(level) {
            return false;
        }
        if self.world.set_light(pos, self.channel, level) {
            self.dirty.insert(pos);
            true
        } else {
            false
        }
    }
}
