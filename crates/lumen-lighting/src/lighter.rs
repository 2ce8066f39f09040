use std::collections::VecDeque;

use hashbrown::HashSet;
use log::{debug, trace, warn};
use lumen_blocks::BlockRegistry;
use lumen_chunk::ChunkCoord;
use lumen_geom::{Face, IVec3, VoxelBox};

use crate::brighten::brighten;
use crate::darken::darken;
use crate::pass::Pass;
use crate::{LightAccess, LightChannel, LightModel, LightOperation, LightingError, OperationKind};

/// Running totals over everything a [`Lighter`] has done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LightStats {
    pub operations: u64,
    pub darkened: u64,
    pub brightened: u64,
}

impl LightStats {
    fn absorb(&mut self, other: LightStats) {
        self.operations += other.operations;
        self.darkened += other.darkened;
        self.brightened += other.brightened;
    }
}

/// Owns the queue of pending light operations and applies them to a world
/// one at a time. Never holds on to the world between calls.
pub struct Lighter<'r> {
    model: LightModel<'r>,
    pending: VecDeque<LightOperation>,
    dirty: HashSet<IVec3>,
    stats: LightStats,
}

impl<'r> Lighter<'r> {
    pub fn new(reg: &'r BlockRegistry) -> Self {
        Self {
            model: LightModel::new(reg),
            pending: VecDeque::new(),
            dirty: HashSet::new(),
            stats: LightStats::default(),
        }
    }

    /// Computes sky light for a freshly loaded chunk from its height map and
    /// from light already present in loaded neighbors. Writes stay inside
    /// the chunk; block light is left alone.
    ///
    /// Light flowing the other way, into neighbors lit before this chunk
    /// existed, is queued as one spread operation per shared face.
    pub fn initial_lighting<A: LightAccess + ?Sized>(
        &mut self,
        world: &mut A,
        coord: ChunkCoord,
    ) -> Result<LightStats, LightingError> {
        let bounds = world
            .chunk_bounds(coord)
            .ok_or(LightingError::ChunkNotLoaded(coord))?;
        let top = world.world_height() - 1;
        let shared: Vec<VoxelBox> = Face::HORIZONTAL
            .into_iter()
            .filter(|f| {
                let o = f.offset();
                world.chunk_bounds(coord.offset(o.x, o.z)).is_some()
            })
            .map(|f| face_layer(bounds, f))
            .collect();
        let mut pass = Pass {
            world,
            model: self.model,
            channel: LightChannel::Sky,
            dirty: &mut self.dirty,
        };

        let mut seeds = Vec::new();
        for z in bounds.min.z..=bounds.max.z {
            for x in bounds.min.x..=bounds.max.x {
                for y in 0..=top {
                    let pos = IVec3::new(x, y, z);
                    let natural = pass.natural_at(pos).unwrap_or(0);
                    pass.write(pos, natural);
                }
                // Only sources facing a lower neighbor column (or the top
                // voxel of a capped column) can light anything.
                let height = pass.world.height(x, z).unwrap_or(0);
                let reach = Face::HORIZONTAL
                    .iter()
                    .filter_map(|f| {
                        let o = f.offset();
                        pass.world.height(x + o.x, z + o.z)
                    })
                    .fold(height, i32::max);
                for y in height.min(top)..=reach.min(top) {
                    seeds.push(IVec3::new(x, y, z));
                }
            }
        }

        // Light entering through the faces shared with loaded neighbors.
        let mut crossed = 0u64;
        for pos in bounds.iter() {
            for face in Face::HORIZONTAL {
                let n = pos.step(face);
                if bounds.contains(n) {
                    continue;
                }
                let Some(from) = pass.level(n) else {
                    continue;
                };
                let Some(b) = pass.world.block(pos) else {
                    continue;
                };
                let natural = pass.model.natural(&*pass.world, pos, b, LightChannel::Sky);
                let next = pass.model.relax(from, b, natural);
                if next > pass.level(pos).unwrap_or(0) && pass.write(pos, next) {
                    crossed += 1;
                    seeds.push(pos);
                }
            }
        }

        let raised = brighten(&mut pass, seeds, Some(bounds)) as u64;
        for layer in shared {
            self.pending.push_back(LightOperation::spread(layer, LightChannel::Sky));
        }
        let stats = LightStats {
            operations: 1,
            darkened: 0,
            brightened: raised + crossed,
        };
        self.stats.absorb(stats);
        debug!(
            target: "lighting",
            "initial sky light for chunk ({}, {}): {} raised, {} from neighbors",
            coord.cx, coord.cz, raised, crossed
        );
        Ok(stats)
    }

    /// Queues a box whose blocks changed. The box is clamped to the world's
    /// vertical range when it runs, not here.
    pub fn enqueue_operation(&mut self, bounds: VoxelBox, channel: LightChannel) -> Result<(), LightingError> {
        let op = LightOperation::new(bounds, channel)?;
        trace!(target: "lighting", "enqueue {} {:?}", channel.name(), bounds);
        self.pending.push_back(op);
        Ok(())
    }

    /// Queues both channels for a single edited voxel.
    pub fn enqueue_block_edit(&mut self, pos: IVec3) {
        for channel in LightChannel::ALL {
            self.pending.push_back(LightOperation::point(pos, channel));
        }
    }

    /// Queues block-light work for every emitter in a chunk. Returns how many
    /// were found.
    pub fn enqueue_chunk_emitters<A: LightAccess + ?Sized>(
        &mut self,
        world: &A,
        coord: ChunkCoord,
    ) -> Result<usize, LightingError> {
        let bounds = world
            .chunk_bounds(coord)
            .ok_or(LightingError::ChunkNotLoaded(coord))?;
        let mut found = 0;
        for pos in bounds.iter() {
            if let Some(b) = world.block(pos)
                && self.model.luminance(b) > 0
            {
                self.pending.push_back(LightOperation::point(pos, LightChannel::Block));
                found += 1;
            }
        }
        Ok(found)
    }

    /// Runs the oldest pending operation to completion. Returns false only
    /// when nothing was pending.
    pub fn try_light_next<A: LightAccess + ?Sized>(&mut self, world: &mut A) -> bool {
        let Some(op) = self.pending.pop_front() else {
            return false;
        };
        let top = world.world_height() - 1;
        let Some(bounds) = op.bounds.clamp_y(0, top) else {
            warn!(target: "lighting", "dropping {} operation outside the world: {:?}", op.channel.name(), op.bounds);
            return true;
        };
        let stats = match op.kind {
            OperationKind::Edit => self.relight(world, bounds, op.channel),
            OperationKind::Spread => self.spread(world, bounds, op.channel),
        };
        self.stats.absorb(stats);
        debug!(
            target: "lighting",
            "{} {:?}: {} darkened, {} brightened, {} pending",
            op.channel.name(), bounds, stats.darkened, stats.brightened, self.pending.len()
        );
        true
    }

    /// Runs up to `budget` operations and returns how many ran.
    pub fn drain<A: LightAccess + ?Sized>(&mut self, world: &mut A, budget: usize) -> usize {
        let mut ran = 0;
        while ran < budget && self.try_light_next(world) {
            ran += 1;
        }
        ran
    }

    fn relight<A: LightAccess + ?Sized>(&mut self, world: &mut A, bounds: VoxelBox, channel: LightChannel) -> LightStats {
        let top = world.world_height() - 1;
        let mut pass = Pass {
            world,
            model: self.model,
            channel,
            dirty: &mut self.dirty,
        };
        let darkened = darken(&mut pass, bounds);

        // Sources in and around the box may be new or may have been cleared
        // from another direction; restore them before flooding.
        let mut seeds = darkened.frontier;
        let mut restored = 0u64;
        if let Some(around) = bounds.expanded(1).clamp_y(0, top) {
            for pos in around.iter() {
                let Some(natural) = pass.natural_at(pos) else {
                    continue;
                };
                if natural > pass.level(pos).unwrap_or(0) && pass.write(pos, natural) {
                    restored += 1;
                }
                seeds.push(pos);
            }
        }
        let raised = brighten(&mut pass, seeds, None) as u64;
        LightStats {
            operations: 1,
            darkened: darkened.cleared as u64,
            brightened: raised + restored,
        }
    }

    /// Floods outward from the settled light already stored in `bounds`.
    fn spread<A: LightAccess + ?Sized>(&mut self, world: &mut A, bounds: VoxelBox, channel: LightChannel) -> LightStats {
        let mut pass = Pass {
            world,
            model: self.model,
            channel,
            dirty: &mut self.dirty,
        };
        let raised = brighten(&mut pass, bounds.iter(), None) as u64;
        LightStats {
            operations: 1,
            darkened: 0,
            brightened: raised,
        }
    }

    #[inline]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Voxels whose stored light changed since the last call, in position
    /// order.
    pub fn take_dirty(&mut self) -> Vec<IVec3> {
        let mut out: Vec<IVec3> = self.dirty.drain().collect();
        out.sort_unstable();
        out
    }

    #[inline]
    pub fn stats(&self) -> LightStats {
        self.stats
    }
}

/// The one-voxel layer of `bounds` on its `face` side.
fn face_layer(bounds: VoxelBox, face: Face) -> VoxelBox {
    let (mut min, mut max) = (bounds.min, bounds.max);
    match face {
        Face::PosX => min.x = max.x,
        Face::NegX => max.x = min.x,
        Face::PosY => min.y = max.y,
        Face::NegY => max.y = min.y,
        Face::PosZ => min.z = max.z,
        Face::NegZ => max.z = min.z,
    }
    VoxelBox::new(min, max)
}
