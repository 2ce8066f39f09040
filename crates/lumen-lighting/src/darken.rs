use std::collections::VecDeque;

use hashbrown::HashSet;
use log::trace;
use lumen_geom::{Face, IVec3, VoxelBox};

use crate::pass::Pass;
use crate::{Bool3D, LightAccess, MAX_LIGHT};

#[derive(Debug, Default)]
pub(crate) struct Darkened {
    /// Lit voxels bordering the cleared region; brightening restarts here.
    pub frontier: Vec<IVec3>,
    pub cleared: usize,
}

/// Visited set for one darkening run. The bit grid covers everything a
/// chain of at most `MAX_LIGHT` steps can reach from the box; plateaus of
/// equal light can run further and spill into the overflow set.
struct Visited {
    volume: VoxelBox,
    grid: Bool3D,
    overflow: HashSet<IVec3>,
}

impl Visited {
    fn new(volume: VoxelBox) -> Self {
        let (sx, sy, sz) = volume.size();
        Self {
            volume,
            grid: Bool3D::new(sx, sy, sz, false),
            overflow: HashSet::new(),
        }
    }

    /// Marks `pos`; false if it was already marked.
    fn insert(&mut self, pos: IVec3) -> bool {
        if !self.volume.contains(pos) {
            return self.overflow.insert(pos);
        }
        let rel = pos - self.volume.min;
        if self.grid.get(rel.x, rel.y, rel.z) != Ok(false) {
            return false;
        }
        self.grid.set(rel.x, rel.y, rel.z, true).is_ok()
    }

    fn contains(&self, pos: IVec3) -> bool {
        if !self.volume.contains(pos) {
            return self.overflow.contains(&pos);
        }
        let rel = pos - self.volume.min;
        self.grid.get(rel.x, rel.y, rel.z) != Ok(false)
    }
}

/// Resets every voxel in `bounds` to its natural level and retracts all light
/// that may have been derived from the old values.
///
/// A neighbor is cleared only when its level could have come from the voxel
/// being darkened (not brighter than it, and above its own natural level).
/// Brighter or self-sustained neighbors go to the frontier instead.
///
/// Equal levels count as derived, so a wide plateau (a sheet of light under
/// a canopy) is cleared as a whole even when most of it is fed from
/// elsewhere. Brightening puts it back; the cost shows up in `cleared`.
pub(crate) fn darken<A: LightAccess + ?Sized>(pass: &mut Pass<'_, '_, A>, bounds: VoxelBox) -> Darkened {
    let mut out = Darkened::default();
    let top = pass.world.world_height() - 1;
    let Some(volume) = bounds.expanded(MAX_LIGHT as i32).clamp_y(0, top) else {
        return out;
    };
    let mut visited = Visited::new(volume);
    let mut queue: VecDeque<(IVec3, u8)> = VecDeque::new();

    for pos in bounds.iter() {
        if let Some(old) = pass.level(pos) {
            visited.insert(pos);
            queue.push_back((pos, old));
        }
    }

    while let Some((pos, old)) = queue.pop_front() {
        let Some(natural) = pass.natural_at(pos) else {
            continue;
        };
        if pass.write(pos, natural) && natural < old {
            out.cleared += 1;
        }
        if natural > 0 {
            out.frontier.push(pos);
        }
        if natural >= old {
            continue;
        }
        for face in Face::ALL {
            let n = pos.step(face);
            if visited.contains(n) {
                continue;
            }
            let Some(nv) = pass.level(n) else {
                continue;
            };
            if nv == 0 {
                continue;
            }
            let own = pass.natural_at(n).unwrap_or(0);
            if nv <= old && own < nv {
                visited.insert(n);
                queue.push_back((n, nv));
            } else {
                out.frontier.push(n);
            }
        }
    }
    trace!(
        target: "lighting",
        "darkened {:?}: {} cleared, {} frontier, {} past the grid",
        bounds, out.cleared, out.frontier.len(), visited.overflow.len()
    );
    out
}
