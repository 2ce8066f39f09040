use std::collections::VecDeque;

use lumen_geom::{Face, IVec3, VoxelBox};

use crate::LightAccess;
use crate::pass::Pass;

/// Floods light outward from `seeds` until no neighbor can be raised.
///
/// Seeds propagate at their stored level. With `confine`, voxels outside the
/// box are neither read as targets nor written. Returns the number of raises.
pub(crate) fn brighten<A, I>(pass: &mut Pass<'_, '_, A>, seeds: I, confine: Option<VoxelBox>) -> usize
where
    A: LightAccess + ?Sized,
    I: IntoIterator<Item = IVec3>,
{
    let mut queue: VecDeque<(IVec3, u8)> = VecDeque::new();
    for pos in seeds {
        if let Some(level) = pass.level(pos)
            && level > 0
        {
            queue.push_back((pos, level));
        }
    }

    let mut raised = 0;
    while let Some((pos, level)) = queue.pop_front() {
        // Superseded by a brighter visit.
        if pass.level(pos) != Some(level) {
            continue;
        }
        for face in Face::ALL {
            let n = pos.step(face);
            if confine.is_some_and(|c| !c.contains(n)) {
                continue;
            }
            let Some(b) = pass.world.block(n) else {
                continue;
            };
            let current = pass.level(n).unwrap_or(0);
            let natural = pass.model.natural(&*pass.world, n, b, pass.channel);
            let next = pass.model.relax(level, b, natural);
            if next > current && pass.write(n, next) {
                raised += 1;
                queue.push_back((n, next));
            }
        }
    }
    raised
}
