//! Scripted block edits applied after the world is lit.

use anyhow::{Context, ensure};
use lumen_blocks::{Block, BlockRegistry};
use lumen_geom::IVec3;

use crate::config::ScenarioKind;

/// Column every scenario is built around.
pub const FOCUS: (i32, i32) = (5, 5);

pub fn edits(kind: ScenarioKind, reg: &BlockRegistry, floor: i32, world_height: i32) -> anyhow::Result<Vec<(IVec3, Block)>> {
    let (fx, fz) = FOCUS;
    let named = |name: &str| reg.block(name).with_context(|| format!("block `{name}` missing from catalog"));
    let mut out = Vec::new();
    match kind {
        ScenarioKind::None => {}
        ScenarioKind::Tunnel => {
            ensure!(floor >= 2, "tunnel needs a floor of at least 2");
            for y in 1..floor {
                out.push((IVec3::new(fx, y, fz), Block::AIR));
            }
            for x in fx + 1..=fx + 10 {
                out.push((IVec3::new(x, 1, fz), Block::AIR));
            }
        }
        ScenarioKind::Leaves => {
            let leaves = named("leaves")?;
            for y in 1..floor {
                let b = if y % 2 == 0 { leaves } else { Block::AIR };
                out.push((IVec3::new(fx, y, fz), b));
            }
        }
        ScenarioKind::Torch => {
            ensure!(floor < world_height, "no room above the floor for a torch");
            out.push((IVec3::new(fx, floor, fz), named("torch")?));
        }
        ScenarioKind::Roof => {
            let y = floor + 4;
            ensure!(y < world_height, "no room above the floor for a roof");
            let stone = named("stone")?;
            for z in fz - 2..=fz + 2 {
                for x in fx - 2..=fx + 2 {
                    out.push((IVec3::new(x, y, z), stone));
                }
            }
        }
    }
    Ok(out)
}
