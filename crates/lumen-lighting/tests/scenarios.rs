use lumen_blocks::{Block, BlockRegistry};
use lumen_chunk::ChunkCoord;
use lumen_geom::{IVec3, VoxelBox};
use lumen_lighting::{LightChannel, Lighter};
use lumen_world::{Dimension, FlatLayers, WorldConfig};

fn flat(reg: &BlockRegistry, cfg: WorldConfig, layers: &[(&str, usize)], chunks: &[(i32, i32)]) -> Dimension {
    let layers = FlatLayers::from_names(reg, layers).unwrap();
    let mut dim = Dimension::new(cfg);
    for &(cx, cz) in chunks {
        dim.insert_chunk(layers.fill(ChunkCoord::new(cx, cz), &cfg, reg));
    }
    dim
}

fn lit(lighter: &mut Lighter<'_>, dim: &mut Dimension) {
    let coords: Vec<ChunkCoord> = dim.chunk_coords().collect();
    for c in coords {
        lighter.initial_lighting(dim, c).unwrap();
    }
}

fn dig(dim: &mut Dimension, lighter: &mut Lighter<'_>, reg: &BlockRegistry, cells: &[(i32, i32, i32)]) {
    for &(x, y, z) in cells {
        let p = IVec3::new(x, y, z);
        dim.set_block(p, Block::AIR, reg).unwrap();
        lighter.enqueue_block_edit(p);
    }
}

fn sky(dim: &Dimension, x: i32, y: i32, z: i32) -> u8 {
    dim.sky_light(IVec3::new(x, y, z)).unwrap()
}

fn blk(dim: &Dimension, x: i32, y: i32, z: i32) -> u8 {
    dim.block_light(IVec3::new(x, y, z)).unwrap()
}

fn snapshot(dim: &Dimension) -> Vec<(u8, u8)> {
    let mut coords: Vec<ChunkCoord> = dim.chunk_coords().collect();
    coords.sort_by_key(|c| (c.cx, c.cz));
    let mut out = Vec::new();
    for c in coords {
        let chunk = dim.chunk(c).unwrap();
        for p in chunk.bounds().iter() {
            out.push((dim.sky_light(p).unwrap(), dim.block_light(p).unwrap()));
        }
    }
    out
}

fn surface() -> (BlockRegistry, WorldConfig) {
    (BlockRegistry::builtin().unwrap(), WorldConfig::new(16, 32, 16))
}

#[test]
fn flat_surface_is_lit_above_ground_only() {
    let (reg, cfg) = surface();
    let mut dim = flat(&reg, cfg, &[("stone", 4)], &[(0, 0)]);
    let mut lighter = Lighter::new(&reg);
    lit(&mut lighter, &mut dim);
    for y in 0..4 {
        assert_eq!(sky(&dim, 7, y, 7), 0, "y={y}");
    }
    for y in 4..32 {
        assert_eq!(sky(&dim, 7, y, 7), 15, "y={y}");
    }
    assert_eq!(blk(&dim, 7, 10, 7), 0);
}

#[test]
fn short_tunnel_under_a_shaft() {
    let (reg, cfg) = surface();
    let mut dim = flat(&reg, cfg, &[("stone", 4)], &[(0, 0)]);
    let mut lighter = Lighter::new(&reg);
    lit(&mut lighter, &mut dim);
    dig(&mut dim, &mut lighter, &reg, &[(5, 3, 5), (5, 2, 5), (5, 1, 5), (4, 1, 5)]);
    lighter.drain(&mut dim, usize::MAX);
    assert_eq!(sky(&dim, 5, 3, 5), 15);
    assert_eq!(sky(&dim, 5, 2, 5), 15);
    assert_eq!(sky(&dim, 5, 1, 5), 15);
    assert_eq!(sky(&dim, 4, 1, 5), 14);
    assert_eq!(sky(&dim, 4, 2, 5), 0);
}

#[test]
fn long_tunnel_fades_one_level_per_step() {
    let (reg, cfg) = surface();
    let mut dim = flat(&reg, cfg, &[("stone", 4)], &[(0, 0)]);
    let mut lighter = Lighter::new(&reg);
    lit(&mut lighter, &mut dim);
    dig(&mut dim, &mut lighter, &reg, &[(5, 3, 5), (5, 2, 5), (5, 1, 5)]);
    dig(&mut dim, &mut lighter, &reg, &[(6, 1, 5), (7, 1, 5), (8, 1, 5), (9, 1, 5), (10, 1, 5)]);
    lighter.drain(&mut dim, usize::MAX);
    let got: Vec<u8> = (6..=10).map(|x| sky(&dim, x, 1, 5)).collect();
    assert_eq!(got, vec![14, 13, 12, 11, 10]);
}

#[test]
fn refilling_a_tunnel_removes_its_light() {
    let (reg, cfg) = surface();
    let mut dim = flat(&reg, cfg, &[("stone", 4)], &[(0, 0)]);
    let mut lighter = Lighter::new(&reg);
    lit(&mut lighter, &mut dim);
    let before = snapshot(&dim);
    let cells = [(5, 3, 5), (5, 2, 5), (5, 1, 5), (6, 1, 5), (7, 1, 5)];
    dig(&mut dim, &mut lighter, &reg, &cells);
    lighter.drain(&mut dim, usize::MAX);
    assert_eq!(sky(&dim, 7, 1, 5), 13);

    let stone = reg.block("stone").unwrap();
    for &(x, y, z) in &cells {
        let p = IVec3::new(x, y, z);
        dim.set_block(p, stone, &reg);
        lighter.enqueue_block_edit(p);
    }
    lighter.drain(&mut dim, usize::MAX);
    assert_eq!(snapshot(&dim), before);
}

fn leaf_column(reg: &BlockRegistry) -> Dimension {
    let cfg = WorldConfig::new(16, 32, 16);
    let mut dim = flat(reg, cfg, &[("stone", 17)], &[(0, 0)]);
    let leaves = reg.block("leaves").unwrap();
    for y in 1..=16 {
        let b = if y % 2 == 0 { leaves } else { Block::AIR };
        dim.set_block(IVec3::new(5, y, 5), b, reg);
    }
    dim
}

const LEAF_PROFILE: [u8; 12] = [15, 13, 12, 10, 9, 7, 6, 4, 3, 1, 0, 0];

fn leaf_profile(dim: &Dimension) -> Vec<u8> {
    (6..=17).rev().map(|y| sky(dim, 5, y, 5)).collect()
}

#[test]
fn leaves_and_air_alternate_down_a_column() {
    let reg = BlockRegistry::builtin().unwrap();
    let cfg = WorldConfig::new(16, 32, 16);
    let mut dim = flat(&reg, cfg, &[("stone", 17)], &[(0, 0)]);
    let mut lighter = Lighter::new(&reg);
    lit(&mut lighter, &mut dim);
    let leaves = reg.block("leaves").unwrap();
    for y in 1..=16 {
        let b = if y % 2 == 0 { leaves } else { Block::AIR };
        dim.set_block(IVec3::new(5, y, 5), b, &reg);
    }
    let column = VoxelBox::new(IVec3::new(5, 1, 5), IVec3::new(5, 16, 5));
    lighter.enqueue_operation(column, LightChannel::Sky).unwrap();
    assert_eq!(lighter.drain(&mut dim, usize::MAX), 1);
    assert_eq!(leaf_profile(&dim), LEAF_PROFILE);
}

#[test]
fn leaves_column_from_initial_lighting() {
    let reg = BlockRegistry::builtin().unwrap();
    let mut dim = leaf_column(&reg);
    let mut lighter = Lighter::new(&reg);
    lit(&mut lighter, &mut dim);
    assert_eq!(leaf_profile(&dim), LEAF_PROFILE);
}

#[test]
fn relighting_a_settled_world_changes_nothing() {
    let reg = BlockRegistry::builtin().unwrap();
    let mut dim = leaf_column(&reg);
    let mut lighter = Lighter::new(&reg);
    lit(&mut lighter, &mut dim);
    lighter.take_dirty();
    let before = snapshot(&dim);
    let column = VoxelBox::new(IVec3::new(3, 0, 3), IVec3::new(7, 20, 7));
    for channel in LightChannel::ALL {
        lighter.enqueue_operation(column, channel).unwrap();
    }
    lighter.drain(&mut dim, usize::MAX);
    assert_eq!(snapshot(&dim), before);
}

#[test]
fn torch_lights_and_unlights() {
    let (reg, cfg) = surface();
    let mut dim = flat(&reg, cfg, &[("stone", 4)], &[(0, 0)]);
    let mut lighter = Lighter::new(&reg);
    lit(&mut lighter, &mut dim);
    let before = snapshot(&dim);

    let p = IVec3::new(8, 4, 8);
    dim.set_block(p, reg.block("torch").unwrap(), &reg);
    lighter.enqueue_block_edit(p);
    lighter.drain(&mut dim, usize::MAX);
    assert_eq!(blk(&dim, 8, 4, 8), 14);
    assert_eq!(blk(&dim, 9, 4, 8), 13);
    assert_eq!(blk(&dim, 8, 4, 12), 10);
    assert_eq!(blk(&dim, 8, 10, 8), 8);
    assert_eq!(blk(&dim, 8, 3, 8), 0);
    // Torches do not block the sky.
    assert_eq!(sky(&dim, 8, 4, 8), 15);

    dim.set_block(p, Block::AIR, &reg);
    lighter.enqueue_block_edit(p);
    lighter.drain(&mut dim, usize::MAX);
    assert_eq!(snapshot(&dim), before);
}

#[test]
fn overlapping_torches_survive_one_removal() {
    let (reg, cfg) = surface();
    let mut dim = flat(&reg, cfg, &[("stone", 4)], &[(0, 0)]);
    let mut lighter = Lighter::new(&reg);
    let torch = reg.block("torch").unwrap();
    let a = IVec3::new(4, 4, 8);
    let b = IVec3::new(10, 4, 8);
    for p in [a, b] {
        dim.set_block(p, torch, &reg);
        lighter.enqueue_block_edit(p);
    }
    lighter.drain(&mut dim, usize::MAX);
    assert_eq!(blk(&dim, 7, 4, 8), 11);

    dim.set_block(a, Block::AIR, &reg);
    lighter.enqueue_block_edit(a);
    lighter.drain(&mut dim, usize::MAX);
    assert_eq!(blk(&dim, 10, 4, 8), 14);
    assert_eq!(blk(&dim, 7, 4, 8), 11);
    assert_eq!(blk(&dim, 4, 4, 8), 8);
    assert_eq!(blk(&dim, 1, 4, 8), 5);
}

#[test]
fn roof_shades_the_ground_below() {
    let (reg, cfg) = surface();
    let mut dim = flat(&reg, cfg, &[("stone", 4)], &[(0, 0)]);
    let mut lighter = Lighter::new(&reg);
    lit(&mut lighter, &mut dim);
    let stone = reg.block("stone").unwrap();
    let roof = VoxelBox::new(IVec3::new(2, 8, 2), IVec3::new(6, 8, 6));
    for p in roof.iter() {
        dim.set_block(p, stone, &reg);
    }
    lighter.enqueue_operation(roof, LightChannel::Sky).unwrap();
    lighter.drain(&mut dim, usize::MAX);
    assert_eq!(sky(&dim, 4, 9, 4), 15);
    assert_eq!(sky(&dim, 4, 8, 4), 0);
    assert_eq!(sky(&dim, 4, 7, 4), 12);
    assert_eq!(sky(&dim, 4, 5, 4), 12);
    assert_eq!(sky(&dim, 2, 5, 4), 14);
    assert_eq!(sky(&dim, 1, 5, 4), 15);

    for p in roof.iter() {
        dim.set_block(p, Block::AIR, &reg);
    }
    lighter.enqueue_operation(roof, LightChannel::Sky).unwrap();
    lighter.drain(&mut dim, usize::MAX);
    assert_eq!(sky(&dim, 4, 5, 4), 15);
}

#[test]
fn leaf_ceiling_at_the_top_of_the_world() {
    let reg = BlockRegistry::builtin().unwrap();
    let cfg = WorldConfig::new(8, 8, 8);
    let mut dim = flat(&reg, cfg, &[("air", 7), ("leaves", 1)], &[(0, 0)]);
    let mut lighter = Lighter::new(&reg);
    lit(&mut lighter, &mut dim);
    let got: Vec<u8> = (0..8).rev().map(|y| sky(&dim, 3, y, 3)).collect();
    assert_eq!(got, vec![13, 12, 11, 10, 9, 8, 7, 6]);
}

#[test]
fn tunnel_light_crosses_chunk_borders_at_load() {
    let (reg, cfg) = surface();
    let mut dim = flat(&reg, cfg, &[("stone", 4)], &[(0, 0), (1, 0)]);
    for (x, y) in [(14, 3), (14, 2), (14, 1), (15, 1), (16, 1), (17, 1), (18, 1)] {
        dim.set_block(IVec3::new(x, y, 5), Block::AIR, &reg);
    }
    let mut lighter = Lighter::new(&reg);
    lighter.initial_lighting(&mut dim, ChunkCoord::new(0, 0)).unwrap();
    assert_eq!(sky(&dim, 15, 1, 5), 14);
    // Writes stay inside the chunk being lit.
    assert_eq!(sky(&dim, 16, 1, 5), 0);

    lighter.initial_lighting(&mut dim, ChunkCoord::new(1, 0)).unwrap();
    let got: Vec<u8> = (15..=18).map(|x| sky(&dim, x, 1, 5)).collect();
    assert_eq!(got, vec![14, 13, 12, 11]);
}

#[test]
fn edits_next_to_unloaded_chunks_stay_in_bounds() {
    let (reg, cfg) = surface();
    let mut dim = flat(&reg, cfg, &[("stone", 4)], &[(0, 0)]);
    let mut lighter = Lighter::new(&reg);
    lit(&mut lighter, &mut dim);
    let p = IVec3::new(15, 4, 0);
    dim.set_block(p, reg.block("glowstone").unwrap(), &reg);
    lighter.enqueue_block_edit(p);
    lighter.drain(&mut dim, usize::MAX);
    assert_eq!(blk(&dim, 15, 4, 0), 15);
    assert_eq!(blk(&dim, 14, 4, 0), 14);
    assert_eq!(dim.block_light(IVec3::new(16, 4, 0)), None);
    assert_eq!(dim.block_light(IVec3::new(15, 4, -1)), None);
    assert!(lighter.take_dirty().iter().all(|p| dim.is_loaded(*p)));
}

#[test]
fn dirty_set_reports_every_changed_voxel() {
    let (reg, cfg) = surface();
    let mut dim = flat(&reg, cfg, &[("stone", 4)], &[(0, 0)]);
    let mut lighter = Lighter::new(&reg);
    lit(&mut lighter, &mut dim);
    lighter.take_dirty();
    let before = snapshot(&dim);
    let p = IVec3::new(8, 4, 8);
    dim.set_block(p, reg.block("torch").unwrap(), &reg);
    lighter.enqueue_block_edit(p);
    lighter.drain(&mut dim, usize::MAX);
    let after = snapshot(&dim);
    let changed = before.iter().zip(&after).filter(|(a, b)| a != b).count();
    assert_eq!(lighter.take_dirty().len(), changed);
    assert!(lighter.stats().brightened > 0);
}

fn pocket_world(reg: &BlockRegistry) -> Dimension {
    let cfg = WorldConfig::new(16, 32, 16);
    let mut dim = flat(reg, cfg, &[("stone", 8)], &[(0, 0), (1, 0)]);
    dim.set_block(IVec3::new(15, 4, 5), Block::AIR, reg).unwrap();
    for y in 4..8 {
        dim.set_block(IVec3::new(16, y, 5), Block::AIR, reg).unwrap();
    }
    dim
}

fn light_in_order(reg: &BlockRegistry, order: [(i32, i32); 2]) -> Dimension {
    let mut dim = pocket_world(reg);
    let mut lighter = Lighter::new(reg);
    for (cx, cz) in order {
        lighter.initial_lighting(&mut dim, ChunkCoord::new(cx, cz)).unwrap();
    }
    lighter.drain(&mut dim, usize::MAX);
    assert!(lighter.is_idle());
    dim
}

#[test]
fn chunk_load_order_does_not_change_light() {
    let reg = BlockRegistry::builtin().unwrap();
    let west_first = light_in_order(&reg, [(0, 0), (1, 0)]);
    let east_first = light_in_order(&reg, [(1, 0), (0, 0)]);
    for dim in [&west_first, &east_first] {
        assert_eq!(sky(dim, 16, 4, 5), 15);
        assert_eq!(sky(dim, 16, 7, 5), 15);
        // Pocket in the west chunk, fed only through the shared face.
        assert_eq!(sky(dim, 15, 4, 5), 14);
    }
    assert_eq!(snapshot(&west_first), snapshot(&east_first));
}
