//! Headless lighting driver: builds a flat world, lights it, applies a
//! scripted edit and prints the resulting light down one column.

mod config;
mod scenario;

use std::path::PathBuf;

use anyhow::{Context, ensure};
use clap::Parser;
use log::{debug, info};
use lumen_blocks::BlockRegistry;
use lumen_geom::IVec3;
use lumen_lighting::{LightStats, Lighter, effective_light};
use lumen_world::{ChunkCoord, Dimension, FlatLayers};

use crate::config::{AppConfig, ScenarioKind};

#[derive(Parser, Debug)]
#[command(name = "lumen", about = "Incremental voxel lighting driver")]
struct Args {
    /// Driver config file (TOML)
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Block catalog to use instead of the builtin one
    #[arg(long, value_name = "PATH")]
    blocks: Option<PathBuf>,

    /// Chunks loaded in each direction around the origin
    #[arg(long)]
    radius: Option<i32>,

    /// Height of the flat ground
    #[arg(long)]
    floor: Option<usize>,

    /// Edit script to run after initial lighting
    #[arg(long, value_enum)]
    scenario: Option<ScenarioKind>,

    /// Column to print, as X,Z
    #[arg(long, value_name = "X,Z", value_delimiter = ',', num_args = 2)]
    column: Option<Vec<i32>>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn apply(&self, cfg: &mut AppConfig) {
        if let Some(r) = self.radius {
            cfg.scenario.radius = r;
        }
        if let Some(f) = self.floor {
            cfg.scenario.floor = f;
        }
        if let Some(k) = self.scenario {
            cfg.scenario.kind = k;
        }
        if let Some([x, z]) = self.column.as_deref() {
            cfg.scenario.column = Some([*x, *z]);
        }
        if let Some(p) = &self.blocks {
            cfg.scenario.blocks = Some(p.clone());
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Runs ticks until the queue is empty. Returns the number of ticks.
fn settle(lighter: &mut Lighter<'_>, world: &mut Dimension, ops_per_tick: usize) -> usize {
    let mut ticks = 0;
    while !lighter.is_idle() {
        let ran = lighter.drain(world, ops_per_tick);
        ticks += 1;
        debug!(target: "lumen", "tick {ticks}: {ran} ops, {} pending", lighter.pending());
    }
    ticks
}

fn print_column(world: &Dimension, reg: &BlockRegistry, x: i32, z: i32, top: i32) {
    println!("column ({x}, {z})");
    println!("{:>4}  {:<10} {:>3} {:>5} {:>5}", "y", "block", "sky", "block", "light");
    for y in (0..=top).rev() {
        let p = IVec3::new(x, y, z);
        let (Some(b), Some(sky), Some(bl)) = (world.block(p), world.sky_light(p), world.block_light(p)) else {
            println!("{y:>4}  (not loaded)");
            continue;
        };
        let name = &reg.resolve(b).name;
        println!("{y:>4}  {name:<10} {sky:>3} {bl:>5} {:>5}", effective_light(sky, bl));
    }
}

fn report(stats: LightStats, dirty: usize) {
    info!(
        target: "lumen",
        "{} operations, {} voxels darkened, {} brightened, {} dirty",
        stats.operations, stats.darkened, stats.brightened, dirty
    );
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut cfg = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    args.apply(&mut cfg);
    let world_cfg = cfg.world.validate().context("invalid [world] config")?;
    let sc = &cfg.scenario;
    ensure!(cfg.lighting.ops_per_tick > 0, "ops_per_tick must be at least 1");
    ensure!(sc.radius >= 0, "radius must not be negative");
    ensure!(
        sc.floor >= 1 && sc.floor < world_cfg.world_height,
        "floor {} must lie inside 1..{}",
        sc.floor,
        world_cfg.world_height
    );

    let reg = match &sc.blocks {
        Some(path) => BlockRegistry::load_from_path(path)
            .with_context(|| format!("loading block catalog {}", path.display()))?,
        None => BlockRegistry::builtin().context("builtin block catalog")?,
    };
    info!(target: "lumen", "{} block types", reg.len());

    let layers = FlatLayers::from_names(&reg, &[("stone", sc.floor - 1), ("grass", 1)])
        .context("catalog needs `stone` and `grass` for the flat world")?;
    let mut world = Dimension::new(world_cfg);
    let mut coords = Vec::new();
    for cz in -sc.radius..=sc.radius {
        for cx in -sc.radius..=sc.radius {
            let coord = ChunkCoord::new(cx, cz);
            world.insert_chunk(layers.fill(coord, &world_cfg, &reg));
            coords.push(coord);
        }
    }
    info!(target: "lumen", "loaded {} chunks, floor at y={}", coords.len(), sc.floor);

    let mut lighter = Lighter::new(&reg);
    for &coord in &coords {
        lighter.initial_lighting(&mut world, coord)?;
        lighter.enqueue_chunk_emitters(&world, coord)?;
    }
    let ticks = settle(&mut lighter, &mut world, cfg.lighting.ops_per_tick);
    info!(target: "lumen", "initial lighting settled in {ticks} ticks");
    report(lighter.stats(), lighter.take_dirty().len());

    let floor = sc.floor as i32;
    let height = world.world_height();
    let edits = scenario::edits(sc.kind, &reg, floor, height)?;
    let mut applied = 0;
    for (pos, b) in edits {
        if world.set_block(pos, b, &reg).is_some() {
            lighter.enqueue_block_edit(pos);
            applied += 1;
        }
    }
    if applied > 0 {
        let before = lighter.stats();
        let ticks = settle(&mut lighter, &mut world, cfg.lighting.ops_per_tick);
        info!(target: "lumen", "{:?}: {applied} edits settled in {ticks} ticks", sc.kind);
        let after = lighter.stats();
        report(
            LightStats {
                operations: after.operations - before.operations,
                darkened: after.darkened - before.darkened,
                brightened: after.brightened - before.brightened,
            },
            lighter.take_dirty().len(),
        );
    }

    let [x, z] = sc.column.unwrap_or([scenario::FOCUS.0, scenario::FOCUS.1]);
    let top = (floor + 8).min(height - 1);
    print_column(&world, &reg, x, z, top);
    Ok(())
}
