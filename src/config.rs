//! Driver configuration: a TOML file with `[world]`, `[lighting]` and
//! `[scenario]` tables, each fully defaulted.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use lumen_world::WorldConfig;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub lighting: LightingConfig,
    pub scenario: ScenarioConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Operations run per simulated tick.
    pub ops_per_tick: usize,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self { ops_per_tick: 64 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    #[default]
    None,
    Tunnel,
    Leaves,
    Torch,
    Roof,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub kind: ScenarioKind,
    /// Chunks loaded in each direction around the origin chunk.
    pub radius: i32,
    /// Height of the solid ground.
    pub floor: usize,
    /// World column to print; defaults to the scenario's focus column.
    pub column: Option<[i32; 2]>,
    /// Block catalog to load instead of the builtin one.
    pub blocks: Option<PathBuf>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            kind: ScenarioKind::None,
            radius: 1,
            floor: 8,
            column: None,
            blocks: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("invalid driver config")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parsing {}", path.display()))
    }
}
