use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldConfigError {
    #[error("failed to read world config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse world config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("world dimension `{0}` must be non-zero")]
    ZeroSized(&'static str),
    #[error("world_height {0} exceeds 65535")]
    TooTall(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub chunk_size_x: usize,
    pub chunk_size_z: usize,
    pub world_height: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_size_x: 16,
            chunk_size_z: 16,
            world_height: 128,
        }
    }
}

impl WorldConfig {
    pub fn new(chunk_size_x: usize, world_height: usize, chunk_size_z: usize) -> Self {
        Self {
            chunk_size_x,
            chunk_size_z,
            world_height,
        }
    }

    pub fn validate(self) -> Result<Self, WorldConfigError> {
        for (name, v) in [
            ("chunk_size_x", self.chunk_size_x),
            ("chunk_size_z", self.chunk_size_z),
            ("world_height", self.world_height),
        ] {
            if v == 0 {
                return Err(WorldConfigError::ZeroSized(name));
            }
        }
        if self.world_height > u16::MAX as usize {
            return Err(WorldConfigError::TooTall(self.world_height));
        }
        Ok(self)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, WorldConfigError> {
        let cfg: WorldConfig = toml::from_str(s)?;
        cfg.validate()
    }

    pub fn load_from_path(path: &Path) -> Result<Self, WorldConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}
