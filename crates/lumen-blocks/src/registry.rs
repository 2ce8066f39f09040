use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use super::config::BlocksConfig;
use super::types::{Block, BlockId};

/// Largest light level, opacity, or emission a block can carry.
pub const MAX_LEVEL: u8 = 15;

const BUILTIN_BLOCKS: &str = include_str!("../assets/blocks.toml");

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read block config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse block config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate block name `{0}`")]
    DuplicateName(String),
    #[error("block id {id} is used by both `{first}` and `{second}`")]
    DuplicateId {
        id: BlockId,
        first: String,
        second: String,
    },
    #[error("block `{name}`: {field} {value} exceeds 15")]
    LevelOutOfRange {
        name: String,
        field: &'static str,
        value: u8,
    },
    #[error("block config has no `air` entry")]
    MissingAir,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub solid: bool,
    pub opacity: u8,
    pub emission: u8,
    pub diffuses_skylight: bool,
}

impl BlockType {
    /// Light lost entering a voxel of this type. Never below 1.
    #[inline]
    pub fn attenuation(&self) -> u8 {
        self.opacity.saturating_add(1)
    }

    /// Fixed block-light level this type emits.
    #[inline]
    pub fn luminance(&self) -> u8 {
        self.emission
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.opacity >= MAX_LEVEL
    }

    /// Whether a voxel of this type ends the open-sky part of its column.
    #[inline]
    pub fn obstructs_sky(&self) -> bool {
        self.opacity > 0 || self.diffuses_skylight
    }
}

#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    // Indexed by block id; gaps are None.
    slots: Vec<Option<BlockType>>,
    pub by_name: HashMap<String, BlockId>,
    pub air_id: BlockId,
    pub unknown_block_id: Option<BlockId>,
}

impl BlockRegistry {
    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    /// Type of `b`, falling back to the unknown block and then to air.
    #[inline]
    pub fn resolve(&self, b: Block) -> &BlockType {
        self.get(b.id)
            .or_else(|| self.unknown_block_id.and_then(|id| self.get(id)))
            .or_else(|| self.get(self.air_id))
            .unwrap_or(&FALLBACK_AIR)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    /// Block with the given name in its default state.
    pub fn block(&self, name: &str) -> Option<Block> {
        self.id_by_name(name).map(Block::new)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockType> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// The catalog embedded in this crate.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_toml_str(BUILTIN_BLOCKS)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, RegistryError> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, RegistryError> {
        let mut reg = BlockRegistry::default();
        let mut next_id: BlockId = 0;
        for def in cfg.blocks.into_iter() {
            let id = def.id.unwrap_or(next_id);
            next_id = next_id.max(id.saturating_add(1));
            let solid = def.solid.unwrap_or(true);
            let opacity = def.opacity.unwrap_or(if solid { MAX_LEVEL } else { 0 });
            let emission = def.emission.unwrap_or(0);
            for (field, value) in [("opacity", opacity), ("emission", emission)] {
                if value > MAX_LEVEL {
                    return Err(RegistryError::LevelOutOfRange {
                        name: def.name,
                        field,
                        value,
                    });
                }
            }
            if reg.by_name.contains_key(&def.name) {
                return Err(RegistryError::DuplicateName(def.name));
            }
            let slot = id as usize;
            if reg.slots.len() <= slot {
                reg.slots.resize(slot + 1, None);
            }
            if let Some(existing) = &reg.slots[slot] {
                return Err(RegistryError::DuplicateId {
                    id,
                    first: existing.name.clone(),
                    second: def.name,
                });
            }
            reg.by_name.insert(def.name.clone(), id);
            reg.slots[slot] = Some(BlockType {
                id,
                name: def.name,
                solid,
                opacity,
                emission,
                diffuses_skylight: def.diffuses_skylight.unwrap_or(false),
            });
        }
        reg.air_id = reg.id_by_name("air").ok_or(RegistryError::MissingAir)?;
        reg.unknown_block_id = match cfg.unknown_block.as_deref() {
            Some(name) => {
                let id = reg.id_by_name(name);
                if id.is_none() {
                    log::warn!(target: "blocks", "unknown_block `{}` not in catalog; using air", name);
                }
                id
            }
            None => None,
        };
        log::debug!(target: "blocks", "block registry loaded: {} types", reg.len());
        Ok(reg)
    }
}

static FALLBACK_AIR: BlockType = BlockType {
    id: 0,
    name: String::new(),
    solid: false,
    opacity: 0,
    emission: 0,
    diffuses_skylight: false,
};
