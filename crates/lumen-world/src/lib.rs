//! World sizing and the dimension that owns loaded chunks.
#![forbid(unsafe_code)]

mod config;
mod dimension;
pub mod flat;

pub use config::{WorldConfig, WorldConfigError};
pub use dimension::Dimension;
pub use flat::FlatLayers;
pub use lumen_chunk::{Chunk, ChunkCoord};
