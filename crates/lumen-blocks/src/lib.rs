//! Block types and the catalog of light-relevant block attributes.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod types;

pub use registry::{BlockRegistry, BlockType, RegistryError};
pub use types::{Block, BlockId, BlockState};
