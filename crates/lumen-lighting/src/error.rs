use lumen_chunk::ChunkCoord;
use lumen_geom::IVec3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LightingError {
    #[error("invalid bounding box: min {min:?} exceeds max {max:?}")]
    InvalidBounds { min: IVec3, max: IVec3 },
    #[error("chunk ({}, {}) is not loaded", .0.cx, .0.cz)]
    ChunkNotLoaded(ChunkCoord),
}
