//! Sparse chunked voxel world with a per-column height index.
#![forbid(unsafe_code)]

mod addressing;
mod chunk_coord;
mod height_map;
mod slice;
mod world;

pub use addressing::{LocalPos, adjust_chunk_indices, chunk_origin, world_to_chunk};
pub use chunk_coord::ChunkCoord;
pub use height_map::HeightEntry;
pub use slice::{ChunkBounds, WorldBounds};
pub use world::World;

pub use vorld_chunk::{Chunk, LightChannel};

/// Chunk edge length used when nothing else is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 16;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum WorldError {
    #[error("chunk size must be at least 1")]
    ZeroChunkSize,
    #[error("cannot merge a world with chunk size {other} into one with chunk size {ours}")]
    ChunkSizeMismatch { ours: usize, other: usize },
}
