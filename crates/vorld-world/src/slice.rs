use serde::{Deserialize, Serialize};

use crate::addressing::world_to_chunk;
use crate::{ChunkCoord, World, WorldError};

/// Inclusive box of chunk coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkBounds {
    pub min: ChunkCoord,
    pub max: ChunkCoord,
}

impl ChunkBounds {
    pub fn new(min: ChunkCoord, max: ChunkCoord) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, c: ChunkCoord) -> bool {
        self.contains_column(c.cx, c.cz) && c.cy >= self.min.cy && c.cy <= self.max.cy
    }

    #[inline]
    pub fn contains_column(&self, chunk_i: i32, chunk_k: i32) -> bool {
        chunk_i >= self.min.cx
            && chunk_i <= self.max.cx
            && chunk_k >= self.min.cz
            && chunk_k <= self.max.cz
    }

    /// Grows the box by `n` chunks on every side.
    pub fn expanded(&self, n: i32) -> Self {
        Self {
            min: self.min.offset(-n, -n, -n),
            max: self.max.offset(n, n, n),
        }
    }
}

/// Inclusive box of world voxel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min: (i32, i32, i32),
    pub max: (i32, i32, i32),
}

impl WorldBounds {
    pub fn new(min: (i32, i32, i32), max: (i32, i32, i32)) -> Self {
        Self { min, max }
    }

    /// The chunks overlapping this box.
    pub fn to_chunk_bounds(&self, chunk_size: usize) -> ChunkBounds {
        let (min, _) = world_to_chunk(chunk_size, self.min.0, self.min.1, self.min.2);
        let (max, _) = world_to_chunk(chunk_size, self.max.0, self.max.1, self.max.2);
        ChunkBounds::new(min, max)
    }
}

impl World {
    /// A new world holding copies of the chunks inside `bounds` and the height
    /// entries of every column the bounds cover. Shares the block registry.
    pub fn create_slice(&self, bounds: ChunkBounds) -> World {
        let mut slice = self.empty_like();
        for (coord, chunk) in self.chunks() {
            if bounds.contains(coord) {
                slice.take_chunk(coord, chunk.clone());
            }
        }
        for entry in self.height_entries() {
            if bounds.contains_column(entry.chunk_i, entry.chunk_k) {
                slice.merge_height_entry(entry);
            }
        }
        slice
    }

    pub fn create_slice_from_bounds(&self, bounds: WorldBounds) -> World {
        self.create_slice(bounds.to_chunk_bounds(self.chunk_size()))
    }

    /// Copies every chunk of `other` over this world's and unions the height
    /// index. Light is taken as-is; nothing is re-propagated.
    pub fn try_merge(&mut self, other: World) -> Result<(), WorldError> {
        if other.chunk_size() != self.chunk_size() {
            return Err(WorldError::ChunkSizeMismatch {
                ours: self.chunk_size(),
                other: other.chunk_size(),
            });
        }
        for entry in other.height_entries() {
            self.merge_height_entry(entry);
        }
        let merged = other.chunk_count();
        for (coord, chunk) in other.into_chunks() {
            self.take_chunk(coord, chunk);
        }
        log::debug!(target: "world", "merged {merged} chunks");
        Ok(())
    }
}
