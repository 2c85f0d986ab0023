use std::sync::Arc;

use hashbrown::HashMap;
use vorld_blocks::{AIR, BlockId, BlockRegistry};
use vorld_chunk::{Chunk, LightChannel};
use vorld_geom::{Direction, Rotation};

use crate::addressing::{LocalPos, adjust_chunk_indices, world_to_chunk};
use crate::{ChunkCoord, HeightEntry, WorldError};

/// A sparse map of equally sized chunks plus the height index derived from
/// every block write. Only light-free bookkeeping happens here; light is
/// maintained by the lighting crate on top of these accessors.
#[derive(Clone, Debug)]
pub struct World {
    chunk_size: usize,
    chunks: HashMap<ChunkCoord, Chunk>,
    height_map: HashMap<(i32, i32), HeightEntry>,
    registry: Arc<BlockRegistry>,
}

impl World {
    pub fn new(chunk_size: usize, registry: Arc<BlockRegistry>) -> Result<Self, WorldError> {
        if chunk_size == 0 {
            return Err(WorldError::ZeroChunkSize);
        }
        Ok(Self {
            chunk_size,
            chunks: HashMap::new(),
            height_map: HashMap::new(),
            registry,
        })
    }

    /// An empty world with the same chunk size and registry.
    pub fn empty_like(&self) -> World {
        Self {
            chunk_size: self.chunk_size,
            chunks: HashMap::new(),
            height_map: HashMap::new(),
            registry: self.registry.clone(),
        }
    }

    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    #[inline]
    pub fn registry(&self) -> &Arc<BlockRegistry> {
        &self.registry
    }

    // Chunks

    #[inline]
    pub fn get_chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    #[inline]
    pub fn get_chunk_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    /// Inserts (or replaces) a chunk and raises the height index to cover its
    /// non-empty voxels. Returns the chunk previously stored at `coord`.
    ///
    /// # Panics
    /// If the chunk's size differs from the world's.
    pub fn add_chunk(&mut self, coord: ChunkCoord, chunk: Chunk) -> Option<Chunk> {
        assert_eq!(
            chunk.size(),
            self.chunk_size,
            "chunk size does not match world chunk size"
        );
        let size = self.chunk_size;
        let entry = self.height_entry_mut(coord);
        for (i, j, k, id) in chunk.iter_blocks() {
            if id != AIR {
                let y = coord.cy * size as i32 + j as i32;
                if entry.max_y(i, k).is_none_or(|top| top < y) {
                    entry.set_max_y(i, k, Some(y));
                }
            }
        }
        self.chunks.insert(coord, chunk)
    }

    /// The chunk at `coord`, created empty if missing.
    pub fn ensure_chunk(&mut self, coord: ChunkCoord) -> &mut Chunk {
        let size = self.chunk_size;
        self.chunks.entry(coord).or_insert_with(|| Chunk::new(size))
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunks(&self) -> impl Iterator<Item = (ChunkCoord, &Chunk)> + '_ {
        self.chunks.iter().map(|(c, ch)| (*c, ch))
    }

    pub fn for_each_chunk(&self, mut f: impl FnMut(ChunkCoord, &Chunk)) {
        for (coord, chunk) in &self.chunks {
            f(*coord, chunk);
        }
    }

    /// Drops every chunk and height entry, keeping size and registry.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.height_map.clear();
    }

    pub(crate) fn take_chunk(&mut self, coord: ChunkCoord, chunk: Chunk) {
        self.chunks.insert(coord, chunk);
    }

    pub(crate) fn into_chunks(self) -> impl Iterator<Item = (ChunkCoord, Chunk)> {
        self.chunks.into_iter()
    }

    // Blocks

    #[inline]
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Option<BlockId> {
        let (coord, (i, j, k)) = world_to_chunk(self.chunk_size, x, y, z);
        self.chunks.get(&coord).map(|c| c.block(i, j, k))
    }

    /// Block at a chunk-relative index; the index may step outside the chunk.
    #[inline]
    pub fn get_block_by_index(&self, chunk: ChunkCoord, i: i32, j: i32, k: i32) -> Option<BlockId> {
        let (coord, (i, j, k)) = adjust_chunk_indices(self.chunk_size, chunk, i, j, k);
        self.chunks.get(&coord).map(|c| c.block(i, j, k))
    }

    #[inline]
    pub fn get_block_rotation(&self, x: i32, y: i32, z: i32) -> Option<Rotation> {
        let (coord, (i, j, k)) = world_to_chunk(self.chunk_size, x, y, z);
        self.chunks.get(&coord).map(|c| c.rotation(i, j, k))
    }

    pub fn get_block_up(&self, x: i32, y: i32, z: i32) -> Option<Direction> {
        self.get_block_rotation(x, y, z).map(Rotation::up)
    }

    pub fn get_block_forward(&self, x: i32, y: i32, z: i32) -> Option<Direction> {
        self.get_block_rotation(x, y, z).map(Rotation::forward)
    }

    /// Writes a block with the default orientation. Creates the chunk if needed
    /// and keeps the height index current. Light is not touched.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, id: BlockId) {
        self.set_block_rotated(x, y, z, id, Rotation::default());
    }

    pub fn set_block_rotated(&mut self, x: i32, y: i32, z: i32, id: BlockId, rotation: Rotation) {
        let (coord, local) = world_to_chunk(self.chunk_size, x, y, z);
        self.write_block(coord, local, id, rotation);
    }

    pub fn set_block_by_index(
        &mut self,
        chunk: ChunkCoord,
        i: i32,
        j: i32,
        k: i32,
        id: BlockId,
        rotation: Rotation,
    ) {
        let (coord, local) = adjust_chunk_indices(self.chunk_size, chunk, i, j, k);
        self.write_block(coord, local, id, rotation);
    }

    fn write_block(&mut self, coord: ChunkCoord, (i, j, k): LocalPos, id: BlockId, rotation: Rotation) {
        self.ensure_chunk(coord).set_block(i, j, k, id, rotation);
        self.update_height_map(coord, (i, j, k), id);
    }

    /// False for empty space and unloaded voxels.
    pub fn is_block_opaque(&self, x: i32, y: i32, z: i32) -> bool {
        self.get_block(x, y, z)
            .is_some_and(|id| id != AIR && self.registry.is_opaque(id))
    }

    pub fn is_block_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.get_block(x, y, z)
            .is_some_and(|id| id != AIR && self.registry.is_solid(id))
    }

    // Light

    /// Stored light of one channel; 0 where no chunk exists.
    #[inline]
    pub fn light(&self, channel: LightChannel, x: i32, y: i32, z: i32) -> u8 {
        let (coord, (i, j, k)) = world_to_chunk(self.chunk_size, x, y, z);
        self.chunks
            .get(&coord)
            .map_or(0, |c| c.light(channel, i, j, k))
    }

    #[inline]
    pub fn light_by_index(&self, channel: LightChannel, chunk: ChunkCoord, i: i32, j: i32, k: i32) -> u8 {
        let (coord, (i, j, k)) = adjust_chunk_indices(self.chunk_size, chunk, i, j, k);
        self.chunks
            .get(&coord)
            .map_or(0, |c| c.light(channel, i, j, k))
    }

    /// Stores a light value if the voxel's chunk exists; returns whether it did.
    #[inline]
    pub fn set_light(&mut self, channel: LightChannel, x: i32, y: i32, z: i32, value: u8) -> bool {
        let (coord, (i, j, k)) = world_to_chunk(self.chunk_size, x, y, z);
        match self.chunks.get_mut(&coord) {
            Some(c) => {
                c.set_light(channel, i, j, k, value);
                true
            }
            None => false,
        }
    }

    pub fn get_block_light(&self, x: i32, y: i32, z: i32) -> u8 {
        self.light(LightChannel::Block, x, y, z)
    }

    pub fn get_block_sunlight(&self, x: i32, y: i32, z: i32) -> u8 {
        self.light(LightChannel::Sun, x, y, z)
    }

    pub fn get_block_light_by_index(&self, chunk: ChunkCoord, i: i32, j: i32, k: i32) -> u8 {
        self.light_by_index(LightChannel::Block, chunk, i, j, k)
    }

    pub fn get_block_sunlight_by_index(&self, chunk: ChunkCoord, i: i32, j: i32, k: i32) -> u8 {
        self.light_by_index(LightChannel::Sun, chunk, i, j, k)
    }

    /// Zeroes both channels everywhere.
    pub fn clear_light(&mut self) {
        for chunk in self.chunks.values_mut() {
            chunk.clear_light();
        }
    }

    // Height index

    /// Highest non-empty world Y in column `(x, z)`, `None` if the column
    /// has never held a block.
    pub fn highest_block_y(&self, x: i32, z: i32) -> Option<i32> {
        let (coord, (i, _, k)) = world_to_chunk(self.chunk_size, x, 0, z);
        self.height_map
            .get(&coord.column())
            .and_then(|e| e.max_y(i, k))
    }

    pub fn height_entry(&self, chunk_i: i32, chunk_k: i32) -> Option<&HeightEntry> {
        self.height_map.get(&(chunk_i, chunk_k))
    }

    pub fn height_entries(&self) -> impl Iterator<Item = &HeightEntry> + '_ {
        self.height_map.values()
    }

    pub(crate) fn height_entry_mut(&mut self, coord: ChunkCoord) -> &mut HeightEntry {
        let size = self.chunk_size;
        let entry = self
            .height_map
            .entry(coord.column())
            .or_insert_with(|| HeightEntry::new(size, coord.cx, coord.cy, coord.cz));
        entry.include_chunk_j(coord.cy);
        entry
    }

    pub(crate) fn merge_height_entry(&mut self, other: &HeightEntry) {
        match self.height_map.get_mut(&(other.chunk_i, other.chunk_k)) {
            Some(mine) => mine.merge(other),
            None => {
                self.height_map
                    .insert((other.chunk_i, other.chunk_k), other.clone());
            }
        }
    }

    fn update_height_map(&mut self, coord: ChunkCoord, (i, j, k): LocalPos, id: BlockId) {
        let size = self.chunk_size as i32;
        let y = coord.cy * size + j as i32;
        let entry = self.height_entry_mut(coord);
        let top = entry.max_y(i, k);
        if id != AIR {
            if top.is_none_or(|t| t < y) {
                entry.set_max_y(i, k, Some(y));
            }
            return;
        }
        if top != Some(y) {
            return;
        }
        // The column top was just cleared: scan down for the next block.
        let min_chunk_j = entry.min_chunk_j;
        let mut found = None;
        let mut cj = coord.cy;
        let mut start = j as i32 - 1;
        while found.is_none() && cj >= min_chunk_j {
            if let Some(chunk) = self.chunks.get(&coord.with_y(cj)) {
                found = (0..=start)
                    .rev()
                    .find(|&jj| chunk.block(i, jj as usize, k) != AIR)
                    .map(|jj| cj * size + jj);
            }
            cj -= 1;
            start = size - 1;
        }
        self.height_entry_mut(coord).set_max_y(i, k, found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world(size: usize) -> World {
        World::new(size, Arc::new(BlockRegistry::new())).unwrap()
    }

    #[test]
    fn set_block_creates_chunk_and_reads_back() {
        let mut w = world(16);
        assert_eq!(w.get_block(-1, -1, -1), None);
        w.set_block(-1, -1, -1, 7);
        assert_eq!(w.get_block(-1, -1, -1), Some(7));
        assert!(w.get_chunk(ChunkCoord::new(-1, -1, -1)).is_some());
        assert_eq!(w.get_block(-2, -1, -1), Some(AIR));
        assert_eq!(w.chunk_count(), 1);
    }

    #[test]
    fn by_index_access_crosses_chunk_borders() {
        let mut w = world(8);
        w.set_block_by_index(ChunkCoord::new(0, 0, 0), -1, 8, 0, 3, Rotation::UpBack);
        assert_eq!(w.get_block(-1, 8, 0), Some(3));
        assert_eq!(w.get_block_rotation(-1, 8, 0), Some(Rotation::UpBack));
        assert_eq!(w.get_block_by_index(ChunkCoord::new(-1, 1, 0), 7, 0, 0), Some(3));
        assert_eq!(w.get_block_forward(-1, 8, 0), Some(Direction::Back));
        assert_eq!(w.get_block_up(-1, 8, 0), Some(Direction::Up));
    }

    #[test]
    fn height_tracks_highest_block() {
        let mut w = world(16);
        for y in [0, 3, 7] {
            w.set_block(2, y, 2, 1);
        }
        assert_eq!(w.highest_block_y(2, 2), Some(7));
        w.set_block(2, 7, 2, AIR);
        assert_eq!(w.highest_block_y(2, 2), Some(3));
        w.set_block(2, 3, 2, AIR);
        w.set_block(2, 0, 2, AIR);
        assert_eq!(w.highest_block_y(2, 2), None);
        assert_eq!(w.highest_block_y(3, 2), None);
    }

    #[test]
    fn height_rescan_skips_missing_chunks() {
        let mut w = world(16);
        w.set_block(0, -5, 0, 1);
        w.set_block(0, 20, 0, 1);
        assert!(w.get_chunk(ChunkCoord::new(0, 0, 0)).is_none());
        assert_eq!(w.highest_block_y(0, 0), Some(20));
        w.set_block(0, 20, 0, AIR);
        assert_eq!(w.highest_block_y(0, 0), Some(-5));
        let e = w.height_entry(0, 0).unwrap();
        assert_eq!((e.min_chunk_j, e.max_chunk_j), (-1, 1));
    }

    #[test]
    fn removing_below_top_keeps_top() {
        let mut w = world(4);
        w.set_block(1, 2, 1, 1);
        w.set_block(1, 9, 1, 1);
        w.set_block(1, 2, 1, AIR);
        assert_eq!(w.highest_block_y(1, 1), Some(9));
    }

    #[test]
    fn opacity_queries_use_registry_defaults() {
        let mut w = world(4);
        w.set_block(0, 0, 0, 5);
        assert!(w.is_block_opaque(0, 0, 0));
        assert!(w.is_block_solid(0, 0, 0));
        assert!(!w.is_block_opaque(1, 0, 0));
        assert!(!w.is_block_solid(100, 0, 0));
    }

    #[test]
    fn add_chunk_indexes_blocks() {
        let mut w = world(4);
        let mut c = Chunk::new(4);
        c.set_block(1, 2, 3, 9, Rotation::default());
        assert!(w.add_chunk(ChunkCoord::new(0, 2, 0), c).is_none());
        assert_eq!(w.highest_block_y(1, 3), Some(10));
        assert_eq!(w.get_block(1, 10, 3), Some(9));
    }

    #[test]
    fn light_reads_zero_without_chunk() {
        let mut w = world(4);
        assert_eq!(w.get_block_light(0, 0, 0), 0);
        assert!(!w.set_light(LightChannel::Sun, 0, 0, 0, 15));
        w.set_block(0, 0, 0, AIR);
        assert!(w.set_light(LightChannel::Sun, 0, 0, 0, 15));
        assert_eq!(w.get_block_sunlight(0, 0, 0), 15);
        assert_eq!(w.get_block_sunlight_by_index(ChunkCoord::new(1, 0, 0), -4, 0, 0), 15);
        w.clear_light();
        assert_eq!(w.get_block_sunlight(0, 0, 0), 0);
    }
}
