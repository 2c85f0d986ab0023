use crate::ChunkCoord;

/// Voxel index inside a chunk, each component in `0..chunk_size`.
pub type LocalPos = (usize, usize, usize);

/// Normalises a chunk coordinate plus a possibly out-of-range local index
/// (negative, or `>= size`) into the chunk that actually holds the voxel and
/// the in-range index within it.
#[inline]
pub fn adjust_chunk_indices(
    size: usize,
    chunk: ChunkCoord,
    i: i32,
    j: i32,
    k: i32,
) -> (ChunkCoord, LocalPos) {
    let s = size as i32;
    (
        chunk.offset(i.div_euclid(s), j.div_euclid(s), k.div_euclid(s)),
        (
            i.rem_euclid(s) as usize,
            j.rem_euclid(s) as usize,
            k.rem_euclid(s) as usize,
        ),
    )
}

/// Chunk and local index of world voxel `(x, y, z)`, using floor division.
#[inline]
pub fn world_to_chunk(size: usize, x: i32, y: i32, z: i32) -> (ChunkCoord, LocalPos) {
    adjust_chunk_indices(size, ChunkCoord::default(), x, y, z)
}

/// World position of local `(0, 0, 0)` in `chunk`.
#[inline]
pub fn chunk_origin(size: usize, chunk: ChunkCoord) -> (i32, i32, i32) {
    let s = size as i32;
    (chunk.cx * s, chunk.cy * s, chunk.cz * s)
}
