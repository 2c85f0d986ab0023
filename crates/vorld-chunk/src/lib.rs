//! Fixed-size cubic voxel chunk: block ids, rotations and two packed light channels.
#![forbid(unsafe_code)]

use vorld_blocks::{AIR, BlockId, MAX_LIGHT};
use vorld_geom::Rotation;

/// The two independent light channels stored per voxel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LightChannel {
    /// Light from emissive blocks.
    Block,
    /// Light from the sky.
    Sun,
}

impl LightChannel {
    pub const ALL: [LightChannel; 2] = [LightChannel::Block, LightChannel::Sun];
}

// Block light lives in the low nibble, sunlight in the high nibble.
const BLOCK_MASK: u8 = 0x0f;
const SUN_SHIFT: u8 = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    size: usize,
    blocks: Vec<BlockId>,
    rotations: Vec<Rotation>,
    light: Vec<u8>,
}

impl Chunk {
    /// An all-air, unlit chunk of `size`³ voxels.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "chunk size must be at least 1");
        let volume = size * size * size;
        Chunk {
            size,
            blocks: vec![AIR; volume],
            rotations: vec![Rotation::default(); volume],
            light: vec![0; volume],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn volume(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn contains(&self, i: usize, j: usize, k: usize) -> bool {
        i < self.size && j < self.size && k < self.size
    }

    /// Linear index of local `(i, j, k)`: `i + size*j + size²*k`.
    #[inline]
    pub fn idx(&self, i: usize, j: usize, k: usize) -> usize {
        i + self.size * (j + self.size * k)
    }

    #[inline]
    pub fn block(&self, i: usize, j: usize, k: usize) -> BlockId {
        self.blocks[self.idx(i, j, k)]
    }

    /// Like [`Chunk::block`] but `None` outside the chunk.
    #[inline]
    pub fn get_block(&self, i: usize, j: usize, k: usize) -> Option<BlockId> {
        if self.contains(i, j, k) {
            Some(self.block(i, j, k))
        } else {
            None
        }
    }

    #[inline]
    pub fn rotation(&self, i: usize, j: usize, k: usize) -> Rotation {
        self.rotations[self.idx(i, j, k)]
    }

    #[inline]
    pub fn set_block(&mut self, i: usize, j: usize, k: usize, id: BlockId, rotation: Rotation) {
        let idx = self.idx(i, j, k);
        self.blocks[idx] = id;
        self.rotations[idx] = rotation;
    }

    #[inline]
    pub fn light(&self, channel: LightChannel, i: usize, j: usize, k: usize) -> u8 {
        let packed = self.light[self.idx(i, j, k)];
        match channel {
            LightChannel::Block => packed & BLOCK_MASK,
            LightChannel::Sun => packed >> SUN_SHIFT,
        }
    }

    /// Writes one channel, leaving the other untouched. Panics on values above 15.
    #[inline]
    pub fn set_light(&mut self, channel: LightChannel, i: usize, j: usize, k: usize, value: u8) {
        assert!(
            value <= MAX_LIGHT,
            "light value {value} out of range 0..={MAX_LIGHT}"
        );
        let idx = self.idx(i, j, k);
        let packed = self.light[idx];
        self.light[idx] = match channel {
            LightChannel::Block => (packed & !BLOCK_MASK) | value,
            LightChannel::Sun => (packed & BLOCK_MASK) | (value << SUN_SHIFT),
        };
    }

    #[inline]
    pub fn block_light(&self, i: usize, j: usize, k: usize) -> u8 {
        self.light(LightChannel::Block, i, j, k)
    }

    #[inline]
    pub fn sunlight(&self, i: usize, j: usize, k: usize) -> u8 {
        self.light(LightChannel::Sun, i, j, k)
    }

    pub fn has_non_air(&self) -> bool {
        self.blocks.iter().any(|&b| b != AIR)
    }

    pub fn clear_light(&mut self) {
        self.light.fill(0);
    }

    /// Iterates local `(i, j, k, id)` for every voxel, `i` fastest.
    pub fn iter_blocks(&self) -> impl Iterator<Item = (usize, usize, usize, BlockId)> + '_ {
        let s = self.size;
        self.blocks
            .iter()
            .enumerate()
            .map(move |(idx, &id)| (idx % s, (idx / s) % s, idx / (s * s), id))
    }
}
