use vorld_blocks::MAX_LIGHT;
use vorld_chunk::LightChannel;
use vorld_world::{ChunkBounds, World, chunk_origin};

use crate::Lighter;
use crate::propagation::try_set_light;

/// Counts from one bulk lighting pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LightingPassStats {
    /// Height-index entries (chunk columns) visited.
    pub columns: usize,
    /// Voxel columns that received a sunlight seed.
    pub sun_seeds: usize,
    /// Emitting voxels seeded.
    pub emitters: usize,
}

impl Lighter {
    /// Lights everything inside `bounds` (the whole world when `None`) from
    /// scratch: a full-strength sunlight seed on top of every column, then
    /// every emitter. Assumes the region holds no stale light.
    pub fn perform_lighting_pass(&mut self, world: &mut World, bounds: Option<ChunkBounds>) -> LightingPassStats {
        self.perform_lighting_pass_with_progress(world, bounds, |_, _| {})
    }

    /// As [`Lighter::perform_lighting_pass`], calling `progress(done, total)`
    /// after each chunk column has been sunlit.
    pub fn perform_lighting_pass_with_progress(
        &mut self,
        world: &mut World,
        bounds: Option<ChunkBounds>,
        mut progress: impl FnMut(usize, usize),
    ) -> LightingPassStats {
        let size = world.chunk_size() as i32;
        let in_bounds = |ci: i32, ck: i32| bounds.is_none_or(|b| b.contains_column(ci, ck));
        let mut tops: Vec<(i32, i32, i32)> = world
            .height_entries()
            .filter(|e| in_bounds(e.chunk_i, e.chunk_k))
            .map(|e| (e.chunk_i, e.chunk_k, e.ceiling_y()))
            .collect();
        tops.sort_unstable();

        let mut stats = LightingPassStats::default();
        let total = tops.len();
        for (done, &(ci, ck, ceiling)) in tops.iter().enumerate() {
            let (ox, oz) = (ci * size, ck * size);
            for z in oz..oz + size {
                for x in ox..ox + size {
                    if try_set_light(world, LightChannel::Sun, (x, ceiling, z), MAX_LIGHT) {
                        stats.sun_seeds += 1;
                    }
                    self.queue.push((x, ceiling, z));
                }
            }
            self.flood(world, LightChannel::Sun);
            stats.columns += 1;
            progress(done + 1, total);
        }

        let mut emitters = Vec::new();
        for (coord, chunk) in world.chunks() {
            if bounds.is_some_and(|b| !b.contains(coord)) {
                continue;
            }
            let (ox, oy, oz) = chunk_origin(world.chunk_size(), coord);
            for (i, j, k, id) in chunk.iter_blocks() {
                let emission = world.registry().emitted_light(id);
                if emission > 0 {
                    emitters.push(((ox + i as i32, oy + j as i32, oz + k as i32), emission));
                }
            }
        }
        emitters.sort_unstable();
        // Opaque emitters refuse the write but still act as sources.
        for (pos, emission) in emitters {
            try_set_light(world, LightChannel::Block, pos, emission);
            self.queue.push(pos);
            stats.emitters += 1;
        }
        self.flood(world, LightChannel::Block);

        log::debug!(
            target: "lighting",
            "lighting pass: {} columns, {} sun seeds, {} emitters",
            stats.columns,
            stats.sun_seeds,
            stats.emitters
        );
        stats
    }
}
