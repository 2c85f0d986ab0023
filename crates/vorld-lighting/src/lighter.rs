use vorld_blocks::{AIR, BlockId, MAX_LIGHT};
use vorld_chunk::LightChannel;
use vorld_geom::Rotation;
use vorld_world::{ChunkCoord, World, chunk_origin, world_to_chunk};

use crate::propagation::{flood, gather_lit, gather_sunlit_border, light_level, remove_from, try_set_light};
use crate::{VoxelPos, WorkQueue};

/// Incremental light engine. Owns its scratch queues, so one `Lighter` per
/// thread (or per world) is all that is needed; it keeps no state between
/// calls.
#[derive(Clone, Debug, Default)]
pub struct Lighter {
    pub(crate) queue: WorkQueue,
    pub(crate) removal: WorkQueue,
    /// Chunks created by the last block-light flood.
    pub(crate) created: Vec<ChunkCoord>,
}

impl Lighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets block light at a voxel and floods it outward.
    pub fn add_light(&mut self, world: &mut World, x: i32, y: i32, z: i32, level: u8) {
        if level == 0 {
            return;
        }
        let pos = (x, y, z);
        let opaque_source =
            world.is_block_opaque(x, y, z) && light_level(world, LightChannel::Block, pos) >= level;
        if try_set_light(world, LightChannel::Block, pos, level.min(MAX_LIGHT)) || opaque_source {
            self.queue.push(pos);
            self.flood(world, LightChannel::Block);
        }
    }

    /// Clears block light that depended on this voxel and re-floods the hole
    /// from surviving sources.
    pub fn remove_light(&mut self, world: &mut World, x: i32, y: i32, z: i32) {
        let level = light_level(world, LightChannel::Block, (x, y, z));
        self.remove_with_level(world, LightChannel::Block, (x, y, z), level);
    }

    /// Seeds full sunlight at a voxel and floods it outward.
    pub fn add_sunlight(&mut self, world: &mut World, x: i32, y: i32, z: i32) {
        try_set_light(world, LightChannel::Sun, (x, y, z), MAX_LIGHT);
        self.queue.push((x, y, z));
        self.flood(world, LightChannel::Sun);
    }

    /// Sunlight counterpart of [`Lighter::remove_light`]; a full-strength
    /// voxel directly below a full-strength voxel is treated as part of the
    /// same beam.
    pub fn remove_sunlight(&mut self, world: &mut World, x: i32, y: i32, z: i32) {
        let level = world.get_block_sunlight(x, y, z);
        self.remove_with_level(world, LightChannel::Sun, (x, y, z), level);
    }

    fn remove_with_level(&mut self, world: &mut World, channel: LightChannel, pos: VoxelPos, level: u8) {
        remove_from(world, channel, pos, level, &mut self.removal, &mut self.queue);
        self.flood(world, channel);
    }

    /// Repairs block light (and re-floods both channels) after the block at
    /// `(x, y, z)` changed from `previous` to `new`. The world must already
    /// hold the new block.
    pub fn update_light_for_block(
        &mut self,
        world: &mut World,
        x: i32,
        y: i32,
        z: i32,
        previous: Option<BlockId>,
        new: BlockId,
    ) {
        let pos = (x, y, z);
        let registry = world.registry().clone();
        let prev_props = previous.map(|id| registry.props(id));
        let new_props = registry.props(new);

        let previous_light = world
            .get_block_light(x, y, z)
            .max(prev_props.map_or(0, |p| p.emission));
        // Optimistic: assumes the old block let light through unattenuated.
        let new_light = if new_props.is_emitter() {
            i32::from(new_props.emission)
        } else if !prev_props.is_some_and(|p| p.is_emitter()) && !new_props.opaque {
            i32::from(previous_light) - (i32::from(new_props.max_attenuation()) - 1)
        } else {
            0
        };
        // An opaque block must end up holding no light even when it emits more.
        if previous_light > 0 && (i32::from(previous_light) > new_light || new_props.opaque) {
            self.remove_with_level(world, LightChannel::Block, pos, previous_light);
        }

        if new_props.is_emitter() {
            self.add_light(world, x, y, z, new_props.emission);
        } else if !new_props.opaque {
            for channel in LightChannel::ALL {
                gather_lit(world, channel, pos, &mut self.queue);
                self.flood(world, channel);
            }
        }
    }

    /// Floods the queued voxels on `channel`. Chunks that block light had to
    /// create are then lit by the sunlight bordering them.
    pub(crate) fn flood(&mut self, world: &mut World, channel: LightChannel) {
        flood(world, &mut self.queue, channel, &mut self.created);
        if self.created.is_empty() {
            return;
        }
        log::trace!(target: "lighting", "block light created {} chunks", self.created.len());
        for coord in self.created.drain(..) {
            gather_sunlit_border(world, coord, &mut self.queue);
        }
        flood(world, &mut self.queue, LightChannel::Sun, &mut self.created);
    }

    /// Places (or with `AIR`, removes) a block and brings both light channels
    /// up to date around it.
    pub fn set_block(&mut self, world: &mut World, x: i32, y: i32, z: i32, id: BlockId, rotation: Rotation) {
        let size = world.chunk_size() as i32;
        let previous = world.get_block(x, y, z);
        let previous_top = world.highest_block_y(x, z);
        world.set_block_rotated(x, y, z, id, rotation);

        if id != AIR {
            if previous.is_some() {
                self.remove_sunlight(world, x, y, z);
            }
            let mut row_y = y.div_euclid(size) * size + size - 1;
            let mut opened = previous.is_none();
            if row_y == y && world.get_block(x, y + 1, z).is_none() {
                // Open the chunk above so the column keeps a lit ceiling.
                world.set_block(x, y + 1, z, AIR);
                row_y += size;
                opened = true;
            }
            if opened {
                self.light_opened_chunk(world, (x, row_y, z), (x, y, z));
            }
        } else if previous_top == Some(y) {
            if world.get_block(x, y + 1, z).is_some() {
                self.add_sunlight(world, x, y + 1, z);
            } else {
                self.add_sunlight(world, x, y, z);
            }
        }

        self.update_light_for_block(world, x, y, z, previous, id);
    }

    /// Removes the block at `(x, y, z)`, leaving air.
    pub fn remove_block(&mut self, world: &mut World, x: i32, y: i32, z: i32) {
        self.set_block(world, x, y, z, AIR, Rotation::default());
    }

    /// Lights the top row of a freshly created chunk: from the chunk above if
    /// there is one, otherwise as open sky for every column not covered
    /// higher up.
    fn light_opened_chunk(&mut self, world: &mut World, (x, row_y, z): VoxelPos, placed: VoxelPos) {
        let size = world.chunk_size() as i32;
        let (coord, _) = world_to_chunk(world.chunk_size(), x, row_y, z);
        let (ox, _, oz) = chunk_origin(world.chunk_size(), coord);
        if world.get_chunk(coord.offset(0, 1, 0)).is_some() {
            for cz in oz..oz + size {
                for cx in ox..ox + size {
                    if world.get_block_sunlight(cx, row_y + 1, cz) > 0 {
                        self.queue.push((cx, row_y + 1, cz));
                    }
                }
            }
            self.flood(world, LightChannel::Sun);
            return;
        }
        for cz in oz..oz + size {
            for cx in ox..ox + size {
                if (cx, row_y, cz) == placed {
                    continue;
                }
                if world.highest_block_y(cx, cz).is_none_or(|top| top < row_y) {
                    self.add_sunlight(world, cx, row_y, cz);
                }
            }
        }
    }
}
