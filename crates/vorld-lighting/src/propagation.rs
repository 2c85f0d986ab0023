use vorld_blocks::{AIR, MAX_LIGHT};
use vorld_chunk::LightChannel;
use vorld_geom::{Direction, Rotation};
use vorld_world::{ChunkCoord, World, chunk_origin, world_to_chunk};

use crate::{VoxelPos, WorkQueue};

#[inline]
pub(crate) fn step((x, y, z): VoxelPos, dir: Direction) -> VoxelPos {
    let (dx, dy, dz) = dir.offset();
    (x + dx, y + dy, z + dz)
}

/// Light a voxel contributes to its neighbours. Opaque emitters store no
/// ambient light, so their emission stands in for the block channel.
#[inline]
pub fn light_level(world: &World, channel: LightChannel, (x, y, z): VoxelPos) -> u8 {
    let stored = world.light(channel, x, y, z);
    match (channel, world.get_block(x, y, z)) {
        (LightChannel::Block, Some(id)) if id != AIR => {
            stored.max(world.registry().emitted_light(id))
        }
        _ => stored,
    }
}

#[inline]
pub(crate) fn emission_at(world: &World, (x, y, z): VoxelPos) -> u8 {
    world
        .get_block(x, y, z)
        .map_or(0, |id| world.registry().emitted_light(id))
}

/// Raises the stored light at `pos` to `value` if the voxel can hold light and
/// is currently dark or dimmer. Block light creates a missing chunk to hold
/// the value; sunlight never does.
pub fn try_set_light(world: &mut World, channel: LightChannel, pos: VoxelPos, value: u8) -> bool {
    raise_light(world, channel, pos, value, &mut Vec::new())
}

/// As [`try_set_light`], recording any chunk it had to create in `created`.
pub(crate) fn raise_light(
    world: &mut World,
    channel: LightChannel,
    pos: VoxelPos,
    value: u8,
    created: &mut Vec<ChunkCoord>,
) -> bool {
    let (x, y, z) = pos;
    let id = match world.get_block(x, y, z) {
        Some(id) => id,
        None if channel == LightChannel::Block => {
            let (coord, _) = world_to_chunk(world.chunk_size(), x, y, z);
            world.ensure_chunk(coord);
            created.push(coord);
            AIR
        }
        None => return false,
    };
    if world.registry().is_opaque(id) {
        return false;
    }
    let current = world.light(channel, x, y, z);
    if current == 0 || value > current {
        world.set_light(channel, x, y, z, value)
    } else {
        false
    }
}

/// Multi-source flood from every queued voxel until nothing brightens.
/// Leaves `queue` empty. Chunks created by block light stay without
/// sunlight; [`crate::Lighter`] floods sunlight into them afterwards.
pub fn propagate(world: &mut World, queue: &mut WorkQueue, channel: LightChannel) {
    flood(world, queue, channel, &mut Vec::new());
}

pub(crate) fn flood(
    world: &mut World,
    queue: &mut WorkQueue,
    channel: LightChannel,
    created: &mut Vec<ChunkCoord>,
) {
    let sun = channel == LightChannel::Sun;
    while let Some(pos) = queue.pop() {
        let level = light_level(world, channel, pos);
        if level == 0 {
            continue;
        }
        let (x, y, z) = pos;
        let (id, rotation) = match world.get_block(x, y, z) {
            Some(id) => (id, world.get_block_rotation(x, y, z).unwrap_or_default()),
            None => (AIR, Rotation::default()),
        };
        let props = world.registry().props(id);
        for dir in Direction::ALL {
            let attenuation = props.attenuation_along(rotation, dir.axis());
            // Direct sunlight falls through clear voxels without losing strength.
            let next = if sun && dir == Direction::Down && attenuation == 1 && level == MAX_LIGHT {
                MAX_LIGHT
            } else {
                level.saturating_sub(attenuation)
            };
            if next == 0 {
                continue;
            }
            let n = step(pos, dir);
            // Sunlight only spreads sideways into columns that are covered at
            // this height; open columns get their own beam.
            if sun && dir.is_horizontal() && !world.highest_block_y(n.0, n.2).is_some_and(|top| top > y) {
                continue;
            }
            if raise_light(world, channel, n, next, created) {
                queue.push(n);
            }
        }
    }
    queue.reset();
}

/// Clears light that depended on `origin` (whose level before the edit was
/// `origin_level`), collecting independently lit voxels bordering the cleared
/// region into `backfill`. Does not propagate the backfill.
pub(crate) fn remove_from(
    world: &mut World,
    channel: LightChannel,
    origin: VoxelPos,
    origin_level: u8,
    removal: &mut WorkQueue,
    backfill: &mut WorkQueue,
) {
    let sun = channel == LightChannel::Sun;
    removal.reset();
    removal.push(origin);
    let mut first = true;
    while let Some(pos) = removal.pop() {
        let level = if first {
            first = false;
            origin_level
        } else {
            light_level(world, channel, pos)
        };
        for dir in Direction::ALL {
            let n = step(pos, dir);
            let n_level = light_level(world, channel, n);
            if n_level == 0 {
                continue;
            }
            let dependent = n_level < level
                || (sun && dir == Direction::Down && level == MAX_LIGHT && n_level == MAX_LIGHT);
            if dependent {
                removal.push(n);
            }
            if !dependent || (!sun && emission_at(world, n) > 0) {
                backfill.push(n);
            }
        }
        world.set_light(channel, pos.0, pos.1, pos.2, 0);
        if !sun {
            let emission = emission_at(world, pos);
            if emission > 0 {
                try_set_light(world, channel, pos, emission);
                backfill.push(pos);
            }
        }
    }
    removal.reset();
}

/// Queues `pos` and its neighbours that currently carry light.
pub(crate) fn gather_lit(world: &World, channel: LightChannel, pos: VoxelPos, queue: &mut WorkQueue) {
    if light_level(world, channel, pos) > 0 {
        queue.push(pos);
    }
    for dir in Direction::ALL {
        let n = step(pos, dir);
        if light_level(world, channel, n) > 0 {
            queue.push(n);
        }
    }
}

/// Queues every sunlit voxel just outside the faces of chunk `coord`.
pub(crate) fn gather_sunlit_border(world: &World, coord: ChunkCoord, queue: &mut WorkQueue) {
    let size = world.chunk_size() as i32;
    let (ox, oy, oz) = chunk_origin(world.chunk_size(), coord);
    let mut check = |pos: VoxelPos| {
        if world.get_block_sunlight(pos.0, pos.1, pos.2) > 0 {
            queue.push(pos);
        }
    };
    for a in 0..size {
        for b in 0..size {
            check((ox - 1, oy + a, oz + b));
            check((ox + size, oy + a, oz + b));
            check((ox + a, oy - 1, oz + b));
            check((ox + a, oy + size, oz + b));
            check((ox + a, oy + b, oz - 1));
            check((ox + a, oy + b, oz + size));
        }
    }
}
