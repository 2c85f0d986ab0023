//! Smooth light sampling at continuous positions, for things that are not
//! voxels.

use vorld_chunk::LightChannel;
use vorld_geom::{Vec3, lerp};
use vorld_world::World;

/// Trilinear block light at `p`. Voxel `(x, y, z)` is sampled at its centre
/// `(x + 0.5, y + 0.5, z + 0.5)`.
pub fn interpolate_light(world: &World, p: Vec3) -> f32 {
    interpolate(world, LightChannel::Block, p)
}

/// Trilinear sunlight at `p`.
pub fn interpolate_sunlight(world: &World, p: Vec3) -> f32 {
    interpolate(world, LightChannel::Sun, p)
}

fn interpolate(world: &World, channel: LightChannel, p: Vec3) -> f32 {
    let shifted = p - Vec3::HALF;
    let base = shifted.floor();
    let t = shifted.fract();
    let (bx, by, bz) = (base.x as i32, base.y as i32, base.z as i32);
    let sample = |dx: i32, dy: i32, dz: i32| f32::from(world.light(channel, bx + dx, by + dy, bz + dz));

    let x00 = lerp(sample(0, 0, 0), sample(1, 0, 0), t.x);
    let x10 = lerp(sample(0, 1, 0), sample(1, 1, 0), t.x);
    let x01 = lerp(sample(0, 0, 1), sample(1, 0, 1), t.x);
    let x11 = lerp(sample(0, 1, 1), sample(1, 1, 1), t.x);
    lerp(lerp(x00, x10, t.y), lerp(x01, x11, t.y), t.z)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use vorld_blocks::BlockRegistry;

    use super::*;

    fn lit_world() -> World {
        let mut world = World::new(4, Arc::new(BlockRegistry::new())).unwrap();
        world.set_block(0, 0, 0, 0);
        world.set_light(LightChannel::Block, 0, 0, 0, 8);
        world.set_light(LightChannel::Block, 1, 0, 0, 4);
        world.set_light(LightChannel::Sun, 0, 0, 0, 15);
        world
    }

    #[test]
    fn voxel_centres_return_stored_values() {
        let world = lit_world();
        assert_eq!(interpolate_light(&world, Vec3::new(0.5, 0.5, 0.5)), 8.0);
        assert_eq!(interpolate_light(&world, Vec3::new(1.5, 0.5, 0.5)), 4.0);
        assert_eq!(interpolate_sunlight(&world, Vec3::new(0.5, 0.5, 0.5)), 15.0);
    }

    #[test]
    fn halfway_between_centres_averages() {
        let world = lit_world();
        assert!((interpolate_light(&world, Vec3::new(1.0, 0.5, 0.5)) - 6.0).abs() < 1e-5);
        assert!((interpolate_light(&world, Vec3::new(0.5, 1.0, 0.5)) - 4.0).abs() < 1e-5);
    }

    #[test]
    fn missing_chunks_sample_as_dark() {
        let world = lit_world();
        assert_eq!(interpolate_light(&world, Vec3::new(40.5, 0.5, 0.5)), 0.0);
    }
}
