use std::sync::Arc;

use proptest::prelude::*;
use vorld_blocks::{BlockId, BlockRegistry};
use vorld_chunk::LightChannel;
use vorld_geom::Rotation;
use vorld_lighting::Lighter;
use vorld_world::World;

const BLOCKS: &str = r#"
    [[blocks]]
    name = "stone"
    id = 1

    [[blocks]]
    name = "lamp"
    id = 2
    opaque = false
    light = 15

    [[blocks]]
    name = "torch"
    id = 3
    light = 9
"#;

fn registry() -> Arc<BlockRegistry> {
    Arc::new(BlockRegistry::from_toml_str(BLOCKS).unwrap())
}

fn floor_world() -> World {
    let mut w = World::new(4, registry()).unwrap();
    for z in 0..8 {
        for x in 0..8 {
            w.set_block(x, 0, z, 1);
        }
    }
    w
}

fn edit() -> impl Strategy<Value = (i32, i32, i32, BlockId)> {
    (0i32..8, 1i32..5, 0i32..8, 0u16..4)
}

/// Same blocks, chunks and height index as `world`, lit from scratch.
fn relit_from_scratch(world: &World) -> World {
    let mut fresh = world.clone();
    fresh.clear_light();
    Lighter::new().perform_lighting_pass(&mut fresh, None);
    fresh
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // Opaque voxels hold no light in either channel after any edit sequence
    #[test]
    fn opaque_voxels_stay_dark(edits in prop::collection::vec(edit(), 1..16)) {
        let mut world = floor_world();
        let mut lighter = Lighter::new();
        lighter.perform_lighting_pass(&mut world, None);
        for &(x, y, z, id) in &edits {
            lighter.set_block(&mut world, x, y, z, id, Rotation::default());
        }
        for (coord, chunk) in world.chunks() {
            for (i, j, k, id) in chunk.iter_blocks() {
                if world.registry().is_opaque(id) {
                    prop_assert_eq!(chunk.block_light(i, j, k), 0, "{:?} {:?}", coord, (i, j, k));
                    prop_assert_eq!(chunk.sunlight(i, j, k), 0, "{:?} {:?}", coord, (i, j, k));
                }
            }
        }
    }

    // Incremental light in both channels equals a from-scratch pass over the same world
    #[test]
    fn incremental_light_matches_scratch(edits in prop::collection::vec(edit(), 1..12)) {
        let mut world = floor_world();
        let mut lighter = Lighter::new();
        lighter.perform_lighting_pass(&mut world, None);
        for &(x, y, z, id) in &edits {
            lighter.set_block(&mut world, x, y, z, id, Rotation::default());
        }
        let fresh = relit_from_scratch(&world);
        for channel in LightChannel::ALL {
            for y in -16..=20 {
                for z in -16..=24 {
                    for x in -16..=24 {
                        prop_assert_eq!(
                            world.light(channel, x, y, z),
                            fresh.light(channel, x, y, z),
                            "{:?} differs at ({}, {}, {})", channel, x, y, z
                        );
                    }
                }
            }
        }
    }
}
