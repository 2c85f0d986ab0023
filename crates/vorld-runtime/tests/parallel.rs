use std::sync::Arc;

use proptest::prelude::*;
use vorld_blocks::BlockRegistry;
use vorld_lighting::Lighter;
use vorld_runtime::{Runtime, light_world_parallel, partition_columns};
use vorld_world::{LightChannel, World};

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
    name = "glass"
    id = 3
    opaque = false
"#;

fn scene(extent: i32) -> World {
    let reg = Arc::new(BlockRegistry::from_toml_str(BLOCKS).unwrap());
    let mut w = World::new(4, reg).unwrap();
    for z in 0..extent {
        for x in 0..extent {
            let height = 1 + (x * 3 + z * 5) % 7;
            for y in 0..height {
                w.set_block(x, y, z, 1);
            }
            if (x + 2 * z) % 11 == 0 {
                w.set_block(x, height, z, 2);
            }
            if (x * z) % 13 == 5 {
                w.set_block(x, height + 2, z, 3);
            }
        }
    }
    w
}

#[test]
fn parallel_lighting_matches_sequential_pass() {
    let mut sequential = scene(24);
    Lighter::new().perform_lighting_pass(&mut sequential, None);

    let mut parallel = scene(24);
    let runtime = Runtime::new(Some(3)).unwrap();
    let regions = partition_columns(&parallel, 2);
    assert_eq!(regions.len(), 9);
    light_world_parallel(&mut parallel, &runtime, &regions).unwrap();

    for channel in LightChannel::ALL {
        for y in -16..=28 {
            for z in 0..24 {
                for x in 0..24 {
                    assert_eq!(
                        parallel.light(channel, x, y, z),
                        sequential.light(channel, x, y, z),
                        "{channel:?} at ({x}, {y}, {z})"
                    );
                }
            }
        }
    }
    assert_eq!(runtime.queue_debug_counts().0, 0);
    assert!(runtime.drain_worker_results().is_empty());
}

#[test]
fn empty_world_has_no_regions() {
    let reg = Arc::new(BlockRegistry::new());
    let world = World::new(8, reg).unwrap();
    assert!(partition_columns(&world, 4).is_empty());
}

proptest! {
    // Regions never overlap and together cover every chunk column
    #[test]
    fn partition_covers_each_column_once(
        cells in prop::collection::vec((-6i32..6, -3i32..3, -6i32..6), 1..30),
        n in 1i32..4,
    ) {
        let reg = Arc::new(BlockRegistry::new());
        let mut world = World::new(2, reg).unwrap();
        for &(cx, cy, cz) in &cells {
            world.set_block(cx * 2, cy * 2, cz * 2, 1);
        }
        let regions = partition_columns(&world, n);
        for entry in world.height_entries() {
            let owners = regions
                .iter()
                .filter(|r| r.contains_column(entry.chunk_i, entry.chunk_k))
                .count();
            prop_assert_eq!(owners, 1);
        }
        for r in &regions {
            prop_assert!(r.max.cx - r.min.cx < n && r.max.cz - r.min.cz < n);
        }
    }
}
