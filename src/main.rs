mod assets;
mod cli;
mod scene;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use vorld_blocks::BlockRegistry;
use vorld_geom::Vec3;
use vorld_lighting::{Lighter, interpolate_light, interpolate_sunlight};
use vorld_runtime::{Runtime, light_world_parallel, partition_columns};
use vorld_world::World;

use crate::cli::{Cli, Command, SceneArgs};
use crate::scene::Scene;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    match Cli::parse().command {
        Command::Light(args) => {
            let world = light_scene(&args)?;
            print_summary(&world);
        }
        Command::Probe(args) => {
            let world = light_scene(&args.scene)?;
            let p = Vec3::new(args.x, args.y, args.z);
            let v = p.floor();
            let (x, y, z) = (v.x as i32, v.y as i32, v.z as i32);
            let block = world
                .get_block(x, y, z)
                .map(|id| {
                    world
                        .registry()
                        .get(id)
                        .map_or_else(|| format!("#{id}"), |ty| ty.name.clone())
                })
                .unwrap_or_else(|| "unloaded".to_string());
            println!("voxel ({x}, {y}, {z}): {block}");
            println!(
                "  stored block light {}, sunlight {}",
                world.get_block_light(x, y, z),
                world.get_block_sunlight(x, y, z)
            );
            match world.highest_block_y(x, z) {
                Some(top) => println!("  column top y = {top}"),
                None => println!("  column top unset"),
            }
            println!(
                "interpolated at ({}, {}, {}): block light {:.2}, sunlight {:.2}",
                p.x,
                p.y,
                p.z,
                interpolate_light(&world, p),
                interpolate_sunlight(&world, p)
            );
        }
    }
    Ok(())
}

fn light_scene(args: &SceneArgs) -> Result<World> {
    let root = assets::resolve_assets_root(args.assets.clone());
    let blocks = args.blocks.clone().unwrap_or_else(|| assets::blocks_path(&root));
    let reg = BlockRegistry::load_from_path(&blocks)
        .with_context(|| format!("loading block table {}", blocks.display()))?;
    let scene = Scene::load(&args.scene)?;
    let mut world = scene.build_world(Arc::new(reg))?;

    let runtime = Runtime::new(args.workers).context("starting lighting workers")?;
    let regions = partition_columns(&world, args.region_chunks);
    let stats = light_world_parallel(&mut world, &runtime, &regions)?;
    log::info!(
        target: "lighting",
        "{} regions lit: {} sun seeds, {} emitters",
        regions.len(),
        stats.sun_seeds,
        stats.emitters
    );

    let edits = scene.apply_edits(&mut world, &mut Lighter::new())?;
    if edits > 0 {
        log::info!(target: "lighting", "applied {edits} edits");
    }
    Ok(world)
}

fn print_summary(world: &World) {
    let (mut voxels, mut solid, mut block_lit, mut sun_lit) = (0usize, 0usize, 0usize, 0usize);
    for (_, chunk) in world.chunks() {
        for (i, j, k, id) in chunk.iter_blocks() {
            voxels += 1;
            if world.registry().is_solid(id) {
                solid += 1;
            }
            if chunk.block_light(i, j, k) > 0 {
                block_lit += 1;
            }
            if chunk.sunlight(i, j, k) > 0 {
                sun_lit += 1;
            }
        }
    }
    println!("chunks: {} ({} voxels, {} solid)", world.chunk_count(), voxels, solid);
    println!("block-lit voxels: {block_lit}");
    println!("sunlit voxels: {sun_lit}");
}
