use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vorld", version, about = "Light a voxel scene and inspect the result")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a scene, light it in parallel, apply its edits and print a summary.
    Light(SceneArgs),
    /// Light a scene, then sample the light at a point.
    Probe(ProbeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SceneArgs {
    /// Block table; defaults to assets/voxels/blocks.toml under the assets root.
    #[arg(long)]
    pub blocks: Option<PathBuf>,
    /// Scene description (chunk size, fills, edits).
    #[arg(long)]
    pub scene: PathBuf,
    /// Assets root; falls back to $VORLD_ASSETS, then a search of nearby dirs.
    #[arg(long)]
    pub assets: Option<PathBuf>,
    /// Lighting threads (default: one per core).
    #[arg(long)]
    pub workers: Option<usize>,
    /// Width in chunks of the square column regions handed to each worker.
    #[arg(long, default_value_t = 4)]
    pub region_chunks: i32,
}

#[derive(Args, Debug)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub scene: SceneArgs,
    #[arg(allow_negative_numbers = true)]
    pub x: f32,
    #[arg(allow_negative_numbers = true)]
    pub y: f32,
    #[arg(allow_negative_numbers = true)]
    pub z: f32,
}
