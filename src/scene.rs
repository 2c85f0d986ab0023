use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use vorld_blocks::{AIR, BlockId, BlockRegistry};
use vorld_geom::Rotation;
use vorld_lighting::Lighter;
use vorld_world::{DEFAULT_CHUNK_SIZE, World};

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

#[derive(Debug, Deserialize)]
pub struct Scene {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Boxes written before the lighting pass.
    #[serde(default)]
    pub fill: Vec<Fill>,
    /// Single voxel edits applied after lighting, one at a time.
    #[serde(default)]
    pub edit: Vec<Edit>,
}

/// Inclusive box of one block type.
#[derive(Debug, Deserialize)]
pub struct Fill {
    pub min: [i32; 3],
    pub max: [i32; 3],
    pub block: String,
    #[serde(default)]
    pub rotation: Rotation,
}

#[derive(Debug, Deserialize)]
pub struct Edit {
    pub at: [i32; 3],
    pub block: String,
    #[serde(default)]
    pub rotation: Rotation,
}

fn resolve_block(reg: &BlockRegistry, name: &str) -> Result<BlockId> {
    match reg.id_by_name(name) {
        Some(id) => Ok(id),
        None if name == "air" => Ok(AIR),
        None => Err(anyhow!("unknown block `{name}`")),
    }
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        Self::from_toml_str(&src).with_context(|| format!("parsing scene {}", path.display()))
    }

    pub fn from_toml_str(src: &str) -> Result<Self> {
        Ok(toml::from_str(src)?)
    }

    /// Writes every fill into a fresh world. No light is computed.
    pub fn build_world(&self, reg: Arc<BlockRegistry>) -> Result<World> {
        let mut world = World::new(self.chunk_size, reg.clone())?;
        for fill in &self.fill {
            let id = resolve_block(&reg, &fill.block)?;
            let lo = [0, 1, 2].map(|a| fill.min[a].min(fill.max[a]));
            let hi = [0, 1, 2].map(|a| fill.min[a].max(fill.max[a]));
            for y in lo[1]..=hi[1] {
                for z in lo[2]..=hi[2] {
                    for x in lo[0]..=hi[0] {
                        world.set_block_rotated(x, y, z, id, fill.rotation);
                    }
                }
            }
        }
        log::info!(
            target: "world",
            "scene built: {} fills, {} chunks",
            self.fill.len(),
            world.chunk_count()
        );
        Ok(world)
    }

    /// Applies the edits through the incremental light engine.
    pub fn apply_edits(&self, world: &mut World, lighter: &mut Lighter) -> Result<usize> {
        let reg = world.registry().clone();
        for edit in &self.edit {
            let id = resolve_block(&reg, &edit.block)?;
            let [x, y, z] = edit.at;
            lighter.set_block(world, x, y, z, id, edit.rotation);
            log::debug!(target: "lighting", "edit ({x}, {y}, {z}) -> {}", edit.block);
        }
        Ok(self.edit.len())
    }
}
