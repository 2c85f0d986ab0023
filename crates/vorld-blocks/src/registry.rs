use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;
use vorld_geom::{Axis, Rotation};

use super::config::{BlockDef, BlocksConfig};
use super::types::{AIR, BlockId, BlockType, LightProps, MAX_LIGHT};

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("failed to read block config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse block config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("block id {id} is claimed by both `{existing}` and `{name}`")]
    DuplicateId {
        id: BlockId,
        existing: String,
        name: String,
    },
    #[error("block name `{0}` is declared twice")]
    DuplicateName(String),
    #[error("block `{name}` emits light {light}, above the maximum of {MAX_LIGHT}")]
    LightOutOfRange { name: String, light: u8 },
    #[error("block `{0}` has an attenuation of 0")]
    ZeroAttenuation(String),
    #[error("block id 0 is reserved for empty space; `{0}` cannot be opaque, solid or emissive")]
    ReservedAir(String),
}

/// Registry of block types by id. Lookups never fail: ids without an entry
/// resolve to [`LightProps::AIR`] for id 0 and [`LightProps::SOLID`] otherwise.
#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    blocks: Vec<Option<BlockType>>,
    by_name: HashMap<String, BlockId>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize).and_then(Option::as_ref)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockType> {
        self.blocks.iter().flatten()
    }

    #[inline]
    pub fn props(&self, id: BlockId) -> LightProps {
        match self.get(id) {
            Some(ty) => ty.props,
            None if id == AIR => LightProps::AIR,
            None => LightProps::SOLID,
        }
    }

    #[inline]
    pub fn is_opaque(&self, id: BlockId) -> bool {
        self.props(id).opaque
    }

    #[inline]
    pub fn is_solid(&self, id: BlockId) -> bool {
        self.props(id).solid
    }

    #[inline]
    pub fn attenuation(&self, id: BlockId) -> u8 {
        self.props(id).attenuation
    }

    #[inline]
    pub fn directional_attenuation(&self, id: BlockId) -> Option<[u8; 3]> {
        self.props(id).directional_attenuation
    }

    #[inline]
    pub fn emitted_light(&self, id: BlockId) -> u8 {
        self.props(id).emission
    }

    #[inline]
    pub fn attenuation_along(&self, id: BlockId, rotation: Rotation, axis: Axis) -> u8 {
        self.props(id).attenuation_along(rotation, axis)
    }

    /// Adds a block type after checking it against the light model's limits.
    pub fn register(&mut self, ty: BlockType) -> Result<BlockId, RegistryError> {
        let p = &ty.props;
        if p.attenuation == 0
            || p.directional_attenuation
                .is_some_and(|per_axis| per_axis.contains(&0))
        {
            return Err(RegistryError::ZeroAttenuation(ty.name));
        }
        if p.emission > MAX_LIGHT {
            return Err(RegistryError::LightOutOfRange {
                light: p.emission,
                name: ty.name,
            });
        }
        if ty.id == AIR && (p.opaque || p.solid || p.is_emitter()) {
            return Err(RegistryError::ReservedAir(ty.name));
        }
        if let Some(existing) = self.get(ty.id) {
            return Err(RegistryError::DuplicateId {
                id: ty.id,
                existing: existing.name.clone(),
                name: ty.name,
            });
        }
        if self.by_name.contains_key(&ty.name) {
            return Err(RegistryError::DuplicateName(ty.name));
        }
        let id = ty.id;
        let slot = id as usize;
        if self.blocks.len() <= slot {
            self.blocks.resize(slot + 1, None);
        }
        self.by_name.insert(ty.name.clone(), id);
        self.blocks[slot] = Some(ty);
        Ok(id)
    }

    pub fn load_from_path(blocks_path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let blocks_toml = fs::read_to_string(blocks_path)?;
        Self::from_toml_str(&blocks_toml)
    }

    pub fn from_toml_str(src: &str) -> Result<Self, RegistryError> {
        let cfg: BlocksConfig = toml::from_str(src)?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, RegistryError> {
        let mut reg = BlockRegistry::new();
        for def in cfg.blocks {
            // Unnumbered entries take the next id after everything seen so far,
            // never the reserved air slot.
            let id = def.id.unwrap_or_else(|| reg.blocks.len().max(1) as BlockId);
            reg.register(compile_def(id, def))?;
        }
        log::debug!(target: "blocks", "registry loaded with {} block types", reg.len());
        Ok(reg)
    }
}

fn compile_def(id: BlockId, def: BlockDef) -> BlockType {
    let defaults = if id == AIR {
        LightProps::AIR
    } else {
        LightProps::SOLID
    };
    let props = LightProps {
        opaque: def.opaque.unwrap_or(defaults.opaque),
        solid: def.solid.unwrap_or(defaults.solid),
        attenuation: def.attenuation.unwrap_or(defaults.attenuation),
        directional_attenuation: def.directional_attenuation,
        emission: def.light.unwrap_or(0),
    };
    BlockType::new(id, def.name, props)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCKS: &str = r#"
        [[blocks]]
        name = "air"
        id = 0

        [[blocks]]
        name = "stone"

        [[blocks]]
        name = "glass"
        opaque = false

        [[blocks]]
        name = "lamp"
        id = 10
        light = 15

        [[blocks]]
        name = "log"
        directional_attenuation = [2, 1, 3]
    "#;

    #[test]
    fn unnumbered_entries_get_sequential_ids_after_air() {
        let reg = BlockRegistry::from_toml_str(BLOCKS).expect("registry");
        assert_eq!(reg.id_by_name("air"), Some(0));
        assert_eq!(reg.id_by_name("stone"), Some(1));
        assert_eq!(reg.id_by_name("glass"), Some(2));
        assert_eq!(reg.id_by_name("lamp"), Some(10));
        assert_eq!(reg.id_by_name("log"), Some(11));
        assert_eq!(reg.len(), 5);
    }

    #[test]
    fn missing_entries_fall_back_to_defaults() {
        let reg = BlockRegistry::new();
        assert_eq!(reg.props(0), LightProps::AIR);
        assert_eq!(reg.props(42), LightProps::SOLID);
        assert!(reg.is_opaque(7) && reg.is_solid(7));
        assert_eq!(reg.attenuation(7), 1);
        assert_eq!(reg.emitted_light(7), 0);
    }

    #[test]
    fn declared_properties_override_defaults() {
        let reg = BlockRegistry::from_toml_str(BLOCKS).expect("registry");
        let glass = reg.id_by_name("glass").unwrap();
        assert!(!reg.is_opaque(glass));
        assert!(reg.is_solid(glass));
        let lamp = reg.id_by_name("lamp").unwrap();
        assert_eq!(reg.emitted_light(lamp), 15);
        assert!(reg.is_opaque(lamp));
        assert!(!reg.is_solid(AIR));
    }

    #[test]
    fn directional_attenuation_follows_rotation() {
        let reg = BlockRegistry::from_toml_str(BLOCKS).expect("registry");
        let log_id = reg.id_by_name("log").unwrap();
        assert_eq!(reg.directional_attenuation(log_id), Some([2, 1, 3]));
        assert_eq!(reg.attenuation_along(log_id, Rotation::UpForward, Axis::X), 2);
        assert_eq!(reg.attenuation_along(log_id, Rotation::UpForward, Axis::Y), 1);
        assert_eq!(reg.attenuation_along(log_id, Rotation::UpForward, Axis::Z), 3);
        // local up now points along global X, local forward stays on Z
        assert_eq!(reg.attenuation_along(log_id, Rotation::RightForward, Axis::X), 1);
        assert_eq!(reg.attenuation_along(log_id, Rotation::RightForward, Axis::Y), 2);
        assert_eq!(reg.attenuation_along(log_id, Rotation::RightForward, Axis::Z), 3);
    }

    #[test]
    fn rejects_out_of_range_light() {
        let err = BlockRegistry::from_toml_str(
            r#"
            [[blocks]]
            name = "sun"
            light = 16
        "#,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::LightOutOfRange { light: 16, .. }));
    }

    #[test]
    fn rejects_zero_attenuation() {
        let err = BlockRegistry::from_toml_str(
            r#"
            [[blocks]]
            name = "void"
            directional_attenuation = [1, 0, 1]
        "#,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::ZeroAttenuation(name) if name == "void"));
    }

    #[test]
    fn rejects_duplicates_and_opaque_air() {
        let dup_id = BlockRegistry::from_toml_str(
            r#"
            [[blocks]]
            name = "a"
            id = 3
            [[blocks]]
            name = "b"
            id = 3
        "#,
        )
        .unwrap_err();
        assert!(matches!(dup_id, RegistryError::DuplicateId { id: 3, .. }));

        let dup_name = BlockRegistry::from_toml_str(
            r#"
            [[blocks]]
            name = "a"
            [[blocks]]
            name = "a"
        "#,
        )
        .unwrap_err();
        assert!(matches!(dup_name, RegistryError::DuplicateName(_)));

        let air = BlockRegistry::from_toml_str(
            r#"
            [[blocks]]
            name = "fog"
            id = 0
            opaque = true
        "#,
        )
        .unwrap_err();
        assert!(matches!(air, RegistryError::ReservedAir(_)));
    }
}
