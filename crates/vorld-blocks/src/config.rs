use serde::Deserialize;

// Top-level blocks config file
#[derive(Deserialize, Debug, Default)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

// Every property is optional; omitted ones fall back to an opaque, solid,
// non-emitting cube (or to empty space for id 0).
#[derive(Deserialize, Debug, Clone, Default)]
pub struct BlockDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<u16>,
    #[serde(default)]
    pub opaque: Option<bool>,
    #[serde(default)]
    pub solid: Option<bool>,
    #[serde(default)]
    pub attenuation: Option<u8>,
    // Local X, Y, Z
    #[serde(default)]
    pub directional_attenuation: Option<[u8; 3]>,
    #[serde(default)]
    pub light: Option<u8>,
}
