//! Block type registry: the light-relevant properties of every block id.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod types;

pub use registry::{BlockRegistry, RegistryError};
pub use types::{AIR, BlockId, BlockType, LightProps, MAX_LIGHT};
