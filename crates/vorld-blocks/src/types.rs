use vorld_geom::{Axis, Rotation};

pub type BlockId = u16;

/// Id 0 is always empty space.
pub const AIR: BlockId = 0;

/// Highest value either light channel can hold.
pub const MAX_LIGHT: u8 = 15;

/// What the light engine needs to know about a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LightProps {
    pub opaque: bool,
    pub solid: bool,
    /// Amount subtracted from light leaving this voxel, at least 1.
    pub attenuation: u8,
    /// Per local axis (X, Y, Z) overrides of `attenuation`.
    pub directional_attenuation: Option<[u8; 3]>,
    /// Block light emitted, 0..=15.
    pub emission: u8,
}

impl LightProps {
    pub const AIR: LightProps = LightProps {
        opaque: false,
        solid: false,
        attenuation: 1,
        directional_attenuation: None,
        emission: 0,
    };

    /// Fallback for ids the registry knows nothing about.
    pub const SOLID: LightProps = LightProps {
        opaque: true,
        solid: true,
        attenuation: 1,
        directional_attenuation: None,
        emission: 0,
    };

    /// Attenuation for light travelling along the global `axis` through a block
    /// placed with `rotation`.
    #[inline]
    pub fn attenuation_along(&self, rotation: Rotation, axis: Axis) -> u8 {
        match self.directional_attenuation {
            Some(per_axis) => per_axis[rotation.local_axis(axis).index()],
            None => self.attenuation,
        }
    }

    /// Largest attenuation along any axis.
    pub fn max_attenuation(&self) -> u8 {
        self.directional_attenuation
            .and_then(|per_axis| per_axis.into_iter().max())
            .unwrap_or(self.attenuation)
    }

    #[inline]
    pub fn is_emitter(&self) -> bool {
        self.emission > 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub props: LightProps,
}

impl BlockType {
    pub fn new(id: BlockId, name: impl Into<String>, props: LightProps) -> Self {
        Self {
            id,
            name: name.into(),
            props,
        }
    }
}
