use proptest::prelude::*;
use vorld_blocks::config::{BlockDef, BlocksConfig};
use vorld_blocks::{BlockRegistry, LightProps};

fn block_def() -> impl Strategy<Value = (u16, bool, bool, u8, u8)> {
    (1u16..512, any::<bool>(), any::<bool>(), 1u8..=15, 0u8..=15)
}

proptest! {
    // Every registered id reports exactly the configured properties,
    // every other non-zero id reads back as the solid default
    #[test]
    fn registered_props_round_trip(defs in prop::collection::vec(block_def(), 1..24), probe in 1u16..1024) {
        let mut seen = std::collections::HashSet::new();
        let blocks: Vec<BlockDef> = defs
            .into_iter()
            .filter(|d| seen.insert(d.0))
            .map(|(id, opaque, solid, attenuation, light)| BlockDef {
                name: format!("b{id}"),
                id: Some(id),
                opaque: Some(opaque),
                solid: Some(solid),
                attenuation: Some(attenuation),
                directional_attenuation: None,
                light: Some(light),
            })
            .collect();
        let reg = BlockRegistry::from_config(BlocksConfig { blocks: blocks.clone() }).unwrap();
        for def in &blocks {
            let id = def.id.unwrap();
            prop_assert_eq!(reg.is_opaque(id), def.opaque.unwrap());
            prop_assert_eq!(reg.is_solid(id), def.solid.unwrap());
            prop_assert_eq!(reg.attenuation(id), def.attenuation.unwrap());
            prop_assert_eq!(reg.emitted_light(id), def.light.unwrap());
        }
        if !seen.contains(&probe) {
            prop_assert_eq!(reg.props(probe), LightProps::SOLID);
        }
        prop_assert_eq!(reg.props(0), LightProps::AIR);
    }
}
