use proptest::prelude::*;
use vorld_chunk::{Chunk, LightChannel};
use vorld_geom::Rotation;

fn dim() -> impl Strategy<Value = usize> {
    1usize..=8
}

proptest! {
    // idx maps each (i,j,k) within bounds to a unique in-range index, i fastest then j then k
    #[test]
    fn idx_is_unique_and_in_range(s in dim()) {
        let c = Chunk::new(s);
        let mut seen = vec![false; c.volume()];
        for k in 0..s { for j in 0..s { for i in 0..s {
            let idx = c.idx(i, j, k);
            prop_assert_eq!(idx, i + s * j + s * s * k);
            prop_assert!(!seen[idx]);
            seen[idx] = true;
        }}}
        prop_assert!(seen.into_iter().all(|b| b));
    }

    // Writing one voxel's block, rotation or light never disturbs any other voxel
    #[test]
    fn writes_are_local(s in dim(), seed in any::<u64>(), id in 1u16..100, light in 0u8..=15, sun in 0u8..=15) {
        let mut c = Chunk::new(s);
        let v = (seed as usize) % c.volume();
        let (i, j, k) = (v % s, (v / s) % s, v / (s * s));
        c.set_block(i, j, k, id, Rotation::BackLeft);
        c.set_light(LightChannel::Block, i, j, k, light);
        c.set_light(LightChannel::Sun, i, j, k, sun);
        for (ci, cj, ck, b) in c.iter_blocks() {
            if (ci, cj, ck) == (i, j, k) {
                prop_assert_eq!(b, id);
                prop_assert_eq!(c.rotation(ci, cj, ck), Rotation::BackLeft);
                prop_assert_eq!(c.block_light(ci, cj, ck), light);
                prop_assert_eq!(c.sunlight(ci, cj, ck), sun);
            } else {
                prop_assert_eq!(b, 0);
                prop_assert_eq!(c.block_light(ci, cj, ck), 0);
                prop_assert_eq!(c.sunlight(ci, cj, ck), 0);
            }
        }
    }

    // get_block is Some exactly inside the cube
    #[test]
    fn get_block_bounds(s in dim(), i in 0usize..10, j in 0usize..10, k in 0usize..10) {
        let c = Chunk::new(s);
        prop_assert_eq!(c.get_block(i, j, k).is_some(), i < s && j < s && k < s);
    }
}
