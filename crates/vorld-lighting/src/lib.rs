//! Incremental block light and sunlight for a chunked voxel world.
#![forbid(unsafe_code)]

mod lighter;
mod pass;
pub mod probe;
mod propagation;
mod queue;


pub use lighter::Lighter;
pub use pass::LightingPassStats;
pub use probe::{interpolate_light, interpolate_sunlight};
pub use propagation::{light_level, propagate, try_set_light};
pub use queue::WorkQueue;

/// World voxel coordinates.
pub type VoxelPos = (i32, i32, i32);
