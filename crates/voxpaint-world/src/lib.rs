//! Sparse voxel grid: placement, removal, and occupancy queries.
#![forbid(unsafe_code)]

pub mod coord;
pub mod world;

pub use coord::VoxelCoord;
pub use world::{Voxel, World, WorldStats};
