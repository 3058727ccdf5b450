use hashbrown::{HashMap, HashSet};
use voxpaint_textures::TextureStore;

use crate::coord::VoxelCoord;

/// A placed cube. The texture is referenced by name, not owned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Voxel {
    pub coord: VoxelCoord,
    pub texture: String,
}

#[derive(Default, Debug, Clone, Copy)]
pub struct WorldStats {
    pub voxels: usize,
    pub textures_in_use: usize,
    pub rev: u64,
}

/// Sparse grid of voxels with simple change tracking.
///
/// Placing onto an occupied cell and removing an empty one are silent no-ops.
/// `rev` advances only on effective mutations.
#[derive(Clone, Debug, Default)]
pub struct World {
    voxels: HashMap<VoxelCoord, Voxel>,
    rev: u64,
}

impl PartialEq for World {
    fn eq(&self, other: &Self) -> bool {
        self.voxels == other.voxels
    }
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn bump(&mut self) -> u64 {
        self.rev = self.rev.wrapping_add(1).max(1);
        self.rev
    }

    /// Latest revision stamp; 0 for a world that was never mutated.
    #[inline]
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn get(&self, coord: VoxelCoord) -> Option<&Voxel> {
        self.voxels.get(&coord)
    }

    #[inline]
    pub fn contains(&self, coord: VoxelCoord) -> bool {
        self.voxels.contains_key(&coord)
    }

    /// Insert a voxel unless `coord` is taken or `texture` is unknown to the
    /// store. Returns whether the world changed.
    pub fn place(&mut self, coord: VoxelCoord, texture: &str, textures: &TextureStore) -> bool {
        if self.voxels.contains_key(&coord) {
            return false;
        }
        if !textures.contains(texture) {
            log::debug!("place at {} ignored: texture '{}' not loaded", coord, texture);
            return false;
        }
        self.voxels.insert(
            coord,
            Voxel {
                coord,
                texture: texture.to_string(),
            },
        );
        self.bump();
        true
    }

    /// Delete the voxel at `coord`, returning it if there was one.
    pub fn remove(&mut self, coord: VoxelCoord) -> Option<Voxel> {
        let removed = self.voxels.remove(&coord);
        if removed.is_some() {
            self.bump();
        }
        removed
    }

    pub fn occupied(&self) -> HashSet<VoxelCoord> {
        self.voxels.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Voxel> {
        self.voxels.values()
    }

    /// Voxels ordered by coordinate, for deterministic output.
    pub fn sorted(&self) -> Vec<&Voxel> {
        let mut v: Vec<&Voxel> = self.voxels.values().collect();
        v.sort_unstable_by_key(|vx| vx.coord);
        v
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Remove every voxel.
    pub fn reset(&mut self) {
        if !self.voxels.is_empty() {
            self.voxels.clear();
            self.bump();
        }
    }

    pub fn stats(&self) -> WorldStats {
        let textures: HashSet<&str> = self.voxels.values().map(|v| v.texture.as_str()).collect();
        WorldStats {
            voxels: self.voxels.len(),
            textures_in_use: textures.len(),
            rev: self.rev,
        }
    }

    /// Voxels whose texture is no longer present in `textures`, sorted.
    pub fn dangling_references(&self, textures: &TextureStore) -> Vec<VoxelCoord> {
        let mut out: Vec<VoxelCoord> = self
            .voxels
            .values()
            .filter(|v| !textures.contains(&v.texture))
            .map(|v| v.coord)
            .collect();
        out.sort_unstable();
        out
    }
}
