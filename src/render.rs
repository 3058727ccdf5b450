use hashbrown::HashMap;
use voxpaint_textures::TextureAsset;
use voxpaint_world::{Voxel, VoxelCoord};

/// The renderer's view of the world. The controller pushes every effective
/// change through this; implementations never read the world back.
pub trait RenderScene {
    fn add_voxel(&mut self, voxel: &Voxel, texture: &TextureAsset);
    fn remove_voxel(&mut self, coord: VoxelCoord);
    fn clear(&mut self);
    /// A texture was added or replaced; cubes using it should rebind.
    fn texture_loaded(&mut self, _texture: &TextureAsset) {}
}

/// Headless scene that only logs.
#[derive(Default, Debug)]
pub struct LogScene {
    live: usize,
}

impl RenderScene for LogScene {
    fn add_voxel(&mut self, voxel: &Voxel, texture: &TextureAsset) {
        self.live += 1;
        log::debug!(target: "scene", "add {} '{}' ({} live)", voxel.coord, texture.name, self.live);
    }

    fn remove_voxel(&mut self, coord: VoxelCoord) {
        self.live = self.live.saturating_sub(1);
        log::debug!(target: "scene", "remove {} ({} live)", coord, self.live);
    }

    fn clear(&mut self) {
        log::debug!(target: "scene", "clear ({} dropped)", self.live);
        self.live = 0;
    }

    fn texture_loaded(&mut self, texture: &TextureAsset) {
        log::debug!(target: "scene", "texture '{}' bound", texture.name);
    }
}

/// Keeps a copy of what the renderer was told, keyed by cell.
#[derive(Default, Debug)]
pub struct MirrorScene {
    pub voxels: HashMap<VoxelCoord, String>,
    pub clears: usize,
    pub rebinds: Vec<String>,
}

impl RenderScene for MirrorScene {
    fn add_voxel(&mut self, voxel: &Voxel, texture: &TextureAsset) {
        self.voxels.insert(voxel.coord, texture.name.clone());
    }

    fn remove_voxel(&mut self, coord: VoxelCoord) {
        self.voxels.remove(&coord);
    }

    fn clear(&mut self) {
        self.voxels.clear();
        self.clears += 1;
    }

    fn texture_loaded(&mut self, texture: &TextureAsset) {
        self.rebinds.push(texture.name.clone());
    }
}
