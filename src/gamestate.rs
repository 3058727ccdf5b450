use voxpaint_io::SceneParameters;
use voxpaint_textures::TextureStore;
use voxpaint_world::World;

use crate::input::Selection;

/// Everything the controller mutates in response to commands.
pub struct GameState {
    pub tick: u64,
    pub world: World,
    pub textures: TextureStore,
    pub params: SceneParameters,
    pub selection: Selection,
    /// Viewport size in pixels, for pointer rays.
    pub viewport: (f32, f32),
}

impl GameState {
    pub fn new(texture_size: u32, viewport: (f32, f32)) -> Self {
        Self {
            tick: 0,
            world: World::new(),
            textures: TextureStore::with_size(texture_size),
            params: SceneParameters::default(),
            selection: Selection::Eraser,
            viewport,
        }
    }
}
