use std::path::Path;

use voxpaint_io::{CodecError, LoadedScene, SaveDocument, deserialize, load_from_path, save_to_path, serialize};

use super::App;
use crate::input::Selection;
use crate::render::RenderScene;

impl<S: RenderScene> App<S> {
    /// The current world, textures, camera and parameters as a document.
    pub fn snapshot(&self) -> SaveDocument {
        serialize(&self.gs.world, &self.gs.textures, &self.cam.state(), &self.gs.params)
    }

    pub fn save(&self, path: &Path) -> Result<(), CodecError> {
        save_to_path(path, &self.snapshot())
    }

    /// Replace the whole scene with a saved one. On error nothing changes.
    pub fn load(&mut self, path: &Path) -> Result<(), CodecError> {
        let doc = load_from_path(path)?;
        self.load_document(&doc)?;
        log::info!("loaded {}", path.display());
        Ok(())
    }

    pub fn load_document(&mut self, doc: &SaveDocument) -> Result<(), CodecError> {
        let loaded = deserialize(doc, self.gs.textures.size())?;
        self.install(loaded);
        Ok(())
    }

    fn install(&mut self, loaded: LoadedScene) {
        let LoadedScene {
            world,
            textures,
            camera,
            parameters,
            skipped_textures,
            ignored_blocks,
        } = loaded;

        self.scene.clear();
        self.gs.textures.replace_with(textures);
        self.gs.world.reset();
        for v in world.sorted() {
            self.gs.world.place(v.coord, &v.texture, &self.gs.textures);
        }
        self.cam.set_state(&camera);
        self.gs.params = parameters;
        if let Selection::Texture(name) = &self.gs.selection {
            if !self.gs.textures.contains(name) {
                log::info!("selected texture '{}' is gone; switching to eraser", name);
                self.gs.selection = Selection::Eraser;
            }
        }

        for asset in self.gs.textures.iter() {
            self.scene.texture_loaded(asset);
        }
        for v in self.gs.world.sorted() {
            if let Some(asset) = self.gs.textures.get(&v.texture) {
                self.scene.add_voxel(v, asset);
            }
        }
        log::info!(
            "scene: {} voxel(s), {} texture(s), {} texture(s) skipped, {} block entr(ies) ignored",
            self.gs.world.len(),
            self.gs.textures.len(),
            skipped_textures.len(),
            ignored_blocks
        );
    }
}
