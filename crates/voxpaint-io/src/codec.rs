use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use voxpaint_textures::TextureStore;
use voxpaint_world::{VoxelCoord, World};

use crate::camera::CameraState;
use crate::document::{BlockEntry, SaveDocument};
use crate::error::CodecError;
use crate::params::SceneParameters;

/// Everything a save document restores, built fresh so the caller can swap it
/// in wholesale.
#[derive(Debug)]
pub struct LoadedScene {
    pub world: World,
    pub textures: TextureStore,
    pub camera: CameraState,
    pub parameters: SceneParameters,
    /// Texture entries that failed to decode and were left out.
    pub skipped_textures: Vec<String>,
    /// Block entries that had no effect (duplicate cell or unknown texture).
    pub ignored_blocks: usize,
}

pub fn serialize(
    world: &World,
    textures: &TextureStore,
    camera: &CameraState,
    parameters: &SceneParameters,
) -> SaveDocument {
    let dangling = world.dangling_references(textures);
    if !dangling.is_empty() {
        log::warn!(
            "saving {} voxel(s) whose texture is no longer loaded (first at {})",
            dangling.len(),
            dangling[0]
        );
    }
    let blocks = world
        .sorted()
        .into_iter()
        .map(|v| BlockEntry {
            x: v.coord.x,
            y: v.coord.y,
            z: v.coord.z,
            texture_name: v.texture.clone(),
        })
        .collect();
    let textures = textures
        .iter()
        .map(|t| (t.name.clone(), t.source_encoding.clone()))
        .collect();
    SaveDocument {
        blocks,
        camera: camera.to_entry(),
        textures,
        parameters: parameters.clone(),
    }
}

/// Rebuild a scene from a parsed document. Textures that fail to decode are
/// skipped; blocks are replayed in document order so the first entry for a
/// cell wins.
pub fn deserialize(doc: &SaveDocument, texture_size: u32) -> Result<LoadedScene, CodecError> {
    let camera = CameraState::from_entry(&doc.camera)?;

    let mut textures = TextureStore::with_size(texture_size);
    let mut skipped_textures = Vec::new();
    for (name, url) in &doc.textures {
        if let Err(e) = textures.ingest_data_url(name, url) {
            log::warn!("skipping texture '{}' in save: {}", name, e);
            skipped_textures.push(name.clone());
        }
    }

    let mut world = World::new();
    let mut ignored_blocks = 0usize;
    for b in &doc.blocks {
        if !world.place(VoxelCoord::new(b.x, b.y, b.z), &b.texture_name, &textures) {
            ignored_blocks += 1;
        }
    }
    if ignored_blocks > 0 {
        log::debug!("{} block entries had no effect on load", ignored_blocks);
    }

    Ok(LoadedScene {
        world,
        textures,
        camera,
        parameters: doc.parameters.clone(),
        skipped_textures,
        ignored_blocks,
    })
}

pub fn to_json_string(doc: &SaveDocument) -> Result<String, CodecError> {
    Ok(serde_json::to_string(doc)?)
}

pub fn from_json_str(json: &str) -> Result<SaveDocument, CodecError> {
    Ok(serde_json::from_str(json)?)
}

/// Write `doc` next to `path` and rename it into place, so a crash mid-write
/// never leaves a truncated save behind.
pub fn save_to_path(path: &Path, doc: &SaveDocument) -> Result<(), CodecError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, doc)?;
        writer.flush()?;
    }
    std::fs::rename(&tmp_path, path)?;
    log::info!("saved {} block(s), {} texture(s) to {}", doc.blocks.len(), doc.textures.len(), path.display());
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<SaveDocument, CodecError> {
    let file = File::open(path)?;
    let doc: SaveDocument = serde_json::from_reader(BufReader::new(file))?;
    Ok(doc)
}
