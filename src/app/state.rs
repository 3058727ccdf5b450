use std::path::PathBuf;

use thiserror::Error;
use voxpaint_geom::Vec3;
use voxpaint_pick::Picker;
use voxpaint_textures::DecodeError;
use voxpaint_world::VoxelCoord;

use super::watchers::DropWatcher;
use crate::camera::{FlyCamera, MoveInput};
use crate::command::{Command, CommandQueue};
use crate::config::AppConfig;
use crate::gamestate::GameState;
use crate::input::{PointerButton, Selection};
use crate::render::RenderScene;
use crate::runtime::{DecodeJob, Runtime};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("starting decode workers: {0}")]
    Runtime(#[from] rayon::ThreadPoolBuildError),
    #[error("watching {path}: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

/// Owns the editor state and applies input through the command queue.
///
/// Input methods only enqueue; nothing changes until the next [`step`](App::step).
pub struct App<S: RenderScene> {
    pub gs: GameState,
    pub queue: CommandQueue,
    pub runtime: Runtime,
    pub cam: FlyCamera,
    pub picker: Picker,
    pub scene: S,
    pub(crate) drop_watch: Option<DropWatcher>,
    pub(crate) cmd_processed_total: usize,
}

impl<S: RenderScene> App<S> {
    pub fn new(cfg: &AppConfig, scene: S) -> Result<Self, AppError> {
        let runtime = Runtime::new(cfg.textures.decode_workers)?;
        let cam = FlyCamera::with_config(Vec3::from(cfg.camera.start_position), &cfg.camera);
        let gs = GameState::new(cfg.textures.size, (cfg.viewport.width, cfg.viewport.height));
        Ok(Self {
            gs,
            queue: CommandQueue::new(),
            runtime,
            cam,
            picker: Picker::new(cfg.world.grid_unit, cfg.world.max_pick_distance),
            scene,
            drop_watch: None,
            cmd_processed_total: 0,
        })
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.gs.viewport = (width, height);
    }

    pub fn pointer_clicked(&mut self, button: PointerButton, sx: f32, sy: f32) {
        self.queue
            .emit_now(Command::PointerClicked { button, sx, sy });
    }

    pub fn look(&mut self, dx: f32, dy: f32) {
        self.queue.emit_now(Command::LookRequested { dx, dy });
    }

    pub fn fly(&mut self, input: MoveInput, dt: f32) {
        self.queue
            .emit_now(Command::MovementRequested { input, dt });
    }

    pub fn select(&mut self, selection: Selection) {
        self.queue
            .emit_now(Command::SelectionChanged { selection });
    }

    pub fn set_parameter(&mut self, key: &str, value: &str) {
        self.queue.emit_now(Command::ParameterChanged {
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    pub fn place_at(&mut self, coord: VoxelCoord, texture: &str) {
        self.queue.emit_now(Command::PlaceAt {
            coord,
            texture: texture.to_string(),
        });
    }

    pub fn remove_at(&mut self, coord: VoxelCoord) {
        self.queue.emit_now(Command::RemoveAt { coord });
    }

    /// Queue a background decode of the image at `path`. The texture is named
    /// after the file unless `name` is given. Returns the name used.
    pub fn request_texture(&mut self, path: PathBuf, name: Option<String>) -> Option<String> {
        let name = match name {
            Some(n) => n,
            None => match super::watchers::texture_name_for(&path) {
                Some(n) => n,
                None => {
                    log::warn!("cannot name texture from {}", path.display());
                    return None;
                }
            },
        };
        self.runtime.submit_decode(DecodeJob {
            name: name.clone(),
            path,
            size: self.gs.textures.size(),
            epoch: self.gs.textures.epoch(),
        });
        Some(name)
    }

    /// Decode and store a texture immediately.
    pub fn ingest_texture(&mut self, name: &str, bytes: &[u8]) -> Result<(), DecodeError> {
        let asset = self.gs.textures.ingest(name, bytes)?;
        self.scene.texture_loaded(asset);
        Ok(())
    }

    /// Commands handled since startup.
    pub fn processed_commands(&self) -> usize {
        self.cmd_processed_total
    }
}
