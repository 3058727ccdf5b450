use voxpaint_pick::Intent;
use voxpaint_textures::TextureAsset;
use voxpaint_world::VoxelCoord;

use super::App;
use crate::camera::PointerRay;
use crate::command::{Command, CommandEnvelope};
use crate::input::{PointerButton, Selection, intent_for};
use crate::render::RenderScene;

impl<S: RenderScene> App<S> {
    pub(super) fn handle_command(&mut self, env: CommandEnvelope) {
        Self::log_command(self.gs.tick, &env.kind);
        match env.kind {
            Command::PointerClicked { button, sx, sy } => {
                self.handle_pointer_clicked(button, sx, sy);
            }
            Command::LookRequested { dx, dy } => {
                self.cam.look(dx, dy);
            }
            Command::MovementRequested { input, dt } => {
                self.cam.update(&input, dt);
            }
            Command::SelectionChanged { selection } => {
                self.handle_selection_changed(selection);
            }
            Command::ParameterChanged { key, value } => {
                if !self.gs.params.set(&key, &value) {
                    log::warn!("ignoring parameter {}={}", key, value);
                }
            }
            Command::PlaceAt { coord, texture } => {
                self.handle_place_at(coord, &texture);
            }
            Command::RemoveAt { coord } => {
                self.handle_remove_at(coord);
            }
            Command::TextureDecoded { asset, epoch } => {
                self.handle_texture_decoded(*asset, epoch);
            }
        }
    }

    fn handle_pointer_clicked(&mut self, button: PointerButton, sx: f32, sy: f32) {
        let Some(intent) = intent_for(button, &self.gs.selection) else {
            return;
        };
        let (w, h) = self.gs.viewport;
        let Some(ray) = self.cam.ray_from_pointer(sx, sy, w, h) else {
            log::debug!("no pointer ray at ({}, {})", sx, sy);
            return;
        };
        let Some(coord) = self.picker.target_in(&self.gs.world, &ray, intent) else {
            log::debug!("click at ({}, {}) hit nothing editable", sx, sy);
            return;
        };
        match (intent, &self.gs.selection) {
            (Intent::Place, Selection::Texture(name)) => {
                let texture = name.clone();
                self.queue.emit_now(Command::PlaceAt { coord, texture });
            }
            (Intent::Place, Selection::Eraser) | (Intent::Remove, _) => {
                self.queue.emit_now(Command::RemoveAt { coord });
            }
        }
    }

    fn handle_selection_changed(&mut self, selection: Selection) {
        if let Selection::Texture(name) = &selection {
            if !self.gs.textures.contains(name) {
                log::warn!("selected texture '{}' is not loaded yet", name);
            }
        }
        self.gs.selection = selection;
    }

    fn handle_place_at(&mut self, coord: VoxelCoord, texture: &str) {
        if !self.gs.world.place(coord, texture, &self.gs.textures) {
            return;
        }
        if let (Some(voxel), Some(asset)) = (self.gs.world.get(coord), self.gs.textures.get(texture)) {
            self.scene.add_voxel(voxel, asset);
        }
    }

    fn handle_remove_at(&mut self, coord: VoxelCoord) {
        if self.gs.world.remove(coord).is_some() {
            self.scene.remove_voxel(coord);
        }
    }

    fn handle_texture_decoded(&mut self, asset: TextureAsset, epoch: u64) {
        let name = asset.name.clone();
        if self.gs.textures.insert_if_current(asset, epoch) {
            if let Some(asset) = self.gs.textures.get(&name) {
                self.scene.texture_loaded(asset);
            }
        }
    }

    fn log_command(tick: u64, cmd: &Command) {
        match cmd {
            Command::LookRequested { dx, dy } => {
                log::trace!(target: "commands", "[tick {}] LookRequested dx={:.1} dy={:.1}", tick, dx, dy);
            }
            Command::MovementRequested { input, dt } => {
                log::trace!(target: "commands", "[tick {}] MovementRequested {:?} dt={:.3}", tick, input, dt);
            }
            Command::PointerClicked { button, sx, sy } => {
                log::info!(target: "commands", "[tick {}] PointerClicked {:?} at ({:.0}, {:.0})", tick, button, sx, sy);
            }
            Command::SelectionChanged { selection } => {
                log::info!(target: "commands", "[tick {}] SelectionChanged {}", tick, selection);
            }
            Command::ParameterChanged { key, value } => {
                log::info!(target: "commands", "[tick {}] ParameterChanged {}={}", tick, key, value);
            }
            Command::PlaceAt { coord, texture } => {
                log::info!(target: "commands", "[tick {}] PlaceAt {} '{}'", tick, coord, texture);
            }
            Command::RemoveAt { coord } => {
                log::info!(target: "commands", "[tick {}] RemoveAt {}", tick, coord);
            }
            Command::TextureDecoded { asset, epoch } => {
                log::debug!(target: "commands", "[tick {}] TextureDecoded '{}' epoch={}", tick, asset.name, epoch);
            }
        }
    }
}
