use std::path::Path;
use std::time::Duration;

use super::App;
use crate::input::Selection;
use crate::render::RenderScene;
use crate::script::{ScriptCommand, ScriptError, ScriptLine, parse_script};

const DECODE_WAIT: Duration = Duration::from_secs(30);

impl<S: RenderScene> App<S> {
    /// Parse and run a script file. Relative paths inside it resolve against
    /// the script's directory.
    pub fn run_script_file(&mut self, path: &Path) -> Result<(), ScriptError> {
        let src = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lines = parse_script(&src)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        log::info!("running {} ({} command(s))", path.display(), lines.len());
        self.run_script(&lines, base)
    }

    /// Run parsed commands in order, stepping after each one.
    pub fn run_script(&mut self, lines: &[ScriptLine], base: &Path) -> Result<(), ScriptError> {
        for sl in lines {
            self.run_script_line(sl, base)?;
            self.step();
        }
        Ok(())
    }

    fn run_script_line(&mut self, sl: &ScriptLine, base: &Path) -> Result<(), ScriptError> {
        let line = sl.line;
        match &sl.command {
            ScriptCommand::Texture { path, name } => {
                self.request_texture(base.join(path), name.clone());
            }
            ScriptCommand::Select { name } => self.select(Selection::Texture(name.clone())),
            ScriptCommand::Eraser => self.select(Selection::Eraser),
            ScriptCommand::Click { button, sx, sy } => self.pointer_clicked(*button, *sx, *sy),
            ScriptCommand::Place { coord, texture } => {
                let texture = match texture {
                    Some(t) => t.clone(),
                    None => match self.gs.selection.texture() {
                        Some(t) => t.to_string(),
                        None => {
                            return Err(ScriptError::Invalid {
                                line,
                                message: "place needs a texture while the eraser is selected".into(),
                            });
                        }
                    },
                };
                self.place_at(*coord, &texture);
            }
            ScriptCommand::Remove { coord } => self.remove_at(*coord),
            ScriptCommand::Look { dx, dy } => self.look(*dx, *dy),
            ScriptCommand::Move { input, seconds } => self.fly(*input, *seconds),
            ScriptCommand::Set { key, value } => self.set_parameter(key, value),
            ScriptCommand::Save { path } => {
                self.step();
                self.save(&base.join(path))
                    .map_err(|source| ScriptError::Codec { line, source })?;
            }
            ScriptCommand::Load { path } => {
                self.load(&base.join(path))
                    .map_err(|source| ScriptError::Codec { line, source })?;
            }
            ScriptCommand::Wait => {
                self.wait_for_decodes(DECODE_WAIT);
            }
        }
        Ok(())
    }
}
