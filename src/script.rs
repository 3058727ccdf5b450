//! Line-oriented input scripts for driving the editor without a window.
//!
//! One command per line; `#` starts a comment. Coordinates are grid cells,
//! pointer positions are viewport pixels.
//!
//! ```text
//! texture assets/grass.png          # queue a decode, named after the file
//! wait                              # block until queued decodes are applied
//! select grass.png
//! click left 640 360
//! place 0 1 0 grass.png
//! remove 0 1 0
//! look 120 -40
//! move forward 0.5
//! set sunIntensity 3.5
//! save out/scene.json
//! ```
use std::path::PathBuf;

use thiserror::Error;
use voxpaint_io::CodecError;
use voxpaint_world::VoxelCoord;

use crate::camera::MoveInput;
use crate::input::PointerButton;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: {message}")]
    Invalid { line: usize, message: String },
    #[error("line {line}: {source}")]
    Codec {
        line: usize,
        #[source]
        source: CodecError,
    },
    #[error("reading script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScriptCommand {
    Texture { path: PathBuf, name: Option<String> },
    Select { name: String },
    Eraser,
    Click { button: PointerButton, sx: f32, sy: f32 },
    Place { coord: VoxelCoord, texture: Option<String> },
    Remove { coord: VoxelCoord },
    Look { dx: f32, dy: f32 },
    Move { input: MoveInput, seconds: f32 },
    Set { key: String, value: String },
    Save { path: PathBuf },
    Load { path: PathBuf },
    Wait,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScriptLine {
    /// 1-based source line.
    pub line: usize,
    pub command: ScriptCommand,
}

pub fn parse_script(src: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut out = Vec::new();
    for (idx, raw) in src.lines().enumerate() {
        let line = idx + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        let words: Vec<&str> = text.split_whitespace().collect();
        out.push(ScriptLine {
            line,
            command: parse_command(line, &words)?,
        });
    }
    Ok(out)
}

fn parse_command(line: usize, words: &[&str]) -> Result<ScriptCommand, ScriptError> {
    let invalid = |message: String| ScriptError::Invalid { line, message };
    let (head, args) = match words.split_first() {
        Some((h, a)) => (*h, a),
        None => return Err(invalid("empty command".into())),
    };
    let arity = |min: usize, max: usize| {
        if args.len() < min || args.len() > max {
            Err(invalid(format!(
                "'{head}' takes {} argument(s), got {}",
                if min == max { min.to_string() } else { format!("{min}-{max}") },
                args.len()
            )))
        } else {
            Ok(())
        }
    };
    let num = |s: &str| -> Result<f32, ScriptError> {
        s.parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| invalid(format!("'{s}' is not a number")))
    };
    let int = |s: &str| -> Result<i32, ScriptError> {
        s.parse::<i32>()
            .map_err(|_| invalid(format!("'{s}' is not an integer")))
    };
    let coord = |a: &[&str]| -> Result<VoxelCoord, ScriptError> {
        Ok(VoxelCoord::new(int(a[0])?, int(a[1])?, int(a[2])?))
    };

    let cmd = match head {
        "texture" => {
            arity(1, 2)?;
            ScriptCommand::Texture {
                path: PathBuf::from(args[0]),
                name: args.get(1).map(|s| s.to_string()),
            }
        }
        "select" => {
            arity(1, 1)?;
            ScriptCommand::Select {
                name: args[0].to_string(),
            }
        }
        "eraser" => {
            arity(0, 0)?;
            ScriptCommand::Eraser
        }
        "click" => {
            arity(3, 3)?;
            let button = args[0].parse::<PointerButton>().map_err(invalid)?;
            ScriptCommand::Click {
                button,
                sx: num(args[1])?,
                sy: num(args[2])?,
            }
        }
        "place" => {
            arity(3, 4)?;
            ScriptCommand::Place {
                coord: coord(args)?,
                texture: args.get(3).map(|s| s.to_string()),
            }
        }
        "remove" => {
            arity(3, 3)?;
            ScriptCommand::Remove {
                coord: coord(args)?,
            }
        }
        "look" => {
            arity(2, 2)?;
            ScriptCommand::Look {
                dx: num(args[0])?,
                dy: num(args[1])?,
            }
        }
        "move" => {
            arity(2, 2)?;
            let mut input = MoveInput::default();
            match args[0] {
                "forward" => input.forward = true,
                "back" => input.back = true,
                "left" => input.left = true,
                "right" => input.right = true,
                "up" => input.up = true,
                "down" => input.down = true,
                other => return Err(invalid(format!("unknown direction '{other}'"))),
            }
            let seconds = num(args[1])?;
            if seconds < 0.0 {
                return Err(invalid("duration must not be negative".into()));
            }
            ScriptCommand::Move { input, seconds }
        }
        "set" => {
            arity(2, 2)?;
            ScriptCommand::Set {
                key: args[0].to_string(),
                value: args[1].to_string(),
            }
        }
        "save" => {
            arity(1, 1)?;
            ScriptCommand::Save {
                path: PathBuf::from(args[0]),
            }
        }
        "load" => {
            arity(1, 1)?;
            ScriptCommand::Load {
                path: PathBuf::from(args[0]),
            }
        }
        "wait" => {
            arity(0, 0)?;
            ScriptCommand::Wait
        }
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            });
        }
    };
    Ok(cmd)
}
