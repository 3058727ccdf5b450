//! Voxel painting sandbox: the controller that ties the world, textures,
//! picking and persistence crates to input, a fly camera and a render scene.
#![forbid(unsafe_code)]

pub mod app;
pub mod camera;
pub mod command;
pub mod config;
pub mod gamestate;
pub mod input;
pub mod render;
pub mod runtime;
pub mod script;

pub use app::{App, AppError};
pub use camera::{FlyCamera, MoveInput, PointerRay};
pub use config::AppConfig;
pub use input::{PointerButton, Selection};
pub use render::{LogScene, MirrorScene, RenderScene};
