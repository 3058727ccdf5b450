mod events;
mod persistence;
mod script;
mod state;
mod step;
mod watchers;

pub use state::{App, AppError};
pub use watchers::{DropWatcher, is_image_path, texture_name_for};
