//! Save documents: the JSON layout, camera/parameter records, and the codec
//! that turns a world plus its textures into a document and back.
#![forbid(unsafe_code)]

pub mod camera;
pub mod codec;
pub mod document;
pub mod error;
pub mod params;

pub use camera::CameraState;
pub use codec::{LoadedScene, deserialize, from_json_str, load_from_path, save_to_path, serialize, to_json_string};
pub use document::{BlockEntry, CameraEntry, Rotation, SaveDocument};
pub use error::CodecError;
pub use params::SceneParameters;
