//! Texture assets: decoding, canonical resizing, normal maps, and the name-keyed store.
#![forbid(unsafe_code)]

pub mod asset;
pub mod encode;
pub mod error;
pub mod normal;
pub mod store;

pub use asset::TextureAsset;
pub use error::DecodeError;
pub use image::RgbaImage;
pub use normal::derive_normal_map;
pub use store::TextureStore;

/// Edge length in pixels every ingested texture is resized to.
pub const CANONICAL_TEXTURE_SIZE: u32 = 256;
