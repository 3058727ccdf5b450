use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::encode::{bytes_from_data_url, to_png_data_url};
use crate::error::DecodeError;
use crate::normal::derive_normal_map;

/// A decoded, canonical-size texture with its derived normal map.
///
/// Assets are immutable once built; replacing a texture means building a new
/// asset under the same name.
#[derive(Clone, Debug)]
pub struct TextureAsset {
    pub name: String,
    pub color: RgbaImage,
    pub normal: RgbaImage,
    /// The color image as a PNG data URL, as written to save files.
    pub source_encoding: String,
}

impl TextureAsset {
    /// Decode any supported image format and resize it (nearest neighbour) to
    /// `size`×`size`. Safe to call off the main thread.
    pub fn decode(name: impl Into<String>, bytes: &[u8], size: u32) -> Result<Self, DecodeError> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        if img.width() == 0 || img.height() == 0 {
            return Err(DecodeError::Empty);
        }
        let color = if img.dimensions() == (size, size) {
            img
        } else {
            imageops::resize(&img, size, size, FilterType::Nearest)
        };
        Self::from_color(name, color)
    }

    /// Decode a persisted `data:` URL entry.
    pub fn from_data_url(name: impl Into<String>, url: &str, size: u32) -> Result<Self, DecodeError> {
        let bytes = bytes_from_data_url(url)?;
        Self::decode(name, &bytes, size)
    }

    /// Build from an already canonical color image.
    pub fn from_color(name: impl Into<String>, color: RgbaImage) -> Result<Self, DecodeError> {
        let normal = derive_normal_map(&color);
        let source_encoding = to_png_data_url(&color)?;
        Ok(Self {
            name: name.into(),
            color,
            normal,
            source_encoding,
        })
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.color.width()
    }
}
