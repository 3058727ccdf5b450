//! PNG data-URL encoding used to persist texture color images.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};

use crate::error::DecodeError;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encode `img` losslessly as `data:image/png;base64,...`.
pub fn to_png_data_url(img: &RgbaImage) -> Result<String, image::ImageError> {
    let mut bytes: Vec<u8> = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    let mut out = String::with_capacity(PNG_DATA_URL_PREFIX.len() + bytes.len() * 4 / 3 + 4);
    out.push_str(PNG_DATA_URL_PREFIX);
    STANDARD.encode_string(&bytes, &mut out);
    Ok(out)
}

/// Extract the raw bytes from a base64 data URL of any image MIME type.
/// A string without a `data:` scheme is treated as bare base64.
pub fn bytes_from_data_url(url: &str) -> Result<Vec<u8>, DecodeError> {
    let url = url.trim();
    let payload = match url.strip_prefix("data:") {
        Some(rest) => {
            let (meta, payload) = rest
                .split_once(',')
                .ok_or(DecodeError::NotBase64DataUrl)?;
            if !meta.ends_with(";base64") {
                return Err(DecodeError::NotBase64DataUrl);
            }
            payload
        }
        None => url,
    };
    Ok(STANDARD.decode(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn data_url_roundtrip_is_lossless() {
        let img = RgbaImage::from_fn(8, 8, |x, y| Rgba([x as u8 * 30, y as u8 * 30, 7, 255]));
        let url = to_png_data_url(&img).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        let bytes = bytes_from_data_url(&url).unwrap();
        let back = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(back, img);
    }

    #[test]
    fn bare_base64_is_accepted() {
        assert_eq!(bytes_from_data_url("AAEC").unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn non_base64_data_url_is_rejected() {
        assert!(matches!(
            bytes_from_data_url("data:image/svg+xml,<svg/>"),
            Err(DecodeError::NotBase64DataUrl)
        ));
        assert!(matches!(
            bytes_from_data_url("data:image/png;base64"),
            Err(DecodeError::NotBase64DataUrl)
        ));
        assert!(matches!(
            bytes_from_data_url("data:image/png;base64,@@@"),
            Err(DecodeError::Base64(_))
        ));
    }
}
