use thiserror::Error;

/// Failure to turn raw or persisted bytes into a texture.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("data URL is not base64 encoded")]
    NotBase64DataUrl,
    #[error("image has zero width or height")]
    Empty,
}
