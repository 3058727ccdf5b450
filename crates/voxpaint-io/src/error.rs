use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    /// Unparsable JSON, or a required field missing or of the wrong shape.
    #[error("corrupt save document: {0}")]
    CorruptDocument(String),
    #[error("save file i/o: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CodecError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            CodecError::Io(e.into())
        } else {
            CodecError::CorruptDocument(e.to_string())
        }
    }
}
