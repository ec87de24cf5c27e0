use thiserror::Error;

pub type Canvas2dResult<T> = Result<T, Canvas2dError>;

#[derive(Debug, Error)]
pub enum Canvas2dError {
    /// Zero or larger than the backing-store limit.
    #[error("Surface size {width}x{height} is out of range")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Unrecognized color {0}")]
    ColorParseError(String),

    #[error("PNG encoding failed: {0}")]
    PngError(#[from] png::EncodingError),
}
