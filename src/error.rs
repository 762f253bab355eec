use alloc::string::String;

/// Errors from configuring, editing, encoding and parsing bitmaps.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    /// Unsupported bit depth, non-positive or oversized dimensions.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Pixel, palette index or region outside the current buffers.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Malformed or unsupported BMP input.
    #[error("unsupported BMP format: {0}")]
    UnsupportedFormat(String),

    /// Input exceeds a configured [`Limits`](crate::Limits) bound.
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// Reading or writing a file failed.
    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
