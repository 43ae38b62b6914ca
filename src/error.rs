use alloc::string::String;
use enough::StopReason;

/// Errors from bilevel quantization and TIFF encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BilevelError {
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidImageDimensions { width: u32, height: u32 },

    #[error("strip encoder rejected row {row}: {reason}")]
    StripEncodingFailure { row: u32, reason: String },

    #[error("byte sink I/O failed: {0}")]
    SinkWriteFailure(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("row stride {stride} is shorter than one row ({min} bytes)")]
    InvalidStride { stride: usize, min: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("output of {0} bytes exceeds the 32-bit TIFF offset range")]
    OutputTooLarge(u64),

    #[error("invalid resolution: {0}")]
    InvalidResolution(f64),

    #[error("{0:?} compression is not available in this build")]
    UnsupportedCompression(crate::tiff::Compression),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BilevelError {
    fn from(r: StopReason) -> Self {
        BilevelError::Cancelled(r)
    }
}
