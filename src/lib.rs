//! # zenbilevel
//!
//! Bilevel (1 bit per pixel) quantization and single-page TIFF encoding.
//!
//! The pipeline has two independent stages:
//!
//! 1. [`quantize`] turns RGB/BGR/gray pixels into a packed [`BilevelBitmap`]
//!    using a fixed luminance threshold (`0.30 R + 0.59 G + 0.11 B < 128`
//!    is black).
//! 2. The TIFF writer emits a baseline little-endian TIFF: one strip per
//!    scanline, WhiteIsZero photometric interpretation, and strips stored
//!    either uncompressed or CCITT Group 4 coded.
//!
//! The writer only needs a packed bitmap, so it works for any bilevel
//! source, not just the quantizer.
//!
//! ## Bit layout
//!
//! Rows are `ceil(width / 8)` bytes, most significant bit first. A set bit
//! is black. Padding bits after the last pixel of a row are always zero.
//!
//! ## Features
//!
//! `std` is on by default and brings CCITT Group 4 coding (through the
//! `fax` crate), `IoStream` and `write_tiff_file`. Without it the crate
//! is `no_std` + `alloc` and only writes uncompressed strips; asking for
//! Group 4 returns [`BilevelError::UnsupportedCompression`].
//!
//! ## Non-Goals
//!
//! - Reading or parsing TIFF files
//! - Multi-page, grayscale, or color TIFF output
//! - Dithering or configurable thresholds
//!
//! ## Usage
//!
//! ```no_run
//! use zenbilevel::{EncodeRequest, PixelLayout, Compression, Unstoppable};
//!
//! let pixels: &[u8] = &[0, 0, 0, 255, 255, 255]; // 2x1 RGB
//!
//! // Defaults: CCITT Group 4, 200 dpi
//! let g4 = EncodeRequest::new()
//!     .convert(pixels, 2, 1, PixelLayout::Rgb8, Unstoppable)?;
//!
//! // Uncompressed strips
//! let raw = EncodeRequest::new()
//!     .with_compression(Compression::None)
//!     .convert(pixels, 2, 1, PixelLayout::Rgb8, Unstoppable)?;
//! # let _ = (g4, raw);
//! # Ok::<(), zenbilevel::BilevelError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bitmap;
mod buffer;
mod encode;
mod error;
mod limits;
mod pixel;
mod quantize;
pub mod stream;
pub mod tiff;

// Re-exports
pub use bitmap::{BilevelBitmap, bytes_per_row};
pub use buffer::PixelBuffer;
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::BilevelError;
pub use limits::Limits;
pub use pixel::{PixelLayout, luminance};
pub use quantize::{BLACK_THRESHOLD, quantize};
pub use stream::{MemoryStream, SeekFrom, TiffStream};
#[cfg(feature = "std")]
pub use stream::IoStream;
pub use tiff::{Compression, ResolutionUnit, StripEncoder, TiffConfig};

use alloc::vec::Vec;

/// Encode a bitmap to an in-memory TIFF file.
pub fn encode_tiff(
    bitmap: &BilevelBitmap,
    config: &TiffConfig,
    stop: impl Stop,
) -> Result<Vec<u8>, BilevelError> {
    EncodeRequest::new()
        .with_config(*config)
        .encode(bitmap, stop)
}

/// Quantize tightly packed pixels and encode them with the default
/// configuration.
pub fn convert_to_tiff(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    stop: impl Stop,
) -> Result<Vec<u8>, BilevelError> {
    EncodeRequest::new().convert(pixels, width, height, layout, stop)
}

/// Encode a bitmap and write it to `path`.
///
/// The file is only created once encoding has fully succeeded.
#[cfg(feature = "std")]
pub fn write_tiff_file(
    path: impl AsRef<std::path::Path>,
    bitmap: &BilevelBitmap,
    config: &TiffConfig,
    stop: impl Stop,
) -> Result<(), BilevelError> {
    let bytes = encode_tiff(bitmap, config, stop)?;
    std::fs::write(path, bytes).map_err(|e| BilevelError::SinkWriteFailure(e.to_string()))
}
