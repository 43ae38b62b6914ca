use alloc::vec::Vec;
use enough::Stop;

use crate::bitmap::BilevelBitmap;
use crate::buffer::PixelBuffer;
use crate::error::BilevelError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::quantize::quantize;
use crate::stream::{MemoryStream, SeekFrom, TiffStream};
#[cfg(feature = "std")]
use crate::tiff::Group4;
use crate::tiff::{self, Compression, ResolutionUnit, StripEncoder, TiffConfig, Uncompressed};

/// Builder for TIFF encode operations.
///
/// ```no_run
/// use zenbilevel::{Compression, EncodeRequest, PixelLayout, Unstoppable};
///
/// let pixels = vec![0u8; 64 * 64 * 3];
/// let tiff = EncodeRequest::new()
///     .with_compression(Compression::None)
///     .convert(&pixels, 64, 64, PixelLayout::Rgb8, Unstoppable)?;
/// # Ok::<(), zenbilevel::BilevelError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct EncodeRequest<'a> {
    config: TiffConfig,
    limits: Option<&'a Limits>,
}

impl<'a> EncodeRequest<'a> {
    /// Request with the default configuration (Group 4, 200 dpi).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: TiffConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.config.compression = compression;
        self
    }

    pub fn with_resolution(mut self, x: f64, y: f64, unit: ResolutionUnit) -> Self {
        self.config = self.config.with_resolution(x, y, unit);
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn config(&self) -> &TiffConfig {
        &self.config
    }

    /// Encode a bitmap to an in-memory TIFF file.
    pub fn encode(self, bitmap: &BilevelBitmap, stop: impl Stop) -> Result<Vec<u8>, BilevelError> {
        self.check_limits(bitmap.width(), bitmap.height())?;
        self.encode_in_memory(bitmap, None, &stop)
    }

    /// Encode a bitmap into `stream`, which is closed on success.
    ///
    /// The file is assembled in memory and handed to `stream` in a single
    /// write, so a failed encode leaves `stream` untouched.
    pub fn encode_to<S: TiffStream + ?Sized>(
        self,
        bitmap: &BilevelBitmap,
        stream: &mut S,
        stop: impl Stop,
    ) -> Result<(), BilevelError> {
        let bytes = self.encode(bitmap, stop)?;
        stream.seek(SeekFrom::Start(0))?;
        stream.write(&bytes)?;
        stream.close()
    }

    /// Encode a bitmap with a caller-supplied strip encoder.
    ///
    /// The Compression tag is taken from `encoder`; the configured
    /// compression is ignored.
    pub fn encode_with(
        self,
        bitmap: &BilevelBitmap,
        encoder: &mut dyn StripEncoder,
        stop: impl Stop,
    ) -> Result<Vec<u8>, BilevelError> {
        self.check_limits(bitmap.width(), bitmap.height())?;
        self.encode_in_memory(bitmap, Some(encoder), &stop)
    }

    /// Quantize tightly packed pixels and encode the result.
    pub fn convert(
        self,
        pixels: &[u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
        stop: impl Stop,
    ) -> Result<Vec<u8>, BilevelError> {
        let buffer = PixelBuffer::new(pixels, width, height, layout)?;
        self.convert_buffer(&buffer, stop)
    }

    /// Quantize a (possibly strided) pixel buffer and encode the result.
    pub fn convert_buffer(
        self,
        pixels: &PixelBuffer<'_>,
        stop: impl Stop,
    ) -> Result<Vec<u8>, BilevelError> {
        self.check_limits(pixels.width(), pixels.height())?;
        stop.check()?;
        let bitmap = quantize(pixels);
        stop.check()?;
        self.encode_in_memory(&bitmap, None, &stop)
    }

    fn check_limits(&self, width: u32, height: u32) -> Result<(), BilevelError> {
        if let Some(limits) = self.limits {
            limits.check(width, height)?;
            limits.check_bitmap(width, height)?;
        }
        Ok(())
    }

    fn encode_in_memory(
        &self,
        bitmap: &BilevelBitmap,
        encoder: Option<&mut dyn StripEncoder>,
        stop: &dyn Stop,
    ) -> Result<Vec<u8>, BilevelError> {
        let capacity = output_capacity(bitmap);
        if let Some(limits) = self.limits {
            limits.check_output(capacity)?;
        }
        let mut stream = MemoryStream::with_capacity(capacity);
        self.write(bitmap, encoder, &mut stream, stop)?;
        Ok(stream.into_inner())
    }

    fn write(
        &self,
        bitmap: &BilevelBitmap,
        encoder: Option<&mut dyn StripEncoder>,
        stream: &mut dyn TiffStream,
        stop: &dyn Stop,
    ) -> Result<(), BilevelError> {
        match encoder {
            Some(encoder) => tiff::write_tiff(bitmap, &self.config, encoder, stream, stop),
            None => match self.config.compression {
                Compression::None => {
                    tiff::write_tiff(bitmap, &self.config, &mut Uncompressed, stream, stop)
                }
                #[cfg(feature = "std")]
                Compression::CcittGroup4 => {
                    tiff::write_tiff(bitmap, &self.config, &mut Group4, stream, stop)
                }
                #[cfg(not(feature = "std"))]
                Compression::CcittGroup4 => Err(BilevelError::UnsupportedCompression(
                    Compression::CcittGroup4,
                )),
            },
        }
    }
}

/// Output buffer reservation: header, uncompressed strips, directory, and
/// the two per-row offset arrays.
fn output_capacity(bitmap: &BilevelBitmap) -> usize {
    let rows = bitmap.height() as usize;
    bitmap
        .as_bytes()
        .len()
        .saturating_add(rows.saturating_mul(8))
        .saturating_add(256)
}
