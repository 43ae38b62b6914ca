//! Borrowed source pixels handed to the quantizer.

use crate::bitmap::check_dimensions;
use crate::error::BilevelError;
use crate::pixel::PixelLayout;

#[cfg(feature = "rgb")]
use rgb::ComponentBytes as _;

/// Read-only view of decoded source pixels.
///
/// Construction validates dimensions, stride, and buffer length, so every
/// row of a `PixelBuffer` is addressable without further checks.
#[derive(Clone, Copy, Debug)]
pub struct PixelBuffer<'a> {
    pixels: &'a [u8],
    width: u32,
    height: u32,
    stride: usize,
    layout: PixelLayout,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap tightly packed rows (stride = `width * bytes_per_pixel`).
    pub fn new(
        pixels: &'a [u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<Self, BilevelError> {
        let stride = (width as usize)
            .checked_mul(layout.bytes_per_pixel())
            .ok_or(BilevelError::DimensionsTooLarge { width, height })?;
        Self::with_stride(pixels, width, height, stride, layout)
    }

    /// Wrap rows that are `stride` bytes apart.
    ///
    /// The last row only needs `width * bytes_per_pixel` bytes, so buffers
    /// trimmed after the final pixel are accepted.
    pub fn with_stride(
        pixels: &'a [u8],
        width: u32,
        height: u32,
        stride: usize,
        layout: PixelLayout,
    ) -> Result<Self, BilevelError> {
        check_dimensions(width, height)?;
        let row_bytes = (width as usize)
            .checked_mul(layout.bytes_per_pixel())
            .ok_or(BilevelError::DimensionsTooLarge { width, height })?;
        if stride < row_bytes {
            return Err(BilevelError::InvalidStride {
                stride,
                min: row_bytes,
            });
        }
        let needed = match (height as usize).checked_sub(1) {
            None => 0,
            Some(last) => stride
                .checked_mul(last)
                .and_then(|n| n.checked_add(row_bytes))
                .ok_or(BilevelError::DimensionsTooLarge { width, height })?,
        };
        if pixels.len() < needed {
            return Err(BilevelError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
            stride,
            layout,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Distance in bytes between the starts of consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pixel bytes of row `y`, without stride padding.
    ///
    /// Returns `None` if `y` is out of bounds.
    pub fn row(&self, y: u32) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.stride;
        let len = self.width as usize * self.layout.bytes_per_pixel();
        self.pixels.get(start..start + len)
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        (0..self.height).filter_map(move |y| self.row(y))
    }
}

#[cfg(feature = "rgb")]
impl<'a> PixelBuffer<'a> {
    /// Wrap typed RGB pixels.
    pub fn from_rgb8(
        pixels: &'a [rgb::RGB8],
        width: u32,
        height: u32,
    ) -> Result<Self, BilevelError> {
        Self::new(pixels.as_bytes(), width, height, PixelLayout::Rgb8)
    }

    /// Wrap typed RGBA pixels. Alpha does not take part in thresholding.
    pub fn from_rgba8(
        pixels: &'a [rgb::RGBA8],
        width: u32,
        height: u32,
    ) -> Result<Self, BilevelError> {
        Self::new(pixels.as_bytes(), width, height, PixelLayout::Rgba8)
    }
}

#[cfg(feature = "imgref")]
impl<'a> PixelBuffer<'a> {
    /// Zero-copy view of an [`imgref::ImgRef`], honouring its stride.
    pub fn from_imgref(img: imgref::ImgRef<'a, rgb::RGB8>) -> Result<Self, BilevelError> {
        let too_large = BilevelError::DimensionsTooLarge {
            width: u32::MAX,
            height: u32::MAX,
        };
        let width = u32::try_from(img.width()).map_err(|_| too_large)?;
        let height = u32::try_from(img.height()).map_err(|_| BilevelError::DimensionsTooLarge {
            width,
            height: u32::MAX,
        })?;
        let stride = img
            .stride()
            .checked_mul(3)
            .ok_or(BilevelError::DimensionsTooLarge { width, height })?;
        let buf: &'a [rgb::RGB8] = img.into_buf();
        Self::with_stride(buf.as_bytes(), width, height, stride, PixelLayout::Rgb8)
    }
}
