//! Packed 1-bit-per-pixel bitmap.
//!
//! Bit `x` of row `y` lives at byte `y * bytes_per_row + x / 8`, bit position
//! `7 - x % 8` (MSB first). A set bit is black, matching the WhiteIsZero
//! photometric interpretation the TIFF writer declares.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::BilevelError;

/// Reject images where exactly one dimension is zero.
///
/// `0x0` is the valid empty image.
pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<(), BilevelError> {
    if (width == 0) != (height == 0) {
        return Err(BilevelError::InvalidImageDimensions { width, height });
    }
    Ok(())
}

/// Bytes needed to hold one row of `width` bits.
#[inline]
pub const fn bytes_per_row(width: u32) -> usize {
    (width as usize).div_ceil(8)
}

/// Mask of the meaningful bits in the last byte of a row, or `0xFF` when
/// the width is a multiple of 8.
#[inline]
fn last_byte_mask(width: u32) -> u8 {
    match width % 8 {
        0 => 0xFF,
        rem => 0xFFu8 << (8 - rem),
    }
}

/// Row-major, byte-aligned 1-bit bitmap. Set bits are black.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BilevelBitmap {
    width: u32,
    height: u32,
    bytes_per_row: usize,
    data: Vec<u8>,
}

impl BilevelBitmap {
    /// All-white bitmap.
    pub fn new(width: u32, height: u32) -> Result<Self, BilevelError> {
        check_dimensions(width, height)?;
        let bpr = bytes_per_row(width);
        let len = bpr
            .checked_mul(height as usize)
            .ok_or(BilevelError::DimensionsTooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            bytes_per_row: bpr,
            data: vec![0u8; len],
        })
    }

    /// All-white bitmap for dimensions already validated by a `PixelBuffer`.
    pub(crate) fn blank(width: u32, height: u32) -> Self {
        let bpr = bytes_per_row(width);
        Self {
            width,
            height,
            bytes_per_row: bpr,
            data: vec![0u8; bpr * height as usize],
        }
    }

    /// Adopt already packed rows.
    ///
    /// `data` must hold at least `ceil(width / 8) * height` bytes; any excess
    /// is dropped. Padding bits past `width` in each row are cleared.
    pub fn from_packed(data: Vec<u8>, width: u32, height: u32) -> Result<Self, BilevelError> {
        check_dimensions(width, height)?;
        let bpr = bytes_per_row(width);
        let expected = bpr
            .checked_mul(height as usize)
            .ok_or(BilevelError::DimensionsTooLarge { width, height })?;
        if data.len() < expected {
            return Err(BilevelError::BufferTooSmall {
                needed: expected,
                actual: data.len(),
            });
        }
        let mut data = data;
        data.truncate(expected);
        let mut bitmap = Self {
            width,
            height,
            bytes_per_row: bpr,
            data,
        };
        bitmap.clear_padding();
        Ok(bitmap)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    /// Whether the bitmap has no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Packed bytes of row `y`.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.bytes_per_row;
        self.data.get(start..start + self.bytes_per_row)
    }

    /// Iterate packed rows top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u8]> {
        // chunks_exact(0) panics; an empty bitmap has no rows anyway.
        self.data.chunks_exact(self.bytes_per_row.max(1))
    }

    /// Whether pixel `(x, y)` is black. `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width {
            return None;
        }
        let byte = self.row(y)?[x as usize / 8];
        Some(byte & (0x80 >> (x % 8)) != 0)
    }

    /// Set pixel `(x, y)` to black (`true`) or white.
    ///
    /// Returns `false` without touching the bitmap when out of bounds.
    pub fn set(&mut self, x: u32, y: u32, black: bool) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = y as usize * self.bytes_per_row + x as usize / 8;
        let mask = 0x80u8 >> (x % 8);
        if black {
            self.data[idx] |= mask;
        } else {
            self.data[idx] &= !mask;
        }
        true
    }

    /// All packed rows, `bytes_per_row * height` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub(crate) fn rows_mut(&mut self) -> core::slice::ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(self.bytes_per_row.max(1))
    }

    fn clear_padding(&mut self) {
        let mask = last_byte_mask(self.width);
        if mask == 0xFF {
            return;
        }
        for row in self.rows_mut() {
            if let Some(last) = row.last_mut() {
                *last &= mask;
            }
        }
    }
}
