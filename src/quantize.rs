//! Luminance threshold quantizer.

use crate::bitmap::BilevelBitmap;
use crate::buffer::PixelBuffer;
use crate::pixel::PixelLayout;

/// Pixels with luminance strictly below this are black.
pub const BLACK_THRESHOLD: u8 = 128;

/// Quantize source pixels to a packed bilevel bitmap.
///
/// Each pixel is black iff [`luminance`](crate::luminance) `< 128`. Padding
/// bits past the image width are always zero. Rows are independent, so the
/// work splits cleanly over disjoint row ranges.
pub fn quantize(pixels: &PixelBuffer<'_>) -> BilevelBitmap {
    // The source buffer holds at least width*height bytes, so the packed
    // size cannot overflow.
    let mut bitmap = BilevelBitmap::blank(pixels.width(), pixels.height());
    let layout = pixels.layout();
    for (src, dst) in pixels.rows().zip(bitmap.rows_mut()) {
        quantize_row(src, dst, layout);
    }
    bitmap
}

/// Threshold one row of source pixels into `dst`, which must be zeroed.
fn quantize_row(src: &[u8], dst: &mut [u8], layout: PixelLayout) {
    let bpp = layout.bytes_per_pixel();
    for (x, px) in src.chunks_exact(bpp).enumerate() {
        if layout.luma_at(px) < BLACK_THRESHOLD {
            dst[x / 8] |= 0x80 >> (x % 8);
        }
    }
}
