/// Pixel memory layout of a source buffer.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 3 channels, 8-bit BGR (GDI `Format24bppRgb` memory order).
    Bgr8,
    /// 4 channels, 8-bit RGBA. Alpha is ignored.
    Rgba8,
    /// 4 channels, 8-bit BGRA. Alpha is ignored.
    Bgra8,
    /// Single channel, 8-bit grayscale.
    Gray8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Rgb8 | Self::Bgr8 => 3,
            Self::Rgba8 | Self::Bgra8 => 4,
        }
    }

    /// Luminance of the pixel starting at `px[0]`.
    ///
    /// `px` must hold at least [`bytes_per_pixel`](Self::bytes_per_pixel) bytes.
    #[inline]
    pub(crate) fn luma_at(&self, px: &[u8]) -> u8 {
        match self {
            Self::Rgb8 | Self::Rgba8 => luminance(px[0], px[1], px[2]),
            Self::Bgr8 | Self::Bgra8 => luminance(px[2], px[1], px[0]),
            Self::Gray8 => px[0],
        }
    }
}

/// BT.601 luma: `0.3 R + 0.59 G + 0.11 B`, truncated.
///
/// Computed in integer hundredths so that the result is exact; `(128, 128, 128)`
/// yields exactly 128.
#[inline]
pub const fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 30 + g as u32 * 59 + b as u32 * 11) / 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luminance_extremes() {
        assert_eq!(luminance(0, 0, 0), 0);
        assert_eq!(luminance(255, 255, 255), 255);
        assert_eq!(luminance(128, 128, 128), 128);
    }

    #[test]
    fn luminance_truncates() {
        // 0.3 * 100 + 0.59 * 100 + 0.11 * 101 = 100.11
        assert_eq!(luminance(100, 100, 101), 100);
        // 0.3 * 255 = 76.5
        assert_eq!(luminance(255, 0, 0), 76);
        // 0.59 * 255 = 150.45
        assert_eq!(luminance(0, 255, 0), 150);
        // 0.11 * 255 = 28.05
        assert_eq!(luminance(0, 0, 255), 28);
    }

    #[test]
    fn bgr_layouts_swap_channels() {
        let px = [255u8, 0, 0, 7];
        assert_eq!(PixelLayout::Rgb8.luma_at(&px), 76);
        assert_eq!(PixelLayout::Bgr8.luma_at(&px), 28);
        assert_eq!(PixelLayout::Rgba8.luma_at(&px), 76);
        assert_eq!(PixelLayout::Bgra8.luma_at(&px), 28);
        assert_eq!(PixelLayout::Gray8.luma_at(&px), 255);
    }
}
