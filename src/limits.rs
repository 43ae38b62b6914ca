use alloc::format;

use crate::bitmap::bytes_per_row;
use crate::error::BilevelError;

/// Resource limits for quantize/encode operations.
///
/// All fields default to `None` (no limit). Limits are checked before
/// anything is allocated: page dimensions first, then the packed bitmap,
/// then the output buffer reserved for the TIFF file.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of any single buffer the encoder allocates: the packed
    /// bitmap, or the in-memory TIFF output.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check page dimensions.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), BilevelError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(BilevelError::LimitExceeded(format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(BilevelError::LimitExceeded(format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(BilevelError::LimitExceeded(format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check the packed 1-bit bitmap for a `width` x `height` page.
    pub(crate) fn check_bitmap(&self, width: u32, height: u32) -> Result<(), BilevelError> {
        let bytes = bytes_per_row(width)
            .checked_mul(height as usize)
            .ok_or(BilevelError::DimensionsTooLarge { width, height })?;
        self.check_memory("bitmap", bytes)
    }

    /// Check the buffer reserved for the encoded file.
    pub(crate) fn check_output(&self, bytes: usize) -> Result<(), BilevelError> {
        self.check_memory("output", bytes)
    }

    fn check_memory(&self, what: &str, bytes: usize) -> Result<(), BilevelError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes as u64 > max_mem {
                return Err(BilevelError::LimitExceeded(format!(
                    "{what} of {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory(max: u64) -> Limits {
        Limits {
            max_memory_bytes: Some(max),
            ..Default::default()
        }
    }

    #[test]
    fn default_is_unlimited() {
        let limits = Limits::default();
        assert!(limits.check(u32::MAX, u32::MAX).is_ok());
        assert!(limits.check_bitmap(u32::MAX, 1).is_ok());
        assert!(limits.check_output(usize::MAX).is_ok());
    }

    #[test]
    fn pixel_count_uses_wide_arithmetic() {
        let limits = Limits {
            max_pixels: Some(u64::from(u32::MAX)),
            ..Default::default()
        };
        assert!(limits.check(65536, 65536).is_err());
        assert!(limits.check(65535, 65535).is_ok());
    }

    #[test]
    fn bitmap_counts_packed_bytes() {
        // 9 pixels wide packs into 2 bytes per row
        assert!(memory(20).check_bitmap(9, 10).is_ok());
        match memory(19).check_bitmap(9, 10) {
            Err(BilevelError::LimitExceeded(msg)) => {
                assert!(msg.starts_with("bitmap of 20 bytes"), "{msg}")
            }
            other => panic!("expected LimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn output_is_checked_separately() {
        let limits = memory(100);
        assert!(limits.check_bitmap(8, 100).is_ok());
        match limits.check_output(101) {
            Err(BilevelError::LimitExceeded(msg)) => assert!(msg.starts_with("output"), "{msg}"),
            other => panic!("expected LimitExceeded, got {other:?}"),
        }
    }
}
