//! Single-page bilevel TIFF writer.
//!
//! Output is a baseline little-endian TIFF with one image file directory,
//! 1 bit per sample, WhiteIsZero photometric interpretation, and one strip
//! per scanline. Strips are either stored as-is or coded with CCITT Group 4.

mod ifd;
mod strip;
pub(crate) mod tags;
mod writer;

#[cfg(feature = "std")]
pub use strip::Group4;
pub use strip::{StripEncodeError, StripEncoder, Uncompressed};

pub(crate) use writer::write_tiff;

/// Strip compression scheme.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compression {
    /// Packed rows stored as-is (tag value 1).
    None,
    /// CCITT T.6 bilevel coding (tag value 4). Needs the `std` feature.
    #[default]
    CcittGroup4,
}

impl Compression {
    /// Value of the Compression tag.
    pub fn tag_value(self) -> u16 {
        match self {
            Compression::None => 1,
            Compression::CcittGroup4 => 4,
        }
    }
}

/// Unit of the X/Y resolution values.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResolutionUnit {
    #[default]
    Inch,
    Centimeter,
}

impl ResolutionUnit {
    /// Value of the ResolutionUnit tag.
    pub fn tag_value(self) -> u16 {
        match self {
            ResolutionUnit::Inch => 2,
            ResolutionUnit::Centimeter => 3,
        }
    }
}

/// Per-encode TIFF settings.
///
/// Defaults to CCITT Group 4 at 200 x 200 dots per inch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiffConfig {
    pub compression: Compression,
    pub x_resolution: f64,
    pub y_resolution: f64,
    pub resolution_unit: ResolutionUnit,
}

/// Default resolution in dots per inch.
pub const DEFAULT_DPI: f64 = 200.0;

impl Default for TiffConfig {
    fn default() -> Self {
        Self {
            compression: Compression::CcittGroup4,
            x_resolution: DEFAULT_DPI,
            y_resolution: DEFAULT_DPI,
            resolution_unit: ResolutionUnit::Inch,
        }
    }
}

impl TiffConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_resolution(mut self, x: f64, y: f64, unit: ResolutionUnit) -> Self {
        self.x_resolution = x;
        self.y_resolution = y;
        self.resolution_unit = unit;
        self
    }

    /// Rows per strip. Always 1: every scanline is its own strip.
    pub fn rows_per_strip(&self) -> u32 {
        1
    }
}
