//! Baseline TIFF tag, field type, and value constants used by the writer.

/// Tag ids, ascending.
pub mod tag {
    pub const IMAGE_WIDTH: u16 = 256;
    pub const IMAGE_LENGTH: u16 = 257;
    pub const BITS_PER_SAMPLE: u16 = 258;
    pub const COMPRESSION: u16 = 259;
    pub const PHOTOMETRIC_INTERPRETATION: u16 = 262;
    pub const STRIP_OFFSETS: u16 = 273;
    pub const SAMPLES_PER_PIXEL: u16 = 277;
    pub const ROWS_PER_STRIP: u16 = 278;
    pub const STRIP_BYTE_COUNTS: u16 = 279;
    pub const X_RESOLUTION: u16 = 282;
    pub const Y_RESOLUTION: u16 = 283;
    pub const PLANAR_CONFIGURATION: u16 = 284;
    pub const RESOLUTION_UNIT: u16 = 296;
}

/// Directory entry field types.
pub mod field_type {
    pub const SHORT: u16 = 3;
    pub const LONG: u16 = 4;
    pub const RATIONAL: u16 = 5;

    /// Byte size of one value of this type.
    pub const fn size(field_type: u16) -> usize {
        match field_type {
            SHORT => 2,
            LONG => 4,
            RATIONAL => 8,
            _ => 0,
        }
    }
}

/// PhotometricInterpretation: 0 is white, 1 is black.
pub const PHOTOMETRIC_WHITE_IS_ZERO: u16 = 0;

/// PlanarConfiguration: chunky.
pub const PLANAR_CONTIGUOUS: u16 = 1;

/// "II": little-endian byte order mark.
pub const BYTE_ORDER_LE: [u8; 2] = *b"II";

/// TIFF magic version.
pub const TIFF_VERSION: u16 = 42;

/// Header size: byte order, version, first IFD offset.
pub const HEADER_LEN: u64 = 8;
