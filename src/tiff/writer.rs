//! Linear TIFF emission: header, strips, directory, finalize.

use alloc::vec::Vec;
use enough::Stop;

use super::ifd::{Directory, DirectoryEntry};
use super::strip::StripEncoder;
use super::tags::{self, tag};
use super::TiffConfig;
use crate::bitmap::BilevelBitmap;
use crate::error::BilevelError;
use crate::stream::{SeekFrom, TiffStream};

/// Write `bitmap` as a complete TIFF file into `stream`, starting at
/// offset 0, and close the stream.
///
/// Strips are emitted top to bottom; each strip's offset is the running
/// byte position, so emission is strictly sequential. Any strip or sink
/// failure aborts the whole encode.
pub(crate) fn write_tiff(
    bitmap: &BilevelBitmap,
    config: &TiffConfig,
    encoder: &mut dyn StripEncoder,
    stream: &mut dyn TiffStream,
    stop: &dyn Stop,
) -> Result<(), BilevelError> {
    let x_res = to_rational(config.x_resolution)?;
    let y_res = to_rational(config.y_resolution)?;
    stop.check()?;

    // Header; the first-IFD offset is patched once the directory is placed.
    stream.seek(SeekFrom::Start(0))?;
    let mut header = Vec::with_capacity(tags::HEADER_LEN as usize);
    header.extend_from_slice(&tags::BYTE_ORDER_LE);
    header.extend_from_slice(&tags::TIFF_VERSION.to_le_bytes());
    header.extend_from_slice(&0u32.to_le_bytes());
    stream.write(&header)?;

    let width = bitmap.width();
    let rows = bitmap.height() as usize;
    let mut strip_offsets = Vec::with_capacity(rows);
    let mut strip_byte_counts = Vec::with_capacity(rows);
    let mut strip = Vec::with_capacity(bitmap.bytes_per_row());
    let mut pos = tags::HEADER_LEN;

    for (y, row) in bitmap.rows().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        strip.clear();
        encoder
            .encode_row(row, width, &mut strip)
            .map_err(|e| BilevelError::StripEncodingFailure {
                row: y as u32,
                reason: e.0,
            })?;
        strip_offsets.push(to_offset(pos)?);
        strip_byte_counts.push(to_offset(strip.len() as u64)?);
        stream.write(&strip)?;
        pos += strip.len() as u64;
    }

    // The directory must start on a word boundary.
    if pos % 2 == 1 {
        stream.write(&[0])?;
        pos += 1;
    }
    let ifd_offset = to_offset(pos)?;

    let mut dir = Directory::new();
    dir.add(DirectoryEntry::long(tag::IMAGE_WIDTH, width));
    dir.add(DirectoryEntry::long(tag::IMAGE_LENGTH, bitmap.height()));
    dir.add(DirectoryEntry::short(tag::BITS_PER_SAMPLE, 1));
    dir.add(DirectoryEntry::short(
        tag::COMPRESSION,
        encoder.compression().tag_value(),
    ));
    dir.add(DirectoryEntry::short(
        tag::PHOTOMETRIC_INTERPRETATION,
        tags::PHOTOMETRIC_WHITE_IS_ZERO,
    ));
    dir.add(DirectoryEntry::longs(tag::STRIP_OFFSETS, strip_offsets));
    dir.add(DirectoryEntry::short(tag::SAMPLES_PER_PIXEL, 1));
    dir.add(DirectoryEntry::long(
        tag::ROWS_PER_STRIP,
        config.rows_per_strip(),
    ));
    dir.add(DirectoryEntry::longs(
        tag::STRIP_BYTE_COUNTS,
        strip_byte_counts,
    ));
    dir.add(DirectoryEntry::rational(tag::X_RESOLUTION, x_res));
    dir.add(DirectoryEntry::rational(tag::Y_RESOLUTION, y_res));
    dir.add(DirectoryEntry::short(
        tag::PLANAR_CONFIGURATION,
        tags::PLANAR_CONTIGUOUS,
    ));
    dir.add(DirectoryEntry::short(
        tag::RESOLUTION_UNIT,
        config.resolution_unit.tag_value(),
    ));
    stream.write(&dir.serialize(ifd_offset)?)?;

    // Finalize
    stream.seek(SeekFrom::Start(4))?;
    stream.write(&ifd_offset.to_le_bytes())?;
    stream.seek(SeekFrom::End(0))?;
    stream.close()
}

fn to_offset(pos: u64) -> Result<u32, BilevelError> {
    u32::try_from(pos).map_err(|_| BilevelError::OutputTooLarge(pos))
}

/// Scale for fractional resolutions; 1/10000 of a dot is below any
/// meaningful precision.
const RATIONAL_SCALE: u64 = 10_000;

/// Convert a positive resolution to a reduced TIFF RATIONAL.
pub(crate) fn to_rational(value: f64) -> Result<(u32, u32), BilevelError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(BilevelError::InvalidResolution(value));
    }
    let whole = value as u64;
    if whole as f64 == value {
        let n = u32::try_from(whole).map_err(|_| BilevelError::InvalidResolution(value))?;
        return Ok((n, 1));
    }
    let scaled = (value * RATIONAL_SCALE as f64 + 0.5) as u64;
    if scaled == 0 {
        return Err(BilevelError::InvalidResolution(value));
    }
    let g = gcd(scaled, RATIONAL_SCALE);
    let n = u32::try_from(scaled / g).map_err(|_| BilevelError::InvalidResolution(value))?;
    Ok((n, (RATIONAL_SCALE / g) as u32))
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
