//! Strip encoders: how one packed scanline becomes strip payload bytes.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "std")]
use fax::{Color, VecWriter, encoder::Encoder};

use super::Compression;
use crate::bitmap::bytes_per_row;

/// A strip encoder refused a scanline.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct StripEncodeError(pub String);

/// Turns packed MSB-first rows (set bit = black) into strip payloads.
///
/// The writer takes the Compression tag from [`compression`](Self::compression),
/// so the declared scheme always matches the bytes produced.
pub trait StripEncoder {
    /// Compression scheme of the produced payloads.
    fn compression(&self) -> Compression;

    /// Append the encoding of one row of `width` pixels to `out`.
    ///
    /// Each call encodes an independent strip.
    fn encode_row(
        &mut self,
        row: &[u8],
        width: u32,
        out: &mut Vec<u8>,
    ) -> Result<(), StripEncodeError>;
}

fn check_row_len(row: &[u8], width: u32) -> Result<(), StripEncodeError> {
    let needed = bytes_per_row(width);
    if row.len() < needed {
        return Err(StripEncodeError(alloc::format!(
            "row holds {} bytes, {width} pixels need {needed}",
            row.len()
        )));
    }
    Ok(())
}

/// Identity encoder: the packed row is the strip.
#[derive(Clone, Copy, Debug, Default)]
pub struct Uncompressed;

impl StripEncoder for Uncompressed {
    fn compression(&self) -> Compression {
        Compression::None
    }

    fn encode_row(
        &mut self,
        row: &[u8],
        width: u32,
        out: &mut Vec<u8>,
    ) -> Result<(), StripEncodeError> {
        check_row_len(row, width)?;
        out.extend_from_slice(&row[..bytes_per_row(width)]);
        Ok(())
    }
}

/// CCITT T.6 (Group 4) encoder.
///
/// Every strip is coded against an imaginary all-white reference line,
/// terminated with EOFB, and zero-padded to a byte boundary.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug, Default)]
pub struct Group4;

#[cfg(feature = "std")]
impl StripEncoder for Group4 {
    fn compression(&self) -> Compression {
        Compression::CcittGroup4
    }

    fn encode_row(
        &mut self,
        row: &[u8],
        width: u32,
        out: &mut Vec<u8>,
    ) -> Result<(), StripEncodeError> {
        if width == 0 {
            return Err(StripEncodeError("zero-width line".into()));
        }
        let line_width = u16::try_from(width).map_err(|_| {
            StripEncodeError(alloc::format!(
                "line width {width} exceeds the Group 4 limit of {}",
                u16::MAX
            ))
        })?;
        check_row_len(row, width)?;

        let pels = (0..width as usize).map(|x| {
            if row[x / 8] & (0x80 >> (x % 8)) != 0 {
                Color::Black
            } else {
                Color::White
            }
        });
        // A fresh encoder per strip resets the reference line to white.
        let mut encoder = Encoder::new(VecWriter::with_capacity(width as usize));
        let Ok(()) = encoder.encode_line(pels, line_width);
        let Ok(writer) = encoder.finish();
        out.extend_from_slice(&writer.finish());
        Ok(())
    }
}
