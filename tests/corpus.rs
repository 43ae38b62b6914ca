//! Test corpus: generated patterns at various sizes, checked against
//! the reference luminance rule and decoded back through an independent
//! Group 4 decoder.

use enough::Unstoppable;
#[cfg(feature = "std")]
use fax::Color;
use zenbilevel::*;

fn checkerboard(w: usize, h: usize, bpp: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * bpp];
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * bpp;
            let v = if (x + y) % 2 == 0 { 230 } else { 20 };
            pixels[off..off + bpp].fill(v);
        }
    }
    pixels
}

fn noise_pattern(w: usize, h: usize, bpp: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * bpp];
    let mut state: u32 = 0xDEAD_BEEF;
    for p in pixels.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    pixels
}

/// Black/white flags from the 30/59/11 luma rule, unpacked.
fn reference_bits(pixels: &[u8], w: usize, h: usize) -> Vec<Vec<bool>> {
    (0..h)
        .map(|y| {
            (0..w)
                .map(|x| {
                    let p = &pixels[(y * w + x) * 3..];
                    let (r, g, b) = (u32::from(p[0]), u32::from(p[1]), u32::from(p[2]));
                    (30 * r + 59 * g + 11 * b) < 128 * 100
                })
                .collect()
        })
        .collect()
}

fn le16(b: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([b[at], b[at + 1]])
}

fn le32(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

/// Slices of every strip, found through StripOffsets/StripByteCounts.
fn strips(tiff: &[u8]) -> Vec<&[u8]> {
    let ifd = le32(tiff, 4) as usize;
    let n = le16(tiff, ifd) as usize;
    let mut offsets = Vec::new();
    let mut counts = Vec::new();
    for i in 0..n {
        let at = ifd + 2 + 12 * i;
        let tag = le16(tiff, at);
        let count = le32(tiff, at + 4) as usize;
        let field = le32(tiff, at + 8);
        let values: Vec<u32> = if count <= 1 {
            vec![field; count]
        } else {
            (0..count)
                .map(|j| le32(tiff, field as usize + 4 * j))
                .collect()
        };
        match tag {
            273 => offsets = values,
            279 => counts = values,
            _ => {}
        }
    }
    offsets
        .iter()
        .zip(&counts)
        .map(|(&o, &c)| &tiff[o as usize..(o + c) as usize])
        .collect()
}

#[cfg(feature = "std")]
fn decode_g4_strip(strip: &[u8], width: u16) -> Vec<bool> {
    let mut lines = Vec::new();
    fax::decoder::decode_g4(strip.iter().copied(), width, Some(1), |transitions: &[u16]| {
        lines.push(
            fax::decoder::pels(transitions, width)
                .map(|c| matches!(c, Color::Black))
                .collect::<Vec<bool>>(),
        );
    });
    assert_eq!(lines.len(), 1);
    lines.remove(0)
}

fn unpack_rows(bitmap: &BilevelBitmap) -> Vec<Vec<bool>> {
    (0..bitmap.height())
        .map(|y| {
            (0..bitmap.width())
                .map(|x| bitmap.get(x, y).unwrap())
                .collect()
        })
        .collect()
}

const SIZES: &[(usize, usize)] = &[(1, 1), (7, 3), (8, 8), (9, 2), (31, 17), (64, 5), (100, 40)];

// ── Quantizer against the reference rule ─────────────────────────────

#[test]
fn noise_matches_reference_luma() {
    for &(w, h) in SIZES {
        let pixels = noise_pattern(w, h, 3);
        let buffer = PixelBuffer::new(&pixels, w as u32, h as u32, PixelLayout::Rgb8).unwrap();
        let bitmap = quantize(&buffer);
        assert_eq!(bitmap.as_bytes().len(), w.div_ceil(8) * h);
        assert_eq!(unpack_rows(&bitmap), reference_bits(&pixels, w, h), "{w}x{h}");
    }
}

#[test]
fn padding_bits_clear_on_black_rows() {
    for &(w, h) in SIZES {
        let pixels = vec![0u8; w * h * 3];
        let buffer = PixelBuffer::new(&pixels, w as u32, h as u32, PixelLayout::Rgb8).unwrap();
        let bitmap = quantize(&buffer);
        let tail_bits = bitmap.bytes_per_row() * 8 - w;
        let mask = ((1u16 << tail_bits) - 1) as u8;
        for row in bitmap.rows() {
            assert_eq!(row[row.len() - 1] & mask, 0, "{w}x{h}");
        }
    }
}

#[test]
fn layouts_agree() {
    let (w, h) = (13, 6);
    let rgb = noise_pattern(w, h, 3);
    let bgr: Vec<u8> = rgb.chunks_exact(3).flat_map(|p| [p[2], p[1], p[0]]).collect();
    let rgba: Vec<u8> = rgb.chunks_exact(3).flat_map(|p| [p[0], p[1], p[2], 0x11]).collect();
    let bgra: Vec<u8> = rgb.chunks_exact(3).flat_map(|p| [p[2], p[1], p[0], 0xEE]).collect();

    let expected = quantize(&PixelBuffer::new(&rgb, w as u32, h as u32, PixelLayout::Rgb8).unwrap());
    for (pixels, layout) in [
        (&bgr, PixelLayout::Bgr8),
        (&rgba, PixelLayout::Rgba8),
        (&bgra, PixelLayout::Bgra8),
    ] {
        let buffer = PixelBuffer::new(pixels, w as u32, h as u32, layout).unwrap();
        assert_eq!(quantize(&buffer), expected, "{layout:?}");
    }
}

#[test]
fn gray_threshold() {
    let pixels: Vec<u8> = (0..=255).collect();
    let buffer = PixelBuffer::new(&pixels, 256, 1, PixelLayout::Gray8).unwrap();
    let bitmap = quantize(&buffer);
    for x in 0..256u32 {
        assert_eq!(bitmap.get(x, 0), Some(x < 128), "gray {x}");
    }
}

#[test]
fn strided_input_ignores_padding() {
    let (w, h) = (5, 4);
    let tight = checkerboard(w, h, 3);
    let stride = w * 3 + 7;
    let mut padded = vec![0u8; stride * h];
    for y in 0..h {
        padded[y * stride..y * stride + w * 3].copy_from_slice(&tight[y * w * 3..(y + 1) * w * 3]);
    }
    let a = quantize(&PixelBuffer::new(&tight, w as u32, h as u32, PixelLayout::Rgb8).unwrap());
    let b = quantize(
        &PixelBuffer::with_stride(&padded, w as u32, h as u32, stride, PixelLayout::Rgb8).unwrap(),
    );
    assert_eq!(a, b);
}

// ── Group 4 through an independent decoder ───────────────────────────

#[cfg(feature = "std")]
#[test]
fn group4_checkerboard_decodes() {
    for &(w, h) in SIZES {
        let pixels = checkerboard(w, h, 3);
        let buffer = PixelBuffer::new(&pixels, w as u32, h as u32, PixelLayout::Rgb8).unwrap();
        let bitmap = quantize(&buffer);
        let tiff = encode_tiff(&bitmap, &TiffConfig::default(), Unstoppable).unwrap();

        let decoded: Vec<Vec<bool>> = strips(&tiff)
            .into_iter()
            .map(|s| decode_g4_strip(s, w as u16))
            .collect();
        assert_eq!(decoded, unpack_rows(&bitmap), "{w}x{h}");
    }
}

#[cfg(feature = "std")]
#[test]
fn group4_noise_decodes() {
    for &(w, h) in SIZES {
        let pixels = noise_pattern(w, h, 3);
        let tiff = convert_to_tiff(&pixels, w as u32, h as u32, PixelLayout::Rgb8, Unstoppable)
            .unwrap();
        let decoded: Vec<Vec<bool>> = strips(&tiff)
            .into_iter()
            .map(|s| decode_g4_strip(s, w as u16))
            .collect();
        assert_eq!(decoded, reference_bits(&pixels, w, h), "{w}x{h}");
    }
}

#[cfg(feature = "std")]
#[test]
fn group4_compresses_flat_pages() {
    // A blank 1728-pel fax line is a handful of bytes, not 216.
    let bitmap = BilevelBitmap::new(1728, 50).unwrap();
    let tiff = encode_tiff(&bitmap, &TiffConfig::default(), Unstoppable).unwrap();
    for strip in strips(&tiff) {
        assert!(strip.len() < 16, "strip of {} bytes", strip.len());
    }
}

#[test]
fn uncompressed_roundtrip_across_sizes() {
    let config = TiffConfig::default().with_compression(Compression::None);
    for &(w, h) in SIZES {
        let pixels = noise_pattern(w, h, 3);
        let bitmap =
            quantize(&PixelBuffer::new(&pixels, w as u32, h as u32, PixelLayout::Rgb8).unwrap());
        let tiff = encode_tiff(&bitmap, &config, Unstoppable).unwrap();
        let strips = strips(&tiff);
        assert_eq!(strips.len(), h);
        assert_eq!(strips.concat(), bitmap.as_bytes(), "{w}x{h}");
    }
}
