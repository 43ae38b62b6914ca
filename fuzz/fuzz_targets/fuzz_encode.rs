#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbilevel::*;

fuzz_target!(|data: &[u8]| {
    // Header: width, height (one byte each), layout selector, flags.
    let [w, h, layout, flags, pixels @ ..] = data else {
        return;
    };
    let layout = match layout % 5 {
        0 => PixelLayout::Rgb8,
        1 => PixelLayout::Bgr8,
        2 => PixelLayout::Rgba8,
        3 => PixelLayout::Bgra8,
        _ => PixelLayout::Gray8,
    };
    let compression = if flags & 1 == 0 {
        Compression::None
    } else {
        Compression::CcittGroup4
    };

    let Ok(buffer) = PixelBuffer::new(pixels, u32::from(*w), u32::from(*h), layout) else {
        return;
    };
    let bitmap = quantize(&buffer);
    assert_eq!(bitmap.as_bytes().len(), bitmap.bytes_per_row() * usize::from(*h));

    let config = TiffConfig::default().with_compression(compression);
    let tiff = encode_tiff(&bitmap, &config, enough::Unstoppable).expect("encode must succeed");
    let again = encode_tiff(&bitmap, &config, enough::Unstoppable).expect("encode must succeed");
    assert_eq!(tiff, again);
    assert_eq!(&tiff[..4], b"II*\0");
});
