use duotone_core::color::Color;
use duotone_core::pipeline::PixelBuffer;

/// Assert that two buffers have the same dimensions.
pub fn assert_same_dimensions(a: &PixelBuffer, b: &PixelBuffer) {
    assert_eq!(
        (a.width(), a.height()),
        (b.width(), b.height()),
        "buffer dimensions differ"
    );
}

/// Assert that every output alpha equals the input alpha.
pub fn assert_alpha_preserved(input: &PixelBuffer, output: &PixelBuffer) {
    assert_same_dimensions(input, output);
    for (i, (src, dst)) in input
        .as_bytes()
        .chunks_exact(4)
        .zip(output.as_bytes().chunks_exact(4))
        .enumerate()
    {
        assert_eq!(
            src[3], dst[3],
            "alpha changed at pixel {i}: {} -> {}",
            src[3], dst[3]
        );
    }
}

/// Assert that RGB channels are unchanged everywhere.
pub fn assert_rgb_unchanged(input: &PixelBuffer, output: &PixelBuffer) {
    assert_same_dimensions(input, output);
    for (i, (src, dst)) in input
        .as_bytes()
        .chunks_exact(4)
        .zip(output.as_bytes().chunks_exact(4))
        .enumerate()
    {
        assert_eq!(&src[..3], &dst[..3], "rgb changed at pixel {i}");
    }
}

/// Assert the RGB of a single pixel.
pub fn assert_pixel_rgb(buffer: &PixelBuffer, x: u32, y: u32, expected: Color) {
    let px = buffer.pixel(x, y);
    assert_eq!(
        &px[..3],
        &expected.to_array(),
        "pixel ({x}, {y}) is {px:?}, expected {expected}"
    );
}

/// Assert that every pixel's RGB is one of the given colors.
pub fn assert_only_colors(buffer: &PixelBuffer, allowed: &[Color]) {
    for (i, px) in buffer.as_bytes().chunks_exact(4).enumerate() {
        assert!(
            allowed.iter().any(|c| px[..3] == c.to_array()),
            "pixel {i} has rgb {:?}, not one of {allowed:?}",
            &px[..3]
        );
    }
}
