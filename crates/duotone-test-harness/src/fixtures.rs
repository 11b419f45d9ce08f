use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};

use duotone_core::pipeline::PixelBuffer;

/// Write a buffer to `output_dir/name` in the given format. JPEG drops alpha.
pub fn write_test_image(
    output_dir: &Path,
    name: &str,
    buffer: &PixelBuffer,
    format: ImageFormat,
) -> PathBuf {
    let output_path = output_dir.join(name);
    let img = RgbaImage::from_raw(buffer.width(), buffer.height(), buffer.as_bytes().to_vec())
        .expect("buffer length matches dimensions");

    let result = if format == ImageFormat::Jpeg {
        image::DynamicImage::ImageRgba8(img)
            .to_rgb8()
            .save_with_format(&output_path, format)
    } else {
        img.save_with_format(&output_path, format)
    };
    result.unwrap_or_else(|e| panic!("failed to write test image {name}: {e}"));
    assert!(output_path.exists(), "test image was not created: {name}");

    output_path
}

/// Write a buffer as PNG.
pub fn write_test_png(output_dir: &Path, name: &str, buffer: &PixelBuffer) -> PathBuf {
    write_test_image(output_dir, &format!("{name}.png"), buffer, ImageFormat::Png)
}

/// Create a sparse file of `len` bytes, for size-limit tests.
pub fn write_oversized_file(output_dir: &Path, name: &str, len: u64) -> PathBuf {
    let output_path = output_dir.join(name);
    let file = std::fs::File::create(&output_path).expect("failed to create oversized fixture");
    file.set_len(len).expect("failed to size oversized fixture");
    output_path
}

/// Get a temporary directory for test fixtures that persists for the test run.
pub fn fixture_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().expect("failed to create temp dir for fixtures")
}
