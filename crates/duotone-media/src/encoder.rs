use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, RgbaImage};

use duotone_core::error::CoreError;
use duotone_core::pipeline::PixelBuffer;

use crate::error::{MediaError, Result};

/// Prefix of exported file names.
pub const EXPORT_PREFIX: &str = "duotone";

/// Default JPEG quality for exports.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Timestamped download name, `duotone-<millis>.png`.
pub fn export_file_name(timestamp_millis: u128) -> String {
    format!("{EXPORT_PREFIX}-{timestamp_millis}.png")
}

/// Encode a buffer as PNG bytes, alpha included.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            buffer.as_bytes(),
            buffer.width(),
            buffer.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|source| MediaError::Encode {
            path: PathBuf::from("<memory>"),
            source,
        })?;
    Ok(out)
}

/// Save a buffer, picking the format from the file extension. JPEG output
/// drops alpha and honors `quality` (1-100). No extension means PNG.
pub fn save_image(buffer: &PixelBuffer, path: &Path, quality: u8) -> Result<()> {
    let encode_err = |source| MediaError::Encode {
        path: path.to_path_buf(),
        source,
    };

    let img = to_rgba_image(buffer)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("jpg" | "jpeg") => {
            let rgb = DynamicImage::ImageRgba8(img).to_rgb8();
            let mut output = BufWriter::new(File::create(path)?);
            JpegEncoder::new_with_quality(&mut output, quality.clamp(1, 100))
                .write_image(
                    rgb.as_raw(),
                    rgb.width(),
                    rgb.height(),
                    ExtendedColorType::Rgb8,
                )
                .map_err(encode_err)?;
        }
        Some(_) => img.save(path).map_err(encode_err)?,
        None => img
            .save_with_format(path, ImageFormat::Png)
            .map_err(encode_err)?,
    }

    tracing::info!(path = %path.display(), width = buffer.width(), height = buffer.height(), "saved image");
    Ok(())
}

fn to_rgba_image(buffer: &PixelBuffer) -> Result<RgbaImage> {
    let (width, height) = (buffer.width(), buffer.height());
    RgbaImage::from_raw(width, height, buffer.as_bytes().to_vec()).ok_or_else(|| {
        MediaError::Core(CoreError::InvalidBuffer {
            len: buffer.as_bytes().len(),
            width,
            height,
        })
    })
}
