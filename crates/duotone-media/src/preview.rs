use image::RgbaImage;
use image::imageops::{self, FilterType};

use duotone_core::error::CoreError;
use duotone_core::pipeline::PixelBuffer;

use crate::error::Result;

/// Preview surface bounds.
pub const PREVIEW_MAX_WIDTH: u32 = 800;
pub const PREVIEW_MAX_HEIGHT: u32 = 600;

/// Dimensions that fit `width x height` inside `max_w x max_h`, preserving
/// aspect ratio. Images already inside the bounds are never enlarged.
pub fn fit_within(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if width == 0 || height == 0 || (width <= max_w && height <= max_h) {
        return (width, height);
    }

    let scale_x = max_w as f64 / width as f64;
    let scale_y = max_h as f64 / height as f64;
    let scale = scale_x.min(scale_y);

    let dst_w = ((width as f64 * scale).round() as u32).max(1);
    let dst_h = ((height as f64 * scale).round() as u32).max(1);
    (dst_w, dst_h)
}

/// Resample a buffer to fit the bounds. Returns the input unchanged when it
/// already fits.
pub fn scale_to_fit(buffer: PixelBuffer, max_w: u32, max_h: u32) -> Result<PixelBuffer> {
    let (src_w, src_h) = (buffer.width(), buffer.height());
    let (dst_w, dst_h) = fit_within(src_w, src_h, max_w, max_h);
    if (dst_w, dst_h) == (src_w, src_h) {
        return Ok(buffer);
    }

    let len = buffer.as_bytes().len();
    let src = RgbaImage::from_raw(src_w, src_h, buffer.into_vec()).ok_or(
        CoreError::InvalidBuffer {
            len,
            width: src_w,
            height: src_h,
        },
    )?;
    let resized = imageops::resize(&src, dst_w, dst_h, FilterType::Triangle);
    tracing::debug!(src_w, src_h, dst_w, dst_h, "scaled for preview");
    Ok(PixelBuffer::from_rgba_vec(dst_w, dst_h, resized.into_raw())?)
}

/// Fit to the default preview surface.
pub fn scale_for_preview(buffer: PixelBuffer) -> Result<PixelBuffer> {
    scale_to_fit(buffer, PREVIEW_MAX_WIDTH, PREVIEW_MAX_HEIGHT)
}
