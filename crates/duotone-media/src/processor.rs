use std::path::Path;
use std::time::{Duration, Instant};

use duotone_core::pipeline::{Execution, PixelBuffer, transform_owned};
use duotone_core::settings::Settings;

use crate::decoder;
use crate::encoder::{self, DEFAULT_JPEG_QUALITY};
use crate::error::Result;
use crate::preview;
use crate::upload;

/// How a file is processed around the engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Fit the image to the preview surface before recoloring.
    pub preview: bool,
    pub execution: Execution,
    /// JPEG quality, ignored for other output formats.
    pub quality: u8,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            preview: false,
            execution: Execution::Parallel,
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Wall-clock time spent in each stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageTimings {
    pub decode: Duration,
    pub scale: Duration,
    pub transform: Duration,
    pub encode: Duration,
}

/// Summary of a processed file.
#[derive(Debug, Clone)]
pub struct ProcessReport {
    pub source_width: u32,
    pub source_height: u32,
    pub output_width: u32,
    pub output_height: u32,
    pub timings: StageTimings,
}

/// Recolor an in-memory image, optionally fitting it to the preview surface.
pub fn process_buffer(
    buffer: PixelBuffer,
    settings: &Settings,
    options: &ProcessOptions,
    timings: &mut StageTimings,
) -> Result<PixelBuffer> {
    let start = Instant::now();
    let buffer = if options.preview {
        preview::scale_for_preview(buffer)?
    } else {
        buffer
    };
    timings.scale = start.elapsed();

    let start = Instant::now();
    let output = transform_owned(buffer, settings, options.execution);
    timings.transform = start.elapsed();
    Ok(output)
}

/// Validate, decode, recolor and save one image file.
pub fn process_file(
    input: &Path,
    output: &Path,
    settings: &Settings,
    options: &ProcessOptions,
) -> Result<ProcessReport> {
    let mut timings = StageTimings::default();

    let start = Instant::now();
    let upload = upload::read_upload(input)?;
    let source = decoder::decode_upload(&upload)?;
    timings.decode = start.elapsed();
    let (source_width, source_height) = (source.width(), source.height());
    tracing::info!(
        input = %input.display(),
        format = upload.kind.mime_type(),
        width = source_width,
        height = source_height,
        "loaded image"
    );

    let result = process_buffer(source, settings, options, &mut timings)?;
    tracing::debug!(
        intensity = settings.clamped_intensity(),
        invert = settings.invert,
        high = %settings.high_color,
        low = %settings.low_color,
        "applied duotone"
    );

    let start = Instant::now();
    encoder::save_image(&result, output, options.quality)?;
    timings.encode = start.elapsed();

    let report = ProcessReport {
        source_width,
        source_height,
        output_width: result.width(),
        output_height: result.height(),
        timings,
    };
    tracing::debug!(timings = ?report.timings, "stage timings");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use duotone_core::color::Color;

    #[test]
    fn test_process_buffer_preview_scales_then_recolors() {
        let buffer = PixelBuffer::from_rgba_vec(1600, 2, [255u8; 4].repeat(3200)).unwrap();
        let options = ProcessOptions {
            preview: true,
            ..ProcessOptions::default()
        };
        let mut timings = StageTimings::default();
        let out = process_buffer(buffer, &Settings::default(), &options, &mut timings).unwrap();
        assert_eq!((out.width(), out.height()), (800, 1));
        assert_eq!(&out.pixel(0, 0)[..3], &Color::PINK.to_array());
    }

    #[test]
    fn test_process_buffer_full_resolution() {
        let buffer = PixelBuffer::from_rgba_vec(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]).unwrap();
        let mut timings = StageTimings::default();
        let out = process_buffer(
            buffer,
            &Settings::default(),
            &ProcessOptions::default(),
            &mut timings,
        )
        .unwrap();
        assert_eq!(out.pixel(0, 0), &[27, 96, 47, 255]);
        assert_eq!(out.pixel(1, 0), &[247, 132, 197, 255]);
    }
}
