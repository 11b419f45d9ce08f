use rayon::prelude::*;

use crate::color::Color;
use crate::error::{CoreError, Result};
use crate::settings::Settings;

// =============================================================================
// PixelBuffer
// =============================================================================

/// An owned RGBA pixel buffer. 4 bytes per pixel, row-major, top-to-bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new transparent black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; expected_len(width, height)],
        }
    }

    /// Wrap existing RGBA data, checking it holds exactly `width * height` pixels.
    pub fn from_rgba_vec(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        validate_len(data.len(), width, height)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Get pixel RGBA at (x, y). Panics if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let idx = self.index(x, y);
        &self.data[idx..idx + 4]
    }

    /// Get mutable pixel RGBA at (x, y). Panics if out of bounds.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let idx = self.index(x, y);
        &mut self.data[idx..idx + 4]
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * 4
    }
}

fn expected_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

fn validate_len(len: usize, width: u32, height: u32) -> Result<()> {
    if len % 4 != 0 || len != expected_len(width, height) {
        return Err(CoreError::InvalidBuffer { len, width, height });
    }
    Ok(())
}

// =============================================================================
// Luminance and target resolution
// =============================================================================

/// Luma in 0.0..=1.0 using the BT.601 weights.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0
}

/// Strictly above the midpoint. A luminance of exactly 0.5 is dark.
#[inline]
pub fn is_bright(luminance: f64) -> bool {
    luminance > 0.5
}

/// Settings reduced to what the per-pixel loop needs, computed once per call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDuotone {
    /// Blend weight `t`, already clamped.
    pub weight: f64,
    /// Target for pixels above the threshold.
    pub bright: Color,
    /// Target for pixels at or below the threshold.
    pub dark: Color,
}

impl ResolvedDuotone {
    pub fn from_settings(settings: &Settings) -> Self {
        let (bright, dark) = if settings.invert {
            (settings.low_color, settings.high_color)
        } else {
            (settings.high_color, settings.low_color)
        };
        Self {
            weight: settings.blend_weight(),
            bright,
            dark,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.weight == 0.0
    }

    pub fn target_for(&self, r: u8, g: u8, b: u8) -> Color {
        if is_bright(luminance(r, g, b)) {
            self.bright
        } else {
            self.dark
        }
    }

    /// Recolor one RGBA pixel in place. Alpha is not touched.
    #[inline]
    pub fn apply(&self, pixel: &mut [u8]) {
        let target = self.target_for(pixel[0], pixel[1], pixel[2]);
        let t = self.weight;
        for (channel, target) in pixel[..3].iter_mut().zip(target.to_array()) {
            *channel = blend(*channel, target, t);
        }
    }
}

/// `round(original * (1 - t) + target * t)`. Inputs are non-negative so
/// `round` here is round-half-up.
#[inline]
fn blend(original: u8, target: u8, t: f64) -> u8 {
    (f64::from(original) * (1.0 - t) + f64::from(target) * t)
        .round()
        .clamp(0.0, 255.0) as u8
}

// =============================================================================
// PixelEffect trait
// =============================================================================

/// How the per-pixel map is scheduled. Both produce identical bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// Walk the buffer on the calling thread.
    Sequential,
    /// Split into row chunks on the rayon pool.
    #[default]
    Parallel,
}

/// A pixel-processing effect over a whole buffer.
pub trait PixelEffect: Send + Sync {
    /// Process a buffer, returning the modified buffer. Takes ownership so
    /// in-place effects can avoid allocating.
    fn process(&self, input: PixelBuffer, execution: Execution) -> PixelBuffer;

    /// Returns true if the effect would leave every pixel unchanged.
    fn is_identity(&self) -> bool {
        false
    }
}

/// The duotone recolor as a [`PixelEffect`].
pub struct DuotoneEffect {
    resolved: ResolvedDuotone,
}

impl DuotoneEffect {
    pub fn new(settings: &Settings) -> Self {
        Self {
            resolved: ResolvedDuotone::from_settings(settings),
        }
    }

    pub fn resolved(&self) -> &ResolvedDuotone {
        &self.resolved
    }
}

impl PixelEffect for DuotoneEffect {
    fn process(&self, mut input: PixelBuffer, execution: Execution) -> PixelBuffer {
        if self.is_identity() || input.data.is_empty() {
            return input;
        }
        let resolved = self.resolved;
        match execution {
            Execution::Sequential => {
                for pixel in input.data.chunks_exact_mut(4) {
                    resolved.apply(pixel);
                }
            }
            Execution::Parallel => {
                // Row-based parallelism to avoid rayon micro-task overhead
                let row_bytes = input.width as usize * 4;
                input
                    .data
                    .par_chunks_exact_mut(row_bytes)
                    .for_each(|row| {
                        for pixel in row.chunks_exact_mut(4) {
                            resolved.apply(pixel);
                        }
                    });
            }
        }
        input
    }

    fn is_identity(&self) -> bool {
        self.resolved.is_identity()
    }
}

// =============================================================================
// Engine entry points
// =============================================================================

/// Apply the duotone recolor, leaving `input` untouched.
pub fn transform(input: &PixelBuffer, settings: &Settings) -> PixelBuffer {
    transform_with(input, settings, Execution::default())
}

/// [`transform`] with an explicit scheduling choice.
pub fn transform_with(input: &PixelBuffer, settings: &Settings, execution: Execution) -> PixelBuffer {
    transform_owned(input.clone(), settings, execution)
}

/// Apply the recolor to a buffer the caller hands over, reusing its allocation.
pub fn transform_owned(input: PixelBuffer, settings: &Settings, execution: Execution) -> PixelBuffer {
    DuotoneEffect::new(settings).process(input, execution)
}

/// Validate raw RGBA bytes against the dimensions, then transform a copy.
pub fn transform_rgba(data: &[u8], width: u32, height: u32, settings: &Settings) -> Result<PixelBuffer> {
    let buffer = PixelBuffer::from_rgba_vec(width, height, data.to_vec())?;
    Ok(transform_owned(buffer, settings, Execution::default()))
}

// =============================================================================
// Tests
// =============================================================================
