use duotone_core::color::Color;
use duotone_core::pipeline::PixelBuffer;
use duotone_core::settings::{Preset, Settings};

/// Builder for creating test PixelBuffers with sensible defaults.
pub struct PixelBufferBuilder {
    width: u32,
    height: u32,
    fill: [u8; 4],
    pixels: Vec<(u32, u32, [u8; 4])>,
    gradient: bool,
}

impl PixelBufferBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fill: [0, 0, 0, 255],
            pixels: Vec::new(),
            gradient: false,
        }
    }

    /// Fill every pixel with one RGBA value.
    pub fn fill(mut self, rgba: [u8; 4]) -> Self {
        self.fill = rgba;
        self.gradient = false;
        self
    }

    /// Horizontal gray ramp from black to white with alpha falling off by row,
    /// so both luminance bands and many alpha values are present.
    pub fn gradient(mut self) -> Self {
        self.gradient = true;
        self
    }

    /// Override a single pixel.
    pub fn pixel(mut self, x: u32, y: u32, rgba: [u8; 4]) -> Self {
        self.pixels.push((x, y, rgba));
        self
    }

    pub fn build(self) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let rgba = if self.gradient {
                    let level = ramp(x, self.width);
                    let alpha = 255 - ramp(y, self.height) / 2;
                    [level, level, level, alpha]
                } else {
                    self.fill
                };
                buffer.pixel_mut(x, y).copy_from_slice(&rgba);
            }
        }
        for (x, y, rgba) in self.pixels {
            buffer.pixel_mut(x, y).copy_from_slice(&rgba);
        }
        buffer
    }
}

fn ramp(i: u32, len: u32) -> u8 {
    if len <= 1 {
        return 0;
    }
    ((i as u64 * 255) / (len as u64 - 1)) as u8
}

/// Builder for creating test Settings.
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
        }
    }

    pub fn intensity(mut self, intensity: i32) -> Self {
        self.settings.intensity = intensity;
        self
    }

    pub fn inverted(mut self) -> Self {
        self.settings.invert = true;
        self
    }

    pub fn high(mut self, color: Color) -> Self {
        self.settings.high_color = color;
        self
    }

    pub fn low(mut self, color: Color) -> Self {
        self.settings.low_color = color;
        self
    }

    pub fn preset(mut self, preset: Preset) -> Self {
        self.settings.apply_preset(preset);
        self
    }

    pub fn build(self) -> Settings {
        self.settings
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
