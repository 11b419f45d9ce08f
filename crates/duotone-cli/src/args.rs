use std::path::PathBuf;

use clap::Parser;

use duotone_core::color::Color;
use duotone_core::error::Result;
use duotone_core::pipeline::Execution;
use duotone_core::settings::{Preset, Settings, SettingsFile};
use duotone_media::encoder::{DEFAULT_JPEG_QUALITY, export_file_name};
use duotone_media::processor::ProcessOptions;

/// Recolor a photo with a two-tone duotone effect.
#[derive(Parser, Debug)]
#[command(name = "duotone")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Input image (JPEG, PNG or WebP, at most 25 MiB).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output image. Defaults to a timestamped PNG in the current directory.
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Blend toward the target colors, in percent. Clamped to 0-100.
    #[arg(short, long, value_name = "PERCENT", allow_negative_numbers = true)]
    pub intensity: Option<i32>,

    /// Swap which band gets which color.
    #[arg(long)]
    pub invert: bool,

    /// Color for bright pixels, as #rrggbb.
    #[arg(long, value_name = "HEX")]
    pub high: Option<Color>,

    /// Color for dark pixels, as #rrggbb.
    #[arg(long, value_name = "HEX")]
    pub low: Option<Color>,

    /// Named color pair applied before --high/--low.
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Load settings from a JSON file. Flags override its values.
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Write the effective settings to a JSON file.
    #[arg(long, value_name = "FILE")]
    pub save_settings: Option<PathBuf>,

    /// Fit the output to the 800x600 preview surface.
    #[arg(long)]
    pub preview: bool,

    /// Run the recolor on a single thread.
    #[arg(long)]
    pub sequential: bool,

    /// Output JPEG quality (1-100).
    #[arg(short, long, default_value_t = DEFAULT_JPEG_QUALITY, value_name = "INT")]
    pub quality: u8,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Settings file (or defaults), then preset, then individual flags.
    pub fn resolve_settings(&self) -> Result<Settings> {
        let mut settings = match &self.settings {
            Some(path) => SettingsFile::load(path)?.settings,
            None => Settings::default(),
        };
        if let Some(name) = &self.preset {
            settings.apply_preset(Preset::from_name(name)?);
        }
        if let Some(intensity) = self.intensity {
            settings.intensity = intensity;
        }
        if self.invert {
            settings.invert = true;
        }
        if let Some(high) = self.high {
            settings.high_color = high;
        }
        if let Some(low) = self.low {
            settings.low_color = low;
        }
        Ok(settings)
    }

    pub fn process_options(&self) -> ProcessOptions {
        ProcessOptions {
            preview: self.preview,
            execution: if self.sequential {
                Execution::Sequential
            } else {
                Execution::Parallel
            },
            quality: self.quality,
        }
    }

    pub fn output_path(&self, timestamp_millis: u128) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(export_file_name(timestamp_millis)))
    }
}
