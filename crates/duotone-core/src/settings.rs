use std::fs;
use std::path::Path;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{CoreError, Result};

/// Version written into new settings files.
pub const CURRENT_SETTINGS_VERSION: &str = "1.0.0";

pub const MIN_INTENSITY: i32 = 0;
pub const MAX_INTENSITY: i32 = 100;

/// Parameters of a single duotone transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Blend percent toward the target color. Clamped to 0..=100 at use.
    pub intensity: i32,
    /// Swap which luminance band gets which color.
    pub invert: bool,
    /// Color for the bright band.
    pub high_color: Color,
    /// Color for the dark band.
    pub low_color: Color,
}

impl Settings {
    pub fn new(intensity: i32, invert: bool, high_color: Color, low_color: Color) -> Self {
        Self {
            intensity,
            invert,
            high_color,
            low_color,
        }
    }

    /// Intensity clamped to 0..=100.
    pub fn clamped_intensity(&self) -> u8 {
        self.intensity.clamp(MIN_INTENSITY, MAX_INTENSITY) as u8
    }

    /// Blend weight `t` in 0.0..=1.0.
    pub fn blend_weight(&self) -> f64 {
        f64::from(self.clamped_intensity()) / 100.0
    }

    /// Replace both colors with the preset's pair. Intensity and invert are kept.
    pub fn apply_preset(&mut self, preset: Preset) {
        let (high, low) = preset.colors();
        self.high_color = high;
        self.low_color = low;
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.apply_preset(preset);
        self
    }

    /// Back to the defaults a fresh session starts with.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(MAX_INTENSITY, false, Color::PINK, Color::GREEN)
    }
}

/// Named color pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Original,
}

impl Preset {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Original => "original",
        }
    }

    /// `(high_color, low_color)` for this preset.
    pub fn colors(&self) -> (Color, Color) {
        match self {
            Self::Original => (Color::PINK, Color::GREEN),
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        Self::all()
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CoreError::UnknownPreset(name.to_string()))
    }

    pub fn all() -> Vec<Preset> {
        vec![Preset::Original]
    }
}

/// Settings persisted as JSON, tagged with a format version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsFile {
    pub version: String,
    pub settings: Settings,
}

impl SettingsFile {
    pub fn new(settings: Settings) -> Self {
        Self {
            version: CURRENT_SETTINGS_VERSION.to_string(),
            settings,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let file: Self = serde_json::from_str(&json)?;
        file.check_version()?;
        Ok(file)
    }

    /// Files are readable when their major version matches ours.
    pub fn check_version(&self) -> Result<()> {
        let found = Version::parse(&self.version)?;
        let supported = Version::parse(CURRENT_SETTINGS_VERSION)?;
        if found.major != supported.major {
            return Err(CoreError::UnsupportedVersion {
                found: self.version.clone(),
                supported: CURRENT_SETTINGS_VERSION.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.intensity, 100);
        assert!(!s.invert);
        assert_eq!(s.high_color, Color::PINK);
        assert_eq!(s.low_color, Color::GREEN);
    }

    #[test]
    fn test_clamped_intensity() {
        let mut s = Settings::default();
        s.intensity = -20;
        assert_eq!(s.clamped_intensity(), 0);
        s.intensity = 250;
        assert_eq!(s.clamped_intensity(), 100);
        s.intensity = 37;
        assert_eq!(s.clamped_intensity(), 37);
    }

    #[test]
    fn test_blend_weight() {
        let mut s = Settings::default();
        assert_eq!(s.blend_weight(), 1.0);
        s.intensity = 50;
        assert_eq!(s.blend_weight(), 0.5);
        s.intensity = i32::MIN;
        assert_eq!(s.blend_weight(), 0.0);
    }

    #[test]
    fn test_apply_preset_keeps_intensity_and_invert() {
        let mut s = Settings::new(40, true, Color::new(1, 2, 3), Color::new(4, 5, 6));
        s.apply_preset(Preset::Original);
        assert_eq!(s.intensity, 40);
        assert!(s.invert);
        assert_eq!(s.high_color, Color::PINK);
        assert_eq!(s.low_color, Color::GREEN);
    }

    #[test]
    fn test_reset() {
        let mut s = Settings::new(3, true, Color::new(1, 2, 3), Color::new(4, 5, 6));
        s.reset();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_preset_from_name() {
        assert_eq!(Preset::from_name("original").unwrap(), Preset::Original);
        assert_eq!(Preset::from_name("Original").unwrap(), Preset::Original);
        assert!(matches!(
            Preset::from_name("sepia"),
            Err(CoreError::UnknownPreset(name)) if name == "sepia"
        ));
    }

    #[test]
    fn test_check_version() {
        let mut file = SettingsFile::new(Settings::default());
        assert!(file.check_version().is_ok());
        file.version = "1.4.2".into();
        assert!(file.check_version().is_ok());
        file.version = "2.0.0".into();
        assert!(matches!(
            file.check_version(),
            Err(CoreError::UnsupportedVersion { .. })
        ));
        file.version = "one".into();
        assert!(matches!(
            file.check_version(),
            Err(CoreError::InvalidVersion(_))
        ));
    }
}
