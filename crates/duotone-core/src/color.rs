use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, Result};

/// An 8-bit RGB color. Alpha is never part of a duotone target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Default bright-band color, `#f784c5`.
    pub const PINK: Color = Color::new(247, 132, 197);
    /// Default dark-band color, `#1b602f`.
    pub const GREEN: Color = Color::new(27, 96, 47);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`, case-insensitive.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidColor(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| CoreError::InvalidColor(hex.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

// Settings files store colors the way a color picker reports them.
impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Color::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_with_and_without_hash() {
        assert_eq!(Color::from_hex("#f784c5").unwrap(), Color::PINK);
        assert_eq!(Color::from_hex("1b602f").unwrap(), Color::GREEN);
    }

    #[test]
    fn test_from_hex_is_case_insensitive() {
        assert_eq!(Color::from_hex("#F784C5").unwrap(), Color::PINK);
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        for bad in ["", "#", "#fff", "#f784c", "#f784c5aa", "#gg0000", "#+1+1+1"] {
            assert!(
                matches!(Color::from_hex(bad), Err(CoreError::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_to_hex_lowercase() {
        assert_eq!(Color::new(0xAB, 0x00, 0x0F).to_hex(), "#ab000f");
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Color::PINK).unwrap();
        assert_eq!(json, "\"#f784c5\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::PINK);
        assert!(serde_json::from_str::<Color>("\"pink\"").is_err());
    }
}
