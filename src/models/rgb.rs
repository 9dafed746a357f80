//! RGB color handling with hex parsing, serialization and brightness shifts.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::cast_lossless)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGB color value with hex string representation.
///
/// Serializes as a lowercase `#rrggbb` string, which is also the form used
/// in SVG fills and query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Black (#000000).
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (#ffffff).
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports formats: "#RRGGBB", "RRGGBB", "#rrggbb", "rrggbb".
    /// Surrounding whitespace is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use housepaint::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#e5ddd0").unwrap();
    /// assert_eq!(color, RgbColor::new(0xe5, 0xdd, 0xd0));
    ///
    /// let color = RgbColor::from_hex("4A3F35").unwrap();
    /// assert_eq!(color, RgbColor::new(0x4a, 0x3f, 0x35));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if hex.len() != 6 || !hex.is_ascii() {
            anyhow::bail!("Invalid hex color format '{hex}'. Expected 6 hex digits (RRGGBB)");
        }

        let r = u8::from_str_radix(&hex[0..2], 16)
            .context(format!("Invalid red channel in hex color '{hex}'"))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .context(format!("Invalid green channel in hex color '{hex}'"))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .context(format!("Invalid blue channel in hex color '{hex}'"))?;

        Ok(Self::new(r, g, b))
    }

    /// Converts the color to a zero-padded hex string "#rrggbb" (lowercase).
    ///
    /// # Examples
    ///
    /// ```
    /// use housepaint::models::RgbColor;
    ///
    /// assert_eq!(RgbColor::new(255, 0, 0).to_hex(), "#ff0000");
    /// assert_eq!(RgbColor::new(0, 8, 255).to_hex(), "#0008ff");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Shifts every channel by a signed percentage of the full channel range.
    ///
    /// The offset is `round(2.55 * percent)` with halves rounded towards
    /// positive infinity, added to each channel and clamped to 0-255.
    /// Used to derive the light and dark shades of the house illustration.
    ///
    /// # Examples
    ///
    /// ```
    /// use housepaint::models::RgbColor;
    ///
    /// let wall = RgbColor::from_hex("#e5ddd0").unwrap();
    /// assert_eq!(wall.adjust_brightness(8).to_hex(), "#f9f1e4");
    /// assert_eq!(wall.adjust_brightness(0), wall);
    /// assert_eq!(RgbColor::WHITE.adjust_brightness(20), RgbColor::WHITE);
    /// ```
    #[must_use]
    pub fn adjust_brightness(&self, percent: i32) -> Self {
        let offset = brightness_offset(percent);
        let shift = |channel: u8| (i32::from(channel) + offset).clamp(0, 255) as u8;

        Self {
            r: shift(self.r),
            g: shift(self.g),
            b: shift(self.b),
        }
    }

    /// Returns true when the perceived luminance is below the midpoint.
    ///
    /// Picks readable text over swatch chips.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        let luma = 0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b);
        luma < 128.0
    }
}

/// Additive channel offset for a brightness percentage.
fn brightness_offset(percent: i32) -> i32 {
    (2.55 * f64::from(percent) + 0.5).floor() as i32
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for RgbColor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for RgbColor {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_hex()
    }
}

impl Default for RgbColor {
    /// Default color is white (#ffffff).
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_valid() {
        let color = RgbColor::from_hex("#FF0000").unwrap();
        assert_eq!(color, RgbColor::new(255, 0, 0));

        let color = RgbColor::from_hex("00ff00").unwrap();
        assert_eq!(color, RgbColor::new(0, 255, 0));

        let color = RgbColor::from_hex("  #2c3e5a  ").unwrap();
        assert_eq!(color, RgbColor::new(0x2c, 0x3e, 0x5a));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(RgbColor::from_hex("#FFF").is_err());
        assert!(RgbColor::from_hex("#FFFFFFF").is_err());
        assert!(RgbColor::from_hex("GGGGGG").is_err());
        assert!(RgbColor::from_hex("").is_err());
        assert!(RgbColor::from_hex("#").is_err());
        // Six bytes but not six ASCII characters
        assert!(RgbColor::from_hex("ééé").is_err());
    }

    #[test]
    fn test_to_hex_zero_padded() {
        assert_eq!(RgbColor::new(0, 0, 0).to_hex(), "#000000");
        assert_eq!(RgbColor::new(1, 2, 3).to_hex(), "#010203");
        assert_eq!(RgbColor::new(0xaf, 0x9d, 0x5e).to_hex(), "#af9d5e");
    }

    #[test]
    fn test_channel_roundtrip() {
        for (r, g, b) in [(0, 0, 0), (255, 255, 255), (123, 45, 67), (1, 254, 16)] {
            let parsed = RgbColor::from_hex(&RgbColor::new(r, g, b).to_hex()).unwrap();
            assert_eq!((parsed.r, parsed.g, parsed.b), (r, g, b));
        }
    }

    #[test]
    fn test_adjust_brightness_identity() {
        let color = RgbColor::new(0x4a, 0x3f, 0x35);
        assert_eq!(color.adjust_brightness(0), color);
    }

    #[test]
    fn test_adjust_brightness_clamps() {
        assert_eq!(
            RgbColor::BLACK.adjust_brightness(50),
            RgbColor::new(127, 127, 127)
        );
        assert_eq!(
            RgbColor::WHITE.adjust_brightness(-50),
            RgbColor::new(128, 128, 128)
        );
        assert_eq!(RgbColor::WHITE.adjust_brightness(50), RgbColor::WHITE);
        assert_eq!(RgbColor::BLACK.adjust_brightness(-50), RgbColor::BLACK);
        assert_eq!(RgbColor::new(10, 200, 250).adjust_brightness(100).to_hex(), "#ffffff");
    }

    #[test]
    fn test_brightness_offset_rounds_half_up() {
        // 2.55 * 10 = 25.5 rounds to 26, 2.55 * -10 = -25.5 rounds to -25
        assert_eq!(brightness_offset(10), 26);
        assert_eq!(brightness_offset(-10), -25);
        assert_eq!(brightness_offset(-12), -31);
        assert_eq!(brightness_offset(-15), -38);
        assert_eq!(brightness_offset(8), 20);
        assert_eq!(brightness_offset(5), 13);
        assert_eq!(brightness_offset(0), 0);
    }

    #[test]
    fn test_adjust_brightness_known_shades() {
        let wall = RgbColor::from_hex("#e5ddd0").unwrap();
        assert_eq!(wall.adjust_brightness(-12).to_hex(), "#c6beb1");
        let roof = RgbColor::from_hex("#4a3f35").unwrap();
        assert_eq!(roof.adjust_brightness(-15).to_hex(), "#24190f");
    }

    #[test]
    fn test_serde_as_hex_string() {
        let color = RgbColor::new(0x3d, 0x6b, 0x6b);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#3d6b6b\"");

        let parsed: RgbColor = serde_json::from_str("\"#3D6B6B\"").unwrap();
        assert_eq!(parsed, color);

        assert!(serde_json::from_str::<RgbColor>("\"teal\"").is_err());
    }

    #[test]
    fn test_is_dark() {
        assert!(RgbColor::from_hex("#2c3e5a").unwrap().is_dark());
        assert!(!RgbColor::from_hex("#f0e8dc").unwrap().is_dark());
    }
}
