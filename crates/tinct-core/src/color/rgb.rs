//! 8-bit sRGB colors and their hex encoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;

/// A gamma-encoded sRGB color with 8 bits per channel.
///
/// Serializes as canonical hex (`"#rrggbb"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array, red first.
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Move every channel by `delta`, saturating at 0 and 255.
    pub fn shifted(self, delta: i16) -> Self {
        fn shift(c: u8, delta: i16) -> u8 {
            (i16::from(c) + delta).clamp(0, 255) as u8
        }
        Self::new(shift(self.r, delta), shift(self.g, delta), shift(self.b, delta))
    }
}

/// Parse a 6-digit hex color. A leading `#` is optional, digits are
/// case-insensitive.
pub fn hex_to_rgb8(s: &str) -> Result<Rgb8, ColorError> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHexDigit(bad));
    }
    // All characters are ASCII from here on, so byte offsets are char offsets.
    if digits.len() != 6 {
        return Err(ColorError::InvalidHexLength(digits.len()));
    }

    let channel = |i: usize| -> Result<u8, ColorError> {
        let pair = &digits[2 * i..2 * i + 2];
        u8::from_str_radix(pair, 16).map_err(|_| {
            ColorError::InvalidHexDigit(pair.chars().next().unwrap_or('?'))
        })
    };

    Ok(Rgb8::new(channel(0)?, channel(1)?, channel(2)?))
}

/// Format a color as lowercase `#rrggbb`.
pub fn rgb8_to_hex(c: Rgb8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb8(s)
    }
}

impl TryFrom<String> for Rgb8 {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        hex_to_rgb8(&s)
    }
}

impl From<Rgb8> for String {
    fn from(c: Rgb8) -> Self {
        rgb8_to_hex(c)
    }
}

impl From<palette::Srgb<u8>> for Rgb8 {
    fn from(c: palette::Srgb<u8>) -> Self {
        Self::new(c.red, c.green, c.blue)
    }
}

impl From<Rgb8> for palette::Srgb<u8> {
    fn from(c: Rgb8) -> Self {
        palette::Srgb::new(c.r, c.g, c.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip_all_grays_and_primaries() {
        for v in 0..=255u8 {
            let grays_and_primaries = [
                Rgb8::new(v, v, v),
                Rgb8::new(v, 0, 0),
                Rgb8::new(0, v, 0),
                Rgb8::new(0, 0, v),
            ];
            for c in grays_and_primaries {
                assert_eq!(hex_to_rgb8(&rgb8_to_hex(c)), Ok(c), "roundtrip failed for {c:?}");
            }
        }
    }

    #[test]
    fn test_hex_output_is_lowercase_with_hash() {
        assert_eq!(rgb8_to_hex(Rgb8::new(0xAB, 0xCD, 0xEF)), "#abcdef");
        assert_eq!(Rgb8::new(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn test_hex_input_is_case_insensitive() {
        assert_eq!(hex_to_rgb8("#BE6E5F"), Ok(Rgb8::new(190, 110, 95)));
        assert_eq!(hex_to_rgb8("be6e5f"), Ok(Rgb8::new(190, 110, 95)));
    }

    #[test]
    fn test_hex_rejects_wrong_length() {
        assert_eq!(hex_to_rgb8("#fff"), Err(ColorError::InvalidHexLength(3)));
        assert_eq!(hex_to_rgb8(""), Err(ColorError::InvalidHexLength(0)));
        assert_eq!(hex_to_rgb8("#1234567"), Err(ColorError::InvalidHexLength(7)));
    }

    #[test]
    fn test_hex_rejects_non_hex_characters() {
        assert_eq!(hex_to_rgb8("#12345g"), Err(ColorError::InvalidHexDigit('g')));
        assert_eq!(hex_to_rgb8("#+12345"), Err(ColorError::InvalidHexDigit('+')));
        assert_eq!(hex_to_rgb8("ééé"), Err(ColorError::InvalidHexDigit('é')));
        assert_eq!(hex_to_rgb8("##123456"), Err(ColorError::InvalidHexDigit('#')));
    }

    #[test]
    fn test_shifted_saturates() {
        assert_eq!(Rgb8::new(250, 5, 128).shifted(10), Rgb8::new(255, 15, 138));
        assert_eq!(Rgb8::new(250, 5, 128).shifted(-10), Rgb8::new(240, 0, 118));
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let json = serde_json::to_string(&Rgb8::new(30, 28, 26)).unwrap();
        assert_eq!(json, "\"#1e1c1a\"");
        let back: Rgb8 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb8::new(30, 28, 26));
        assert!(serde_json::from_str::<Rgb8>("\"#zzzzzz\"").is_err());
    }

    #[test]
    fn test_palette_interop() {
        let c = Rgb8::new(12, 34, 56);
        let p: palette::Srgb<u8> = c.into();
        assert_eq!(Rgb8::from(p), c);
    }
}
