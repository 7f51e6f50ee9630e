//! OKLCH design colors and their conversion to 8-bit sRGB.
//!
//! # Pipeline
//! ```text
//!   OKLCH ──→ OKLab ──→ LMS' ──→ cube ──→ LMS ──→ linear sRGB ──→ OETF ──→ ×255, round, clamp
//! ```
//!
//! Out-of-gamut colors saturate to the nearest representable 8-bit value
//! instead of failing. Design tokens routinely sit slightly outside sRGB.

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

use super::rgb::Rgb8;
use super::transfer::srgb_encode;
use crate::error::ColorError;

/// OKLab (L, a, b) to non-linear cone response (l', m', s').
const OKLAB_TO_LMS: DMat3 = DMat3::from_cols(
    DVec3::new(1.0, 1.0, 1.0),
    DVec3::new(0.396_337_777_4, -0.105_561_345_8, -0.089_484_177_5),
    DVec3::new(0.215_803_757_3, -0.063_854_172_8, -1.291_485_548_0),
);

/// Linear cone response (l, m, s) to linear-light sRGB.
const LMS_TO_LINEAR_SRGB: DMat3 = DMat3::from_cols(
    DVec3::new(4.076_741_662_1, -1.268_438_004_6, -0.004_196_086_3),
    DVec3::new(-3.307_711_591_3, 2.609_757_401_1, -0.703_418_614_7),
    DVec3::new(0.230_969_929_2, -0.341_319_396_5, 1.707_614_701_0),
);

/// A color in OKLCH, the authoring representation for design tokens.
///
/// Serializes as `{ "l": .., "c": .., "h": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "OklchFields", into = "OklchFields")]
pub struct PerceptualColor {
    lightness: f64,
    chroma: f64,
    hue: f64,
}

#[derive(Serialize, Deserialize)]
struct OklchFields {
    l: f64,
    c: f64,
    h: f64,
}

impl From<OklchFields> for PerceptualColor {
    fn from(f: OklchFields) -> Self {
        Self::new(f.l, f.c, f.h)
    }
}

impl From<PerceptualColor> for OklchFields {
    fn from(c: PerceptualColor) -> Self {
        Self {
            l: c.lightness,
            c: c.chroma,
            h: c.hue,
        }
    }
}

/// Wrap a hue into `0..360`. `rem_euclid` alone can round tiny negative
/// hues up to exactly 360.
fn wrap_hue(hue: f64) -> f64 {
    let h = hue.rem_euclid(360.0);
    if h >= 360.0 { 0.0 } else { h + 0.0 }
}

impl PerceptualColor {
    /// Create a color, normalizing out-of-range coordinates.
    ///
    /// Lightness clamps to `0..=1`, chroma to `>= 0`, and hue wraps into
    /// `0..360`. Non-finite coordinates become zero.
    pub fn new(lightness: f64, chroma: f64, hue: f64) -> Self {
        fn finite(v: f64) -> f64 {
            if v.is_finite() { v } else { 0.0 }
        }

        Self {
            lightness: finite(lightness).clamp(0.0, 1.0),
            chroma: finite(chroma).max(0.0),
            hue: wrap_hue(finite(hue)),
        }
    }

    /// Create a color, rejecting coordinates outside their nominal ranges.
    pub fn checked(lightness: f64, chroma: f64, hue: f64) -> Result<Self, ColorError> {
        if !(0.0..=1.0).contains(&lightness) {
            return Err(ColorError::OutOfRange {
                field: "lightness",
                value: lightness,
                expected: "0..=1",
            });
        }
        if !(chroma.is_finite() && chroma >= 0.0) {
            return Err(ColorError::OutOfRange {
                field: "chroma",
                value: chroma,
                expected: "0..",
            });
        }
        if !(0.0..360.0).contains(&hue) {
            return Err(ColorError::OutOfRange {
                field: "hue",
                value: hue,
                expected: "0..360",
            });
        }
        Ok(Self {
            lightness,
            chroma,
            hue,
        })
    }

    pub fn lightness(&self) -> f64 {
        self.lightness
    }

    pub fn chroma(&self) -> f64 {
        self.chroma
    }

    /// Hue angle in degrees.
    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// Rectangular OKLab coordinates `(L, a, b)`.
    pub fn to_oklab(&self) -> DVec3 {
        let (sin, cos) = self.hue.to_radians().sin_cos();
        DVec3::new(self.lightness, self.chroma * cos, self.chroma * sin)
    }

    /// Linear-light sRGB, unclamped. Components may leave `0..=1` for
    /// out-of-gamut colors.
    pub fn to_linear_srgb(&self) -> DVec3 {
        let lms_prime = OKLAB_TO_LMS * self.to_oklab();
        let lms = lms_prime * lms_prime * lms_prime;
        LMS_TO_LINEAR_SRGB * lms
    }
}

/// Convert an OKLCH color to gamma-encoded 8-bit sRGB.
///
/// Never fails: out-of-gamut channels saturate at 0 or 255.
pub fn perceptual_to_rgb8(c: PerceptualColor) -> Rgb8 {
    let linear = c.to_linear_srgb();
    let encode = |v: f64| -> u8 {
        let scaled = (srgb_encode(v) * 255.0).round();
        // NaN casts to 0.
        scaled.clamp(0.0, 255.0) as u8
    };
    Rgb8::new(encode(linear.x), encode(linear.y), encode(linear.z))
}

impl From<PerceptualColor> for Rgb8 {
    fn from(c: PerceptualColor) -> Self {
        perceptual_to_rgb8(c)
    }
}

impl From<palette::Oklch<f64>> for PerceptualColor {
    fn from(c: palette::Oklch<f64>) -> Self {
        Self::new(c.l, c.chroma, c.hue.into_positive_degrees())
    }
}

impl From<PerceptualColor> for palette::Oklch<f64> {
    fn from(c: PerceptualColor) -> Self {
        palette::Oklch::new(c.lightness, c.chroma, c.hue)
    }
}
