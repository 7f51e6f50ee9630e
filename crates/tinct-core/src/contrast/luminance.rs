//! WCAG 2.1 relative luminance and contrast ratio.
//!
//! # Formula
//! ```text
//!   L     = 0.2126 × R_lin + 0.7152 × G_lin + 0.0722 × B_lin
//!   ratio = (L_lighter + 0.05) / (L_darker + 0.05)
//! ```
//!
//! Channels are linearized with [`wcag_linearize`], not the IEC sRGB curve.

use std::fmt;

use serde::Serialize;

use crate::color::rgb::Rgb8;
use crate::color::transfer::wcag_linearize;

/// Rec. 709 luminance coefficients as used by WCAG.
const LUMA_R: f64 = 0.2126;
const LUMA_G: f64 = 0.7152;
const LUMA_B: f64 = 0.0722;

/// Flare term added to both luminances.
const FLARE: f64 = 0.05;

/// A WCAG contrast ratio, always within `1.0..=21.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ContrastRatio(f64);

impl ContrastRatio {
    pub const MIN: Self = Self(1.0);
    pub const MAX: Self = Self(21.0);

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<ContrastRatio> for f64 {
    fn from(r: ContrastRatio) -> Self {
        r.0
    }
}

impl fmt::Display for ContrastRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}:1", self.0)
    }
}

/// WCAG relative luminance of an sRGB color, in `0.0..=1.0`.
pub fn relative_luminance(c: Rgb8) -> f64 {
    let lin = |v: u8| wcag_linearize(f64::from(v) / 255.0);
    let l = LUMA_R * lin(c.r) + LUMA_G * lin(c.g) + LUMA_B * lin(c.b);
    l.clamp(0.0, 1.0)
}

/// Contrast ratio between two relative luminances. Argument order does not
/// matter.
pub fn ratio_from_luminances(a: f64, b: f64) -> ContrastRatio {
    let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
    ContrastRatio((lighter + FLARE) / (darker + FLARE))
}

/// Contrast ratio between foreground and background. Swapping the arguments
/// yields the identical value.
pub fn contrast_ratio(fg: Rgb8, bg: Rgb8) -> ContrastRatio {
    ratio_from_luminances(relative_luminance(fg), relative_luminance(bg))
}
