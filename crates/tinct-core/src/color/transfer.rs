//! The two piecewise sRGB curves this crate needs, one per direction.
//!
//! Display conversion encodes linear light with the IEC 61966-2-1 curve
//! (linear cut 0.0031308). Contrast math decodes 8-bit channels with the
//! curve as printed in WCAG 2.1 (encoded cut 0.03928). The cuts differ, so
//! contrast ratios computed here match WCAG checkers exactly while display
//! colors match every other sRGB encoder.

/// IEC sRGB cut on the linear side.
const SRGB_LINEAR_CUT: f64 = 0.003_130_8;

/// WCAG 2.1 cut on the encoded side.
const WCAG_ENCODED_CUT: f64 = 0.039_28;

/// Encode linear light in `0..=1` to an sRGB signal in `0..=1`.
///
/// ```text
/// L <= 0.0031308 → 12.92 × L
/// L >  0.0031308 → 1.055 × L^(1/2.4) − 0.055
/// ```
pub fn srgb_encode(linear: f64) -> f64 {
    if linear <= SRGB_LINEAR_CUT {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Decode an sRGB channel in `0..=1` to linear light for relative luminance.
///
/// ```text
/// V <= 0.03928 → V / 12.92
/// V >  0.03928 → ((V + 0.055) / 1.055) ^ 2.4
/// ```
pub fn wcag_linearize(encoded: f64) -> f64 {
    if encoded <= WCAG_ENCODED_CUT {
        encoded / 12.92
    } else {
        ((encoded + 0.055) / 1.055).powf(2.4)
    }
}
