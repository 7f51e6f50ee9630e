//! WCAG contrast: relative luminance, contrast ratios, and AA/AAA conformance.

pub mod conformance;
pub mod luminance;
