//! Color representations: OKLCH design colors, 8-bit sRGB, and transfer curves.

pub mod perceptual;
pub mod rgb;
pub mod transfer;
