//! WCAG 2.1 AA/AAA classification of contrast ratios.
//!
//! | Level | Normal text | Large text |
//! |-------|-------------|------------|
//! | AA    | 4.5         | 3.0        |
//! | AAA   | 7.0         | 4.5        |
//!
//! Comparisons are plain `>=` on the unrounded ratio.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Text size class selecting the threshold column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSizeClass {
    #[default]
    Normal,
    /// 18pt regular or 14pt bold and up.
    Large,
}

/// WCAG conformance tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WcagLevel {
    Aa,
    Aaa,
}

/// Highest tier a ratio reaches for a given text size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Fail,
    Aa,
    Aaa,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fail => write!(f, "fail"),
            Self::Aa => write!(f, "AA"),
            Self::Aaa => write!(f, "AAA"),
        }
    }
}

/// Minimum ratio required for `level` at `size`.
pub const fn min_ratio(level: WcagLevel, size: TextSizeClass) -> f64 {
    match (level, size) {
        (WcagLevel::Aa, TextSizeClass::Normal) => 4.5,
        (WcagLevel::Aa, TextSizeClass::Large) => 3.0,
        (WcagLevel::Aaa, TextSizeClass::Normal) => 7.0,
        (WcagLevel::Aaa, TextSizeClass::Large) => 4.5,
    }
}

/// Whether `ratio` satisfies `level` at `size`.
pub fn meets(ratio: impl Into<f64>, level: WcagLevel, size: TextSizeClass) -> bool {
    ratio.into() >= min_ratio(level, size)
}

pub fn meets_aa(ratio: impl Into<f64>, size: TextSizeClass) -> bool {
    meets(ratio, WcagLevel::Aa, size)
}

pub fn meets_aaa(ratio: impl Into<f64>, size: TextSizeClass) -> bool {
    meets(ratio, WcagLevel::Aaa, size)
}

/// Classify `ratio` into the highest tier it reaches.
pub fn grade(ratio: impl Into<f64>, size: TextSizeClass) -> Grade {
    let ratio = ratio.into();
    if meets_aaa(ratio, size) {
        Grade::Aaa
    } else if meets_aa(ratio, size) {
        Grade::Aa
    } else {
        Grade::Fail
    }
}
