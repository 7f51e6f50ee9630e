//! Tinct Core: color science and contrast conformance for design tokens.
//!
//! This crate contains the OKLCH to sRGB conversion, WCAG luminance and
//! contrast math, the AA/AAA evaluator, the foreground adjustment search, and
//! the batch audit runner. No I/O, no global state.

pub mod audit;
pub mod color;
pub mod config;
pub mod contrast;
pub mod error;
pub mod suggest;

// Re-exports for convenience.
pub use audit::case::{ContextSpec, ResolvedCase, TestCase, Theme};
pub use audit::report::{AuditReport, AuditSummary, ContrastResult, Recommendation, ResultRecord};
pub use audit::resolver::{ColorTokenResolver, TokenTable, TokenValue};
pub use audit::runner::{
    AuditRunner, CriticalPredicate, CriticalRule, CriticalRules, Escalation, NoCritical, run_audit,
};
pub use color::perceptual::{PerceptualColor, perceptual_to_rgb8};
pub use color::rgb::{Rgb8, hex_to_rgb8, rgb8_to_hex};
pub use config::AuditSuite;
pub use contrast::conformance::{
    Grade, TextSizeClass, WcagLevel, grade, meets, meets_aa, meets_aaa, min_ratio,
};
pub use contrast::luminance::{
    ContrastRatio, contrast_ratio, ratio_from_luminances, relative_luminance,
};
pub use error::{CaseError, ColorError, ConfigError, ResolutionError};
pub use suggest::{
    Adjustment, Direction, SearchParams, Suggestion, suggest_adjustment, suggest_adjustment_with,
};
