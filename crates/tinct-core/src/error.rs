//! Error types for color parsing, token resolution, and audit configuration.
//!
//! Expected domain outcomes (out-of-gamut colors, failing contrast, an
//! unreachable adjustment target) are values, not errors. Only malformed
//! input ends up here.

use crate::audit::case::Theme;

/// Malformed color input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    #[error("hex color must have 6 digits, found {0}")]
    InvalidHexLength(usize),
    #[error("invalid hex digit {0:?}")]
    InvalidHexDigit(char),
    #[error("{field} = {value} is outside {expected}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// A role the token resolver could not turn into a color.
///
/// Surfaced per case inside the audit report, never as a batch failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolutionError {
    #[error("unknown role {role:?} in {theme} theme")]
    UnknownRole { role: String, theme: Theme },
    #[error("role {role:?} in {theme} theme has an invalid value: {source}")]
    InvalidValue {
        role: String,
        theme: Theme,
        #[source]
        source: ColorError,
    },
    #[error("token source unavailable: {0}")]
    Unavailable(String),
}

/// Malformed test-case data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CaseError {
    #[error("test case {0:?} has an empty role name")]
    EmptyRole(String),
    #[error("minimum ratio {0} is not within 1..=21")]
    InvalidMinRatio(f64),
}

/// Errors raised while loading an audit suite or token table.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid test case: {0}")]
    Case(#[from] CaseError),
    #[error("test case {description:?} references unknown role {role:?}")]
    UnknownRole { role: String, description: String },
}
