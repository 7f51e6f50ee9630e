//! Declarative audit cases and their expansion into concrete theme contexts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CaseError;

/// Theme a role is resolved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Self; 2] = [Self::Light, Self::Dark];

    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.pad("light"),
            Self::Dark => f.pad("dark"),
        }
    }
}

/// Theme context declared on a case. `Both` runs the case once per theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextSpec {
    Light,
    Dark,
    #[default]
    Both,
}

impl ContextSpec {
    /// Concrete themes in evaluation order.
    pub fn themes(self) -> &'static [Theme] {
        match self {
            Self::Light => &[Theme::Light],
            Self::Dark => &[Theme::Dark],
            Self::Both => &Theme::ALL,
        }
    }
}

/// Default required ratio when a case omits it: AA for normal text.
fn default_min_ratio() -> f64 {
    4.5
}

/// Wire form of [`TestCase`], validated on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RawTestCase {
    foreground: String,
    background: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_min_ratio")]
    min_ratio: f64,
    #[serde(default)]
    context: ContextSpec,
}

/// A foreground/background role pair with its required contrast.
///
/// Always valid: role names are non-empty and `min_ratio` lies in `1..=21`.
///
/// JSON form:
/// ```json
/// { "foreground": "accent-coral", "background": "surface",
///   "description": "Accent text on surface", "min_ratio": 4.5, "context": "both" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTestCase", into = "RawTestCase")]
pub struct TestCase {
    foreground_role: String,
    background_role: String,
    description: String,
    min_ratio: f64,
    context: ContextSpec,
}

impl TestCase {
    pub fn new(
        foreground_role: impl Into<String>,
        background_role: impl Into<String>,
        description: impl Into<String>,
        min_ratio: f64,
        context: ContextSpec,
    ) -> Result<Self, CaseError> {
        let case = Self {
            foreground_role: foreground_role.into(),
            background_role: background_role.into(),
            description: description.into(),
            min_ratio,
            context,
        };
        if case.foreground_role.trim().is_empty() || case.background_role.trim().is_empty() {
            return Err(CaseError::EmptyRole(case.description));
        }
        if !(1.0..=21.0).contains(&min_ratio) {
            return Err(CaseError::InvalidMinRatio(min_ratio));
        }
        Ok(case)
    }

    pub fn foreground_role(&self) -> &str {
        &self.foreground_role
    }

    pub fn background_role(&self) -> &str {
        &self.background_role
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn min_ratio(&self) -> f64 {
        self.min_ratio
    }

    pub fn context(&self) -> ContextSpec {
        self.context
    }

    /// One concrete case per theme, light before dark.
    pub fn expand(&self) -> impl Iterator<Item = ResolvedCase> + '_ {
        self.context.themes().iter().map(move |&theme| ResolvedCase {
            foreground_role: self.foreground_role.clone(),
            background_role: self.background_role.clone(),
            description: self.description.clone(),
            min_ratio: self.min_ratio,
            theme,
        })
    }
}

impl TryFrom<RawTestCase> for TestCase {
    type Error = CaseError;

    fn try_from(raw: RawTestCase) -> Result<Self, Self::Error> {
        Self::new(raw.foreground, raw.background, raw.description, raw.min_ratio, raw.context)
    }
}

impl From<TestCase> for RawTestCase {
    fn from(case: TestCase) -> Self {
        Self {
            foreground: case.foreground_role,
            background: case.background_role,
            description: case.description,
            min_ratio: case.min_ratio,
            context: case.context,
        }
    }
}

/// A [`TestCase`] bound to a single theme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCase {
    pub foreground_role: String,
    pub background_role: String,
    pub description: String,
    pub min_ratio: f64,
    pub theme: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_expands_light_then_dark() {
        let case = TestCase::new("text", "surface", "Body text", 4.5, ContextSpec::Both).unwrap();
        let themes: Vec<Theme> = case.expand().map(|c| c.theme).collect();
        assert_eq!(themes, vec![Theme::Light, Theme::Dark]);
    }

    #[test]
    fn test_single_context_expands_once() {
        let case = TestCase::new("text", "surface", "Body text", 4.5, ContextSpec::Dark).unwrap();
        let expanded: Vec<ResolvedCase> = case.expand().collect();
        assert_eq!(expanded.len(), 1);
        assert_eq!(expanded[0].theme, Theme::Dark);
        assert_eq!(expanded[0].foreground_role, "text");
        assert_eq!(expanded[0].min_ratio, 4.5);
    }

    #[test]
    fn test_rejects_empty_roles() {
        let err = TestCase::new("", "surface", "Broken", 4.5, ContextSpec::Both).unwrap_err();
        assert_eq!(err, CaseError::EmptyRole("Broken".into()));
        assert!(TestCase::new("text", "  ", "Broken", 4.5, ContextSpec::Both).is_err());
    }

    #[test]
    fn test_rejects_invalid_min_ratio() {
        for bad in [0.5, 21.5, f64::NAN, f64::INFINITY] {
            assert!(
                TestCase::new("a", "b", "", bad, ContextSpec::Light).is_err(),
                "min_ratio {bad} should be rejected"
            );
        }
        assert!(TestCase::new("a", "b", "", 1.0, ContextSpec::Light).is_ok());
        assert!(TestCase::new("a", "b", "", 21.0, ContextSpec::Light).is_ok());
    }

    #[test]
    fn test_json_defaults_and_validation() {
        let json = r#"{ "foreground": "text", "background": "surface" }"#;
        let case: TestCase = serde_json::from_str(json).unwrap();
        assert_eq!(case.min_ratio(), 4.5);
        assert_eq!(case.context(), ContextSpec::Both);
        assert_eq!(case.description(), "");

        let json = r#"{ "foreground": "text", "background": "surface", "min_ratio": 30 }"#;
        let bad = serde_json::from_str::<TestCase>(json);
        assert!(bad.is_err());
    }

    #[test]
    fn test_json_roundtrip_keeps_field_names() {
        let case = TestCase::new("accent", "surface", "Accent", 3.0, ContextSpec::Light).unwrap();
        let json = serde_json::to_value(&case).unwrap();
        assert_eq!(json["foreground"], "accent");
        assert_eq!(json["context"], "light");
        let back: TestCase = serde_json::from_value(json).unwrap();
        assert_eq!(back, case);
    }
}
