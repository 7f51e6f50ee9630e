//! Token resolution, the engine's only outward dependency.
//!
//! The design-token source lives elsewhere. The engine sees it through
//! [`ColorTokenResolver`] and nothing else. Slow or networked sources should
//! be captured once with [`TokenTable::snapshot`] before running an audit.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::case::Theme;
use crate::color::perceptual::{PerceptualColor, perceptual_to_rgb8};
use crate::color::rgb::{Rgb8, hex_to_rgb8, rgb8_to_hex};
use crate::error::{ColorError, ConfigError, ResolutionError};

/// A resolved token value: either an OKLCH color or a hex string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Hex(String),
    Perceptual(PerceptualColor),
}

impl TokenValue {
    /// Convert to display RGB. Perceptual values saturate into gamut; hex
    /// values must parse.
    pub fn to_rgb8(&self) -> Result<Rgb8, ColorError> {
        match self {
            Self::Hex(s) => hex_to_rgb8(s),
            Self::Perceptual(c) => Ok(perceptual_to_rgb8(*c)),
        }
    }
}

impl From<PerceptualColor> for TokenValue {
    fn from(c: PerceptualColor) -> Self {
        Self::Perceptual(c)
    }
}

impl From<Rgb8> for TokenValue {
    fn from(c: Rgb8) -> Self {
        Self::Hex(rgb8_to_hex(c))
    }
}

/// Maps a role name to a color for a theme.
///
/// Implementations must be read-only: the same arguments give the same answer.
pub trait ColorTokenResolver {
    fn resolve(&self, role: &str, theme: Theme) -> Result<TokenValue, ResolutionError>;
}

impl<F> ColorTokenResolver for F
where
    F: Fn(&str, Theme) -> Result<TokenValue, ResolutionError>,
{
    fn resolve(&self, role: &str, theme: Theme) -> Result<TokenValue, ResolutionError> {
        self(role, theme)
    }
}

/// JSON entry: either one value shared by both themes or a light/dark pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TokenEntry {
    Themed { light: TokenValue, dark: TokenValue },
    Shared(TokenValue),
}

/// A plain role → color mapping per theme.
///
/// JSON form:
/// ```json
/// {
///   "surface": { "light": "#fafafa", "dark": { "l": 0.228, "c": 0.0049, "h": 67.6 } },
///   "accent-coral": { "l": 0.6235, "c": 0.105, "h": 31.5 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, TokenEntry>")]
pub struct TokenTable {
    light: ThemeTokens,
    dark: ThemeTokens,
}

/// Values and recorded failures for one theme.
#[derive(Debug, Clone, Default, PartialEq)]
struct ThemeTokens {
    values: BTreeMap<String, TokenValue>,
    failures: BTreeMap<String, ResolutionError>,
}

impl ThemeTokens {
    fn set(&mut self, role: String, value: TokenValue) {
        self.failures.remove(&role);
        self.values.insert(role, value);
    }
}

impl From<BTreeMap<String, TokenEntry>> for TokenTable {
    fn from(entries: BTreeMap<String, TokenEntry>) -> Self {
        let mut table = Self::default();
        for (role, entry) in entries {
            match entry {
                TokenEntry::Themed { light, dark } => table.insert(role, light, dark),
                TokenEntry::Shared(value) => table.insert_shared(role, value),
            }
        }
        table
    }
}

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a token table from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the light and dark values of `role`.
    pub fn insert(
        &mut self,
        role: impl Into<String>,
        light: impl Into<TokenValue>,
        dark: impl Into<TokenValue>,
    ) {
        let role = role.into();
        self.light.set(role.clone(), light.into());
        self.dark.set(role, dark.into());
    }

    /// Set one value of `role` for both themes.
    pub fn insert_shared(&mut self, role: impl Into<String>, value: impl Into<TokenValue>) {
        let value = value.into();
        self.insert(role, value.clone(), value);
    }

    /// Resolve every role in both themes once through `resolver`.
    ///
    /// Failures are kept and replayed per lookup, so an audit over the
    /// snapshot reports them per case exactly as the live resolver would.
    pub fn snapshot<R, I, S>(resolver: &R, roles: I) -> Self
    where
        R: ColorTokenResolver + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for role in roles {
            let role = role.as_ref();
            for theme in Theme::ALL {
                let tokens = table.theme_mut(theme);
                match resolver.resolve(role, theme) {
                    Ok(value) => {
                        tokens.values.insert(role.to_string(), value);
                    }
                    Err(err) => {
                        tracing::debug!("snapshot: {role} ({theme}) failed: {err}");
                        tokens.failures.insert(role.to_string(), err);
                    }
                }
            }
        }
        tracing::debug!(
            "token snapshot: {} light, {} dark, {} failed",
            table.light.values.len(),
            table.dark.values.len(),
            table.light.failures.len() + table.dark.failures.len()
        );
        table
    }

    /// Every role with a value in at least one theme, sorted.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        let mut roles: Vec<&str> = self
            .light
            .values
            .keys()
            .chain(self.dark.values.keys())
            .map(String::as_str)
            .collect();
        roles.sort_unstable();
        roles.dedup();
        roles.into_iter()
    }

    pub fn contains(&self, role: &str) -> bool {
        self.light.values.contains_key(role) || self.dark.values.contains_key(role)
    }

    fn theme(&self, theme: Theme) -> &ThemeTokens {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }

    fn theme_mut(&mut self, theme: Theme) -> &mut ThemeTokens {
        match theme {
            Theme::Light => &mut self.light,
            Theme::Dark => &mut self.dark,
        }
    }
}

impl ColorTokenResolver for TokenTable {
    fn resolve(&self, role: &str, theme: Theme) -> Result<TokenValue, ResolutionError> {
        let tokens = self.theme(theme);
        if let Some(err) = tokens.failures.get(role) {
            return Err(err.clone());
        }
        tokens
            .values
            .get(role)
            .cloned()
            .ok_or_else(|| ResolutionError::UnknownRole {
                role: role.to_string(),
                theme,
            })
    }
}
