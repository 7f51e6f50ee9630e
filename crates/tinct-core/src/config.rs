//! Audit suite configuration.
//!
//! An `AuditSuite` is the data-driven description of a run: the test cases,
//! which failures are critical, recommendation thresholds, and the search
//! bounds for interactive suggestions. It is the single place a suite is
//! declared; nothing in the engine hard-codes a case.
//!
//! ```json
//! {
//!   "cases": [
//!     { "foreground": "accent-coral", "background": "dark-surface",
//!       "description": "Coral accent on surface", "min_ratio": 4.5, "context": "dark" }
//!   ],
//!   "critical": [{ "role": "accent-coral", "theme": "dark" }],
//!   "escalation": { "overlay_below": 0.5, "variant_below": 1.5 },
//!   "search": { "step": 10, "max_iterations": 20 }
//! }
//! ```

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::audit::case::{RawTestCase, TestCase};
use crate::audit::report::AuditReport;
use crate::audit::resolver::ColorTokenResolver;
use crate::audit::runner::{AuditRunner, CriticalRule, CriticalRules, Escalation};
use crate::color::rgb::Rgb8;
use crate::error::ConfigError;
use crate::suggest::{Adjustment, SearchParams, suggest_adjustment_with};

/// A complete, declarative audit configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuditSuite {
    pub cases: Vec<TestCase>,
    pub critical: Vec<CriticalRule>,
    pub escalation: Escalation,
    pub search: SearchParams,
}

/// Wire form; cases are validated after parsing so that bad case data
/// surfaces as [`ConfigError::Case`].
#[derive(Deserialize)]
struct RawSuite {
    #[serde(default)]
    cases: Vec<RawTestCase>,
    #[serde(default)]
    critical: Vec<CriticalRule>,
    #[serde(default)]
    escalation: Escalation,
    #[serde(default)]
    search: SearchParams,
}

impl AuditSuite {
    /// Parse and validate a suite from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawSuite = serde_json::from_str(json)?;
        let cases = raw
            .cases
            .into_iter()
            .map(TestCase::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(
            "loaded audit suite: {} cases, {} critical rules",
            cases.len(),
            raw.critical.len()
        );
        Ok(Self {
            cases,
            critical: raw.critical,
            escalation: raw.escalation,
            search: raw.search,
        })
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every role referenced by a case, sorted.
    pub fn roles(&self) -> BTreeSet<&str> {
        self.cases
            .iter()
            .flat_map(|c| [c.foreground_role(), c.background_role()])
            .collect()
    }

    /// Check every referenced role against a closed set of known roles.
    pub fn validate_roles<I, S>(&self, known: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let known: HashSet<String> = known.into_iter().map(|s| s.as_ref().to_string()).collect();
        for case in &self.cases {
            for role in [case.foreground_role(), case.background_role()] {
                if !known.contains(role) {
                    return Err(ConfigError::UnknownRole {
                        role: role.to_string(),
                        description: case.description().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// A runner configured with this suite's critical rules and escalation.
    pub fn runner(&self) -> AuditRunner<CriticalRules> {
        AuditRunner::new()
            .with_critical(CriticalRules(self.critical.clone()))
            .with_escalation(self.escalation)
    }

    /// Run the suite's cases against `resolver`.
    pub fn run<R>(&self, resolver: &R) -> AuditReport
    where
        R: ColorTokenResolver + ?Sized,
    {
        self.runner().run(&self.cases, resolver)
    }

    /// Adjustment search bounded by this suite's [`SearchParams`].
    pub fn suggest(&self, fg: Rgb8, bg: Rgb8, target: f64) -> Adjustment {
        suggest_adjustment_with(fg, bg, target, &self.search)
    }
}
