//! Batch evaluation of test cases against a token resolver.
//!
//! Each concrete case is evaluated independently: resolve both roles,
//! convert to RGB, compute the ratio, compare against the case's minimum.
//! A resolution failure marks that case failed and the batch moves on.
//!
//! Failing cases get a cheap deficit-based [`Recommendation`] rather than a
//! full adjustment search; see [`crate::suggest`] for the interactive path.

use serde::{Deserialize, Serialize};

use super::case::{ResolvedCase, TestCase, Theme};
use super::report::{AuditReport, ContrastResult, Recommendation};
use super::resolver::ColorTokenResolver;
use crate::color::rgb::Rgb8;
use crate::contrast::luminance::contrast_ratio;
use crate::error::ResolutionError;

/// Selects which failing results count as critical.
pub trait CriticalPredicate {
    fn is_critical(&self, result: &ContrastResult) -> bool;
}

impl<F> CriticalPredicate for F
where
    F: Fn(&ContrastResult) -> bool,
{
    fn is_critical(&self, result: &ContrastResult) -> bool {
        self(result)
    }
}

/// Predicate that never marks anything critical. The runner default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCritical;

impl CriticalPredicate for NoCritical {
    fn is_critical(&self, _: &ContrastResult) -> bool {
        false
    }
}

/// Data-driven critical marker. Every field that is set must match.
///
/// `{ "role": "accent-coral", "theme": "dark" }` marks failures involving the
/// coral accent in the dark theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriticalRule {
    /// Substring of the case description.
    pub description_contains: Option<String>,
    /// Foreground or background role name.
    pub role: Option<String>,
    pub theme: Option<Theme>,
}

impl CriticalPredicate for CriticalRule {
    fn is_critical(&self, result: &ContrastResult) -> bool {
        let case = &result.case;
        let description = self
            .description_contains
            .as_deref()
            .is_none_or(|needle| case.description.contains(needle));
        let role = self
            .role
            .as_deref()
            .is_none_or(|role| case.foreground_role == role || case.background_role == role);
        let theme = self.theme.is_none_or(|theme| case.theme == theme);
        description && role && theme
    }
}

/// A set of rules; a result is critical if any rule matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriticalRules(pub Vec<CriticalRule>);

impl CriticalPredicate for CriticalRules {
    fn is_critical(&self, result: &ContrastResult) -> bool {
        self.0.iter().any(|rule| rule.is_critical(result))
    }
}

/// Deficit thresholds for recommendations on failing cases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Escalation {
    /// Deficits below this suggest an overlay.
    pub overlay_below: f64,
    /// Deficits below this (and not below `overlay_below`) suggest a variant.
    pub variant_below: f64,
}

impl Default for Escalation {
    fn default() -> Self {
        Self {
            overlay_below: 0.5,
            variant_below: 1.5,
        }
    }
}

impl Escalation {
    /// Recommendation for a case missing its minimum by `deficit`.
    pub fn recommend(&self, deficit: f64) -> Recommendation {
        if deficit < self.overlay_below {
            Recommendation::AddOverlay
        } else if deficit < self.variant_below {
            Recommendation::UseAlternateVariant
        } else {
            Recommendation::ReconsiderPairing
        }
    }
}

/// Evaluates test cases and assembles an [`AuditReport`].
#[derive(Debug, Clone, Default)]
pub struct AuditRunner<P = NoCritical> {
    critical: P,
    escalation: Escalation,
}

impl AuditRunner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: CriticalPredicate> AuditRunner<P> {
    /// Replace the critical predicate.
    pub fn with_critical<Q: CriticalPredicate>(self, critical: Q) -> AuditRunner<Q> {
        AuditRunner {
            critical,
            escalation: self.escalation,
        }
    }

    pub fn with_escalation(mut self, escalation: Escalation) -> Self {
        self.escalation = escalation;
        self
    }

    /// Run every case, expanding `Both` into light and dark. Results keep
    /// input order.
    pub fn run<R>(&self, cases: &[TestCase], resolver: &R) -> AuditReport
    where
        R: ColorTokenResolver + ?Sized,
    {
        let results: Vec<ContrastResult> = cases
            .iter()
            .flat_map(TestCase::expand)
            .map(|case| self.evaluate(case, resolver))
            .collect();

        let critical_failures: Vec<ContrastResult> = results
            .iter()
            .filter(|r| !r.passes && self.critical.is_critical(r))
            .cloned()
            .collect();

        let report = AuditReport::new(results, critical_failures);
        tracing::info!(
            "contrast audit: {} cases, {} passed, {} failed, {} critical",
            report.summary.total,
            report.summary.passed,
            report.summary.failed,
            report.summary.critical_failures.len()
        );
        report
    }

    /// Evaluate a single concrete case.
    pub fn evaluate<R>(&self, case: ResolvedCase, resolver: &R) -> ContrastResult
    where
        R: ColorTokenResolver + ?Sized,
    {
        let colors = resolve_rgb(resolver, &case.foreground_role, case.theme).and_then(|fg| {
            resolve_rgb(resolver, &case.background_role, case.theme).map(|bg| (fg, bg))
        });

        let (fg, bg) = match colors {
            Ok(pair) => pair,
            Err(err) => {
                tracing::warn!("{} ({}): {err}", case.description, case.theme);
                return ContrastResult::unresolved(case, err);
            }
        };

        let ratio = contrast_ratio(fg, bg);
        let passes = ratio.value() >= case.min_ratio;
        let recommendation =
            (!passes).then(|| self.escalation.recommend(case.min_ratio - ratio.value()));
        tracing::debug!(
            "{} ({}): {fg} on {bg} = {ratio}, min {:.2}, {}",
            case.description,
            case.theme,
            case.min_ratio,
            if passes { "pass" } else { "fail" }
        );

        ContrastResult {
            case,
            foreground: Some(fg),
            background: Some(bg),
            ratio: Some(ratio),
            passes,
            recommendation,
            error: None,
        }
    }
}

fn resolve_rgb<R>(resolver: &R, role: &str, theme: Theme) -> Result<Rgb8, ResolutionError>
where
    R: ColorTokenResolver + ?Sized,
{
    resolver
        .resolve(role, theme)?
        .to_rgb8()
        .map_err(|source| ResolutionError::InvalidValue {
            role: role.to_string(),
            theme,
            source,
        })
}

/// Run `cases` with default settings: no critical predicate, default
/// escalation thresholds.
pub fn run_audit<R>(cases: &[TestCase], resolver: &R) -> AuditReport
where
    R: ColorTokenResolver + ?Sized,
{
    AuditRunner::new().run(cases, resolver)
}
