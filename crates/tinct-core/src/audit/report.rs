//! Audit results and report rendering.
//!
//! [`AuditReport`] is the canonical output. [`AuditReport::records`] and
//! [`AuditReport::to_json`] give the machine-readable form, `Display` gives a
//! plain-text listing and [`AuditReport::markdown`] a Markdown table.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::case::{ResolvedCase, Theme};
use crate::color::rgb::Rgb8;
use crate::contrast::luminance::ContrastRatio;
use crate::error::ResolutionError;

/// Remediation hint attached to a failing case, escalating with the deficit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Small deficit: a veil between the colors closes the gap.
    AddOverlay,
    /// Moderate deficit: switch to the role's lighter or darker variant.
    UseAlternateVariant,
    /// Large deficit: pick a different role pairing.
    ReconsiderPairing,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddOverlay => write!(f, "add an overlay"),
            Self::UseAlternateVariant => write!(f, "use an alternate light/dark variant"),
            Self::ReconsiderPairing => write!(f, "reconsider the color pairing"),
        }
    }
}

/// Outcome of one concrete case.
///
/// `ratio` is `None` exactly when resolution failed, in which case `error`
/// holds the reason and `passes` is false.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastResult {
    pub case: ResolvedCase,
    pub foreground: Option<Rgb8>,
    pub background: Option<Rgb8>,
    pub ratio: Option<ContrastRatio>,
    pub passes: bool,
    pub recommendation: Option<Recommendation>,
    pub error: Option<ResolutionError>,
}

impl ContrastResult {
    pub(crate) fn unresolved(case: ResolvedCase, error: ResolutionError) -> Self {
        Self {
            case,
            foreground: None,
            background: None,
            ratio: None,
            passes: false,
            recommendation: None,
            error: Some(error),
        }
    }

    pub fn is_resolution_error(&self) -> bool {
        self.error.is_some()
    }

    /// Flat, serializable form of this result.
    pub fn record(&self) -> ResultRecord {
        ResultRecord {
            description: self.case.description.clone(),
            foreground_role: self.case.foreground_role.clone(),
            background_role: self.case.background_role.clone(),
            context: self.case.theme,
            foreground: self.foreground,
            background: self.background,
            ratio: self.ratio.map(ContrastRatio::value),
            min_ratio: self.case.min_ratio,
            passes: self.passes,
            recommendation: self.recommendation,
            error: self.error.as_ref().map(ToString::to_string),
        }
    }

    fn status(&self) -> &'static str {
        if self.passes {
            "pass"
        } else if self.is_resolution_error() {
            "error"
        } else {
            "fail"
        }
    }

    fn note(&self) -> String {
        match (&self.error, self.recommendation) {
            (Some(err), _) => err.to_string(),
            (None, Some(rec)) => rec.to_string(),
            (None, None) => String::new(),
        }
    }

    fn ratio_text(&self) -> String {
        self.ratio.map_or_else(|| "n/a".to_string(), |r| r.to_string())
    }
}

/// One result as a flat record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub description: String,
    pub foreground_role: String,
    pub background_role: String,
    pub context: Theme,
    pub foreground: Option<Rgb8>,
    pub background: Option<Rgb8>,
    pub ratio: Option<f64>,
    pub min_ratio: f64,
    pub passes: bool,
    pub recommendation: Option<Recommendation>,
    pub error: Option<String>,
}

/// Totals over all results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Failing results selected by the runner's critical predicate.
    pub critical_failures: Vec<ContrastResult>,
}

/// Report of one audit run. Results keep input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditReport {
    pub results: Vec<ContrastResult>,
    pub summary: AuditSummary,
}

#[derive(Serialize)]
struct ReportDocument {
    results: Vec<ResultRecord>,
    summary: SummaryDocument,
}

#[derive(Serialize)]
struct SummaryDocument {
    total: usize,
    passed: usize,
    failed: usize,
    critical_failures: Vec<ResultRecord>,
}

impl AuditReport {
    pub(crate) fn new(
        results: Vec<ContrastResult>,
        critical_failures: Vec<ContrastResult>,
    ) -> Self {
        let passed = results.iter().filter(|r| r.passes).count();
        let summary = AuditSummary {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            critical_failures,
        };
        Self { results, summary }
    }

    /// Whether an integration layer should treat this run as failed.
    pub fn has_critical_failures(&self) -> bool {
        !self.summary.critical_failures.is_empty()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ContrastResult> {
        self.results.iter().filter(|r| !r.passes)
    }

    pub fn records(&self) -> Vec<ResultRecord> {
        self.results.iter().map(ContrastResult::record).collect()
    }

    /// Pretty-printed JSON: `{ "results": [...], "summary": {...} }`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let doc = ReportDocument {
            results: self.records(),
            summary: SummaryDocument {
                total: self.summary.total,
                passed: self.summary.passed,
                failed: self.summary.failed,
                critical_failures: self
                    .summary
                    .critical_failures
                    .iter()
                    .map(ContrastResult::record)
                    .collect(),
            },
        };
        serde_json::to_string_pretty(&doc)
    }

    /// Markdown table view, rendered through `Display`.
    pub fn markdown(&self) -> Markdown<'_> {
        Markdown(self)
    }

    pub fn to_markdown(&self) -> String {
        self.markdown().to_string()
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in &self.results {
            write!(
                f,
                "{:<5}  {:<5}  {:>8}  (min {:.2})  {}",
                r.status().to_uppercase(),
                r.case.theme,
                r.ratio_text(),
                r.case.min_ratio,
                r.case.description
            )?;
            let note = r.note();
            if !note.is_empty() {
                write!(f, ": {note}")?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "{} cases, {} passed, {} failed, {} critical",
            self.summary.total,
            self.summary.passed,
            self.summary.failed,
            self.summary.critical_failures.len()
        )
    }
}

/// Markdown rendering of an [`AuditReport`].
pub struct Markdown<'a>(&'a AuditReport);

const TABLE_HEADER: &str = concat!(
    "| Description | Context | Foreground | Background ",
    "| Ratio | Required | Result | Notes |"
);

impl fmt::Display for Markdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "{TABLE_HEADER}")?;
        writeln!(f, "|---|---|---|---|---|---|---|---|")?;
        for r in &report.results {
            let color = |c: Option<Rgb8>| c.map_or_else(|| "n/a".to_string(), |c| format!("`{c}`"));
            writeln!(
                f,
                "| {} | {} | {} {} | {} {} | {} | {:.2}:1 | {} | {} |",
                escape(&r.case.description),
                r.case.theme,
                escape(&r.case.foreground_role),
                color(r.foreground),
                escape(&r.case.background_role),
                color(r.background),
                r.ratio_text(),
                r.case.min_ratio,
                r.status(),
                escape(&r.note())
            )?;
        }
        writeln!(f)?;
        write!(
            f,
            "**Summary:** {} total, {} passed, {} failed, {} critical",
            report.summary.total,
            report.summary.passed,
            report.summary.failed,
            report.summary.critical_failures.len()
        )
    }
}

fn escape(cell: &str) -> String {
    cell.replace('|', "\\|")
}
