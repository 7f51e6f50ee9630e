//! End-to-end audit runs over a small design-token set.
//!
//! Run with: `cargo test -p tinct-core --test audit_end_to_end`

use tinct_core::{
    AuditRunner, AuditSuite, ColorTokenResolver, ContextSpec, ContrastResult, PerceptualColor,
    Recommendation, ResolutionError, Rgb8, TestCase, Theme, TokenTable, TokenValue,
    contrast_ratio, run_audit,
};

const TOKENS: &str = r##"{
    "accent-coral": { "light": "#a3443a", "dark": { "l": 0.6235, "c": 0.105, "h": 31.5 } },
    "dark-surface": { "l": 0.228, "c": 0.0049, "h": 67.6 },
    "surface": { "light": "#ffffff", "dark": { "l": 0.228, "c": 0.0049, "h": 67.6 } },
    "raised-surface": { "light": "#f2f2f2", "dark": { "l": 0.32, "c": 0.01, "h": 60 } },
    "text": { "light": "#1e1c1a", "dark": "#f5f5f5" },
    "muted-text": { "light": "#8a8a8a", "dark": "#6b6b6b" }
}"##;

const SUITE: &str = r#"{
    "cases": [
        { "foreground": "accent-coral", "background": "dark-surface",
          "description": "Coral accent on dark surface", "min_ratio": 4.5, "context": "dark" },
        { "foreground": "accent-coral", "background": "raised-surface",
          "description": "Coral accent on raised surface", "min_ratio": 4.5, "context": "dark" },
        { "foreground": "text", "background": "surface",
          "description": "Body text", "min_ratio": 7.0 },
        { "foreground": "muted-text", "background": "surface",
          "description": "Muted text", "min_ratio": 4.5 },
        { "foreground": "link", "background": "surface",
          "description": "Links", "min_ratio": 4.5, "context": "light" }
    ],
    "critical": [{ "role": "accent-coral", "theme": "dark" }]
}"#;

fn tokens() -> TokenTable {
    TokenTable::from_json_str(TOKENS).expect("token fixture parses")
}

fn suite() -> AuditSuite {
    AuditSuite::from_json_str(SUITE).expect("suite fixture parses")
}

#[test]
fn test_accent_coral_on_dark_surface_is_reproducible() {
    let cases = [TestCase::new(
        "accent-coral",
        "dark-surface",
        "Coral accent on dark surface",
        4.5,
        ContextSpec::Dark,
    )
    .unwrap()];

    let first = run_audit(&cases, &tokens());
    let second = run_audit(&cases, &tokens());
    assert_eq!(first, second);

    let r = &first.results[0];
    assert_eq!(r.foreground, Some(Rgb8::new(190, 110, 95)));
    assert_eq!(r.background, Some(Rgb8::new(30, 28, 26)));

    let ratio = r.ratio.expect("resolved case has a ratio");
    assert_eq!(
        ratio.value().to_bits(),
        contrast_ratio(Rgb8::new(190, 110, 95), Rgb8::new(30, 28, 26)).value().to_bits()
    );
    // ~4.518, just over AA.
    assert!((ratio.value() - 4.518).abs() < 0.001, "{ratio}");
    assert_eq!(r.passes, ratio.value() >= 4.5);
    assert_eq!(r.recommendation.is_some(), !r.passes);
}

#[test]
fn test_accent_coral_just_below_stricter_minimum_gets_overlay() {
    let cases = [TestCase::new(
        "accent-coral",
        "dark-surface",
        "Coral accent on dark surface, strict",
        4.6,
        ContextSpec::Dark,
    )
    .unwrap()];

    let report = run_audit(&cases, &tokens());
    let r = &report.results[0];
    // ~4.518 against 4.6 is a deficit of ~0.08.
    assert!(!r.passes, "{:?}", r.ratio);
    assert_eq!(r.recommendation, Some(Recommendation::AddOverlay));
    assert_eq!(report.summary.failed, 1);
}

#[test]
fn test_coral_on_raised_surface_fails_with_recommendation() {
    let report = suite().run(&tokens());
    let raised = report
        .results
        .iter()
        .find(|r| r.case.description == "Coral accent on raised surface")
        .unwrap();

    // (190, 110, 95) on (55, 50, 46) is ~3.37:1.
    assert!(!raised.passes);
    assert_eq!(raised.recommendation, Some(Recommendation::UseAlternateVariant));
    assert_eq!(report.summary.critical_failures, vec![raised.clone()]);
    assert!(report.has_critical_failures());
}

#[test]
fn test_suite_report_summary() {
    let report = suite().run(&tokens());

    // 2 dark-only + 2 × both + 1 light-only.
    assert_eq!(report.summary.total, 7);
    assert_eq!(report.summary.passed + report.summary.failed, 7);

    let descriptions: Vec<(&str, Theme)> = report
        .results
        .iter()
        .map(|r| (r.case.description.as_str(), r.case.theme))
        .collect();
    assert_eq!(
        descriptions,
        vec![
            ("Coral accent on dark surface", Theme::Dark),
            ("Coral accent on raised surface", Theme::Dark),
            ("Body text", Theme::Light),
            ("Body text", Theme::Dark),
            ("Muted text", Theme::Light),
            ("Muted text", Theme::Dark),
            ("Links", Theme::Light),
        ]
    );

    let links = report.results.last().unwrap();
    assert!(!links.passes);
    assert!(matches!(
        links.error,
        Some(ResolutionError::UnknownRole { ref role, theme: Theme::Light }) if role == "link"
    ));
}

#[test]
fn test_unknown_role_is_caught_by_validation() {
    let suite = suite();
    let table = tokens();
    let err = suite.validate_roles(table.roles()).unwrap_err();
    assert!(err.to_string().contains("\"link\""), "{err}");
}

#[test]
fn test_snapshot_gives_identical_report() {
    let table = tokens();
    let live = |role: &str, theme: Theme| table.resolve(role, theme);
    let suite = suite();

    let snapshot = TokenTable::snapshot(&live, suite.roles());
    assert_eq!(suite.run(&snapshot), suite.run(&live));
}

#[test]
fn test_failing_resolver_never_aborts() {
    let offline = |_: &str, _: Theme| -> Result<TokenValue, ResolutionError> {
        Err(ResolutionError::Unavailable("token service offline".into()))
    };
    let report = suite().run(&offline);
    assert_eq!(report.summary.total, 7);
    assert_eq!(report.summary.failed, 7);
    assert!(report.results.iter().all(ContrastResult::is_resolution_error));
    // Critical rule still applies to unresolved coral cases.
    assert_eq!(report.summary.critical_failures.len(), 2);
}

#[test]
fn test_json_and_markdown_outputs() {
    let report = suite().run(&tokens());

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 7);
    for record in results {
        for key in ["description", "context", "ratio", "min_ratio", "passes", "recommendation"] {
            assert!(record.get(key).is_some(), "record missing {key}: {record}");
        }
    }

    let md = report.to_markdown();
    assert_eq!(md.lines().filter(|l| l.starts_with("| ")).count(), 8);
    assert!(md.contains("Coral accent on dark surface"));
}

#[test]
fn test_runner_accepts_perceptual_closure_resolver() {
    let resolver = |role: &str, theme: Theme| -> Result<TokenValue, ResolutionError> {
        match role {
            "bg" if theme.is_dark() => Ok(PerceptualColor::new(0.0, 0.0, 0.0).into()),
            "bg" => Ok(PerceptualColor::new(1.0, 0.0, 0.0).into()),
            "fg" if theme.is_dark() => Ok(Rgb8::WHITE.into()),
            "fg" => Ok(Rgb8::BLACK.into()),
            other => Err(ResolutionError::UnknownRole {
                role: other.to_string(),
                theme,
            }),
        }
    };
    let cases = [TestCase::new("fg", "bg", "Max contrast", 21.0, ContextSpec::Both).unwrap()];
    let report = AuditRunner::new().run(&cases, &resolver);
    assert_eq!(report.summary.passed, 2);
    assert!(report.results.iter().all(|r| r.ratio.map(|r| r.value()) == Some(21.0)));
}
