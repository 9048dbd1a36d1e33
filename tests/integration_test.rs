// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for colorsense

use colorsense::config::ScanOptions;
use colorsense::report::{generate_report, OutputFormat};
use colorsense::scanner;
use colorsense::{annotate, annotate_report, ColorsenseError, ScanReport, Severity};
use std::path::Path;

fn fixture(name: &str) -> String {
    std::fs::read_to_string(Path::new("tests/fixtures").join(name)).expect("fixture exists")
}

#[test]
fn test_scan_accessible_fixture() {
    let report = scanner::scan_html(&fixture("accessible.html"));

    assert_eq!(report.total_elements_checked, 7);
    assert!(
        report.is_clean(),
        "Accessible fixture should have no issues, got {:?}",
        report.issues.iter().map(|i| &i.text_preview).collect::<Vec<_>>()
    );
}

#[test]
fn test_scan_inaccessible_fixture() {
    let report = scanner::scan_html(&fixture("inaccessible.html"));

    assert_eq!(report.total_elements_checked, 8);
    assert_eq!(report.total_issues_found, 7);
    assert_eq!(report.summary.high_severity_count, 6);
    assert_eq!(report.summary.medium_severity_count, 1);
    assert!(report.issues.iter().all(|i| !i.compliance.passes_required));

    let tags: Vec<&str> = report.issues.iter().map(|i| i.element_tag.as_str()).collect();
    assert_eq!(tags, vec!["h1", "p", "span", "th", "td", "button", "a"]);
}

#[test]
fn test_issue_indices_follow_candidate_order() {
    let report = scanner::scan_html(&fixture("inaccessible.html"));
    let indices: Vec<usize> = report.issues.iter().map(|i| i.element_index).collect();
    assert_eq!(indices, vec![0, 1, 4, 5, 6, 7, 9]);

    let button = report.issues.iter().find(|i| i.element_tag == "button").unwrap();
    assert_eq!(button.text_preview, "Submit");
    assert_eq!(button.severity, Severity::High);
}

#[test]
fn test_annotate_fixture() {
    let markup = fixture("inaccessible.html");
    let report = scanner::scan_html(&markup);
    let marked = annotate(&markup, &report.issues);

    assert_eq!(marked.matches(r#"data-contrast-issue="true""#).count(), 7);
    assert_eq!(marked.matches(r#"<span class="contrast-tooltip">"#).count(), 7);
    assert!(marked.contains("Severity: MEDIUM"));
    assert!(marked.contains("Required: 3.0:1"), "h1 uses the large-text threshold");
}

#[test]
fn test_annotate_without_issues_is_identity() {
    let markup = fixture("accessible.html");
    let report = scanner::scan_html(&markup);
    assert_eq!(annotate(&markup, &report.issues), markup);
}

#[test]
fn test_saved_report_round_trip() {
    let markup = fixture("inaccessible.html");
    let json = serde_json::to_string(&scanner::scan_html(&markup)).unwrap();
    let saved: ScanReport = serde_json::from_str(&json).expect("report deserializes");

    let marked = annotate_report(&markup, &saved).expect("same markup");
    assert!(marked.contains("contrast-issue-marker"));

    let edited = markup.replace("Read more", "Read more about it");
    assert!(matches!(
        annotate_report(&edited, &saved),
        Err(ColorsenseError::StaleReport { .. })
    ));
}

#[test]
fn test_scan_fixtures_directory() {
    let reports = scanner::scan_directory(Path::new("tests/fixtures"), &ScanOptions::default())
        .expect("scan should succeed");

    assert_eq!(reports.len(), 2);
    let total: usize = reports.iter().map(|r| r.report.total_issues_found).sum();
    assert_eq!(total, 7);
}

#[test]
fn test_sarif_report_valid() {
    let report = scanner::scan_file(Path::new("tests/fixtures/inaccessible.html"), &ScanOptions::default())
        .expect("scan should succeed");

    let sarif = generate_report(&[report], OutputFormat::Sarif);
    let parsed: serde_json::Value = serde_json::from_str(&sarif).expect("SARIF report should be valid JSON");

    assert_eq!(parsed["version"], "2.1.0");
    assert_eq!(parsed["runs"][0]["tool"]["driver"]["name"], "colorsense");
    assert_eq!(parsed["runs"][0]["results"].as_array().unwrap().len(), 7);
}

#[test]
fn test_inherit_background_option() {
    let markup = r#"<div style="background-color:#222"><p style="color:#eee">Light text on a dark panel</p></div>"#;

    assert_eq!(scanner::scan_html(markup).total_issues_found, 1);

    let options = ScanOptions { inherit_background: true, ..ScanOptions::default() };
    assert!(scanner::scan_html_with(markup, &options).is_clean());
}
