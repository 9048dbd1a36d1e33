// SPDX-License-Identifier: PMPL-1.0-or-later
//! Scan-and-optionally-annotate, packaged for an HTTP or CLI response.

use crate::annotate::annotate;
use crate::config::ScanOptions;
use crate::issue::ScanReport;
use crate::scanner::scan_html_with;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response body: `{ source, generated_at, analysis, marked_html? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Where the markup came from (URL, file path, `user_provided_html`)
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub analysis: ScanReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marked_html: Option<String>,
}

pub fn analyze(source: impl Into<String>, markup: &str, add_tooltips: bool) -> Analysis {
    analyze_with(source, markup, add_tooltips, &ScanOptions::default())
}

pub fn analyze_with(
    source: impl Into<String>,
    markup: &str,
    add_tooltips: bool,
    options: &ScanOptions,
) -> Analysis {
    let report = scan_html_with(markup, options);
    let marked_html = add_tooltips.then(|| annotate(markup, &report.issues));
    Analysis {
        source: source.into(),
        generated_at: Utc::now(),
        analysis: report,
        marked_html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKUP: &str = r#"<p style="color:#aaa">hint</p>"#;

    #[test]
    fn test_without_tooltips() {
        let result = analyze("user_provided_html", MARKUP, false);
        assert_eq!(result.analysis.total_issues_found, 1);
        assert!(result.marked_html.is_none());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["source"], "user_provided_html");
        assert!(json.get("marked_html").is_none());
    }

    #[test]
    fn test_with_tooltips() {
        let result = analyze("page.html", MARKUP, true);
        let marked = result.marked_html.expect("marked html requested");
        assert!(marked.contains("contrast-tooltip"));
    }

    #[test]
    fn test_clean_markup_is_returned_verbatim() {
        let markup = "<p>plain</p>";
        let result = analyze("page.html", markup, true);
        assert_eq!(result.marked_html.as_deref(), Some(markup));
    }
}
