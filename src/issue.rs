// SPDX-License-Identifier: PMPL-1.0-or-later
//! Contrast findings and the per-document scan report.
//!
//! Field names serialize to the JSON shape consumed by the HTTP layer
//! (`element`, `text_preview`, `xpath`, ...).

use crate::color::{to_hex, Color};
use crate::compliance::{required_ratio, ComplianceResult};
use serde::{Deserialize, Serialize};

/// Characters of element text kept in an issue
pub const TEXT_PREVIEW_LIMIT: usize = 100;

/// Ratios below this are reported as high severity
pub const HIGH_SEVERITY_BELOW: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Unreadable even as large text (below 3:1)
    High,
    /// Fails AA for its size class
    Medium,
}

impl Severity {
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio < HIGH_SEVERITY_BELOW {
            Severity::High
        } else {
            Severity::Medium
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::High => write!(f, "HIGH"),
            Severity::Medium => write!(f, "MEDIUM"),
        }
    }
}

/// One text-bearing element that fails WCAG AA
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastIssue {
    /// Tag name, e.g. `button`
    #[serde(rename = "element")]
    pub element_tag: String,
    pub text_preview: String,
    #[serde(rename = "foreground_color")]
    pub foreground_hex: String,
    #[serde(rename = "background_color")]
    pub background_hex: String,
    /// Rounded to two decimals
    pub contrast_ratio: f64,
    pub is_large_text: bool,
    pub required_ratio: f64,
    pub compliance: ComplianceResult,
    pub severity: Severity,
    #[serde(rename = "xpath")]
    pub location_path: String,
    /// Position among all text-bearing elements of the scanned document
    pub element_index: usize,
}

/// Inputs for building a [`ContrastIssue`]
#[derive(Debug, Clone)]
pub struct IssueContext<'a> {
    pub tag: &'a str,
    pub text: &'a str,
    pub foreground: Color,
    pub background: Color,
    pub ratio: f64,
    pub is_large_text: bool,
    pub compliance: ComplianceResult,
    pub location_path: String,
    pub element_index: usize,
}

impl ContrastIssue {
    pub fn new(ctx: IssueContext<'_>) -> Self {
        Self {
            element_tag: ctx.tag.to_string(),
            text_preview: ctx.text.chars().take(TEXT_PREVIEW_LIMIT).collect(),
            foreground_hex: to_hex(ctx.foreground),
            background_hex: to_hex(ctx.background),
            contrast_ratio: (ctx.ratio * 100.0).round() / 100.0,
            is_large_text: ctx.is_large_text,
            required_ratio: required_ratio(ctx.is_large_text),
            compliance: ctx.compliance,
            severity: Severity::for_ratio(ctx.ratio),
            location_path: ctx.location_path,
            element_index: ctx.element_index,
        }
    }

    /// Multi-line description used for tooltips and text reports
    pub fn describe(&self) -> String {
        format!(
            "Contrast Issue!\nRatio: {:.2}:1\nRequired: {:.1}:1\nForeground: {}\nBackground: {}\nSeverity: {}",
            self.contrast_ratio,
            self.required_ratio,
            self.foreground_hex,
            self.background_hex,
            self.severity
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveritySummary {
    #[serde(rename = "high_severity")]
    pub high_severity_count: usize,
    #[serde(rename = "medium_severity")]
    pub medium_severity_count: usize,
}

/// Result of scanning one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub total_elements_checked: usize,
    pub total_issues_found: usize,
    pub issues: Vec<ContrastIssue>,
    pub summary: SeveritySummary,
    /// SHA-256 of the markup, present when the scan started from markup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_digest: Option<String>,
}

impl ScanReport {
    pub fn new(total_elements_checked: usize, issues: Vec<ContrastIssue>) -> Self {
        let high = issues.iter().filter(|i| i.severity == Severity::High).count();
        Self {
            total_elements_checked,
            total_issues_found: issues.len(),
            summary: SeveritySummary {
                high_severity_count: high,
                medium_severity_count: issues.len() - high,
            },
            issues,
            source_digest: None,
        }
    }

    pub fn with_source_digest(mut self, digest: String) -> Self {
        self.source_digest = Some(digest);
        self
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_high_severity(&self) -> bool {
        self.summary.high_severity_count > 0
    }

    pub fn by_severity(&self, severity: Severity) -> Vec<&ContrastIssue> {
        self.issues.iter().filter(|i| i.severity == severity).collect()
    }
}
