// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for contrast scans.
//!
//! Supports multiple output formats:
//! - Text: human-readable issues per file
//! - JSON: the scan reports as the HTTP layer serializes them
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::issue::Severity;
use crate::scanner::FileReport;
use serde::Serialize;

/// Rule identifier used for every contrast finding
pub const RULE_ID: &str = "WCAG-1.4.3-contrast";

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Generate a report for one or more scanned files
pub fn generate_report(files: &[FileReport], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(files),
        OutputFormat::Json => generate_json_report(files),
        OutputFormat::Sarif => generate_sarif_report(files),
    }
}

fn generate_text_report(files: &[FileReport]) -> String {
    let mut output = String::new();

    output.push_str("=== ColorSense WCAG Contrast Report ===\n\n");

    let checked: usize = files.iter().map(|f| f.report.total_elements_checked).sum();
    let total: usize = files.iter().map(|f| f.report.total_issues_found).sum();
    let high: usize = files.iter().map(|f| f.report.summary.high_severity_count).sum();

    if total == 0 {
        output.push_str(&format!(
            "Checked {} element(s) in {} file(s). No contrast issues found.\n",
            checked,
            files.len()
        ));
        return output;
    }

    output.push_str(&format!(
        "Checked {} element(s) in {} file(s). Found {} issue(s): {} high, {} medium\n\n",
        checked,
        files.len(),
        total,
        high,
        total - high
    ));

    for file in files.iter().filter(|f| !f.report.is_clean()) {
        output.push_str(&format!("--- {} ({}) ---\n", file.path.display(), file.report.total_issues_found));

        for severity in [Severity::High, Severity::Medium] {
            for issue in file.report.by_severity(severity) {
                output.push_str(&format!(
                    "[{}] <{}> {:.2}:1 (needs {:.1}:1) \"{}\"\n",
                    issue.severity, issue.element_tag, issue.contrast_ratio, issue.required_ratio, issue.text_preview
                ));
                output.push_str(&format!("  Location: {}\n", issue.location_path));
                output.push_str(&format!(
                    "  Colors: {} on {}{}\n",
                    issue.foreground_hex,
                    issue.background_hex,
                    if issue.is_large_text { " (large text)" } else { "" }
                ));
                output.push('\n');
            }
        }
    }

    if high > 0 {
        output.push_str("RESULT: FAIL (high severity contrast issues)\n");
    } else {
        output.push_str("RESULT: FAIL (below WCAG AA)\n");
    }

    output
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    files: &'a [FileReport],
    total_issues_found: usize,
}

fn generate_json_report(files: &[FileReport]) -> String {
    let report = JsonReport {
        files,
        total_issues_found: files.iter().map(|f| f.report.total_issues_found).sum(),
    };
    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize report: {}\"}}", e)
    })
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
    #[serde(rename = "logicalLocations")]
    logical_locations: Vec<SarifLogicalLocation>,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Debug, Serialize)]
struct SarifLogicalLocation {
    #[serde(rename = "fullyQualifiedName")]
    fully_qualified_name: String,
}

fn generate_sarif_report(files: &[FileReport]) -> String {
    let results: Vec<SarifResult> = files
        .iter()
        .flat_map(|file| file.report.issues.iter().map(move |issue| (file, issue)))
        .map(|(file, issue)| {
            let level = match issue.severity {
                Severity::High => "error",
                Severity::Medium => "warning",
            };
            SarifResult {
                rule_id: RULE_ID.to_string(),
                level: level.to_string(),
                message: SarifMessage {
                    text: format!(
                        "Contrast ratio {:.2}:1 of {} on {} is below the WCAG AA minimum ({:.1}:1) for <{}>",
                        issue.contrast_ratio,
                        issue.foreground_hex,
                        issue.background_hex,
                        issue.required_ratio,
                        issue.element_tag
                    ),
                },
                locations: vec![SarifLocation {
                    physical_location: SarifPhysicalLocation {
                        artifact_location: SarifArtifactLocation {
                            uri: file.path.display().to_string(),
                        },
                    },
                    logical_locations: vec![SarifLogicalLocation {
                        fully_qualified_name: issue.location_path.clone(),
                    }],
                }],
            }
        })
        .collect();

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "colorsense".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e)
    })
}
