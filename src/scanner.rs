// SPDX-License-Identifier: PMPL-1.0-or-later
//! Contrast scanning for parsed documents, files and directory trees.

use crate::color::contrast_ratio;
use crate::compliance::evaluate;
use crate::config::ScanOptions;
use crate::document::{location_path, own_text, source_digest, text_bearing_elements};
use crate::error::Result;
use crate::issue::{ContrastIssue, IssueContext, ScanReport};
use crate::style::{inherited_background, resolve_style};
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Scan report for one file on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub report: ScanReport,
}

/// Scan a parsed document with default options
pub fn scan(document: &Html) -> ScanReport {
    scan_with(document, &ScanOptions::default())
}

/// Scan a parsed document.
///
/// Elements are evaluated one by one against their own inline declarations.
/// Only with `inherit_background` set does an ancestor's background apply.
pub fn scan_with(document: &Html, options: &ScanOptions) -> ScanReport {
    let mut checked = 0;
    let mut issues = Vec::new();

    for (index, element) in text_bearing_elements(document).enumerate() {
        let text = own_text(element);
        if text.is_empty() {
            continue;
        }
        checked += 1;

        let inherited = if options.inherit_background {
            inherited_background(element)
        } else {
            None
        };
        let style = resolve_style(element, inherited);
        let ratio = contrast_ratio(style.foreground, style.background);
        let compliance = evaluate(ratio, style.is_large_text);
        if compliance.passes_required {
            continue;
        }

        let issue = ContrastIssue::new(IssueContext {
            tag: element.value().name(),
            text: &text,
            foreground: style.foreground,
            background: style.background,
            ratio,
            is_large_text: style.is_large_text,
            compliance,
            location_path: location_path(element),
            element_index: index,
        });
        debug!(
            element = %issue.element_tag,
            index,
            ratio = issue.contrast_ratio,
            severity = %issue.severity,
            "Contrast below AA"
        );
        issues.push(issue);
    }

    debug!("Checked {} elements, {} failing", checked, issues.len());
    ScanReport::new(checked, issues)
}

/// Parse and scan markup, recording its digest in the report
pub fn scan_html(markup: &str) -> ScanReport {
    scan_html_with(markup, &ScanOptions::default())
}

pub fn scan_html_with(markup: &str, options: &ScanOptions) -> ScanReport {
    let document = Html::parse_document(markup);
    scan_with(&document, options).with_source_digest(source_digest(markup))
}

/// Scan a single HTML file
pub fn scan_file(path: &Path, options: &ScanOptions) -> Result<FileReport> {
    let markup = std::fs::read_to_string(path)?;
    Ok(FileReport {
        path: path.to_path_buf(),
        report: scan_html_with(&markup, options),
    })
}

/// Scan every HTML file below a directory
pub fn scan_directory(dir: &Path, options: &ScanOptions) -> Result<Vec<FileReport>> {
    let mut reports = Vec::new();

    info!("Scanning directory: {}", dir.display());

    for entry in WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_str().unwrap_or("");
            if e.depth() > 0 && e.file_type().is_dir() {
                return !options.is_excluded_dir(name) && !name.starts_with('.');
            }
            true
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() || !options.is_scannable(entry.path()) {
            continue;
        }

        match scan_file(entry.path(), options) {
            Ok(report) => reports.push(report),
            Err(e) => warn!("Skipping {}: {}", entry.path().display(), e),
        }
    }

    let issues: usize = reports.iter().map(|r| r.report.total_issues_found).sum();
    info!("Scanned {} files, found {} issues", reports.len(), issues);

    Ok(reports)
}
