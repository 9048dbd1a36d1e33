// SPDX-License-Identifier: PMPL-1.0-or-later
//! ColorSense - WCAG 2.1 Color Contrast Engine
//!
//! Inspects rendered HTML for text whose foreground/background contrast
//! falls below WCAG 2.1 AA (1.4.3), and produces both a structured issue
//! report and an annotated copy of the document with visual markers.
//!
//! Colors come from inline `style` declarations only. There is no CSS
//! cascade, so results approximate what a browser renders.
//!
//! ## Pipeline
//!
//! - **Color** ([`color`]): parsing, relative luminance, contrast ratio
//! - **Style** ([`style`]): per-element foreground/background/large-text
//! - **Compliance** ([`compliance`]): AA/AAA pass-fail matrix
//! - **Scanner** ([`scanner`]): walks text-bearing elements into a [`ScanReport`]
//! - **Annotator** ([`annotate`]): outlines failing elements with tooltips
//!
//! ```
//! let report = colorsense::scan_html(r#"<p style="color:#ccc">faint</p>"#);
//! assert_eq!(report.total_issues_found, 1);
//! ```

pub mod analysis;
pub mod annotate;
pub mod color;
pub mod compliance;
pub mod config;
pub mod document;
pub mod error;
pub mod issue;
pub mod report;
pub mod scanner;
pub mod style;

pub use analysis::{analyze, Analysis};
pub use annotate::{annotate, annotate_report};
pub use color::{contrast_ratio, parse_color, relative_luminance, to_hex, Color};
pub use compliance::{evaluate, ComplianceResult};
pub use config::{Config, ScanOptions};
pub use error::{ColorsenseError, Result};
pub use issue::{ContrastIssue, ScanReport, Severity};
pub use scanner::{scan, scan_html, FileReport};
pub use style::{resolve_style, StyleSnapshot};
