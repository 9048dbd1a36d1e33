// SPDX-License-Identifier: PMPL-1.0-or-later
//! ColorSense CLI - WCAG color contrast auditing for HTML files

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colorsense::analysis::analyze_with;
use colorsense::config::{self, Config, LogConfig, LogFormat};
use colorsense::report::{generate_report, OutputFormat};
use colorsense::scanner::{self, FileReport};
use colorsense::{annotate, annotate_report, ScanReport};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// WCAG 2.1 color contrast checker for HTML documents
#[derive(Parser)]
#[command(name = "colorsense")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to .colorsense.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a single HTML file
    Analyze {
        /// File to analyze
        file: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Also write a marked-up copy of the document here
        #[arg(long)]
        annotate: Option<PathBuf>,
    },

    /// Check every HTML file below a directory
    Check {
        /// Directory to scan
        dir: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Write a copy of a document with contrast issues outlined
    Annotate {
        /// File to annotate
        file: PathBuf,

        /// Previously saved JSON scan report to apply instead of rescanning
        #[arg(long)]
        report: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Write the default configuration file
    InitConfig {
        /// Destination path
        path: Option<PathBuf>,
    },
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn init_logging(verbose: bool, log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("colorsense=debug")
        } else {
            EnvFilter::new(format!("colorsense={}", log.level))
        }
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let config: Config = config::load_config(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    init_logging(cli.verbose, &config.log);

    match cli.command {
        Commands::Analyze { file, format, annotate: annotate_path } => {
            let markup = read_markup(&file)?;
            let analysis = analyze_with(
                file.display().to_string(),
                &markup,
                annotate_path.is_some(),
                &config.scan,
            );

            if let (Some(path), Some(marked)) = (annotate_path.as_deref(), analysis.marked_html.as_deref()) {
                write_output(marked, Some(path))?;
            }

            let blocked = analysis.analysis.has_high_severity();
            let output = match format {
                FormatArg::Json => serde_json::to_string_pretty(&analysis)?,
                other => generate_report(
                    &[FileReport { path: file, report: analysis.analysis }],
                    other.into(),
                ),
            };
            println!("{}", output);

            if blocked {
                std::process::exit(1);
            }
        }

        Commands::Check { dir, format, output } => {
            let reports = scanner::scan_directory(&dir, &config.scan)?;
            let report = generate_report(&reports, format.into());
            write_output(&report, output.as_deref())?;

            if reports.iter().any(|r| r.report.has_high_severity()) {
                std::process::exit(1);
            }
        }

        Commands::Annotate { file, report, output } => {
            let markup = read_markup(&file)?;
            let marked = match report {
                Some(report_path) => {
                    let saved: ScanReport = serde_json::from_str(&read_markup(&report_path)?)
                        .with_context(|| format!("parsing {}", report_path.display()))?;
                    annotate_report(&markup, &saved)?
                }
                None => {
                    let report = scanner::scan_html_with(&markup, &config.scan);
                    annotate(&markup, &report.issues)
                }
            };
            write_output(&marked, output.as_deref())?;
        }

        Commands::InitConfig { path } => {
            let path = path.unwrap_or_else(config::default_config_path);
            config::write_default_config(&path)?;
            eprintln!("Default configuration written to {}", path.display());
        }
    }

    Ok(())
}

fn read_markup(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
