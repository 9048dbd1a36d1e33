// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration handling for colorsense

use crate::error::{ColorsenseError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// What to scan and how
    #[serde(default)]
    pub scan: ScanOptions,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

/// Scanner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// File extensions treated as HTML documents
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directory names skipped during directory scans
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Use the nearest ancestor's inline background when an element declares none
    #[serde(default)]
    pub inherit_background: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude: default_exclude(),
            inherit_background: false,
        }
    }
}

impl ScanOptions {
    pub fn is_scannable(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude.iter().any(|excluded| excluded == name)
    }
}

fn default_extensions() -> Vec<String> {
    vec!["html".to_string(), "htm".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        ".git".to_string(),
        "target".to_string(),
        "dist".to_string(),
        "build".to_string(),
        "vendor".to_string(),
    ]
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Load configuration from a path; a missing file yields the defaults
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;

    debug!(?config, "Loaded configuration");
    Ok(config)
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from(".colorsense.toml")
}

/// Write default configuration to a file
pub fn write_default_config(path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&Config::default())
        .map_err(|e| ColorsenseError::Config(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.scan.inherit_background);
        assert!(config.scan.is_scannable(Path::new("index.HTML")));
        assert!(!config.scan.is_scannable(Path::new("style.css")));
        assert!(config.scan.is_excluded_dir("node_modules"));
        assert_eq!(config.log.format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_toml() {
        let config: Config = toml::from_str("[scan]\ninherit_background = true\n[log]\nformat = \"json\"\n").unwrap();
        assert!(config.scan.inherit_background);
        assert_eq!(config.scan.extensions, default_extensions());
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(".colorsense.toml");
        write_default_config(&path).unwrap();
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[scan\n").unwrap();
        assert!(matches!(load_config(&path), Err(ColorsenseError::Toml(_))));
    }
}
