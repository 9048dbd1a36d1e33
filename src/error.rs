// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for colorsense
//!
//! The contrast engine itself never fails; these cover file access,
//! configuration and the strict annotation path.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColorsenseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Report was produced from different markup (expected digest {expected}, got {actual})")]
    StaleReport { expected: String, actual: String },
}

pub type Result<T> = std::result::Result<T, ColorsenseError>;
