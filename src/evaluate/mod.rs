//! Turning configuration files into entries
//!
//! The loader never reads file contents itself. It resolves which physical
//! file backs an identifier and hands that path to a [`FileEvaluator`].

use crate::entry::ConfigEntry;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub mod document;

pub use document::DocumentEvaluator;

/// Maps one configuration file to a [`ConfigEntry`].
pub trait FileEvaluator: Send + Sync {
    /// Primary file extension handled by this evaluator, without the dot.
    fn extension(&self) -> &str;

    /// Evaluate the file at `source`, which backs `identifier`.
    ///
    /// Fails with `LoaderError::Evaluation` when the file cannot be read or
    /// parsed, and with `LoaderError::BadParameter` when it parses but does
    /// not describe an entry.
    fn evaluate(&self, identifier: &str, source: &Path) -> Result<ConfigEntry>;
}

/// Document formats understood by [`DocumentEvaluator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Toml,
    #[serde(alias = "yml")]
    Yaml,
    Json,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Toml => "toml",
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "toml" => Ok(Format::Toml),
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            other => Err(format!("Unsupported config format '{}'", other)),
        }
    }
}
