//! Shared CLI utilities.

use anyhow::{Context, Result};
use clap::Args;
use layered_config::settings::load_options;
use layered_config::{ConfigLoader, Format, LoaderOptions, DEFAULT_CONFIG_DIR};
use std::path::PathBuf;

/// Options shared by every subcommand.
#[derive(Args)]
pub struct LoaderArgs {
    /// Configuration root directory
    #[arg(short, long, global = true, value_name = "DIR", default_value = DEFAULT_CONFIG_DIR)]
    pub root: PathBuf,

    /// Loader settings file (.toml, .yaml or .json)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Document format of configuration files: toml, yaml or json
    #[arg(short, long, global = true, value_name = "FORMAT")]
    pub format: Option<Format>,

    /// Infix marking local override files
    #[arg(short, long, global = true, value_name = "MARKER")]
    pub marker: Option<String>,

    /// Skip files matching these globs (comma-separated)
    #[arg(short, long, global = true, value_name = "GLOBS")]
    pub exclude: Option<String>,
}

impl LoaderArgs {
    /// Settings file first, then command-line flags on top.
    pub fn options(&self) -> Result<LoaderOptions> {
        let mut options = match &self.settings {
            Some(path) => load_options(path)?,
            None => LoaderOptions::default(),
        };
        if let Some(format) = self.format {
            options.format = format;
        }
        if let Some(marker) = &self.marker {
            options.override_marker = marker.clone();
        }
        if let Some(globs) = parse_csv(&self.exclude) {
            options.exclude_globs = globs;
        }
        // Commands decide what to load.
        options.lazy = true;
        Ok(options)
    }

    pub fn build_loader(&self) -> Result<ConfigLoader> {
        let options = self.options()?;
        ConfigLoader::with_options(&self.root, options)
            .with_context(|| format!("Failed opening configuration root {}", self.root.display()))
    }
}

/// Parse a comma-separated string into a `Vec<String>`, trimming whitespace and
/// discarding empty segments.  Returns `None` when `value` is `None`.
pub fn parse_csv(value: &Option<String>) -> Option<Vec<String>> {
    value.as_ref().map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.to_string())
            .collect::<Vec<_>>()
    })
}
