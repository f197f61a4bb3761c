//! Loader options

use crate::discovery::DEFAULT_OVERRIDE_MARKER;
use crate::evaluate::Format;
use serde::{Deserialize, Serialize};

/// Tunables for a [`ConfigLoader`](super::ConfigLoader).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    /// Document format of the configuration files.
    pub format: Format,
    /// Infix marking local override files (`x.<marker>.<ext>`).
    pub override_marker: String,
    /// When false, every file is loaded as soon as the loader is built.
    pub lazy: bool,
    /// Root-relative globs skipped during discovery.
    pub exclude_globs: Vec<String>,
    /// Follow symbolic links to files and directories during discovery.
    pub follow_symlinks: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            format: Format::Toml,
            override_marker: DEFAULT_OVERRIDE_MARKER.to_string(),
            lazy: true,
            exclude_globs: Vec::new(),
            follow_symlinks: false,
        }
    }
}

impl LoaderOptions {
    pub fn eager(mut self) -> Self {
        self.lazy = false;
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn override_marker(mut self, marker: impl Into<String>) -> Self {
        self.override_marker = marker.into();
        self
    }

    pub fn exclude_globs(mut self, globs: Vec<String>) -> Self {
        self.exclude_globs = globs;
        self
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Reject options that cannot name an override file.
    pub fn validate(&self) -> Result<(), String> {
        let marker = self.override_marker.trim_matches('.');
        if marker.is_empty() {
            return Err("override marker must not be empty".to_string());
        }
        if marker.contains(['/', '\\']) {
            return Err(format!("override marker '{marker}' must not contain a path separator"));
        }
        Ok(())
    }
}
