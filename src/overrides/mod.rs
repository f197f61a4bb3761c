//! Local override resolution
//!
//! `x.local.toml` shadows `x.toml` as a whole; the two files are never
//! merged field by field.

use crate::discovery::Layout;
use crate::utils::is_identifier;
use std::path::{Path, PathBuf};

/// Decides which physical file backs an identifier.
#[derive(Debug, Clone, Copy)]
pub struct LocalOverrides<'a> {
    root: &'a Path,
    layout: &'a Layout,
}

impl<'a> LocalOverrides<'a> {
    pub fn new(root: &'a Path, layout: &'a Layout) -> Self {
        Self { root, layout }
    }

    /// Whether `<identifier>.<marker>.<ext>` exists under the root.
    pub fn has_local_override(&self, identifier: &str) -> bool {
        is_identifier(identifier) && self.layout.override_path(self.root, identifier).is_file()
    }

    /// Override path when one exists, primary path otherwise.
    ///
    /// The returned primary path is not checked for existence.
    pub fn resolve(&self, identifier: &str) -> PathBuf {
        let override_path = self.layout.override_path(self.root, identifier);
        if override_path.is_file() {
            tracing::debug!(identifier, "using local override {}", override_path.display());
            return override_path;
        }
        self.layout.primary_path(self.root, identifier)
    }
}
