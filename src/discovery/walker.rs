//! Recursive walk of a configuration root

use super::Layout;
use crate::error::Result;
use crate::utils::relative_identifier_path;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::PathBuf;
use walkdir::WalkDir;

/// Counters collected during one walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryStats {
    pub files_seen: usize,
    pub files_skipped_override: usize,
    pub files_skipped_extension: usize,
    pub files_skipped_glob: usize,
    pub identifiers_found: usize,
}

/// Finds every loadable identifier under a configuration root.
///
/// The root is assumed to be an existing directory; the loader checks that
/// before walking.
pub struct IdentifierWalker {
    root_path: PathBuf,
    layout: Layout,
    exclude_globs: Vec<String>,
    follow_symlinks: bool,
    stats: DiscoveryStats,
}

impl IdentifierWalker {
    pub fn new(root_path: PathBuf, layout: Layout) -> Self {
        Self {
            root_path,
            layout,
            exclude_globs: Vec::new(),
            follow_symlinks: false,
            stats: DiscoveryStats::default(),
        }
    }

    /// Skip files whose root-relative path matches one of these globs
    pub fn exclude_globs(mut self, globs: Vec<String>) -> Self {
        self.exclude_globs = globs;
        self
    }

    /// Set whether to follow symbolic links
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    fn build_exclude_globset(&self) -> Option<GlobSet> {
        if self.exclude_globs.is_empty() {
            return None;
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude_globs {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => tracing::warn!("Ignoring invalid exclude glob '{}': {}", pattern, e),
            }
        }
        match builder.build() {
            Ok(set) => Some(set),
            Err(e) => {
                tracing::warn!("Ignoring exclude globs: {}", e);
                None
            }
        }
    }

    /// Walk the root and return identifiers in sorted order.
    pub fn walk(&mut self) -> Result<Vec<String>> {
        self.stats = DiscoveryStats::default();
        let exclude = self.build_exclude_globset();

        let mut identifiers = Vec::new();
        for entry in WalkDir::new(&self.root_path).follow_links(self.follow_symlinks) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            self.stats.files_seen += 1;

            let Some(file_name) = entry.file_name().to_str() else {
                continue;
            };
            if self.layout.is_override(file_name) {
                tracing::trace!("Skipping override file {}", entry.path().display());
                self.stats.files_skipped_override += 1;
                continue;
            }
            if !self.layout.is_primary(file_name) {
                self.stats.files_skipped_extension += 1;
                continue;
            }

            let Some(rel_path) = relative_identifier_path(&self.root_path, entry.path()) else {
                continue;
            };
            if exclude.as_ref().is_some_and(|set| set.is_match(&rel_path)) {
                tracing::trace!("Skipping excluded file {}", rel_path);
                self.stats.files_skipped_glob += 1;
                continue;
            }

            if let Some(identifier) = self.layout.identifier_for(&rel_path) {
                identifiers.push(identifier);
            }
        }

        // Sort for a deterministic merge order
        identifiers.sort();
        self.stats.identifiers_found = identifiers.len();

        tracing::debug!(
            root = %self.root_path.display(),
            found = identifiers.len(),
            skipped_override = self.stats.files_skipped_override,
            skipped_glob = self.stats.files_skipped_glob,
            "discovered configuration identifiers"
        );

        Ok(identifiers)
    }

    pub fn stats(&self) -> &DiscoveryStats {
        &self.stats
    }
}
