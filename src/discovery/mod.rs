//! Configuration file discovery
//!
//! Walks a configuration root and lists the identifiers that can be loaded:
//! every `<id>.<ext>` file, with local override files left out.

use crate::error::Result;
use std::path::Path;

pub mod layout;
pub mod walker;

pub use layout::{Layout, DEFAULT_OVERRIDE_MARKER};
pub use walker::{DiscoveryStats, IdentifierWalker};

/// List the identifiers under `root`, sorted.
pub fn discover_identifiers<P: AsRef<Path>>(
    root: P,
    layout: &Layout,
    exclude_globs: &[String],
) -> Result<Vec<String>> {
    IdentifierWalker::new(root.as_ref().to_path_buf(), layout.clone())
        .exclude_globs(exclude_globs.to_vec())
        .walk()
}
