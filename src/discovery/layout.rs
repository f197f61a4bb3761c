//! File naming conventions of a configuration root

use crate::utils::strip_extension;
use std::path::{Path, PathBuf};

pub const DEFAULT_OVERRIDE_MARKER: &str = "local";

/// How identifiers map onto files: `<id>.<ext>` for the checked-in default
/// and `<id>.<marker>.<ext>` for the local override next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    extension: String,
    override_marker: String,
}

impl Layout {
    pub fn new(extension: impl Into<String>, override_marker: impl Into<String>) -> Self {
        let extension: String = extension.into();
        let override_marker: String = override_marker.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
            override_marker: override_marker.trim_matches('.').to_string(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn override_marker(&self) -> &str {
        &self.override_marker
    }

    /// Suffix of an override file name, e.g. `.local.toml`.
    fn override_suffix(&self) -> String {
        format!(".{}.{}", self.override_marker, self.extension)
    }

    pub fn primary_path(&self, root: &Path, identifier: &str) -> PathBuf {
        root.join(format!("{}.{}", identifier, self.extension))
    }

    pub fn override_path(&self, root: &Path, identifier: &str) -> PathBuf {
        root.join(format!("{}{}", identifier, self.override_suffix()))
    }

    /// Whether `file_name` is a local override file.
    pub fn is_override(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.override_suffix())
    }

    /// Whether `file_name` is a primary (non-override) configuration file.
    pub fn is_primary(&self, file_name: &str) -> bool {
        strip_extension(file_name, &self.extension).is_some() && !self.is_override(file_name)
    }

    /// Identifier for a root-relative primary file path, `grp/foo.toml` -> `grp/foo`.
    pub fn identifier_for(&self, relative_path: &str) -> Option<String> {
        strip_extension(relative_path, &self.extension).map(str::to_string)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new("toml", DEFAULT_OVERRIDE_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_for_identifier() {
        let layout = Layout::default();
        let root = Path::new("/cfg");
        assert_eq!(layout.primary_path(root, "grp/foo"), PathBuf::from("/cfg/grp/foo.toml"));
        assert_eq!(
            layout.override_path(root, "grp/foo"),
            PathBuf::from("/cfg/grp/foo.local.toml")
        );
    }

    #[test]
    fn test_override_matched_on_file_name() {
        let layout = Layout::default();
        assert!(layout.is_override("config2.local.toml"));
        assert!(!layout.is_override("config2.toml"));
        assert!(!layout.is_override("local.toml"));
        assert!(!layout.is_override("localhost.toml"));
        assert!(!layout.is_override("config2.local.yaml"));
    }

    #[test]
    fn test_is_primary() {
        let layout = Layout::default();
        assert!(layout.is_primary("config1.toml"));
        assert!(layout.is_primary("local.toml"));
        assert!(!layout.is_primary("config1.local.toml"));
        assert!(!layout.is_primary("config1.yaml"));
        assert!(!layout.is_primary("config1.TOML"));
        assert!(!layout.is_primary("README"));
    }

    #[test]
    fn test_layout_trims_dots() {
        let layout = Layout::new(".yaml", ".dev.");
        assert_eq!(layout.extension(), "yaml");
        assert_eq!(layout.override_marker(), "dev");
        assert!(layout.is_override("db.dev.yaml"));
    }

    #[test]
    fn test_identifier_for() {
        let layout = Layout::default();
        assert_eq!(layout.identifier_for("grp/foo.toml").as_deref(), Some("grp/foo"));
        assert_eq!(layout.identifier_for("grp/foo.json"), None);
    }
}
