//! Path normalization

use std::path::{Component, Path};

pub fn normalize_path(path: &str) -> String {
    // Convert backslashes to forward slashes and normalize
    path.replace('\\', "/")
}

/// Root-relative path of `path` with `/` separators, or `None` when `path`
/// is not under `root` or is not valid UTF-8.
pub fn relative_identifier_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(normalize_path(rel.to_str()?))
}

/// Whether `identifier` names a file under the root: non-empty and made of
/// plain path segments only (no root, prefix, `.` or `..`).
pub fn is_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && Path::new(identifier).components().all(|c| matches!(c, Component::Normal(_)))
}

/// Strip one trailing `.{ext}` from `name`.
pub fn strip_extension<'a>(name: &'a str, ext: &str) -> Option<&'a str> {
    name.strip_suffix(ext)?.strip_suffix('.').filter(|stem| !stem.is_empty())
}
