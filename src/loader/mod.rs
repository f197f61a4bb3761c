//! Configuration aggregation
//!
//! [`ConfigLoader`] owns the merged configuration map. It discovers
//! identifiers under its root, picks the local override or the primary file
//! for each one, evaluates it and stores the result under the entry's name.
//!
//! The loader is synchronous and holds no lock. Sharing one across threads
//! needs external synchronization around the mutating calls.

use crate::discovery::{IdentifierWalker, Layout};
use crate::entry::{ConfigEntry, ConfigMap, ResolvedValue};
use crate::error::{LoaderError, Result};
use crate::evaluate::{DocumentEvaluator, FileEvaluator};
use crate::overrides::LocalOverrides;
use crate::utils::is_identifier;
use std::fmt;
use std::path::{Path, PathBuf};

pub mod options;

pub use options::LoaderOptions;

/// Root used when none is given.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Answer of [`ConfigLoader::get_config`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigView<'a> {
    Entry(&'a ResolvedValue),
    All(&'a ConfigMap),
}

pub struct ConfigLoader {
    config_path: PathBuf,
    layout: Layout,
    options: LoaderOptions,
    evaluator: Box<dyn FileEvaluator>,
    config: ConfigMap,
}

impl ConfigLoader {
    /// Lazy loader over `config_path` with default options.
    pub fn new<P: Into<PathBuf>>(config_path: P) -> Result<Self> {
        Self::with_options(config_path, LoaderOptions::default())
    }

    /// Loader evaluating `options.format` documents.
    pub fn with_options<P: Into<PathBuf>>(config_path: P, options: LoaderOptions) -> Result<Self> {
        let evaluator = DocumentEvaluator::new(options.format);
        Self::with_evaluator(config_path, options, evaluator)
    }

    /// Loader using a caller supplied evaluator. The evaluator's extension
    /// replaces `options.format` when naming files.
    ///
    /// Fails with [`LoaderError::InvalidOptions`] when the override marker
    /// or the evaluator's extension is empty, and with
    /// [`LoaderError::MissingDirectory`] when `config_path` is not a
    /// directory. A non-lazy loader also propagates the first error of
    /// [`load_all`](Self::load_all).
    pub fn with_evaluator<P, E>(config_path: P, options: LoaderOptions, evaluator: E) -> Result<Self>
    where
        P: Into<PathBuf>,
        E: FileEvaluator + 'static,
    {
        options.validate().map_err(|message| LoaderError::InvalidOptions { message })?;
        if evaluator.extension().trim_start_matches('.').is_empty() {
            return Err(LoaderError::InvalidOptions {
                message: "evaluator extension must not be empty".to_string(),
            });
        }
        let config_path = config_path.into();
        ensure_directory(&config_path)?;

        let layout = Layout::new(evaluator.extension(), options.override_marker.as_str());
        let lazy = options.lazy;
        let mut loader = Self {
            config_path,
            layout,
            options,
            evaluator: Box::new(evaluator),
            config: ConfigMap::new(),
        };

        if !lazy {
            loader.load_all()?;
        }
        Ok(loader)
    }

    fn overrides(&self) -> LocalOverrides<'_> {
        LocalOverrides::new(&self.config_path, &self.layout)
    }

    /// Whether a local override file exists for `identifier`.
    pub fn has_local(&self, identifier: &str) -> bool {
        self.overrides().has_local_override(identifier)
    }

    /// Identifiers currently discoverable under the root, sorted.
    pub fn identifiers(&self) -> Result<Vec<String>> {
        IdentifierWalker::new(self.config_path.clone(), self.layout.clone())
            .exclude_globs(self.options.exclude_globs.clone())
            .follow_symlinks(self.options.follow_symlinks)
            .walk()
    }

    /// Evaluate one identifier and merge it.
    ///
    /// The local override is used when present. Returns the value stored
    /// under the entry's name. Identifiers that would leave the root
    /// (absolute, or with `.`/`..` segments) are [`LoaderError::MissingFile`].
    pub fn load(&mut self, identifier: &str) -> Result<ResolvedValue> {
        if !is_identifier(identifier) {
            return Err(LoaderError::MissingFile {
                identifier: identifier.to_string(),
                path: self.config_path.clone(),
            });
        }
        let source = self.overrides().resolve(identifier);
        if !source.is_file() {
            return Err(LoaderError::MissingFile {
                identifier: identifier.to_string(),
                path: source,
            });
        }

        let entry = self.evaluator.evaluate(identifier, &source)?;
        tracing::debug!(identifier, entry = entry.name(), "loaded {}", source.display());

        Ok(self.add_config(entry))
    }

    /// Load every discovered identifier in order.
    ///
    /// Stops at the first failure. Entries merged before it stay in place.
    pub fn load_all(&mut self) -> Result<&mut Self> {
        let identifiers = self.identifiers()?;
        for identifier in &identifiers {
            self.load(identifier)?;
        }
        tracing::debug!(
            root = %self.config_path.display(),
            loaded = identifiers.len(),
            entries = self.config.len(),
            "loaded configuration directory"
        );
        Ok(self)
    }

    /// Merge `entry`, replacing whatever was stored under its name.
    pub fn add_config(&mut self, entry: impl Into<ConfigEntry>) -> ResolvedValue {
        let entry = entry.into();
        let resolved = entry.resolve();
        if self.config.insert(entry.name().to_string(), resolved.clone()).is_some() {
            tracing::trace!(entry = entry.name(), "replaced existing entry");
        }
        resolved
    }

    /// Clear the map and merge `entries` in order.
    pub fn set_config<I>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<ConfigEntry>,
    {
        self.config.clear();
        for entry in entries {
            self.add_config(entry);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&ResolvedValue> {
        self.config.get(key)
    }

    /// The whole map for `None`, one entry for `Some(key)`.
    ///
    /// An absent key yields `None` rather than the whole map.
    pub fn get_config(&self, key: Option<&str>) -> Option<ConfigView<'_>> {
        match key {
            None => Some(ConfigView::All(&self.config)),
            Some(key) => self.config.get(key).map(ConfigView::Entry),
        }
    }

    pub fn config(&self) -> &ConfigMap {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Point the loader at another root. Nothing is reloaded.
    ///
    /// On failure the current root and map are left untouched.
    pub fn set_config_path<P: Into<PathBuf>>(&mut self, config_path: P) -> Result<&mut Self> {
        let config_path = config_path.into();
        ensure_directory(&config_path)?;
        self.config_path = config_path;
        Ok(self)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.config.len()
    }

    pub fn is_empty(&self) -> bool {
        self.config.is_empty()
    }
}

impl fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("config_path", &self.config_path)
            .field("layout", &self.layout)
            .field("options", &self.options)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn ensure_directory(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(LoaderError::MissingDirectory { path: path.to_path_buf() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{GroupEntry, SingleEntry};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let tmp = TempDir::new().expect("tmp");
        let root = tmp.path();
        fs::write(root.join("config1.toml"), "name = 'config1'\nvalue = 'config1value'\n")
            .expect("write");
        fs::create_dir_all(root.join("localtest")).expect("mkdir");
        fs::write(root.join("localtest/config2.toml"), "name = 'config2'\nvalue = 'config2value'\n")
            .expect("write");
        fs::write(
            root.join("localtest/config2.local.toml"),
            "name = 'config2'\nvalue = 'config2valueoverride'\n",
        )
        .expect("write");
        tmp
    }

    fn single(name: &str, value: serde_json::Value) -> SingleEntry {
        SingleEntry::new(name, value).expect("single")
    }

    #[test]
    fn test_missing_directory_rejected() {
        let err = ConfigLoader::new("foo/bar/config/foo/bar/config").unwrap_err();
        assert!(matches!(err, LoaderError::MissingDirectory { .. }), "got: {err:?}");
    }

    #[test]
    fn test_file_root_rejected() {
        let tmp = fixture();
        let err = ConfigLoader::new(tmp.path().join("config1.toml")).unwrap_err();
        assert!(matches!(err, LoaderError::MissingDirectory { .. }), "got: {err:?}");
    }

    #[test]
    fn test_lazy_loader_starts_empty() {
        let tmp = fixture();
        let loader = ConfigLoader::new(tmp.path()).expect("loader");
        assert!(loader.is_empty());
    }

    #[test]
    fn test_load_single_config() {
        let tmp = fixture();
        let mut loader = ConfigLoader::new(tmp.path()).expect("loader");

        let value = loader.load("config1").expect("load");

        assert_eq!(value, ResolvedValue::Value(json!("config1value")));
        assert_eq!(loader.len(), 1);
        assert_eq!(loader.get("config1"), Some(&value));
    }

    #[test]
    fn test_load_prefers_local_override() {
        let tmp = fixture();
        let mut loader = ConfigLoader::new(tmp.path()).expect("loader");

        assert!(loader.has_local("localtest/config2"));
        assert!(!loader.has_local("config1"));

        loader.load("localtest/config2").expect("load");
        assert_eq!(loader.get("config2"), Some(&ResolvedValue::Value(json!("config2valueoverride"))));
    }

    #[test]
    fn test_load_missing_identifier() {
        let tmp = fixture();
        let mut loader = ConfigLoader::new(tmp.path()).expect("loader");

        let err = loader.load("config/foo/bar/config/foo/foo/bar/bar").unwrap_err();
        assert!(matches!(err, LoaderError::MissingFile { .. }), "got: {err:?}");
        assert!(loader.is_empty());
    }

    #[test]
    fn test_load_rejects_identifiers_outside_root() {
        let outside = TempDir::new().expect("tmp");
        fs::write(outside.path().join("secret.toml"), "name = 'secret'\nvalue = 1\n")
            .expect("write");
        let tmp = fixture();
        fs::create_dir_all(tmp.path().join("sub")).expect("mkdir");
        let mut loader = ConfigLoader::new(tmp.path().join("sub")).expect("loader");

        let absolute = outside.path().join("secret");
        for identifier in [absolute.to_str().expect("utf8 path"), "../config1", "./x", ""] {
            let err = loader.load(identifier).unwrap_err();
            assert!(matches!(err, LoaderError::MissingFile { .. }), "{identifier:?}: {err:?}");
            assert!(!loader.has_local(identifier));
        }
        assert!(loader.is_empty());
    }

    #[test]
    fn test_load_override_without_primary() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("solo.local.toml"), "name = 'solo'\nvalue = 1\n").expect("write");
        let mut loader = ConfigLoader::new(tmp.path()).expect("loader");

        assert_eq!(loader.load("solo").expect("load"), ResolvedValue::Value(json!(1)));
    }

    #[test]
    fn test_load_broken_file_is_bad_parameter() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("broken.toml"), "value = 'foo'\n").expect("write");
        let mut loader = ConfigLoader::new(tmp.path()).expect("loader");

        let err = loader.load("broken").unwrap_err();
        assert!(matches!(err, LoaderError::BadParameter { .. }), "got: {err:?}");
    }

    #[test]
    fn test_load_is_idempotent() {
        let tmp = fixture();
        let mut loader = ConfigLoader::new(tmp.path()).expect("loader");

        let first = loader.load("config1").expect("load");
        let snapshot = loader.config().clone();
        let second = loader.load("config1").expect("load");

        assert_eq!(first, second);
        assert_eq!(&snapshot, loader.config());
    }

    #[test]
    fn test_eager_loader_loads_everything() {
        let tmp = fixture();
        let loader =
            ConfigLoader::with_options(tmp.path(), LoaderOptions::default().eager()).expect("loader");

        assert_eq!(loader.len(), 2);
        assert_eq!(loader.get("config1"), Some(&ResolvedValue::Value(json!("config1value"))));
        assert_eq!(loader.get("config2"), Some(&ResolvedValue::Value(json!("config2valueoverride"))));
    }

    #[test]
    fn test_load_all_stops_at_first_failure_keeping_earlier_entries() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("a.toml"), "name = 'a'\nvalue = 1\n").expect("write");
        fs::write(tmp.path().join("b.toml"), "not toml at all = \n").expect("write");
        fs::write(tmp.path().join("c.toml"), "name = 'c'\nvalue = 3\n").expect("write");
        let mut loader = ConfigLoader::new(tmp.path()).expect("loader");

        let err = loader.load_all().unwrap_err();

        assert!(matches!(err, LoaderError::Evaluation { .. }), "got: {err:?}");
        assert!(loader.get("a").is_some());
        assert!(loader.get("c").is_none());
    }

    #[test]
    fn test_add_config_group_and_overwrite() {
        let tmp = fixture();
        let mut loader = ConfigLoader::new(tmp.path()).expect("loader");
        let group =
            GroupEntry::with_members("grp", vec![single("a", json!(1)), single("b", json!(2))])
                .expect("group");

        let resolved = loader.add_config(group);
        assert_eq!(resolved.to_json(), json!({"a": 1, "b": 2}));
        assert_eq!(loader.get("grp"), Some(&resolved));

        // Same name replaces the group wholesale, no member merge
        let replacement = GroupEntry::with_members("grp", vec![single("c", json!(3))]).expect("group");
        loader.add_config(replacement);
        assert_eq!(loader.get("grp").map(ResolvedValue::to_json), Some(json!({"c": 3})));
    }

    #[test]
    fn test_set_config_clears_previous_state() {
        let tmp = fixture();
        let mut loader =
            ConfigLoader::with_options(tmp.path(), LoaderOptions::default().eager()).expect("loader");

        loader.set_config(vec![
            ConfigEntry::from(single("foo", json!("conf1"))),
            ConfigEntry::from(single("foo", json!("conf2"))),
            ConfigEntry::from(GroupEntry::new("empty").expect("group")),
        ]);

        let keys: Vec<&str> = loader.config().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["empty", "foo"]);
        assert_eq!(loader.get("foo"), Some(&ResolvedValue::Value(json!("conf2"))));
    }

    #[test]
    fn test_get_config_policy() {
        let tmp = fixture();
        let mut loader = ConfigLoader::new(tmp.path()).expect("loader");
        loader.add_config(single("foo", json!("conf1")));

        assert_eq!(loader.get_config(None), Some(ConfigView::All(loader.config())));
        assert_eq!(
            loader.get_config(Some("foo")),
            Some(ConfigView::Entry(&ResolvedValue::Value(json!("conf1"))))
        );
        assert_eq!(loader.get_config(Some("missing")), None);
        assert_eq!(loader.get("missing"), None);
    }

    #[test]
    fn test_set_config_path() {
        let tmp = fixture();
        let other = TempDir::new().expect("tmp");
        let mut loader =
            ConfigLoader::with_options(tmp.path(), LoaderOptions::default().eager()).expect("loader");
        let before = loader.config().clone();

        loader.set_config_path(other.path()).expect("set path");

        assert_eq!(loader.config_path(), other.path());
        assert_eq!(loader.config(), &before, "reassigning the root must not reload");
    }

    #[test]
    fn test_set_invalid_config_path_keeps_state() {
        let tmp = fixture();
        let mut loader =
            ConfigLoader::with_options(tmp.path(), LoaderOptions::default().eager()).expect("loader");
        let before = loader.config().clone();

        let err = loader.set_config_path("config/foo/foo/bar/foo/config/foo").unwrap_err();

        assert!(matches!(err, LoaderError::MissingDirectory { .. }), "got: {err:?}");
        assert_eq!(loader.config_path(), tmp.path());
        assert_eq!(loader.config(), &before);
    }

    #[test]
    fn test_custom_evaluator() {
        struct Fixed;

        impl FileEvaluator for Fixed {
            fn extension(&self) -> &str {
                "cfg"
            }

            fn evaluate(&self, identifier: &str, _source: &Path) -> Result<ConfigEntry> {
                Ok(SingleEntry::new(identifier.replace('/', "."), json!(true))
                    .expect("single")
                    .into())
            }
        }

        let tmp = TempDir::new().expect("tmp");
        fs::create_dir_all(tmp.path().join("feature")).expect("mkdir");
        fs::write(tmp.path().join("feature/dark_mode.cfg"), "").expect("write");
        fs::write(tmp.path().join("ignored.toml"), "").expect("write");

        let mut loader =
            ConfigLoader::with_evaluator(tmp.path(), LoaderOptions::default(), Fixed).expect("loader");
        loader.load_all().expect("load all");

        assert_eq!(loader.layout().extension(), "cfg");
        assert_eq!(loader.len(), 1);
        assert_eq!(loader.get("feature.dark_mode"), Some(&ResolvedValue::Value(json!(true))));
    }

    #[test]
    fn test_empty_marker_or_extension_rejected() {
        struct NoExtension;

        impl FileEvaluator for NoExtension {
            fn extension(&self) -> &str {
                "."
            }

            fn evaluate(&self, identifier: &str, source: &Path) -> Result<ConfigEntry> {
                DocumentEvaluator::default().evaluate(identifier, source)
            }
        }

        let tmp = fixture();
        let err = ConfigLoader::with_options(tmp.path(), LoaderOptions::default().override_marker(""))
            .unwrap_err();
        assert!(matches!(err, LoaderError::InvalidOptions { .. }), "got: {err:?}");

        let err = ConfigLoader::with_evaluator(tmp.path(), LoaderOptions::default(), NoExtension)
            .unwrap_err();
        assert!(matches!(err, LoaderError::InvalidOptions { .. }), "got: {err:?}");
    }

    #[cfg(unix)]
    #[test]
    fn test_follow_symlinks_option() {
        let tmp = fixture();
        let shared = TempDir::new().expect("tmp");
        fs::write(shared.path().join("shared.toml"), "name = 'shared'\nvalue = 1\n")
            .expect("write");
        std::os::unix::fs::symlink(shared.path(), tmp.path().join("linked")).expect("symlink");

        let plain = ConfigLoader::new(tmp.path()).expect("loader");
        assert!(!plain.identifiers().expect("ids").contains(&"linked/shared".to_string()));

        let following =
            ConfigLoader::with_options(tmp.path(), LoaderOptions::default().follow_symlinks(true))
                .expect("loader");
        assert!(following.identifiers().expect("ids").contains(&"linked/shared".to_string()));
    }

    #[test]
    fn test_loader_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConfigLoader>();
    }
}
