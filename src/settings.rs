//! Loader settings files
//!
//! Settings are layered over [`LoaderOptions::default`], so a file only
//! names what it changes.

use crate::error::{LoaderError, Result};
use crate::loader::LoaderOptions;
use figment::providers::{Format as _, Json, Serialized, Toml, Yaml};
use figment::Figment;
use std::path::Path;

pub fn load_options(path: &Path) -> Result<LoaderOptions> {
    if !path.is_file() {
        return Err(LoaderError::Settings {
            path: path.to_path_buf(),
            message: "settings file does not exist".to_string(),
        });
    }

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    let figment = Figment::from(Serialized::defaults(LoaderOptions::default()));
    let figment = match ext.as_str() {
        "toml" => figment.merge(Toml::file(path)),
        "yaml" | "yml" => figment.merge(Yaml::file(path)),
        "json" => figment.merge(Json::file(path)),
        other => {
            return Err(LoaderError::Settings {
                path: path.to_path_buf(),
                message: format!("unsupported settings extension '.{}'", other),
            })
        }
    };

    let options: LoaderOptions = figment.extract().map_err(|e| LoaderError::Settings {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    options
        .validate()
        .map_err(|message| LoaderError::Settings { path: path.to_path_buf(), message })?;
    tracing::debug!(?options, "loaded settings from {}", path.display());
    Ok(options)
}
