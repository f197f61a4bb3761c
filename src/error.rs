//! Error type shared by every loader operation

use std::path::PathBuf;

/// Errors raised while discovering, evaluating or merging configuration.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// The configuration root does not exist or is not a directory.
    #[error("Path '{}' does not lead to a directory", path.display())]
    MissingDirectory { path: PathBuf },

    /// Neither the primary nor the local override file exists.
    #[error("Configuration file '{identifier}' does not exist (looked for {})", path.display())]
    MissingFile { identifier: String, path: PathBuf },

    /// The file was read but did not describe a configuration entry.
    #[error("File {} does not return a proper configuration entry: {reason}", path.display())]
    BadParameter { path: PathBuf, reason: String },

    /// The evaluator could not read or parse the file.
    #[error("Failed to evaluate {}: {message}", path.display())]
    Evaluation { path: PathBuf, message: String },

    /// Walking the configuration root failed.
    #[error("Failed walking configuration directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// The options cannot name any file, e.g. an empty override marker.
    #[error("Invalid loader options: {message}")]
    InvalidOptions { message: String },

    /// Loader settings could not be read.
    #[error("Invalid loader settings in {}: {message}", path.display())]
    Settings { path: PathBuf, message: String },
}

impl LoaderError {
    pub(crate) fn bad_parameter(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::BadParameter { path: path.into(), reason: reason.into() }
    }

    pub(crate) fn evaluation(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Evaluation { path: path.into(), message: message.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, LoaderError>;
