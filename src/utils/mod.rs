//! Shared helpers

pub mod paths;

pub use paths::{is_identifier, normalize_path, relative_identifier_path, strip_extension};
