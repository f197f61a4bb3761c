//! layered-config: convention-based configuration aggregation
//!
//! Discovers configuration files under a root directory, lets untracked
//! `*.local.*` files shadow checked-in defaults, evaluates each file into a
//! single value or a named group of values, and merges the results into one
//! queryable map.
//!
//! ```no_run
//! use layered_config::{ConfigLoader, LoaderOptions};
//!
//! # fn main() -> layered_config::Result<()> {
//! let loader = ConfigLoader::with_options("config", LoaderOptions::default().eager())?;
//! if let Some(db) = loader.get("database") {
//!     println!("{}", db.to_json());
//! }
//! # Ok(())
//! # }
//! ```

pub mod discovery;
pub mod entry;
pub mod error;
pub mod evaluate;
pub mod loader;
pub mod overrides;
pub mod settings;
pub mod utils;

pub use discovery::{discover_identifiers, Layout};
pub use entry::{ConfigEntry, ConfigMap, EntryError, GroupEntry, ResolvedValue, SingleEntry};
pub use error::{LoaderError, Result};
pub use evaluate::{DocumentEvaluator, FileEvaluator, Format};
pub use loader::{ConfigLoader, ConfigView, LoaderOptions, DEFAULT_CONFIG_DIR};
pub use overrides::LocalOverrides;
