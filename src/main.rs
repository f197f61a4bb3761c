//! layered-config: inspect a layered configuration directory
//!
//! Loads a configuration root the same way an application would and prints
//! the merged result, so local overrides can be checked without running the
//! application.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
