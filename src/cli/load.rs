//! Load command implementation

use anyhow::{Context, Result};
use clap::Args;

use super::dump::print_value;
use super::utils::LoaderArgs;

#[derive(Args)]
pub struct LoadArgs {
    /// Identifier to load, e.g. `database` or `services/mail`
    #[arg(value_name = "ID")]
    pub identifier: String,

    /// Print YAML instead of JSON
    #[arg(long)]
    pub yaml: bool,
}

pub fn run(loader_args: &LoaderArgs, args: LoadArgs) -> Result<()> {
    let mut loader = loader_args.build_loader()?;
    let value = loader
        .load(&args.identifier)
        .with_context(|| format!("Failed loading '{}'", args.identifier))?;

    print_value(&value, args.yaml)
}
