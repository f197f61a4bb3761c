//! Dump and get command implementations

use anyhow::{Context, Result};
use clap::Args;
use layered_config::ConfigView;
use serde::Serialize;

use super::utils::LoaderArgs;

#[derive(Args)]
pub struct DumpArgs {
    /// Print YAML instead of JSON
    #[arg(long)]
    pub yaml: bool,
}

#[derive(Args)]
pub struct GetArgs {
    /// Entry name to print
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Print YAML instead of JSON
    #[arg(long)]
    pub yaml: bool,
}

pub fn run_dump(loader_args: &LoaderArgs, args: DumpArgs) -> Result<()> {
    let mut loader = loader_args.build_loader()?;
    loader
        .load_all()
        .with_context(|| format!("Failed loading {}", loader_args.root.display()))?;

    print_value(loader.config(), args.yaml)
}

pub fn run_get(loader_args: &LoaderArgs, args: GetArgs) -> Result<()> {
    let mut loader = loader_args.build_loader()?;
    loader
        .load_all()
        .with_context(|| format!("Failed loading {}", loader_args.root.display()))?;

    match loader.get_config(Some(&args.key)) {
        Some(ConfigView::Entry(value)) => print_value(value, args.yaml),
        _ => anyhow::bail!("Configuration key '{}' not found", args.key),
    }
}

pub(super) fn print_value<T: Serialize + ?Sized>(value: &T, yaml: bool) -> Result<()> {
    let rendered = if yaml {
        serde_yaml::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
