//! Command-line interface for layered-config
//!
//! Provides `dump`, `get`, `list` and `load` subcommands over one
//! configuration root.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod dump;
mod list;
mod load;
mod utils;

/// Inspect a layered configuration directory
#[derive(Parser)]
#[command(name = "layered-config")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    loader: utils::LoaderArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load every configuration file and print the merged map
    Dump(dump::DumpArgs),

    /// Load every configuration file and print a single entry
    Get(dump::GetArgs),

    /// List discovered identifiers and their local overrides
    List,

    /// Load one identifier and print its resolved value
    Load(load::LoadArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Dump(args) => dump::run_dump(&cli.loader, args),
        Commands::Get(args) => dump::run_get(&cli.loader, args),
        Commands::List => list::run(&cli.loader),
        Commands::Load(args) => load::run(&cli.loader, args),
    }
}
