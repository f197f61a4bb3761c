//! List command implementation

use anyhow::{Context, Result};

use super::utils::LoaderArgs;

pub fn run(loader_args: &LoaderArgs) -> Result<()> {
    let loader = loader_args.build_loader()?;
    let identifiers = loader
        .identifiers()
        .with_context(|| format!("Failed scanning {}", loader_args.root.display()))?;

    for identifier in &identifiers {
        if loader.has_local(identifier) {
            println!("{} (local override)", identifier);
        } else {
            println!("{}", identifier);
        }
    }
    tracing::info!("{} identifiers under {}", identifiers.len(), loader.config_path().display());
    Ok(())
}
