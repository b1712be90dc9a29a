//! `dsnode nodes` — list the nodes a host would load.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use dsnode_nodes::listing_registry;

/// Run the nodes command. Read-only: `config.json` is not touched.
pub fn run(install_dir: &Path, as_json: bool) -> Result<()> {
    let registry = listing_registry(install_dir);

    if as_json {
        let defs = serde_json::to_string_pretty(&registry.definitions())
            .context("failed to serialize node definitions")?;
        println!("{defs}");
        return Ok(());
    }

    println!();
    for def in registry.definitions() {
        println!(
            "  {:<20} {} {}",
            def.id.bold(),
            def.display_name,
            format!("[{}]", def.category).dimmed()
        );
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_does_not_create_config() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), true).unwrap();
        run(dir.path(), false).unwrap();
        assert!(!dir.path().join("config.json").exists());
    }
}
