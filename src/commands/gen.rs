use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use std::path::PathBuf;

use crate::core::{generator, registry};

/// Handle the `gen` command: rebuild the launcher tree from the registry.
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let out_dir = match matches.get_one::<String>("out") {
        Some(path) => PathBuf::from(path),
        None => generator::default_output_dir()
            .context("Failed to resolve the launcher directory")?,
    };

    println!("{}", "Regenerating alias launchers...".cyan());

    generator::regenerate(&out_dir).context("Failed to regenerate alias launchers")?;

    let count: usize = registry::categories()
        .values()
        .map(|aliases| aliases.len())
        .sum();
    println!(
        "{} {}",
        "✓ Generated".green().bold(),
        format!("{} launcher(s) in {}", count, out_dir.display()).cyan()
    );

    Ok(())
}
