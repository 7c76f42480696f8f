use anyhow::{bail, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::registry;

/// Handle the `list` command: plain registry listing, one line per alias.
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let filter = matches.get_one::<String>("category");

    let mut names = registry::category_names();
    if let Some(filter) = filter {
        if !names.iter().any(|name| *name == filter.as_str()) {
            bail!("No such alias category: {filter}");
        }
        names.retain(|name| *name == filter.as_str());
    }

    for category in names {
        println!("{}", format!("{category} aliases:").white().bold());
        let aliases = &registry::categories()[category];
        for name in registry::alias_names(aliases) {
            println!("  {} {}", name.cyan(), aliases[name].describe());
        }
        println!();
    }

    Ok(())
}
