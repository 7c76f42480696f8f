use anyhow::{bail, Context, Result};
use clap::ArgMatches;

use crate::core::branch;
use crate::core::engine::{self, ReturnOutput, RunConfig};
use crate::ui::prompts;

/// Handle the `pick-branch` command: prompt the user to pick one of the local
/// git branches via an interactive list and print the chosen branch name.
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let tokens: Vec<String> = matches
        .get_many::<String>("args")
        .unwrap_or_default()
        .cloned()
        .collect();
    let (cfg, _) = engine::partition_args(&tokens, RunConfig::default())?;

    if cfg.dryrun {
        println!("Pick one from a list of branches.");
        return Ok(());
    }

    let listing_cfg = RunConfig {
        return_output: ReturnOutput::Full,
        debug: cfg.debug,
        ..RunConfig::default()
    };
    let listing = engine::run("git branch", &[], listing_cfg)
        .context("Failed to list git branches")?
        .unwrap_or_default();

    let mut entries = branch::parse_listing(&listing)?;
    if entries.is_empty() {
        bail!("No git branches found.");
    }
    branch::sort_entries(&mut entries);
    let default_index = branch::default_index(&entries);

    let items: Vec<String> = entries
        .iter()
        .map(|entry| entry.display_name.clone())
        .collect();

    match prompts::select("Pick a branch:", &items, default_index)? {
        Some(index) => {
            println!("{}", entries[index].value);
            Ok(())
        }
        None => bail!("No branch selected."),
    }
}
