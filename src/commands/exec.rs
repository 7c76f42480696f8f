use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::engine::{self, RunConfig};

/// Handle the `exec` command: the shared runtime entry the generated
/// launchers call. Substitutes the caller's arguments into the template and
/// runs the resulting command(s).
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let template = matches
        .get_one::<String>("template")
        .context("Command template is required")?;
    let tokens: Vec<String> = matches
        .get_many::<String>("args")
        .unwrap_or_default()
        .cloned()
        .collect();

    if let Some(output) = engine::run(template, &tokens, RunConfig::default())? {
        println!("{output}");
    }

    Ok(())
}
