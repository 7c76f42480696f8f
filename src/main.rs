use anyhow::Result;
use clap::{Arg, Command};
use std::process;

use aka::commands;
use aka::error::AkaError;
use aka::ui::prompts;

fn main() {
    aka::init_logging();

    let exit_code = match run() {
        Ok(()) => 0,
        Err(err) => {
            prompts::error(&format!("{err:#}"));
            exit_code_for(&err)
        }
    };
    process::exit(exit_code);
}

fn run() -> Result<()> {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("gen", sub_matches)) => commands::gen::execute(sub_matches),
        Some(("exec", sub_matches)) => commands::exec::execute(sub_matches),
        Some(("list", sub_matches)) => commands::list::execute(sub_matches),
        Some(("pick-branch", sub_matches)) => commands::pick_branch::execute(sub_matches),
        _ => {
            println!("Welcome to aka!");
            println!("Use 'aka --help' for more information.");
            Ok(())
        }
    }
}

/// Alias execution must be exit-code-transparent: a failed child forwards its
/// own code, anything else is a plain engine failure.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AkaError>() {
        Some(AkaError::Execution { code }) => *code,
        _ => 1,
    }
}

fn build_cli() -> Command {
    Command::new("aka")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Command-line alias toolkit")
        .subcommand(
            Command::new("gen")
                .about("Regenerate the alias launcher scripts")
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_name("DIR")
                        .help("Output directory (defaults to the user config directory)"),
                ),
        )
        .subcommand(
            Command::new("exec")
                .about("Substitute arguments into a command template and run it")
                .arg(
                    Arg::new("template")
                        .help("Command template with $1-style placeholders")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("args")
                        .help("Substitution arguments and --al-* control flags")
                        .index(2)
                        .num_args(0..)
                        .allow_hyphen_values(true)
                        .trailing_var_arg(true),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List the registered aliases")
                .arg(
                    Arg::new("category")
                        .help("Only list aliases in this category")
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("pick-branch")
                .about("Pick one of the local git branches via an interactive list")
                .arg(
                    Arg::new("args")
                        .help("--al-* control flags")
                        .num_args(0..)
                        .allow_hyphen_values(true)
                        .trailing_var_arg(true),
                ),
        )
}
