use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::core::engine::{ReturnOutput, RunConfig};
use crate::error::{AkaError, Result};

/// Stamp written at the top of every generated launcher. Downstream checks
/// compare it against the installed version to detect stale output.
pub const VERSION_STAMP: &str = concat!("Generated by: aka v", env!("CARGO_PKG_VERSION"));

/// A single alias specification.
///
/// Most aliases are command templates; `Raw` is the escape hatch for aliases
/// whose launcher body cannot be expressed as a template and is emitted
/// verbatim, bypassing substitution entirely.
#[derive(Debug, Clone)]
pub enum AliasSpec {
    Raw {
        code: &'static str,
        desc: &'static str,
    },
    Template {
        command: &'static str,
        desc: Option<&'static str>,
        cfg: RunConfig,
    },
}

impl AliasSpec {
    /// Human-readable description, falling back to the command itself.
    pub fn describe(&self) -> &str {
        match self {
            AliasSpec::Raw { desc, .. } => desc,
            AliasSpec::Template { command, desc, .. } => desc.unwrap_or(command),
        }
    }
}

pub type AliasCategory = HashMap<&'static str, AliasSpec>;

fn template(command: &'static str) -> AliasSpec {
    AliasSpec::Template {
        command,
        desc: None,
        cfg: RunConfig::default(),
    }
}

fn described(command: &'static str, desc: &'static str) -> AliasSpec {
    AliasSpec::Template {
        command,
        desc: Some(desc),
        cfg: RunConfig::default(),
    }
}

const PICK_BRANCH_FORWARD: &str = if cfg!(windows) {
    "aka pick-branch %*"
} else {
    "exec aka pick-branch \"$@\""
};

static ALIASES: Lazy<HashMap<&'static str, AliasCategory>> = Lazy::new(|| {
    let mut git = AliasCategory::new();
    git.insert("gs", template("git status"));
    git.insert("gaa", template("git add --all"));
    git.insert("gcm", template("git commit -m $1"));
    git.insert(
        "gl",
        described(
            "git log --oneline --graph --decorate -${1:15}",
            "Show the latest commits (defaults to 15).",
        ),
    );
    git.insert("gco", template("git checkout ${1:master}"));
    git.insert("gcb", template("git checkout -b $1"));
    git.insert("gp", template("git push ${*}"));
    git.insert("gpf", template("git push --force-with-lease ${*}"));
    git.insert("gpl", template("git pull --rebase ${*}"));
    git.insert(
        "gsync",
        described(
            "git fetch origin && git rebase origin/${1:master}",
            "Fetch and rebase onto an upstream branch (defaults to master).",
        ),
    );
    git.insert(
        "gcurbr",
        AliasSpec::Template {
            command: "git rev-parse --abbrev-ref HEAD",
            desc: Some("Print the current branch name."),
            cfg: RunConfig {
                return_output: ReturnOutput::Full,
                ..RunConfig::default()
            },
        },
    );
    git.insert(
        "gcoghpr",
        described(
            "git fetch origin pull/$1/head:gcoghpr-$1 && git checkout gcoghpr-$1",
            "Check out a GitHub pull request as a local gcoghpr- branch.",
        ),
    );
    git.insert(
        "gpb",
        AliasSpec::Raw {
            code: PICK_BRANCH_FORWARD,
            desc: "Pick one of the local git branches via an interactive list.",
        },
    );

    let mut node = AliasCategory::new();
    node.insert("nv", template("node --version"));
    node.insert("ni", template("npm install ${*}"));
    node.insert("nid", template("npm install --save-dev ${*}"));
    node.insert("nr", template("npm run ${*}"));
    node.insert("nt", template("npm test"));
    node.insert("nls", template("npm list --depth=${1:0}"));

    let mut misc = AliasCategory::new();
    misc.insert("ll", template("ls -ahl ${*}"));
    misc.insert(
        "alv",
        described("aka --version", "Print the aka toolkit version."),
    );

    let mut categories = HashMap::new();
    categories.insert("git", git);
    categories.insert("node", node);
    categories.insert("misc", misc);
    categories
});

/// The full read-only registry: category name -> alias name -> spec.
pub fn categories() -> &'static HashMap<&'static str, AliasCategory> {
    &ALIASES
}

/// Category names in stable (sorted) order.
pub fn category_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = ALIASES.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Alias names of one category in stable (sorted) order.
pub fn alias_names(category: &AliasCategory) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = category.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Look up one alias spec. A miss is a programmer/config error surfaced at
/// build time, never an expected runtime condition.
pub fn get_spec(category: &str, name: &str) -> Result<&'static AliasSpec> {
    ALIASES
        .get(category)
        .and_then(|aliases| aliases.get(name))
        .ok_or_else(|| AkaError::lookup(category, name))
}
