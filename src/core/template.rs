use crate::core::engine::{ReturnOutput, RunConfig};
use crate::core::registry::AliasSpec;

/// Turn an alias spec into its launcher body.
///
/// `Raw` specs are emitted verbatim. `Template` specs get the default body:
/// an invocation of the shared runtime entry (`aka exec`) with the spec's
/// config defaults encoded as `--al-*` tokens. The caller's own arguments are
/// appended after the defaults, so invocation-time tokens win the merge.
pub fn resolve(spec: &AliasSpec) -> String {
    match spec {
        AliasSpec::Raw { code, .. } => (*code).to_string(),
        AliasSpec::Template { command, cfg, .. } => default_body(command, cfg),
    }
}

fn default_body(command: &str, cfg: &RunConfig) -> String {
    let defaults = config_tokens(cfg);
    if cfg!(windows) {
        format!("aka exec \"{command}\" --{defaults} %*")
    } else {
        format!("exec aka exec '{}' --{defaults} \"$@\"", quote_single(command))
    }
}

fn config_tokens(cfg: &RunConfig) -> String {
    let mut tokens = String::new();
    if cfg.debug {
        tokens.push_str(" --al-debug");
    }
    if cfg.dryrun {
        tokens.push_str(" --al-dryrun");
    }
    match cfg.return_output {
        ReturnOutput::Stream => {}
        ReturnOutput::Full => tokens.push_str(" --al-returnOutput"),
        ReturnOutput::LastLines(count) => {
            tokens.push_str(&format!(" --al-returnOutput={count}"));
        }
    }
    tokens
}

fn quote_single(text: &str) -> String {
    text.replace('\'', r"'\''")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry;

    #[test]
    fn raw_code_is_emitted_verbatim() {
        let spec = AliasSpec::Raw {
            code: "exec aka pick-branch \"$@\"",
            desc: "irrelevant",
        };
        assert_eq!(resolve(&spec), "exec aka pick-branch \"$@\"");
    }

    #[test]
    fn default_body_wraps_the_runtime_entry() {
        let spec = registry::get_spec("git", "gs").unwrap();
        let body = resolve(spec);

        assert!(body.contains("aka exec"));
        assert!(body.contains("git status"));
    }

    #[cfg(unix)]
    #[test]
    fn default_body_forwards_caller_arguments() {
        let spec = registry::get_spec("git", "gcm").unwrap();
        let body = resolve(spec);

        assert_eq!(body, "exec aka exec 'git commit -m $1' -- \"$@\"");
    }

    #[cfg(unix)]
    #[test]
    fn spec_defaults_precede_caller_arguments() {
        let spec = registry::get_spec("git", "gcurbr").unwrap();
        let body = resolve(spec);

        let defaults = body.find("--al-returnOutput").unwrap();
        let forwarded = body.find("\"$@\"").unwrap();
        assert!(defaults < forwarded);
    }

    #[test]
    fn quoting_survives_embedded_single_quotes() {
        assert_eq!(quote_single("echo 'hi'"), r"echo '\''hi'\''");
    }
}
