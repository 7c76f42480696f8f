use colored::Colorize;
use std::process::{Command, ExitStatus, Stdio};

use crate::error::{AkaError, Result};

/// Reserved prefix for invocation tokens that configure the engine instead of
/// filling a template placeholder.
pub const CONTROL_PREFIX: &str = "--al-";

/// What to do with the stdout of spawned commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnOutput {
    /// Stream to the caller's stdout.
    #[default]
    Stream,
    /// Capture and return the whole (trimmed) output.
    Full,
    /// Capture and return only the last `n` lines.
    LastLines(usize),
}

/// Effective engine configuration for one invocation. Built by merging the
/// alias spec's declared defaults with the caller's `--al-*` overrides.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub debug: bool,
    pub dryrun: bool,
    pub return_output: ReturnOutput,
    /// Keep running the remaining commands of a sequence after a failure.
    /// The first failing exit code is still reported once the sequence drains.
    pub continue_on_error: bool,
}

/// Split invocation tokens into engine configuration and substitution
/// arguments. Control tokens never consume a positional index; later tokens
/// override both `base` and earlier tokens.
pub fn partition_args(tokens: &[String], base: RunConfig) -> Result<(RunConfig, Vec<String>)> {
    let mut cfg = base;
    let mut positional = Vec::with_capacity(tokens.len());

    for token in tokens {
        let Some(body) = token.strip_prefix(CONTROL_PREFIX) else {
            positional.push(token.clone());
            continue;
        };

        let (name, value) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        match name {
            "debug" => cfg.debug = parse_bool(token, value)?,
            "dryrun" => cfg.dryrun = parse_bool(token, value)?,
            "returnOutput" => cfg.return_output = parse_return_output(token, value)?,
            _ => return Err(AkaError::UnknownControlFlag(token.clone())),
        }
    }

    Ok((cfg, positional))
}

fn parse_bool(token: &str, value: Option<&str>) -> Result<bool> {
    match value {
        None | Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(_) => Err(AkaError::UnknownControlFlag(token.to_string())),
    }
}

fn parse_return_output(token: &str, value: Option<&str>) -> Result<ReturnOutput> {
    match value {
        None | Some("true") => Ok(ReturnOutput::Full),
        Some("false") => Ok(ReturnOutput::Stream),
        Some(lines) => lines
            .parse::<usize>()
            .map(ReturnOutput::LastLines)
            .map_err(|_| AkaError::UnknownControlFlag(token.to_string())),
    }
}

/// One parsed piece of a command template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Positional { index: usize, default: Option<String> },
    Rest { default: Option<String> },
}

/// Parse a template into segments. Recognized placeholders are `$N`/`${N}`
/// (1-based), `${N:default}`, and `$*`/`${*}`/`${*:default}`. Anything else
/// after a `$` (e.g. `$HOME`, `${VAR}`) is left alone for the shell.
fn parse_segments(template: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            literal.push(ch);
            continue;
        }

        match chars.peek() {
            Some('*') => {
                chars.next();
                flush_literal(&mut segments, &mut literal);
                segments.push(Segment::Rest { default: None });
            }
            Some(c) if c.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some(c) = chars.peek() {
                    if c.is_ascii_digit() {
                        digits.push(*c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match digits.parse::<usize>() {
                    Ok(index) if index >= 1 => {
                        flush_literal(&mut segments, &mut literal);
                        segments.push(Segment::Positional {
                            index,
                            default: None,
                        });
                    }
                    _ => {
                        literal.push('$');
                        literal.push_str(&digits);
                    }
                }
            }
            Some('{') => {
                chars.next();
                let mut inner = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    inner.push(c);
                }
                if !closed {
                    literal.push('$');
                    literal.push('{');
                    literal.push_str(&inner);
                    continue;
                }

                let (target, default) = match inner.split_once(':') {
                    Some((target, default)) => (target, Some(default.to_string())),
                    None => (inner.as_str(), None),
                };

                if target == "*" {
                    flush_literal(&mut segments, &mut literal);
                    segments.push(Segment::Rest { default });
                } else if let Ok(index @ 1..) = target.parse::<usize>() {
                    flush_literal(&mut segments, &mut literal);
                    segments.push(Segment::Positional { index, default });
                } else {
                    literal.push_str("${");
                    literal.push_str(&inner);
                    literal.push('}');
                }
            }
            _ => literal.push('$'),
        }
    }

    flush_literal(&mut segments, &mut literal);
    segments
}

fn flush_literal(segments: &mut Vec<Segment>, literal: &mut String) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

/// Fill a single command template with the given substitution arguments.
/// The rest placeholder collects every argument past the highest numbered
/// placeholder, joined by a single space.
pub fn substitute(template: &str, args: &[String]) -> Result<String> {
    let segments = parse_segments(template);
    let bound = segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Positional { index, .. } => Some(*index),
            _ => None,
        })
        .max()
        .unwrap_or(0);

    let mut resolved = String::with_capacity(template.len());
    for segment in &segments {
        match segment {
            Segment::Literal(text) => resolved.push_str(text),
            Segment::Positional { index, default } => match args.get(index - 1) {
                Some(value) => resolved.push_str(value),
                None => match default {
                    Some(value) => resolved.push_str(value),
                    None => return Err(AkaError::MissingArgument { index: *index }),
                },
            },
            Segment::Rest { default } => {
                let rest = &args[bound.min(args.len())..];
                if rest.is_empty() {
                    if let Some(value) = default {
                        resolved.push_str(value);
                    }
                } else {
                    resolved.push_str(&rest.join(" "));
                }
            }
        }
    }

    Ok(resolved.trim().to_string())
}

/// Resolve a (possibly ` && `-chained) template into the ordered list of
/// commands to run. Splitting happens before substitution, so argument values
/// can never introduce additional sequence steps.
pub fn resolve_sequence(template: &str, args: &[String]) -> Result<Vec<String>> {
    template
        .split(" && ")
        .map(|part| substitute(part, args))
        .collect()
}

/// Run a command template: classify the invocation tokens, resolve every
/// command of the sequence, then spawn them one at a time through the host
/// shell. Returns the captured output when `return_output` asks for it.
pub fn run(template: &str, tokens: &[String], base: RunConfig) -> Result<Option<String>> {
    let (cfg, args) = partition_args(tokens, base)?;
    let commands = resolve_sequence(template, &args)?;

    if cfg.dryrun {
        for command in &commands {
            println!("{command}");
        }
        return Ok(None);
    }

    let capture = cfg.return_output != ReturnOutput::Stream;
    let mut captured = String::new();
    let mut deferred_failure: Option<i32> = None;

    for command in &commands {
        if cfg.debug {
            println!("{} {}", "Running:".cyan(), command);
        }

        let code = if capture {
            let output = shell_command(command)
                .stdin(Stdio::inherit())
                .stderr(Stdio::inherit())
                .output()
                .map_err(|source| spawn_failed(command, source))?;
            captured.push_str(&String::from_utf8_lossy(&output.stdout));
            exit_code(&output.status)
        } else {
            let status = shell_command(command)
                .status()
                .map_err(|source| spawn_failed(command, source))?;
            exit_code(&status)
        };

        if code != 0 {
            if cfg.continue_on_error {
                deferred_failure.get_or_insert(code);
            } else {
                return Err(AkaError::Execution { code });
            }
        }
    }

    if let Some(code) = deferred_failure {
        return Err(AkaError::Execution { code });
    }

    Ok(capture.then(|| finalize_output(&captured, cfg.return_output)))
}

fn shell_command(command: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    }
}

fn spawn_failed(command: &str, source: std::io::Error) -> AkaError {
    log::error!("failed to spawn `{command}`: {source}");
    AkaError::Spawn {
        command: command.to_string(),
        source,
    }
}

fn exit_code(status: &ExitStatus) -> i32 {
    // A signal-terminated child has no code; report a plain failure.
    status.code().unwrap_or(1)
}

fn finalize_output(captured: &str, mode: ReturnOutput) -> String {
    let trimmed = captured.trim();
    match mode {
        ReturnOutput::LastLines(count) => {
            let lines: Vec<&str> = trimmed.lines().collect();
            let start = lines.len().saturating_sub(count);
            lines[start..].join("\n")
        }
        _ => trimmed.to_string(),
    }
}
