use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AkaError, Result};

/// One selectable branch, rebuilt from the raw listing on every invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchEntry {
    pub display_name: String,
    pub value: String,
    pub is_current: bool,
    pub is_other_worktree: bool,
}

// Optional single leading marker symbol, then the branch name.
static LISTING_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:([^\s\w])\s+)?(\S.*)$").unwrap());

/// Parse the raw output of `git branch` into entries, discarding blank lines.
/// An unrecognized marker symbol is fatal rather than silently mis-parsed.
pub fn parse_listing(raw: &str) -> Result<Vec<BranchEntry>> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Result<BranchEntry> {
    let captures = LISTING_LINE
        .captures(line)
        .ok_or_else(|| AkaError::UnrecognizedMarker(line.chars().next().unwrap_or(' ')))?;

    let marker = captures
        .get(1)
        .and_then(|symbol| symbol.as_str().chars().next());
    let name = captures.get(2).map(|name| name.as_str()).unwrap_or("");

    let (is_current, is_other_worktree) = match marker {
        None => (false, false),
        Some('*') => (true, false),
        Some('+') => (false, true),
        Some(symbol) => return Err(AkaError::UnrecognizedMarker(symbol)),
    };

    // Branches created by the `gcoghpr` alias read better as "[gcoghpr] <rest>".
    let mut display_name = match name.strip_prefix("gcoghpr-") {
        Some(rest) => format!("[gcoghpr] {rest}"),
        None => name.to_string(),
    };
    if is_current {
        display_name.push_str(" (current)");
    }
    if is_other_worktree {
        display_name.push_str(" (other worktree)");
    }

    Ok(BranchEntry {
        display_name,
        value: name.to_string(),
        is_current,
        is_other_worktree,
    })
}

/// Sort entries for display: simple lexicographic order, stable on ties.
pub fn sort_entries(entries: &mut [BranchEntry]) {
    entries.sort_by(|a, b| a.display_name.cmp(&b.display_name));
}

/// Index to preselect: the single entry marked current. The listing tool is
/// expected to mark at most one; none or more than one degrades to the first
/// entry rather than failing.
pub fn default_index(entries: &[BranchEntry]) -> usize {
    let mut current = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.is_current);
    match (current.next(), current.next()) {
        (Some((index, _)), None) => index,
        _ => 0,
    }
}
