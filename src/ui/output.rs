//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! `status --json` bypasses this module and prints the serialized snapshot.

use std::fmt::Display;

use crate::core::snapshot::RepositorySnapshot;

/// Message printed for the empty snapshot.
pub const NOT_A_REPOSITORY: &str = "not a git repository";

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human-readable multi-line summary of a snapshot.
pub fn format_snapshot(snapshot: &RepositorySnapshot) -> String {
    if snapshot.is_empty() {
        return NOT_A_REPOSITORY.to_string();
    }

    let mut lines = vec![format!("{} ({})", snapshot.name, snapshot.path.display())];
    lines.push(format_head(snapshot));

    let changes = format_changes(snapshot);
    lines.push(if changes.is_empty() {
        "working tree clean".to_string()
    } else {
        format!("changes: {changes}")
    });

    if snapshot.stash_count > 0 {
        lines.push(format!("stashes: {}", snapshot.stash_count));
    }
    if !snapshot.remote_urls.is_empty() {
        lines.push("browse:".to_string());
        lines.push(format_list(&snapshot.remote_urls, "  "));
    }
    lines.join("\n")
}

fn format_head(snapshot: &RepositorySnapshot) -> String {
    if snapshot.is_on_tag {
        return format!("HEAD detached at tag {}", snapshot.current_branch);
    }
    if snapshot.is_detached {
        return format!("HEAD detached at {}", snapshot.current_branch);
    }

    let sync = match (snapshot.ahead_by, snapshot.behind_by) {
        (Some(0), Some(0)) => " (up to date)".to_string(),
        (Some(ahead), Some(behind)) => format!(" (ahead {ahead}, behind {behind})"),
        _ if snapshot.has_upstream => " (upstream gone)".to_string(),
        _ => " (no upstream)".to_string(),
    };
    format!("on branch {}{sync}", snapshot.current_branch)
}

/// Non-zero counters as `N label` pairs, ignored files excluded.
fn format_changes(snapshot: &RepositorySnapshot) -> String {
    [
        (snapshot.staged, "staged"),
        (snapshot.added, "added"),
        (snapshot.removed, "removed"),
        (snapshot.modified, "modified"),
        (snapshot.missing, "missing"),
        (snapshot.untracked, "untracked"),
    ]
    .iter()
    .filter_map(|(count, label)| match count {
        Some(n) if *n > 0 => Some(format!("{n} {label}")),
        _ => None,
    })
    .collect::<Vec<_>>()
    .join(", ")
}
