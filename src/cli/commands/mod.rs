//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Reads a snapshot of the target working copy through the engine
//! 2. Runs its read or write operation
//! 3. Formats and displays output
//!
//! A path with no repository is not a failure: handlers print
//! [`crate::ui::output::NOT_A_REPOSITORY`] and succeed.

mod branches;
mod browse;
mod checkout;
mod completion;
mod status;
mod sync;

// Re-export command functions for testing and direct invocation
pub use branches::branches;
pub use browse::browse;
pub use checkout::checkout;
pub use completion::completion;
pub use status::status;
pub use sync::{fetch, pull, push};

use std::path::Path;

use crate::cli::args::Command;
use crate::core::config::Config;
use crate::core::snapshot::RepositorySnapshot;
use crate::engine::{Context, RetryPolicy, StatusReader};
use crate::git::{Git2Store, RepositoryStore};
use crate::ui::output::{self, Verbosity};
use anyhow::{Context as _, Result};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Status { path, json } => status::status(ctx, path.as_deref(), json),
        Command::Branches { path } => branches::branches(ctx, path.as_deref()),
        Command::Browse { path, print, index } => {
            browse::browse(ctx, path.as_deref(), print, index)
        }
        Command::Checkout { branch } => checkout::checkout(ctx, &branch),
        Command::Fetch { prune } => sync::fetch(ctx, prune),
        Command::Pull => sync::pull(ctx),
        Command::Push => sync::push(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Snapshot of the working copy enclosing `path` (default: cwd), plus the
/// configuration that applies to it.
fn read_snapshot(ctx: &Context, path: Option<&Path>) -> Result<(RepositorySnapshot, Config)> {
    let target = ctx.resolve(path).context("Failed to determine working directory")?;

    let store = Git2Store;
    let root = store.discover(&target);
    let config = Config::load(root.as_deref()).context("Failed to load configuration")?;

    let reader = StatusReader::new(store).with_policy(RetryPolicy::from_config(&config));
    let snapshot = reader.read(&target)?;
    Ok((snapshot, config))
}

/// Print the "no repository" notice if `snapshot` is empty.
///
/// Returns `true` when the caller should stop.
fn report_empty(snapshot: &RepositorySnapshot, ctx: &Context) -> bool {
    if snapshot.is_empty() {
        output::print(output::NOT_A_REPOSITORY, verbosity(ctx));
        return true;
    }
    false
}

fn verbosity(ctx: &Context) -> Verbosity {
    Verbosity::from_flags(ctx.quiet, ctx.debug)
}
