//! sync commands - Fetch, pull and push through the git binary

use super::{read_snapshot, report_empty, verbosity};
use crate::core::snapshot::RepositorySnapshot;
use crate::engine::{Context, FetchOptions, RepositoryWriter, WriteError};
use crate::git::{Git2Store, GitCommander};
use crate::ui::output;
use anyhow::Result;

type Writer = RepositoryWriter<Git2Store, GitCommander>;

/// Run `op` against the current working copy unless there is none.
fn with_writer(
    ctx: &Context,
    op: impl FnOnce(&Writer, &RepositorySnapshot, bool) -> Result<(), WriteError>,
) -> Result<()> {
    let (snapshot, config) = read_snapshot(ctx, None)?;
    if report_empty(&snapshot, ctx) {
        return Ok(());
    }
    let writer = RepositoryWriter::new(Git2Store, GitCommander::new());
    op(&writer, &snapshot, config.prune_on_fetch())?;
    Ok(())
}

/// Fetch from all remotes. `prune` forces pruning; otherwise config decides.
pub fn fetch(ctx: &Context, prune: bool) -> Result<()> {
    with_writer(ctx, |writer, snapshot, prune_on_fetch| {
        let options = FetchOptions {
            prune: prune || prune_on_fetch,
        };
        writer.fetch(snapshot, options)
    })?;
    output::print("Fetched all remotes", verbosity(ctx));
    Ok(())
}

/// Pull the current branch.
pub fn pull(ctx: &Context) -> Result<()> {
    with_writer(ctx, |writer, snapshot, _| writer.pull(snapshot))?;
    output::print("Pulled", verbosity(ctx));
    Ok(())
}

/// Push the current branch.
pub fn push(ctx: &Context) -> Result<()> {
    with_writer(ctx, |writer, snapshot, _| writer.push(snapshot))?;
    output::print("Pushed", verbosity(ctx));
    Ok(())
}
