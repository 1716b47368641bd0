//! checkout command - Check out a branch

use super::{read_snapshot, report_empty, verbosity};
use crate::core::types::BranchName;
use crate::engine::{Context, RepositoryWriter};
use crate::git::{Git2Store, GitCommander};
use crate::ui::output;
use anyhow::{bail, Context as _, Result};

/// Check out `branch`, creating a tracking branch from a remote if needed.
pub fn checkout(ctx: &Context, branch: &str) -> Result<()> {
    let branch = BranchName::new(branch).context("Invalid branch name")?;

    let (snapshot, _config) = read_snapshot(ctx, None)?;
    if report_empty(&snapshot, ctx) {
        return Ok(());
    }

    let writer = RepositoryWriter::new(Git2Store, GitCommander::new());
    if !writer.checkout(&snapshot, &branch)? {
        bail!("Checkout finished but HEAD is not on '{}'", branch);
    }

    output::print(format!("Switched to branch '{}'", branch), verbosity(ctx));
    Ok(())
}
