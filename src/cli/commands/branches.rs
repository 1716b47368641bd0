//! branches command - List the merged branch catalog

use super::{read_snapshot, report_empty, verbosity};
use crate::engine::Context;
use crate::ui::output;
use anyhow::Result;
use std::path::Path;

/// Print the merged branch catalog, one entry per line.
pub fn branches(ctx: &Context, path: Option<&Path>) -> Result<()> {
    let (snapshot, _config) = read_snapshot(ctx, path)?;
    if report_empty(&snapshot, ctx) {
        return Ok(());
    }

    if !snapshot.all_branches.is_empty() {
        output::print(output::format_list(&snapshot.all_branches, ""), verbosity(ctx));
    }
    Ok(())
}
