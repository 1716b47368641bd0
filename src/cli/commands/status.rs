//! status command - Show the working copy snapshot

use super::{read_snapshot, report_empty, verbosity};
use crate::engine::Context;
use crate::ui::output;
use anyhow::Result;
use std::path::Path;

/// Show the snapshot of the working copy enclosing `path`.
///
/// With `json`, the snapshot is printed as JSON even in quiet mode, and the
/// empty snapshot is printed as-is (`"name": ""`).
pub fn status(ctx: &Context, path: Option<&Path>, json: bool) -> Result<()> {
    let (snapshot, _config) = read_snapshot(ctx, path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    if report_empty(&snapshot, ctx) {
        return Ok(());
    }
    output::print(output::format_snapshot(&snapshot), verbosity(ctx));
    Ok(())
}
