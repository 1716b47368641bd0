//! browse command - Open a remote's web page for the current branch

use super::{read_snapshot, report_empty, verbosity};
use crate::engine::Context;
use crate::ui::output;
use anyhow::{bail, Context as _, Result};
use std::path::Path;

/// Open (or with `print`, list) the browse URLs of the working copy.
///
/// `index` picks which URL to open, in remote order.
pub fn browse(ctx: &Context, path: Option<&Path>, print: bool, index: usize) -> Result<()> {
    let (snapshot, _config) = read_snapshot(ctx, path)?;
    if report_empty(&snapshot, ctx) {
        return Ok(());
    }

    let urls = &snapshot.remote_urls;
    if urls.is_empty() {
        bail!("No remotes with a URL configured");
    }

    if print {
        // Printed even in quiet mode: the URLs are the requested output.
        println!("{}", output::format_list(urls, ""));
        return Ok(());
    }

    let Some(url) = urls.get(index) else {
        bail!(
            "No URL at index {} (only {} available; use --print to list them)",
            index,
            urls.len()
        );
    };

    output::print(format!("Opening {url}"), verbosity(ctx));
    open::that(url).with_context(|| format!("Failed to open {url}"))?;
    Ok(())
}
