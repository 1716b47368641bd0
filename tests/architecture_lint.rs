//! Architecture enforcement tests.
//!
//! The layering rules are cheap to break by accident and hard to notice in
//! review, so they are checked here against the source tree.
//!
//! # Test Categories
//!
//! 1. **Single doorway** - Only `git/interface.rs` may use `git2`
//! 2. **Process spawning** - Only `git/command.rs` may start processes
//! 3. **Layering** - `core` never reaches up into `engine`, `cli` or `ui`

use std::fs;
use std::path::{Path, PathBuf};

/// The only file allowed to use `git2`.
const GIT2_DOORWAY: &str = "src/git/interface.rs";

/// The only file allowed to spawn processes.
const PROCESS_DOORWAY: &str = "src/git/command.rs";

/// Every `.rs` file under `dir`, sorted.
fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).expect("Failed to read directory") {
        let path = entry.expect("Failed to read entry").path();
        if path.is_dir() {
            files.extend(rust_files(&path));
        } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
            files.push(path);
        }
    }
    files.sort();
    files
}

/// Source text before the first `#[cfg(test)]`.
fn non_test_source(path: &Path) -> String {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|_| panic!("Failed to read {}", path.display()));
    match content.find("#[cfg(test)]") {
        Some(idx) => content[..idx].to_string(),
        None => content,
    }
}

fn find_violations(dir: &str, allowed: &[&str], needles: &[&str]) -> Vec<String> {
    rust_files(Path::new(dir))
        .into_iter()
        .filter(|path| !allowed.iter().any(|a| path.ends_with(a)))
        .filter_map(|path| {
            let source = non_test_source(&path);
            needles
                .iter()
                .find(|needle| source.contains(**needle))
                .map(|needle| format!("{}: uses `{}`", path.display(), needle))
        })
        .collect()
}

#[test]
fn only_interface_uses_git2() {
    let violations = find_violations("src", &[GIT2_DOORWAY], &["git2::", "use git2"]);
    assert!(
        violations.is_empty(),
        "git2 used outside {}:\n  {}",
        GIT2_DOORWAY,
        violations.join("\n  ")
    );
}

#[test]
fn only_command_runner_spawns_processes() {
    let violations = find_violations(
        "src",
        &[PROCESS_DOORWAY],
        &["std::process::Command", "process::Command::new"],
    );
    assert!(
        violations.is_empty(),
        "processes spawned outside {}:\n  {}",
        PROCESS_DOORWAY,
        violations.join("\n  ")
    );
}

#[test]
fn core_does_not_depend_on_upper_layers() {
    let violations = find_violations(
        "src/core",
        &[],
        &["crate::engine", "crate::cli", "crate::ui"],
    );
    assert!(
        violations.is_empty(),
        "core depends on an upper layer:\n  {}",
        violations.join("\n  ")
    );
}

#[test]
fn doorways_exist() {
    // The lints above skip these paths by name.
    assert!(Path::new(GIT2_DOORWAY).exists());
    assert!(Path::new(PROCESS_DOORWAY).exists());
}
