//! git::command
//!
//! Running git subcommands against a working copy.
//!
//! Fetch, pull, push and upstream wiring go through the `git` binary rather
//! than `git2` so they pick up the user's credential helpers, hooks and
//! config exactly as a terminal `git` would. The [`CommandRunner`] trait is
//! the seam; [`GitCommander`] is the real implementation.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Errors from running a git subcommand.
#[derive(Debug, Clone, Error)]
pub enum CommandError {
    /// The git binary could not be started.
    #[error("failed to run git {args}: {message}")]
    Spawn {
        /// Space-joined arguments
        args: String,
        /// OS error description
        message: String,
    },

    /// git ran and exited unsuccessfully.
    #[error("git {args} failed{}: {stderr}", exit_suffix(.code))]
    Failed {
        /// Space-joined arguments
        args: String,
        /// Exit code, `None` if terminated by a signal
        code: Option<i32>,
        /// Captured standard error, trimmed
        stderr: String,
    },
}

fn exit_suffix(code: &Option<i32>) -> String {
    code.map(|c| format!(" with exit code {c}"))
        .unwrap_or_default()
}

/// Runs git subcommands in a working directory.
pub trait CommandRunner {
    /// Run `git <args>` in `work_dir`, succeeding only on exit status 0.
    fn run(&self, work_dir: &Path, args: &[&str]) -> Result<(), CommandError>;
}

/// Runs the `git` binary found on `PATH` (or an explicit program).
#[derive(Debug, Clone)]
pub struct GitCommander {
    program: PathBuf,
}

impl GitCommander {
    /// Use `git` from `PATH`.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }

    /// Use a specific git executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitCommander {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for GitCommander {
    fn run(&self, work_dir: &Path, args: &[&str]) -> Result<(), CommandError> {
        let joined = args.join(" ");
        tracing::debug!(dir = %work_dir.display(), "running git {joined}");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(work_dir)
            .output()
            .map_err(|e| CommandError::Spawn {
                args: joined.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(CommandError::Failed {
                args: joined,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}
