//! engine
//!
//! Orchestrates reads and writes against one working copy.
//!
//! # Architecture
//!
//! ```text
//! path -> discover -> [retry: open -> read -> assemble] -> RepositorySnapshot
//! snapshot + branch -> resolve -> [create + set upstream] -> switch -> verify
//! ```
//!
//! - [`reader`]: builds snapshots, retrying while the repository is locked
//! - [`writer`]: checkout resolution plus fetch / pull / push
//! - [`retry`]: the bounded retry policy shared by the above
//!
//! The engine only talks to git through [`crate::git::RepositoryStore`] and
//! [`crate::git::CommandRunner`], so every path can be exercised against the
//! in-memory doubles in [`crate::git::mock`].
//!
//! # Invariants
//!
//! - A read never mutates the repository
//! - Snapshots are built fresh per request and never cached
//! - Only a persistent lock escapes a read as an error

pub mod reader;
pub mod retry;
pub mod writer;

pub use reader::{ReadError, StatusReader};
pub use retry::{RetryError, RetryPolicy};
pub use writer::{resolve_checkout, CheckoutPlan, FetchOptions, RepositoryWriter, WriteError};

use std::path::PathBuf;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// Directory commands operate on: the override, else the process cwd.
    pub fn cwd(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }

    /// Resolve an optional command path argument against [`Context::cwd`].
    pub fn resolve(&self, path: Option<&std::path::Path>) -> std::io::Result<PathBuf> {
        let base = self.cwd()?;
        Ok(match path {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) => base.join(p),
            None => base,
        })
    }
}
