//! repolens - Branch topology and sync state of a git working copy
//!
//! repolens produces a read-only snapshot of one working copy: the current
//! branch (or the tag / commit a detached HEAD sits on), divergence from the
//! upstream, working tree counters, a merged catalog of local and remote
//! branches, and browse URLs for every remote. It also resolves branch
//! switches, creating a tracking branch from a remote when needed.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Snapshot reader, checkout resolver and writer, retry policy
//! - [`core`] - Domain types, pure reconciliation logic, configuration
//! - [`git`] - Single interface for all Git operations
//! - [`ui`] - Output formatting
//!
//! # Correctness Invariants
//!
//! 1. A status read never mutates the repository
//! 2. "No repository here" is a valid result, not an error
//! 3. The branch catalog never lists one logical branch twice
//! 4. Only `git` imports `git2`

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod ui;
