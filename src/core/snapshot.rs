//! core::snapshot
//!
//! The immutable status snapshot returned for one working copy.
//!
//! # Invariants
//!
//! - Built fresh per read and never mutated afterwards
//! - `current_branch` is non-empty unless the snapshot is the empty sentinel
//! - `ahead_by`/`behind_by` are `None` (not zero) when no upstream is tracked
//! - [`RepositorySnapshot::empty`] stands for "no repository here" and is a
//!   normal result, not a failure

use std::path::PathBuf;

use serde::Serialize;

use crate::git::StatusCounters;

/// Branch topology and sync state of one working copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepositorySnapshot {
    /// Directory name of the working copy root; empty for the sentinel
    pub name: String,
    /// Working copy root
    pub path: PathBuf,
    /// Directory containing the working copy root
    pub location: PathBuf,

    /// Branch name, or tag / hash / raw head name when detached
    pub current_branch: String,
    pub has_upstream: bool,
    pub is_detached: bool,
    pub is_on_tag: bool,
    pub ahead_by: Option<usize>,
    pub behind_by: Option<usize>,

    pub untracked: Option<usize>,
    pub modified: Option<usize>,
    pub missing: Option<usize>,
    pub added: Option<usize>,
    pub staged: Option<usize>,
    pub removed: Option<usize>,
    pub ignored: Option<usize>,

    /// Every branch's raw friendly name, local and remote, in store order
    pub branches: Vec<String>,
    /// Raw friendly names of local branches
    pub local_branches: Vec<String>,
    /// Merged, annotated, sorted catalog (see [`crate::core::branches`])
    pub all_branches: Vec<String>,

    pub remote_urls: Vec<String>,
    pub stash_count: usize,
}

impl RepositorySnapshot {
    /// The "no repository" sentinel.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this is the sentinel.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Copy working tree counters into the snapshot.
    pub fn with_status(mut self, status: StatusCounters) -> Self {
        self.untracked = Some(status.untracked);
        self.modified = Some(status.modified);
        self.missing = Some(status.missing);
        self.added = Some(status.added);
        self.staged = Some(status.staged);
        self.removed = Some(status.removed);
        self.ignored = Some(status.ignored);
        self
    }
}
