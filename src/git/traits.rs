//! git::traits
//!
//! The repository capability set consumed by the engine.
//!
//! # Design
//!
//! Reads and the two local mutations the checkout resolver needs are
//! expressed as a pair of traits:
//!
//! - [`RepositoryStore`] finds and opens repositories
//! - [`RepositoryHandle`] answers questions about one open repository
//!
//! A handle is scoped to a single read attempt or a single checkout and is
//! dropped at the end of it. [`crate::git::Git`] implements the handle over
//! `git2`; [`crate::git::mock`] provides an in-memory implementation.
//!
//! The head is exposed as a tagged variant ([`HeadRef`]) so nothing above
//! this layer ever has to guess whether HEAD is detached from its name.

use std::path::{Path, PathBuf};

use super::GitError;
use crate::core::types::Oid;

/// A branch as enumerated by the store, local or remote-tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    /// Friendly name (`main`, `origin/main`, `origin/HEAD`)
    pub name: String,
    /// Whether this is a remote-tracking branch
    pub is_remote: bool,
    /// Commit the branch points at, if it resolves directly
    pub tip: Option<Oid>,
}

impl BranchRef {
    /// A local branch.
    pub fn local(name: impl Into<String>, tip: Option<Oid>) -> Self {
        Self {
            name: name.into(),
            is_remote: false,
            tip,
        }
    }

    /// A remote-tracking branch.
    pub fn remote(name: impl Into<String>, tip: Option<Oid>) -> Self {
        Self {
            name: name.into(),
            is_remote: true,
            tip,
        }
    }
}

/// A tag and the commit it ultimately points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    /// Peeled commit; `None` for tags on non-commit objects
    pub target: Option<Oid>,
}

/// A configured remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRef {
    pub name: String,
    /// Raw fetch URL as written in the repository config
    pub url: String,
}

/// Divergence between a branch and its upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tracking {
    /// Commits on the local branch not on the upstream
    pub ahead_by: usize,
    /// Commits on the upstream not on the local branch
    pub behind_by: usize,
}

/// The upstream configured for the current branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    /// Full ref name, e.g. `refs/remotes/origin/main`
    pub canonical_name: String,
    /// `None` when the upstream ref is configured but cannot be resolved
    /// (for example after the remote branch was deleted and pruned).
    pub tracking: Option<Tracking>,
}

/// What HEAD points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadRef {
    /// HEAD is attached to a local branch (possibly unborn, with no tip).
    Branch {
        name: String,
        tip: Option<Oid>,
        upstream: Option<Upstream>,
    },

    /// HEAD points directly at a commit.
    Detached { name: String, tip: Option<Oid> },
}

impl HeadRef {
    /// Friendly name of the reference itself.
    pub fn name(&self) -> &str {
        match self {
            HeadRef::Branch { name, .. } | HeadRef::Detached { name, .. } => name,
        }
    }

    /// Upstream of the current branch; always `None` when detached.
    pub fn upstream(&self) -> Option<&Upstream> {
        match self {
            HeadRef::Branch { upstream, .. } => upstream.as_ref(),
            HeadRef::Detached { .. } => None,
        }
    }
}

/// Per-category file counts from a working tree status scan.
///
/// A file can count in more than one category (e.g. staged and then
/// modified again in the working tree).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounters {
    /// New in the working tree, not in the index
    pub untracked: usize,
    /// Modified in the working tree
    pub modified: usize,
    /// Deleted from the working tree
    pub missing: usize,
    /// New in the index
    pub added: usize,
    /// Modified or renamed in the index
    pub staged: usize,
    /// Deleted from the index
    pub removed: usize,
    /// Matched by an ignore rule
    pub ignored: usize,
}

/// Finds and opens repositories.
pub trait RepositoryStore {
    type Handle: RepositoryHandle;

    /// Root of the working copy enclosing `path`, if there is one.
    fn discover(&self, path: &Path) -> Option<PathBuf>;

    /// Open the repository rooted at `root`.
    fn open(&self, root: &Path) -> Result<Self::Handle, GitError>;
}

/// One open repository.
pub trait RepositoryHandle {
    /// Working directory root.
    fn work_dir(&self) -> Result<PathBuf, GitError>;

    /// Working tree status counters, ignored files included.
    fn status(&self) -> Result<StatusCounters, GitError>;

    /// All local and remote-tracking branches, in store order.
    fn branches(&self) -> Result<Vec<BranchRef>, GitError>;

    fn head(&self) -> Result<HeadRef, GitError>;

    /// All tags, in store order.
    fn tags(&self) -> Result<Vec<TagRef>, GitError>;

    /// Configured remotes, in the order the store enumerates them
    /// (git2: sorted by name).
    fn remotes(&self) -> Result<Vec<RemoteRef>, GitError>;

    fn stash_count(&self) -> Result<usize, GitError>;

    /// Create local branch `name` at commit `at`. Fails if it already exists.
    fn create_branch(&self, name: &str, at: &Oid) -> Result<(), GitError>;

    /// Switch the working copy and HEAD to local branch `name`.
    fn checkout(&self, name: &str) -> Result<(), GitError>;
}
