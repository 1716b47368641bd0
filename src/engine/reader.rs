//! engine::reader
//!
//! Builds a [`RepositorySnapshot`] for a filesystem path.
//!
//! # Architecture
//!
//! The reader is the only component that touches the repository for a
//! status request. Per attempt it:
//!
//! 1. opens a fresh handle on the discovered working copy root
//! 2. reads status counters, head, tags, branches, remotes and stashes
//! 3. resolves the head's display name ([`crate::core::head`])
//! 4. merges the branch catalog ([`crate::core::branches`])
//! 5. derives browse URLs ([`crate::core::urls`])
//! 6. assembles the snapshot and drops the handle
//!
//! Attempts are driven by a [`RetryPolicy`] that retries only while the
//! repository is locked.
//!
//! # Failure Model
//!
//! - No repository at the path: [`RepositorySnapshot::empty`], not an error
//! - Repository still locked after the last attempt: [`ReadError::Locked`]
//! - Anything else: logged and turned into [`RepositorySnapshot::empty`]
//!
//! # Example
//!
//! ```no_run
//! use repolens::engine::reader::StatusReader;
//! use repolens::git::Git2Store;
//! use std::path::Path;
//!
//! let reader = StatusReader::new(Git2Store);
//! let snapshot = reader.read(Path::new(".")).unwrap();
//! if snapshot.is_empty() {
//!     println!("not a git repository");
//! } else {
//!     println!("{} on {}", snapshot.name, snapshot.current_branch);
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use super::retry::{RetryError, RetryPolicy};
use crate::core::branches;
use crate::core::head::resolve_head;
use crate::core::snapshot::RepositorySnapshot;
use crate::core::urls::browse_urls;
use crate::git::{GitError, RepositoryHandle, RepositoryStore};

/// Errors that escape a status read.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The repository stayed locked for every attempt.
    #[error("repository at '{path}' is locked (gave up after {attempts} attempts): {source}")]
    Locked {
        path: PathBuf,
        attempts: u32,
        source: GitError,
    },
}

/// Reads repository snapshots through a [`RepositoryStore`].
#[derive(Debug, Clone)]
pub struct StatusReader<S> {
    store: S,
    policy: RetryPolicy<GitError>,
}

impl<S: RepositoryStore> StatusReader<S> {
    /// A reader with the default lock retry policy.
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy.
    pub fn with_policy(mut self, policy: RetryPolicy<GitError>) -> Self {
        self.policy = policy;
        self
    }

    /// Snapshot of the working copy enclosing `path`.
    ///
    /// # Errors
    ///
    /// Only [`ReadError::Locked`]; every other failure yields the empty
    /// snapshot.
    pub fn read(&self, path: &Path) -> Result<RepositorySnapshot, ReadError> {
        self.read_with_sleep(path, std::thread::sleep)
    }

    /// Like [`StatusReader::read`], pausing between attempts through `sleep`.
    pub fn read_with_sleep(
        &self,
        path: &Path,
        sleep: impl FnMut(Duration),
    ) -> Result<RepositorySnapshot, ReadError> {
        if path.as_os_str().is_empty() {
            tracing::debug!("empty path, no repository");
            return Ok(RepositorySnapshot::empty());
        }

        let Some(root) = self.store.discover(path) else {
            tracing::debug!(path = %path.display(), "no repository found");
            return Ok(RepositorySnapshot::empty());
        };

        let result = self.policy.run_with(sleep, |attempt| {
            tracing::debug!(root = %root.display(), attempt, "reading repository");
            self.read_once(&root).inspect_err(|err| {
                if err.is_locked() {
                    tracing::warn!(root = %root.display(), attempt, "repository locked: {err}");
                }
            })
        });

        match result {
            Ok(snapshot) => Ok(snapshot),
            Err(RetryError { attempts, source }) if source.is_locked() => Err(ReadError::Locked {
                path: root,
                attempts,
                source,
            }),
            Err(RetryError { source, .. }) => {
                tracing::warn!(root = %root.display(), "could not read repository: {source}");
                Ok(RepositorySnapshot::empty())
            }
        }
    }

    /// One attempt: open a handle, read everything, drop the handle.
    fn read_once(&self, root: &Path) -> Result<RepositorySnapshot, GitError> {
        let handle = self.store.open(root)?;

        let work_dir = handle.work_dir()?;
        let status = handle.status()?;
        let head = handle.head()?;
        let tags = handle.tags()?;
        let branch_refs = handle.branches()?;
        let remotes = handle.remotes()?;
        let stash_count = handle.stash_count()?;

        let details = resolve_head(&head, &tags);
        let upstream = head.upstream();
        let tracking = upstream.and_then(|u| u.tracking);

        let snapshot = RepositorySnapshot {
            name: dir_name(&work_dir),
            location: work_dir.parent().map(Path::to_path_buf).unwrap_or_default(),
            remote_urls: browse_urls(&remotes, &details.name),
            current_branch: details.name,
            has_upstream: upstream.is_some(),
            is_detached: details.is_detached,
            is_on_tag: details.is_on_tag,
            ahead_by: tracking.map(|t| t.ahead_by),
            behind_by: tracking.map(|t| t.behind_by),
            branches: branches::all_names(&branch_refs),
            local_branches: branches::local_names(&branch_refs),
            all_branches: branches::merge_branches(&branch_refs),
            stash_count,
            path: work_dir,
            ..RepositorySnapshot::default()
        };

        Ok(snapshot.with_status(status))
    }
}

/// Last path component, or the whole path for a filesystem root.
fn dir_name(work_dir: &Path) -> String {
    match work_dir.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => work_dir.display().to_string(),
    }
}
