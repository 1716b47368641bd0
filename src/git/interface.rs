//! git::interface
//!
//! Repository capability set implemented over `git2`.
//!
//! This is the only file that touches `git2`. Everything above it works with
//! the plain values from [`crate::git::traits`] and the typed [`GitError`].
//!
//! # Error Handling
//!
//! `git2` errors are normalized into a few categories the engine acts on:
//! - [`GitError::NotARepo`]: no repository encloses the path
//! - [`GitError::Locked`]: a ref or index lock file is held; the status
//!   reader retries these
//! - [`GitError::CheckoutConflict`]: local changes would be overwritten
//! - everything else is [`GitError::Internal`] or a not-found variant
//!
//! # Example
//!
//! ```ignore
//! use repolens::git::{Git, RepositoryHandle};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let head = git.head()?;
//! println!("on {}", head.name());
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::traits::{
    BranchRef, HeadRef, RemoteRef, RepositoryHandle, RepositoryStore, StatusCounters, TagRef,
    Tracking, Upstream,
};
use crate::core::types::{Oid, TypeError};

/// Errors from git operations.
#[derive(Debug, Clone, Error)]
pub enum GitError {
    /// Not inside a git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// A lock file in the repository is held by another process.
    ///
    /// Transient by nature: the holder is usually a concurrent git command
    /// that will finish shortly.
    #[error("repository is locked: {message}")]
    Locked {
        /// Message from git2
        message: String,
    },

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Object not found in repository.
    #[error("object not found: {oid}")]
    ObjectNotFound {
        /// The OID that was not found
        oid: String,
    },

    /// Ref to be created already exists.
    #[error("ref already exists: {refname}")]
    AlreadyExists {
        /// The conflicting ref
        refname: String,
    },

    /// Checkout would overwrite local changes.
    #[error("checkout conflict: {message}")]
    CheckoutConflict {
        /// Message from git2
        message: String,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// The invalid OID string
        oid: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Classify a git2 error, using `context` (a ref name or OID) in the result.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::Locked => GitError::Locked {
                message: format!("{}: {}", context, err.message()),
            },
            git2::ErrorCode::NotFound if context.starts_with("refs/") || context == "HEAD" => {
                GitError::RefNotFound {
                    refname: context.to_string(),
                }
            }
            git2::ErrorCode::NotFound => GitError::ObjectNotFound {
                oid: context.to_string(),
            },
            git2::ErrorCode::Exists => GitError::AlreadyExists {
                refname: context.to_string(),
            },
            git2::ErrorCode::Conflict | git2::ErrorCode::MergeConflict => {
                GitError::CheckoutConflict {
                    message: err.message().to_string(),
                }
            }
            git2::ErrorCode::InvalidSpec => GitError::InvalidOid {
                oid: context.to_string(),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }

    /// Whether this is the transient lock condition.
    pub fn is_locked(&self) -> bool {
        matches!(self, GitError::Locked { .. })
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid { oid: msg },
            TypeError::InvalidBranchName(msg) => GitError::Internal { message: msg },
        }
    }
}

/// Convert a git2 object id into the validated [`Oid`].
fn to_oid(oid: git2::Oid) -> Result<Oid, GitError> {
    Ok(Oid::new(oid.to_string())?)
}

/// Store backed by repositories on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct Git2Store;

impl RepositoryStore for Git2Store {
    type Handle = Git;

    fn discover(&self, path: &Path) -> Option<PathBuf> {
        let repo = git2::Repository::discover(path).ok()?;
        let root = repo.workdir().unwrap_or_else(|| repo.path());
        Some(root.to_path_buf())
    }

    fn open(&self, root: &Path) -> Result<Git, GitError> {
        Git::open(root)
    }
}

/// One open repository.
///
/// Dropping the value closes the underlying `git2::Repository`.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    /// Open the repository enclosing `path`.
    ///
    /// `path` can be any directory inside the working copy.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|e| match e.code() {
            git2::ErrorCode::Locked => GitError::from_git2(e, &path.display().to_string()),
            _ => GitError::NotARepo {
                path: path.to_path_buf(),
            },
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// HEAD of a repository without commits: a branch with no tip.
    fn unborn_head(&self) -> Result<HeadRef, GitError> {
        let head = self
            .repo
            .find_reference("HEAD")
            .map_err(|e| GitError::from_git2(e, "HEAD"))?;
        let target = head.symbolic_target().unwrap_or("HEAD");
        let name = target.strip_prefix("refs/heads/").unwrap_or(target);

        Ok(HeadRef::Branch {
            name: name.to_string(),
            tip: None,
            upstream: None,
        })
    }

    /// Upstream of local branch `branch` and its divergence from `local_tip`.
    fn upstream_of(
        &self,
        branch: &str,
        local_tip: Option<git2::Oid>,
    ) -> Result<Option<Upstream>, GitError> {
        let refname = format!("refs/heads/{branch}");
        let canonical_name = match self.repo.branch_upstream_name(&refname) {
            Ok(buf) => match buf.as_str() {
                Some(name) => name.to_string(),
                None => return Ok(None),
            },
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(GitError::from_git2(e, &refname)),
        };

        // A configured upstream whose ref is gone has no tracking data.
        let upstream_tip = self.repo.refname_to_id(&canonical_name).ok();
        let tracking = match (local_tip, upstream_tip) {
            (Some(local), Some(remote)) => {
                let (ahead_by, behind_by) = self
                    .repo
                    .graph_ahead_behind(local, remote)
                    .map_err(|e| GitError::from_git2(e, &canonical_name))?;
                Some(Tracking {
                    ahead_by,
                    behind_by,
                })
            }
            _ => None,
        };

        Ok(Some(Upstream {
            canonical_name,
            tracking,
        }))
    }
}

impl RepositoryHandle for Git {
    fn work_dir(&self) -> Result<PathBuf, GitError> {
        // git2 reports the workdir with a trailing separator.
        let dir = self.repo.workdir().ok_or(GitError::BareRepo)?;
        Ok(dir.components().collect())
    }

    fn status(&self) -> Result<StatusCounters, GitError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(true);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(|e| GitError::from_git2(e, "status"))?;

        let mut counters = StatusCounters::default();
        for entry in statuses.iter() {
            let status = entry.status();

            if status.is_wt_new() {
                counters.untracked += 1;
            }
            if status.is_wt_modified() || status.is_wt_typechange() || status.is_wt_renamed() {
                counters.modified += 1;
            }
            if status.is_wt_deleted() {
                counters.missing += 1;
            }
            if status.is_index_new() {
                counters.added += 1;
            }
            if status.is_index_modified()
                || status.is_index_renamed()
                || status.is_index_typechange()
            {
                counters.staged += 1;
            }
            if status.is_index_deleted() {
                counters.removed += 1;
            }
            if status.is_ignored() {
                counters.ignored += 1;
            }
        }

        Ok(counters)
    }

    fn branches(&self) -> Result<Vec<BranchRef>, GitError> {
        let branches = self
            .repo
            .branches(None)
            .map_err(|e| GitError::from_git2(e, "branches"))?;

        let mut result = Vec::new();
        for item in branches {
            let (branch, kind) = item.map_err(|e| GitError::from_git2(e, "branches"))?;

            // Skip branches with non-UTF8 names
            let Some(name) = branch.name().ok().flatten() else {
                continue;
            };

            // Symbolic refs (origin/HEAD) have no direct target.
            let tip = branch.get().target().map(to_oid).transpose()?;

            result.push(BranchRef {
                name: name.to_string(),
                is_remote: kind == git2::BranchType::Remote,
                tip,
            });
        }

        Ok(result)
    }

    fn head(&self) -> Result<HeadRef, GitError> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return self.unborn_head(),
            Err(e) => return Err(GitError::from_git2(e, "HEAD")),
        };

        let detached = self
            .repo
            .head_detached()
            .map_err(|e| GitError::from_git2(e, "HEAD"))?;
        let target = head.target();
        let tip = target.map(to_oid).transpose()?;
        let name = head.shorthand().unwrap_or("HEAD").to_string();

        if detached {
            return Ok(HeadRef::Detached { name, tip });
        }

        let upstream = self.upstream_of(&name, target)?;
        Ok(HeadRef::Branch {
            name,
            tip,
            upstream,
        })
    }

    fn tags(&self) -> Result<Vec<TagRef>, GitError> {
        let names = self
            .repo
            .tag_names(None)
            .map_err(|e| GitError::from_git2(e, "tags"))?;

        let mut tags = Vec::new();
        for name in names.iter().flatten() {
            let refname = format!("refs/tags/{name}");
            // Annotated tags peel through the tag object to the commit.
            let target = self
                .repo
                .find_reference(&refname)
                .and_then(|r| r.peel_to_commit())
                .ok()
                .map(|commit| to_oid(commit.id()))
                .transpose()?;

            tags.push(TagRef {
                name: name.to_string(),
                target,
            });
        }

        Ok(tags)
    }

    fn remotes(&self) -> Result<Vec<RemoteRef>, GitError> {
        let names = self
            .repo
            .remotes()
            .map_err(|e| GitError::from_git2(e, "remotes"))?;

        let mut remotes = Vec::new();
        for name in names.iter().flatten() {
            let remote = self
                .repo
                .find_remote(name)
                .map_err(|e| GitError::from_git2(e, name))?;

            remotes.push(RemoteRef {
                name: name.to_string(),
                url: remote.url().unwrap_or_default().to_string(),
            });
        }

        Ok(remotes)
    }

    fn stash_count(&self) -> Result<usize, GitError> {
        // Every stash entry is one line in the refs/stash reflog.
        match self.repo.reflog("refs/stash") {
            Ok(reflog) => Ok(reflog.len()),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(0),
            Err(e) => Err(GitError::from_git2(e, "refs/stash")),
        }
    }

    fn create_branch(&self, name: &str, at: &Oid) -> Result<(), GitError> {
        let oid =
            git2::Oid::from_str(at.as_str()).map_err(|e| GitError::from_git2(e, at.as_str()))?;
        let commit = self
            .repo
            .find_commit(oid)
            .map_err(|e| GitError::from_git2(e, at.as_str()))?;

        self.repo
            .branch(name, &commit, false)
            .map_err(|e| GitError::from_git2(e, &format!("refs/heads/{name}")))?;

        Ok(())
    }

    fn checkout(&self, name: &str) -> Result<(), GitError> {
        let refname = format!("refs/heads/{name}");
        let target = self
            .repo
            .find_reference(&refname)
            .and_then(|r| r.peel(git2::ObjectType::Commit))
            .map_err(|e| GitError::from_git2(e, &refname))?;

        let mut opts = git2::build::CheckoutBuilder::new();
        opts.safe();
        self.repo
            .checkout_tree(&target, Some(&mut opts))
            .map_err(|e| GitError::from_git2(e, &refname))?;
        self.repo
            .set_head(&refname)
            .map_err(|e| GitError::from_git2(e, &refname))?;

        Ok(())
    }
}
