//! engine::writer
//!
//! Mutating operations on one working copy: checkout, fetch, pull, push.
//!
//! # Checkout Resolution
//!
//! A requested branch name resolves to one of three outcomes:
//!
//! - **Local**: a local branch with exactly that name exists. Switch to it.
//! - **Remote only**: no local branch, but a remote-tracking branch whose
//!   name ends with the requested name does (`HEAD` entries excluded). Create
//!   the local branch at the remote tip, wire its upstream with
//!   `git branch --set-upstream-to`, then switch.
//! - **Not found**: [`WriteError::BranchNotFound`].
//!
//! Checkout reports success by identity: `Ok(true)` only if HEAD is
//! afterwards a branch with exactly the requested name.
//!
//! # Synchronization
//!
//! Fetch, pull and push run the `git` binary through a [`CommandRunner`].
//! Whether fetch prunes is decided by the caller via [`FetchOptions`].

use std::path::Path;

use thiserror::Error;

use crate::core::snapshot::RepositorySnapshot;
use crate::core::types::{BranchName, Oid};
use crate::git::{
    BranchRef, CommandError, CommandRunner, GitError, HeadRef, RepositoryHandle, RepositoryStore,
};

/// Errors from write operations.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The snapshot does not describe a repository.
    #[error("not a git repository")]
    NoRepository,

    /// Neither a local nor a remote branch matches.
    #[error("branch '{name}' not found locally or on any remote")]
    BranchNotFound { name: String },

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

/// How a checkout request will be carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutPlan {
    /// Switch to the existing local branch.
    SwitchLocal,

    /// Create the local branch at `tip`, track `upstream`, then switch.
    TrackRemote {
        /// Friendly name of the remote-tracking branch, e.g. `origin/feature`
        upstream: String,
        tip: Oid,
    },
}

/// Options for [`RepositoryWriter::fetch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Remove remote-tracking branches deleted on the remote
    pub prune: bool,
}

/// Decide how to check out `requested` given the repository's branches.
pub fn resolve_checkout(
    branches: &[BranchRef],
    requested: &BranchName,
) -> Result<CheckoutPlan, WriteError> {
    let name = requested.as_str();

    if branches.iter().any(|b| !b.is_remote && b.name == name) {
        return Ok(CheckoutPlan::SwitchLocal);
    }

    branches
        .iter()
        .filter(|b| b.is_remote && !b.name.contains("HEAD"))
        .find_map(|b| match &b.tip {
            Some(tip) if b.name.ends_with(name) => Some(CheckoutPlan::TrackRemote {
                upstream: b.name.clone(),
                tip: tip.clone(),
            }),
            _ => None,
        })
        .ok_or_else(|| WriteError::BranchNotFound {
            name: name.to_string(),
        })
}

/// Performs write operations against one repository store and command runner.
#[derive(Debug, Clone)]
pub struct RepositoryWriter<S, R> {
    store: S,
    runner: R,
}

impl<S: RepositoryStore, R: CommandRunner> RepositoryWriter<S, R> {
    pub fn new(store: S, runner: R) -> Self {
        Self { store, runner }
    }

    /// Check out `branch` in the snapshot's working copy.
    ///
    /// Returns whether HEAD ended up on `branch`.
    ///
    /// # Errors
    ///
    /// - [`WriteError::NoRepository`] for the empty snapshot
    /// - [`WriteError::BranchNotFound`] if nothing matches
    /// - [`WriteError::Git`] / [`WriteError::Command`] if a step fails
    pub fn checkout(
        &self,
        snapshot: &RepositorySnapshot,
        branch: &BranchName,
    ) -> Result<bool, WriteError> {
        let work_dir = work_dir(snapshot)?;
        let handle = self.store.open(work_dir)?;
        let plan = resolve_checkout(&handle.branches()?, branch)?;
        tracing::debug!(branch = %branch, ?plan, "checkout");

        if let CheckoutPlan::TrackRemote { upstream, tip } = &plan {
            tracing::debug!(%upstream, tip = tip.short(7), "creating tracking branch");
            handle.create_branch(branch.as_str(), tip)?;
            let set_upstream = format!("--set-upstream-to={upstream}");
            self.runner
                .run(work_dir, &["branch", &set_upstream, branch.as_str()])?;
        }

        handle.checkout(branch.as_str())?;

        let landed = matches!(handle.head()?, HeadRef::Branch { name, .. } if name == branch.as_str());
        if !landed {
            tracing::warn!(branch = %branch, "HEAD is not on the requested branch after checkout");
        }
        Ok(landed)
    }

    /// Fetch from all remotes.
    pub fn fetch(
        &self,
        snapshot: &RepositorySnapshot,
        options: FetchOptions,
    ) -> Result<(), WriteError> {
        let mut args = vec!["fetch", "--all"];
        if options.prune {
            args.push("--prune");
        }
        self.git(snapshot, &args)
    }

    /// Pull the current branch from its upstream.
    pub fn pull(&self, snapshot: &RepositorySnapshot) -> Result<(), WriteError> {
        self.git(snapshot, &["pull"])
    }

    /// Push the current branch to its upstream.
    pub fn push(&self, snapshot: &RepositorySnapshot) -> Result<(), WriteError> {
        self.git(snapshot, &["push"])
    }

    fn git(&self, snapshot: &RepositorySnapshot, args: &[&str]) -> Result<(), WriteError> {
        let work_dir = work_dir(snapshot)?;
        self.runner.run(work_dir, args)?;
        Ok(())
    }
}

fn work_dir(snapshot: &RepositorySnapshot) -> Result<&Path, WriteError> {
    if snapshot.is_empty() {
        return Err(WriteError::NoRepository);
    }
    Ok(&snapshot.path)
}
