//! git::mock
//!
//! In-memory repository store and command runner for deterministic tests.
//!
//! # Design
//!
//! [`MockStore`] holds a single [`MockRepo`] and hands out handles that share
//! its state, so a branch created through one handle is visible to the next.
//! Failures can be scripted per `open` call (to simulate a lock that clears
//! after a few attempts) or for every read. All mutating calls are recorded.
//!
//! [`MockRunner`] records every command it is asked to run and can be told
//! to fail.
//!
//! # Example
//!
//! ```
//! use repolens::git::mock::{MockRepo, MockStore};
//! use repolens::git::{GitError, RepositoryStore};
//! use std::path::Path;
//!
//! let store = MockStore::new(MockRepo::on_branch("/work/app", "main"));
//! store.fail_next_open(GitError::Locked { message: "HEAD.lock".into() });
//!
//! assert!(store.open(Path::new("/work/app")).is_err());
//! assert!(store.open(Path::new("/work/app")).is_ok());
//! assert_eq!(store.open_count(), 2);
//! ```

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::command::{CommandError, CommandRunner};
use super::traits::{
    BranchRef, HeadRef, RemoteRef, RepositoryHandle, RepositoryStore, StatusCounters, TagRef,
};
use super::GitError;
use crate::core::types::Oid;

/// Contents of the simulated repository.
#[derive(Debug, Clone)]
pub struct MockRepo {
    pub work_dir: PathBuf,
    pub status: StatusCounters,
    pub branches: Vec<BranchRef>,
    pub head: HeadRef,
    pub tags: Vec<TagRef>,
    pub remotes: Vec<RemoteRef>,
    pub stash_count: usize,
}

impl MockRepo {
    /// A clean repository on local branch `branch` with no tip, upstream or remotes.
    pub fn on_branch(work_dir: impl Into<PathBuf>, branch: &str) -> Self {
        Self {
            work_dir: work_dir.into(),
            status: StatusCounters::default(),
            branches: vec![BranchRef::local(branch, None)],
            head: HeadRef::Branch {
                name: branch.to_string(),
                tip: None,
                upstream: None,
            },
            tags: Vec::new(),
            remotes: Vec::new(),
            stash_count: 0,
        }
    }
}

/// Recorded handle operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    Open { root: PathBuf },
    CreateBranch { name: String, at: Oid },
    Checkout { name: String },
}

#[derive(Debug)]
struct MockStoreInner {
    repo: Option<MockRepo>,
    /// Errors returned by successive `open` calls, front first.
    open_failures: VecDeque<GitError>,
    /// Error returned by every read once a handle is open.
    read_failure: Option<GitError>,
    operations: Vec<MockOperation>,
}

/// Mock repository store.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone)]
pub struct MockStore {
    inner: Arc<Mutex<MockStoreInner>>,
}

impl MockStore {
    /// A store containing `repo`.
    pub fn new(repo: MockRepo) -> Self {
        Self::with_repo(Some(repo))
    }

    /// A store in which no path belongs to a repository.
    pub fn empty() -> Self {
        Self::with_repo(None)
    }

    fn with_repo(repo: Option<MockRepo>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockStoreInner {
                repo,
                open_failures: VecDeque::new(),
                read_failure: None,
                operations: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockStoreInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make the next `open` fail with `err`. Calls queue up.
    pub fn fail_next_open(&self, err: GitError) {
        self.lock().open_failures.push_back(err);
    }

    /// Make every read on an open handle fail with `err`.
    pub fn fail_reads_with(&self, err: GitError) {
        self.lock().read_failure = Some(err);
    }

    /// All recorded operations, oldest first.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    /// Number of `open` calls, failed ones included.
    pub fn open_count(&self) -> usize {
        self.lock()
            .operations
            .iter()
            .filter(|op| matches!(op, MockOperation::Open { .. }))
            .count()
    }

    /// Current repository contents.
    pub fn repo(&self) -> Option<MockRepo> {
        self.lock().repo.clone()
    }
}

impl RepositoryStore for MockStore {
    type Handle = MockHandle;

    fn discover(&self, path: &Path) -> Option<PathBuf> {
        let inner = self.lock();
        let repo = inner.repo.as_ref()?;
        path.starts_with(&repo.work_dir)
            .then(|| repo.work_dir.clone())
    }

    fn open(&self, root: &Path) -> Result<MockHandle, GitError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::Open {
            root: root.to_path_buf(),
        });

        if let Some(err) = inner.open_failures.pop_front() {
            return Err(err);
        }
        if inner.repo.is_none() {
            return Err(GitError::NotARepo {
                path: root.to_path_buf(),
            });
        }

        Ok(MockHandle {
            store: self.clone(),
        })
    }
}

/// Handle onto a [`MockStore`]'s repository.
#[derive(Debug, Clone)]
pub struct MockHandle {
    store: MockStore,
}

impl MockHandle {
    /// Run `f` against the repository, honouring a scripted read failure.
    fn read<T>(&self, f: impl FnOnce(&MockRepo) -> T) -> Result<T, GitError> {
        let inner = self.store.lock();
        if let Some(err) = &inner.read_failure {
            return Err(err.clone());
        }
        let repo = inner.repo.as_ref().ok_or(GitError::BareRepo)?;
        Ok(f(repo))
    }
}

impl RepositoryHandle for MockHandle {
    fn work_dir(&self) -> Result<PathBuf, GitError> {
        self.read(|r| r.work_dir.clone())
    }

    fn status(&self) -> Result<StatusCounters, GitError> {
        self.read(|r| r.status)
    }

    fn branches(&self) -> Result<Vec<BranchRef>, GitError> {
        self.read(|r| r.branches.clone())
    }

    fn head(&self) -> Result<HeadRef, GitError> {
        self.read(|r| r.head.clone())
    }

    fn tags(&self) -> Result<Vec<TagRef>, GitError> {
        self.read(|r| r.tags.clone())
    }

    fn remotes(&self) -> Result<Vec<RemoteRef>, GitError> {
        self.read(|r| r.remotes.clone())
    }

    fn stash_count(&self) -> Result<usize, GitError> {
        self.read(|r| r.stash_count)
    }

    fn create_branch(&self, name: &str, at: &Oid) -> Result<(), GitError> {
        let mut inner = self.store.lock();
        inner.operations.push(MockOperation::CreateBranch {
            name: name.to_string(),
            at: at.clone(),
        });

        let repo = inner.repo.as_mut().ok_or(GitError::BareRepo)?;
        if repo.branches.iter().any(|b| !b.is_remote && b.name == name) {
            return Err(GitError::AlreadyExists {
                refname: format!("refs/heads/{name}"),
            });
        }
        repo.branches.push(BranchRef::local(name, Some(at.clone())));
        Ok(())
    }

    fn checkout(&self, name: &str) -> Result<(), GitError> {
        let mut inner = self.store.lock();
        inner.operations.push(MockOperation::Checkout {
            name: name.to_string(),
        });

        let repo = inner.repo.as_mut().ok_or(GitError::BareRepo)?;
        let tip = repo
            .branches
            .iter()
            .find(|b| !b.is_remote && b.name == name)
            .map(|b| b.tip.clone())
            .ok_or_else(|| GitError::RefNotFound {
                refname: format!("refs/heads/{name}"),
            })?;

        repo.head = HeadRef::Branch {
            name: name.to_string(),
            tip,
            upstream: None,
        };
        Ok(())
    }
}

/// A command the [`MockRunner`] was asked to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub work_dir: PathBuf,
    pub args: Vec<String>,
}

#[derive(Debug, Default)]
struct MockRunnerInner {
    calls: Vec<RecordedCommand>,
    failure: Option<CommandError>,
}

/// Mock command runner.
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    inner: Arc<Mutex<MockRunnerInner>>,
}

impl MockRunner {
    /// A runner on which every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner on which every command exits with `code`.
    pub fn failing(code: i32, stderr: &str) -> Self {
        let runner = Self::default();
        runner.lock().failure = Some(CommandError::Failed {
            args: String::new(),
            code: Some(code),
            stderr: stderr.to_string(),
        });
        runner
    }

    fn lock(&self) -> MutexGuard<'_, MockRunnerInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Recorded commands, oldest first.
    pub fn calls(&self) -> Vec<RecordedCommand> {
        self.lock().calls.clone()
    }

    /// Recorded argument lists only.
    pub fn args(&self) -> Vec<Vec<String>> {
        self.lock().calls.iter().map(|c| c.args.clone()).collect()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, work_dir: &Path, args: &[&str]) -> Result<(), CommandError> {
        let mut inner = self.lock();
        inner.calls.push(RecordedCommand {
            work_dir: work_dir.to_path_buf(),
            args: args.iter().map(|a| a.to_string()).collect(),
        });

        match &inner.failure {
            Some(CommandError::Failed { code, stderr, .. }) => Err(CommandError::Failed {
                args: args.join(" "),
                code: *code,
                stderr: stderr.clone(),
            }),
            Some(other) => Err(other.clone()),
            None => Ok(()),
        }
    }
}
