//! git
//!
//! Single doorway to git for repolens.
//!
//! # Architecture
//!
//! All repository reads and the two local writes (create branch, switch
//! branch) go through the capability traits in [`traits`]. Only
//! [`interface`] imports `git2`. Subcommands that must behave exactly like
//! the user's own `git` (fetch, pull, push, upstream wiring) go through a
//! [`CommandRunner`].
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Working tree status counters
//! - Branch, tag, remote and stash enumeration
//! - Head classification (branch vs detached) and upstream tracking
//! - Branch creation and checkout
//! - Running git subcommands
//!
//! # Example
//!
//! ```ignore
//! use repolens::git::{Git2Store, RepositoryHandle, RepositoryStore};
//! use std::path::Path;
//!
//! let store = Git2Store;
//! if let Some(root) = store.discover(Path::new(".")) {
//!     let handle = store.open(&root)?;
//!     for branch in handle.branches()? {
//!         println!("{}", branch.name);
//!     }
//! }
//! ```

mod command;
mod interface;
pub mod mock;
mod traits;

pub use command::{CommandError, CommandRunner, GitCommander};
pub use interface::{Git, Git2Store, GitError};
pub use traits::{
    BranchRef, HeadRef, RemoteRef, RepositoryHandle, RepositoryStore, StatusCounters, TagRef,
    Tracking, Upstream,
};
