//! Integration tests against real repositories.
//!
//! These tests build repositories with the `git` binary in temporary
//! directories and read them back through the git2-backed store, so they
//! cover the whole path from discovery to snapshot.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use repolens::core::snapshot::RepositorySnapshot;
use repolens::core::types::BranchName;
use repolens::engine::{FetchOptions, RepositoryWriter, StatusReader, WriteError};
use repolens::git::{Git, Git2Store, GitCommander, HeadRef, RepositoryHandle, RepositoryStore};

/// Test fixture that creates a real git repository.
struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// A repository on `main` with one commit.
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        run_git(dir.path(), &["init"]);
        // Independent of the machine's init.defaultBranch.
        run_git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);
        let repo = Self { dir };
        repo.configure();
        repo.commit_file("README.md", "# Test Repo\n", "Initial commit");
        repo
    }

    /// A clone of `origin`, with `origin` as its only remote.
    fn clone_of(origin: &TestRepo) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let source = origin.path().to_str().expect("utf-8 temp path");
        run_git(dir.path(), &["clone", "--quiet", source, "."]);
        let repo = Self { dir };
        repo.configure();
        repo
    }

    fn configure(&self) {
        self.git(&["config", "user.email", "test@example.com"]);
        self.git(&["config", "user.name", "Test User"]);
        self.git(&["config", "commit.gpgsign", "false"]);
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `path`, stage it and commit.
    fn commit_file(&self, path: &str, content: &str, message: &str) {
        std::fs::write(self.path().join(path), content).unwrap();
        self.git(&["add", path]);
        self.git(&["commit", "--quiet", "-m", message]);
    }

    fn git(&self, args: &[&str]) -> String {
        run_git(self.path(), args)
    }

    fn read(&self) -> RepositorySnapshot {
        StatusReader::new(Git2Store)
            .read(self.path())
            .expect("read failed")
    }

    fn writer(&self) -> RepositoryWriter<Git2Store, GitCommander> {
        RepositoryWriter::new(Git2Store, GitCommander::new())
    }
}

/// Run a git command in `dir`, returning trimmed stdout.
fn run_git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap()
}

mod discovery {
    use super::*;

    #[test]
    fn non_repository_is_empty() {
        let dir = TempDir::new().unwrap();
        let snapshot = StatusReader::new(Git2Store).read(dir.path()).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn empty_path_is_empty() {
        let snapshot = StatusReader::new(Git2Store).read(Path::new("")).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn subdirectory_resolves_to_root() {
        let repo = TestRepo::new();
        let nested = repo.path().join("src/deep");
        std::fs::create_dir_all(&nested).unwrap();

        let snapshot = StatusReader::new(Git2Store).read(&nested).unwrap();
        assert_eq!(canonical(&snapshot.path), canonical(repo.path()));
        assert_eq!(
            canonical(&snapshot.location),
            canonical(repo.path().parent().unwrap())
        );
        assert_eq!(
            snapshot.name,
            repo.path().file_name().unwrap().to_string_lossy()
        );
    }

    #[test]
    fn unborn_repository_reports_branch() {
        let dir = TempDir::new().unwrap();
        run_git(dir.path(), &["init"]);
        run_git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/trunk"]);

        let snapshot = StatusReader::new(Git2Store).read(dir.path()).unwrap();
        assert_eq!(snapshot.current_branch, "trunk");
        assert!(!snapshot.is_detached);
        assert!(snapshot.all_branches.is_empty());
    }
}

mod head {
    use super::*;

    #[test]
    fn on_branch() {
        let snapshot = TestRepo::new().read();
        assert_eq!(snapshot.current_branch, "main");
        assert!(!snapshot.is_detached);
        assert!(!snapshot.is_on_tag);
        assert!(!snapshot.has_upstream);
        assert_eq!(snapshot.ahead_by, None);
    }

    #[test]
    fn detached_on_annotated_tag() {
        let repo = TestRepo::new();
        repo.git(&["tag", "-a", "v1.0.0", "-m", "release"]);
        repo.commit_file("a.txt", "a", "after release");
        repo.git(&["checkout", "--quiet", "--detach", "v1.0.0"]);

        let snapshot = repo.read();
        assert!(snapshot.is_detached);
        assert!(snapshot.is_on_tag);
        assert_eq!(snapshot.current_branch, "v1.0.0");
    }

    #[test]
    fn detached_without_tag_uses_hash() {
        let repo = TestRepo::new();
        let hash = repo.git(&["rev-parse", "HEAD"]);
        repo.git(&["checkout", "--quiet", "--detach", "HEAD"]);

        let snapshot = repo.read();
        assert!(snapshot.is_detached);
        assert!(!snapshot.is_on_tag);
        assert_eq!(snapshot.current_branch, hash);
    }
}

mod tracking {
    use super::*;

    #[test]
    fn clone_is_up_to_date() {
        let origin = TestRepo::new();
        let clone = TestRepo::clone_of(&origin);

        let snapshot = clone.read();
        assert!(snapshot.has_upstream);
        assert_eq!(snapshot.ahead_by, Some(0));
        assert_eq!(snapshot.behind_by, Some(0));
    }

    #[test]
    fn ahead_and_behind() {
        let origin = TestRepo::new();
        let clone = TestRepo::clone_of(&origin);

        clone.commit_file("local.txt", "1", "local 1");
        clone.commit_file("local2.txt", "2", "local 2");
        origin.commit_file("remote.txt", "r", "remote 1");
        clone.git(&["fetch", "--quiet"]);

        let snapshot = clone.read();
        assert_eq!(snapshot.ahead_by, Some(2));
        assert_eq!(snapshot.behind_by, Some(1));
    }

    #[test]
    fn gone_upstream_has_no_counts() {
        let origin = TestRepo::new();
        origin.git(&["branch", "topic"]);
        let clone = TestRepo::clone_of(&origin);
        clone.git(&["checkout", "--quiet", "topic"]);
        origin.git(&["branch", "-D", "topic"]);
        clone.git(&["fetch", "--quiet", "--prune"]);

        let snapshot = clone.read();
        assert!(snapshot.has_upstream);
        assert_eq!(snapshot.ahead_by, None);
        assert_eq!(snapshot.behind_by, None);
    }
}

mod working_tree {
    use super::*;

    #[test]
    fn counters() {
        let repo = TestRepo::new();
        repo.commit_file(".gitignore", "*.log\n", "ignore logs");
        repo.commit_file("tracked.txt", "v1", "add tracked");
        repo.commit_file("doomed.txt", "x", "add doomed");

        std::fs::write(repo.path().join("new.txt"), "n").unwrap();
        std::fs::write(repo.path().join("debug.log"), "l").unwrap();
        std::fs::write(repo.path().join("tracked.txt"), "v2").unwrap();
        std::fs::remove_file(repo.path().join("doomed.txt")).unwrap();
        std::fs::write(repo.path().join("staged.txt"), "s").unwrap();
        repo.git(&["add", "staged.txt"]);
        repo.git(&["rm", "--quiet", "README.md"]);

        let snapshot = repo.read();
        assert_eq!(snapshot.untracked, Some(1));
        assert_eq!(snapshot.ignored, Some(1));
        assert_eq!(snapshot.modified, Some(1));
        assert_eq!(snapshot.missing, Some(1));
        assert_eq!(snapshot.added, Some(1));
        assert_eq!(snapshot.removed, Some(1));
        assert_eq!(snapshot.staged, Some(0));
    }

    #[test]
    fn clean_tree_has_zero_counters() {
        let snapshot = TestRepo::new().read();
        assert_eq!(snapshot.untracked, Some(0));
        assert_eq!(snapshot.modified, Some(0));
        assert_eq!(snapshot.ignored, Some(0));
    }

    #[test]
    fn stashes_are_counted() {
        let repo = TestRepo::new();
        for content in ["one", "two"] {
            std::fs::write(repo.path().join("README.md"), content).unwrap();
            repo.git(&["stash", "--quiet"]);
        }
        assert_eq!(repo.read().stash_count, 2);
    }
}

mod catalog {
    use super::*;

    #[test]
    fn merges_local_and_remote() {
        let origin = TestRepo::new();
        origin.git(&["branch", "release"]);
        let clone = TestRepo::clone_of(&origin);
        clone.git(&["branch", "wip"]);

        let snapshot = clone.read();
        assert_eq!(
            snapshot.all_branches,
            vec!["main", "release (r)", "wip (l)"]
        );
        assert_eq!(snapshot.local_branches, vec!["main", "wip"]);
        assert!(snapshot.branches.contains(&"origin/HEAD".to_string()));
        assert!(snapshot.branches.contains(&"origin/release".to_string()));
    }
}

mod urls {
    use super::*;

    #[test]
    fn ssh_and_https_remotes() {
        let repo = TestRepo::new();
        repo.git(&["remote", "add", "mirror", "https://github.com/team/app.git"]);
        repo.git(&["remote", "add", "origin", "git@gitlab.example.com:team/app.git"]);

        let urls = repo.read().remote_urls;
        // git2 lists remotes by name, so `mirror` comes first.
        assert_eq!(
            urls,
            vec![
                "https://github.com/team/app/tree/main",
                "https://gitlab.example.com/team/app/-/commits/main",
                "https://gitlab.example.com/team/app/-/branches/all",
            ]
        );
    }
}

mod checkout {
    use super::*;

    fn name(s: &str) -> BranchName {
        BranchName::new(s).unwrap()
    }

    #[test]
    fn switches_to_local_branch() {
        let repo = TestRepo::new();
        repo.git(&["branch", "develop"]);

        let landed = repo.writer().checkout(&repo.read(), &name("develop")).unwrap();
        assert!(landed);
        assert_eq!(repo.git(&["rev-parse", "--abbrev-ref", "HEAD"]), "develop");
    }

    #[test]
    fn creates_tracking_branch_from_remote() {
        let origin = TestRepo::new();
        origin.git(&["checkout", "--quiet", "-b", "feature"]);
        origin.commit_file("f.txt", "f", "feature work");
        origin.git(&["checkout", "--quiet", "main"]);
        let clone = TestRepo::clone_of(&origin);

        let landed = clone
            .writer()
            .checkout(&clone.read(), &name("feature"))
            .unwrap();
        assert!(landed);
        assert_eq!(
            clone.git(&["rev-parse", "--abbrev-ref", "feature@{upstream}"]),
            "origin/feature"
        );
        assert_eq!(
            clone.git(&["rev-parse", "HEAD"]),
            origin.git(&["rev-parse", "feature"])
        );
        assert!(clone.path().join("f.txt").exists());

        let snapshot = clone.read();
        assert_eq!(snapshot.current_branch, "feature");
        assert_eq!(snapshot.ahead_by, Some(0));
        assert!(snapshot.all_branches.contains(&"feature".to_string()));
    }

    #[test]
    fn unknown_branch_is_not_found() {
        let repo = TestRepo::new();
        let err = repo
            .writer()
            .checkout(&repo.read(), &name("nowhere"))
            .unwrap_err();
        assert!(matches!(err, WriteError::BranchNotFound { .. }));
        assert_eq!(repo.git(&["rev-parse", "--abbrev-ref", "HEAD"]), "main");
    }
}

mod sync {
    use super::*;

    #[test]
    fn fetch_prune_removes_deleted_remote_branch() {
        let origin = TestRepo::new();
        origin.git(&["branch", "old"]);
        let clone = TestRepo::clone_of(&origin);
        origin.git(&["branch", "-D", "old"]);

        let writer = clone.writer();
        writer
            .fetch(&clone.read(), FetchOptions { prune: false })
            .unwrap();
        assert!(clone.read().all_branches.contains(&"old (r)".to_string()));

        writer
            .fetch(&clone.read(), FetchOptions { prune: true })
            .unwrap();
        assert!(!clone.read().all_branches.contains(&"old (r)".to_string()));
    }

    #[test]
    fn pull_fast_forwards() {
        let origin = TestRepo::new();
        let clone = TestRepo::clone_of(&origin);
        origin.commit_file("new.txt", "n", "upstream change");

        clone.writer().pull(&clone.read()).unwrap();
        assert!(clone.path().join("new.txt").exists());
        assert_eq!(clone.read().behind_by, Some(0));
    }

    #[test]
    fn push_without_remote_fails() {
        let repo = TestRepo::new();
        let err = repo.writer().push(&repo.read()).unwrap_err();
        assert!(matches!(err, WriteError::Command(_)));
    }
}

mod handle {
    use super::*;

    #[test]
    fn store_and_open_agree() {
        let repo = TestRepo::new();
        let root = Git2Store.discover(repo.path()).unwrap();
        let handle = Git2Store.open(&root).unwrap();
        assert_eq!(canonical(&handle.work_dir().unwrap()), canonical(repo.path()));

        let direct = Git::open(repo.path()).unwrap();
        assert!(matches!(direct.head().unwrap(), HeadRef::Branch { ref name, .. } if name == "main"));
    }

    #[test]
    fn bare_repository_is_rejected() {
        let dir = TempDir::new().unwrap();
        run_git(dir.path(), &["init", "--bare", "--quiet"]);
        assert!(Git::open(dir.path()).is_err());
        assert!(StatusReader::new(Git2Store).read(dir.path()).unwrap().is_empty());
    }
}
