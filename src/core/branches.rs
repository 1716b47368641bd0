//! core::branches
//!
//! Merging local and remote-tracking branches into one catalog.
//!
//! # Rules
//!
//! - Remote entries containing `HEAD` are symbolic pointers and are dropped.
//! - A literal leading `origin/` is stripped from remote names. Other remote
//!   prefixes are kept as-is, so `upstream/main` never merges with `main`.
//! - A name present on both sides appears once, unannotated.
//! - Remote-only names get [`REMOTE_ONLY_SUFFIX`], local-only names get
//!   [`LOCAL_ONLY_SUFFIX`].
//! - The result is sorted by the rendered string (byte order).
//!
//! # Example
//!
//! ```
//! use repolens::core::branches::merge_branches;
//! use repolens::git::BranchRef;
//!
//! let branches = vec![
//!     BranchRef::local("main", None),
//!     BranchRef::local("wip", None),
//!     BranchRef::remote("origin/HEAD", None),
//!     BranchRef::remote("origin/main", None),
//!     BranchRef::remote("origin/release", None),
//! ];
//!
//! assert_eq!(merge_branches(&branches), vec!["main", "release (r)", "wip (l)"]);
//! ```

use std::collections::BTreeSet;

use crate::git::BranchRef;

/// Appended to names that exist only as remote-tracking branches.
pub const REMOTE_ONLY_SUFFIX: &str = " (r)";

/// Appended to names that exist only locally.
pub const LOCAL_ONLY_SUFFIX: &str = " (l)";

/// The only remote prefix that is normalized away.
const DEFAULT_REMOTE_PREFIX: &str = "origin/";

/// Name a remote-tracking branch contributes to the catalog.
///
/// Returns `None` for symbolic `HEAD` entries.
pub fn catalog_name(remote_name: &str) -> Option<&str> {
    if remote_name.contains("HEAD") {
        return None;
    }
    Some(
        remote_name
            .strip_prefix(DEFAULT_REMOTE_PREFIX)
            .unwrap_or(remote_name),
    )
}

/// Build the deduplicated, annotated, sorted branch catalog.
pub fn merge_branches(branches: &[BranchRef]) -> Vec<String> {
    let local: BTreeSet<&str> = branches
        .iter()
        .filter(|b| !b.is_remote)
        .map(|b| b.name.as_str())
        .collect();
    let remote: BTreeSet<&str> = branches
        .iter()
        .filter(|b| b.is_remote)
        .filter_map(|b| catalog_name(&b.name))
        .collect();

    let mut catalog: Vec<String> = local
        .union(&remote)
        .map(|name| match (local.contains(name), remote.contains(name)) {
            (true, true) => name.to_string(),
            (false, _) => format!("{name}{REMOTE_ONLY_SUFFIX}"),
            (true, false) => format!("{name}{LOCAL_ONLY_SUFFIX}"),
        })
        .collect();

    // Annotation can reorder names relative to the set order ("a-b" vs "a (l)").
    catalog.sort();
    catalog.dedup();
    catalog
}

/// Raw friendly names of every branch, in store order.
pub fn all_names(branches: &[BranchRef]) -> Vec<String> {
    branches.iter().map(|b| b.name.clone()).collect()
}

/// Raw friendly names of local branches, in store order.
pub fn local_names(branches: &[BranchRef]) -> Vec<String> {
    branches
        .iter()
        .filter(|b| !b.is_remote)
        .map(|b| b.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(name: &str) -> BranchRef {
        BranchRef::local(name, None)
    }

    fn remote(name: &str) -> BranchRef {
        BranchRef::remote(name, None)
    }

    mod catalog_name {
        use super::*;

        #[test]
        fn strips_origin_prefix_once() {
            assert_eq!(catalog_name("origin/main"), Some("main"));
            assert_eq!(catalog_name("origin/origin/x"), Some("origin/x"));
        }

        #[test]
        fn keeps_other_remotes() {
            assert_eq!(catalog_name("upstream/main"), Some("upstream/main"));
        }

        #[test]
        fn drops_head_entries() {
            assert_eq!(catalog_name("origin/HEAD"), None);
            assert_eq!(catalog_name("upstream/HEAD"), None);
            // The check is a plain substring match.
            assert_eq!(catalog_name("origin/fix-HEAD-parse"), None);
        }
    }

    mod merge {
        use super::*;

        #[test]
        fn empty_input_gives_empty_catalog() {
            assert!(merge_branches(&[]).is_empty());
        }

        #[test]
        fn shared_name_appears_once_unannotated() {
            let catalog = merge_branches(&[local("main"), remote("origin/main")]);
            assert_eq!(catalog, vec!["main"]);
        }

        #[test]
        fn annotates_one_sided_names() {
            let catalog = merge_branches(&[local("only-here"), remote("origin/only-there")]);
            assert_eq!(catalog, vec!["only-here (l)", "only-there (r)"]);
        }

        #[test]
        fn non_origin_remote_does_not_merge() {
            let catalog = merge_branches(&[local("main"), remote("upstream/main")]);
            assert_eq!(catalog, vec!["main (l)", "upstream/main (r)"]);
        }

        #[test]
        fn duplicate_remote_after_stripping_collapses() {
            // origin/feature and a remote literally named "feature" both strip to "feature".
            let catalog = merge_branches(&[remote("origin/feature"), remote("feature")]);
            assert_eq!(catalog, vec!["feature (r)"]);
        }

        #[test]
        fn sorted_by_rendered_string() {
            let catalog = merge_branches(&[
                local("b"),
                remote("origin/b"),
                local("a"),
                remote("origin/c"),
                local("B"),
            ]);
            assert_eq!(catalog, vec!["B (l)", "a (l)", "b", "c (r)"]);
        }

        #[test]
        fn head_pointer_is_excluded() {
            let catalog = merge_branches(&[local("main"), remote("origin/HEAD")]);
            assert_eq!(catalog, vec!["main (l)"]);
        }
    }

    #[test]
    fn raw_name_lists_keep_store_order() {
        let branches = [local("z"), remote("origin/z"), local("a")];
        assert_eq!(all_names(&branches), vec!["z", "origin/z", "a"]);
        assert_eq!(local_names(&branches), vec!["z", "a"]);
    }
}
