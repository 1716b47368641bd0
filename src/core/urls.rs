//! core::urls
//!
//! Browse URLs derived from remote URLs. Pure string rewriting, no network.
//!
//! - SSH remotes (`git@host:group/proj.git` or `ssh://git@host/group/proj.git`)
//!   become two `https://host/group/proj` links: the commit history of the
//!   current branch and the list of all branches.
//! - Anything else (normally `http(s)://`) becomes one link to the current
//!   branch's tree.
//!
//! Malformed URLs are rewritten on a best-effort basis, never rejected.
//! Remotes with an empty URL contribute nothing.
//!
//! # Example
//!
//! ```
//! use repolens::core::urls::remote_browse_urls;
//!
//! assert_eq!(
//!     remote_browse_urls("git@gitlab.example.com:team/app.git", "main"),
//!     vec![
//!         "https://gitlab.example.com/team/app/-/commits/main",
//!         "https://gitlab.example.com/team/app/-/branches/all",
//!     ]
//! );
//! assert_eq!(
//!     remote_browse_urls("https://github.com/team/app.git", "main"),
//!     vec!["https://github.com/team/app/tree/main"]
//! );
//! ```

use crate::git::RemoteRef;

/// Path appended to SSH-derived URLs to show a branch's history.
const COMMITS_PATH: &str = "/-/commits/";

/// Path appended to SSH-derived URLs to list every branch.
const ALL_BRANCHES_PATH: &str = "/-/branches/all";

/// Path appended to HTTP URLs to show a branch's tree.
const TREE_PATH: &str = "/tree/";

/// Browse URLs for every remote, in remote order.
pub fn browse_urls(remotes: &[RemoteRef], branch: &str) -> Vec<String> {
    remotes
        .iter()
        .flat_map(|remote| remote_browse_urls(&remote.url, branch))
        .collect()
}

/// Browse URLs for a single remote URL (zero, one or two entries).
pub fn remote_browse_urls(url: &str, branch: &str) -> Vec<String> {
    let url = url.trim();
    if url.is_empty() {
        return Vec::new();
    }

    match ssh_web_base(url) {
        Some(base) => vec![
            format!("{base}{COMMITS_PATH}{branch}"),
            format!("{base}{ALL_BRANCHES_PATH}"),
        ],
        None => vec![format!("{}{TREE_PATH}{branch}", strip_git_suffix(url))],
    }
}

/// `https://host/path` for an SSH remote, or `None` if `url` is not SSH.
fn ssh_web_base(url: &str) -> Option<String> {
    let (host, path) = if let Some(rest) = url.strip_prefix("ssh://") {
        // ssh://[user@]host[:port]/path
        let (authority, path) = rest.split_once('/')?;
        let host = after_user(authority);
        let host = host.split_once(':').map_or(host, |(h, _port)| h);
        (host, path)
    } else if url.contains("://") {
        return None;
    } else {
        // scp-like shorthand: user@host:path
        let (authority, path) = url.split_once(':')?;
        if !authority.contains('@') {
            return None;
        }
        (after_user(authority), path)
    };

    if host.is_empty() {
        return None;
    }

    let path = strip_git_suffix(path.trim_start_matches('/'));
    Some(format!("https://{host}/{path}"))
}

/// Host part of `user@host`.
fn after_user(authority: &str) -> &str {
    authority
        .rsplit_once('@')
        .map_or(authority, |(_user, host)| host)
}

/// Drop a trailing `/` and then a trailing `.git`.
fn strip_git_suffix(url: &str) -> &str {
    let url = url.trim_end_matches('/');
    url.strip_suffix(".git").unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(name: &str, url: &str) -> RemoteRef {
        RemoteRef {
            name: name.into(),
            url: url.into(),
        }
    }

    mod ssh {
        use super::*;

        #[test]
        fn shorthand_yields_two_https_urls() {
            let urls = remote_browse_urls("git@host:group/proj.git", "feature/x");
            assert_eq!(
                urls,
                vec![
                    "https://host/group/proj/-/commits/feature/x",
                    "https://host/group/proj/-/branches/all",
                ]
            );
            assert!(urls.iter().all(|u| !u.contains(".git")));
        }

        #[test]
        fn shorthand_without_git_suffix() {
            let urls = remote_browse_urls("git@host:group/proj", "main");
            assert_eq!(urls[0], "https://host/group/proj/-/commits/main");
        }

        #[test]
        fn other_user_names_are_dropped() {
            let urls = remote_browse_urls("deploy@git.example.org:ops/infra.git", "main");
            assert_eq!(urls[1], "https://git.example.org/ops/infra/-/branches/all");
        }

        #[test]
        fn only_trailing_git_is_stripped() {
            let urls = remote_browse_urls("git@host:team/my.github.io.git", "main");
            assert_eq!(urls[1], "https://host/team/my.github.io/-/branches/all");
        }

        #[test]
        fn ssh_scheme_with_port() {
            let urls = remote_browse_urls("ssh://git@host:2222/group/proj.git", "dev");
            assert_eq!(
                urls,
                vec![
                    "https://host/group/proj/-/commits/dev",
                    "https://host/group/proj/-/branches/all",
                ]
            );
        }
    }

    mod http {
        use super::*;

        #[test]
        fn https_yields_one_tree_url() {
            assert_eq!(
                remote_browse_urls("https://host/group/proj.git", "main"),
                vec!["https://host/group/proj/tree/main"]
            );
        }

        #[test]
        fn trailing_slash_is_tolerated() {
            assert_eq!(
                remote_browse_urls("https://host/group/proj/", "main"),
                vec!["https://host/group/proj/tree/main"]
            );
        }

        #[test]
        fn uses_detached_display_name() {
            assert_eq!(
                remote_browse_urls("http://host/proj.git", "v1.2.0"),
                vec!["http://host/proj/tree/v1.2.0"]
            );
        }
    }

    mod malformed {
        use super::*;

        #[test]
        fn local_path_gets_best_effort_tree_url() {
            assert_eq!(
                remote_browse_urls("/srv/git/proj.git", "main"),
                vec!["/srv/git/proj/tree/main"]
            );
        }

        #[test]
        fn colon_without_user_is_not_ssh() {
            assert_eq!(
                remote_browse_urls("host:proj.git", "main"),
                vec!["host:proj/tree/main"]
            );
        }

        #[test]
        fn empty_url_yields_nothing() {
            assert!(remote_browse_urls("", "main").is_empty());
            assert!(remote_browse_urls("   ", "main").is_empty());
        }
    }

    #[test]
    fn follows_remote_order() {
        let remotes = [
            remote("origin", "git@host:a/b.git"),
            remote("mirror", "https://mirror/a/b.git"),
            remote("broken", ""),
        ];
        assert_eq!(
            browse_urls(&remotes, "main"),
            vec![
                "https://host/a/b/-/commits/main",
                "https://host/a/b/-/branches/all",
                "https://mirror/a/b/tree/main",
            ]
        );
    }
}
