//! core::head
//!
//! Identity of the current position in the repository.
//!
//! The kind of head (branch or detached) comes straight from [`HeadRef`]'s
//! variant. For a detached head the display name prefers, in order:
//!
//! 1. the first tag (enumeration order) whose commit equals the tip
//! 2. the tip's full hash
//! 3. the reference's own name
//!
//! Several tags on one commit are not told apart: the first one
//! enumerated wins.

use crate::git::{HeadRef, TagRef};

/// Resolved identity of HEAD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadDetails {
    /// Display name: branch, tag, hash, or raw head name
    pub name: String,
    pub is_detached: bool,
    /// Detached and sitting exactly on a tagged commit
    pub is_on_tag: bool,
}

/// Classify `head` and pick its display name.
///
/// # Example
///
/// ```
/// use repolens::core::head::resolve_head;
/// use repolens::core::types::Oid;
/// use repolens::git::{HeadRef, TagRef};
///
/// let tip = Oid::new("a".repeat(40)).unwrap();
/// let head = HeadRef::Detached { name: "HEAD".into(), tip: Some(tip.clone()) };
/// let tags = vec![TagRef { name: "v1.0".into(), target: Some(tip) }];
///
/// let details = resolve_head(&head, &tags);
/// assert_eq!(details.name, "v1.0");
/// assert!(details.is_detached && details.is_on_tag);
/// ```
pub fn resolve_head(head: &HeadRef, tags: &[TagRef]) -> HeadDetails {
    match head {
        HeadRef::Branch { name, .. } => HeadDetails {
            name: name.clone(),
            is_detached: false,
            is_on_tag: false,
        },
        HeadRef::Detached { name, tip } => {
            let tag = tip
                .as_ref()
                .and_then(|tip| tags.iter().find(|t| t.target.as_ref() == Some(tip)));

            let display = match (tag, tip) {
                (Some(tag), _) => tag.name.clone(),
                (None, Some(tip)) => tip.to_string(),
                (None, None) => name.clone(),
            };

            HeadDetails {
                name: display,
                is_detached: true,
                is_on_tag: tag.is_some(),
            }
        }
    }
}
