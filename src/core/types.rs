//! core::types
//!
//! Strong types for the values that cross the git doorway.
//!
//! # Types
//!
//! - [`BranchName`] - Branch name accepted for checkout
//! - [`Oid`] - Git object identifier (SHA)
//!
//! Both validate at construction time, so a checkout request or a tip hash
//! that made it past the constructor is well-formed.
//!
//! # Examples
//!
//! ```
//! use repolens::core::types::{BranchName, Oid};
//!
//! let branch = BranchName::new("feature/login").unwrap();
//! let oid = Oid::new("abc123def4567890abc123def4567890abc12345").unwrap();
//! assert_eq!(branch.as_str(), "feature/login");
//! assert_eq!(oid.short(7), "abc123d");
//!
//! assert!(BranchName::new("bad..name").is_err());
//! assert!(Oid::new("not-a-sha").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid object id: {0}")]
    InvalidOid(String),
}

/// A branch name that satisfies git's refname rules.
///
/// Remote-tracking names such as `origin/feature` are valid branch names
/// too; the checkout resolver decides what kind of branch a name refers to.
///
/// # Example
///
/// ```
/// use repolens::core::types::BranchName;
///
/// assert!(BranchName::new("origin/feature-x").is_ok());
/// assert!(BranchName::new("").is_err());
/// assert!(BranchName::new("has space").is_err());
/// assert!(BranchName::new("@").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Characters git refuses anywhere in a refname.
    const FORBIDDEN_CHARS: [char; 8] = [' ', '~', '^', ':', '\\', '?', '*', '['];

    /// Sequences git refuses anywhere in a refname.
    const FORBIDDEN_SEQUENCES: [&'static str; 3] = ["..", "@{", "//"];

    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` if the name violates git's refname rules.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if let Some(problem) = Self::problem(&name) {
            return Err(TypeError::InvalidBranchName(problem));
        }
        Ok(Self(name))
    }

    /// Describe the first rule `name` breaks, if any.
    fn problem(name: &str) -> Option<String> {
        if name.is_empty() {
            return Some("branch name cannot be empty".into());
        }
        if name == "@" {
            return Some("branch name cannot be '@'".into());
        }
        if name.starts_with('-') {
            return Some("branch name cannot start with '-'".into());
        }
        if name.ends_with('/') {
            return Some("branch name cannot end with '/'".into());
        }
        if let Some(seq) = Self::FORBIDDEN_SEQUENCES
            .iter()
            .find(|seq| name.contains(**seq))
        {
            return Some(format!("branch name cannot contain '{seq}'"));
        }
        if let Some(c) = name
            .chars()
            .find(|c| Self::FORBIDDEN_CHARS.contains(c) || c.is_ascii_control())
        {
            return Some(format!("branch name cannot contain {c:?}"));
        }
        // Per-component rules: `.hidden` and `x.lock` are refused at every level.
        name.split('/')
            .find(|component| component.starts_with('.') || component.ends_with(".lock"))
            .map(|component| format!("invalid path component '{component}'"))
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A git object identifier (SHA-1 or SHA-256), normalized to lowercase.
///
/// # Example
///
/// ```
/// use repolens::core::types::Oid;
///
/// let oid = Oid::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
/// assert_eq!(oid.as_str(), "abc123def4567890abc123def4567890abc12345");
/// assert_eq!(oid.short(4), "abc1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(String);

impl Oid {
    /// Create a new validated object id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOid` unless the input is 40 or 64 hex digits.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        if oid.len() != 40 && oid.len() != 64 {
            return Err(TypeError::InvalidOid(format!(
                "expected 40 or 64 hex characters, got {}",
                oid.len()
            )));
        }
        if !oid.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidOid("object id must be hexadecimal".into()));
        }
        Ok(Self(oid))
    }

    /// Abbreviated form: the first `len` characters (or the whole id).
    pub fn short(&self, len: usize) -> &str {
        &self.0[..len.min(self.0.len())]
    }

    /// Get the object id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Oid {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> Self {
        oid.0
    }
}

impl AsRef<str> for Oid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
