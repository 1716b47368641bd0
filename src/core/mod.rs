//! core
//!
//! Core domain types and the pure reconciliation logic of repolens.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName, Oid
//! - [`head`] - Classifying HEAD and picking its display name
//! - [`branches`] - Merging local and remote branches into one catalog
//! - [`urls`] - Browse URLs from remote URLs
//! - [`snapshot`] - The snapshot value returned by a status read
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Everything except [`config`] is pure and infallible past validation
//! - Strong typing prevents invalid states at compile time

pub mod branches;
pub mod config;
pub mod head;
pub mod snapshot;
pub mod types;
pub mod urls;
