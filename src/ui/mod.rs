//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All terminal output from command handlers goes through this module so
//! the quiet flag is honoured in one place. Diagnostics go through
//! `tracing` instead.

pub mod output;
