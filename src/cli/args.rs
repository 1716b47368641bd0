//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// repolens - Branch topology and sync state of a git working copy
#[derive(Parser, Debug)]
#[command(name = "rlens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if rlens was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show branch, divergence and working tree state
    #[command(
        name = "status",
        long_about = "Show the state of the working copy enclosing PATH.\n\n\
            Reports the current branch (or the tag / commit when detached), how far \
            it is ahead of and behind its upstream, working tree counters, stashes \
            and browse URLs for every remote. If the repository is busy (another git \
            process holds a lock), the read is retried a few times before giving up.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Status of the current directory
    rlens status

    # Status of another checkout
    rlens status ~/src/app

    # Machine-readable snapshot for scripts
    rlens status --json | jq .ahead_by"
    )]
    Status {
        /// Any path inside the working copy (default: current directory)
        path: Option<PathBuf>,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// List local and remote branches as one catalog
    #[command(
        name = "branches",
        long_about = "List local and remote-tracking branches merged into one catalog.\n\n\
            A branch present both locally and on origin is listed once. Branches that \
            only exist on a remote are marked (r), branches that only exist locally \
            are marked (l)."
    )]
    Branches {
        /// Any path inside the working copy (default: current directory)
        path: Option<PathBuf>,
    },

    /// Open the current branch on the remote's web interface
    Browse {
        /// Any path inside the working copy (default: current directory)
        path: Option<PathBuf>,

        /// Print the URLs instead of opening one
        #[arg(long)]
        print: bool,

        /// Which URL to open, counted from 0
        #[arg(long, default_value_t = 0)]
        index: usize,
    },

    /// Switch to a branch, creating it from a remote branch if needed
    #[command(
        name = "checkout",
        long_about = "Switch to BRANCH.\n\n\
            If a local branch with that exact name exists, rlens switches to it. \
            Otherwise the first remote-tracking branch ending in BRANCH is used: a \
            local branch is created at its tip, set to track it, and checked out.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Switch to an existing local branch
    rlens checkout develop

    # Start working on a branch a teammate pushed
    rlens fetch && rlens checkout feature/login"
    )]
    Checkout {
        /// Branch to check out
        branch: String,
    },

    /// Fetch from all remotes
    Fetch {
        /// Remove remote-tracking branches deleted on the remote
        /// (default: prune_on_fetch from config)
        #[arg(long)]
        prune: bool,
    },

    /// Pull the current branch
    Pull,

    /// Push the current branch
    Push,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    # Bash
    rlens completion bash > ~/.local/share/bash-completion/completions/rlens

    # Zsh
    rlens completion zsh > ~/.zfunc/_rlens

    # Fish
    rlens completion fish > ~/.config/fish/completions/rlens.fish

    # PowerShell
    rlens completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
